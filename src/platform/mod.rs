//! Platform abstraction layer
//!
//! Handles the parts that differ between a real window and tests:
//! - Time (wall clock vs. a manually advanced clock)
//! - Input events folded into per-frame snapshots

pub mod clock;
pub mod input;

pub use clock::{Clock, ManualClock, SystemClock};
pub use input::{FrameInput, InputEvent, InputState, Key, MovementKeys};
