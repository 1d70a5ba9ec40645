//! Campus map module
//!
//! Everything that happens while the player walks around:
//! - Camera-following movement with per-axis validity checks
//! - Line-segment obstacles with a circular character body
//! - Level zones and the proximity trigger that opens a battle

pub mod barriers;
pub mod collision;
pub mod movement;
pub mod state;
pub mod zones;

pub use barriers::{CAMPUS_CHARACTER_RADIUS, campus_barriers};
pub use collision::{CollisionHandler, CollisionSegment, point_segment_distance};
pub use movement::{CameraMovementController, MapBounds, MovementConfig, resolve_axis};
pub use state::{MapEvent, MapState, spawn_screen_position};
pub use zones::{Zone, ZoneSet};
