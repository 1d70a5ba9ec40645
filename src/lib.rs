//! Quiz Quest - A campus map quiz battler
//!
//! Core modules:
//! - `map`: Camera/character movement, line-segment collision, level zones
//! - `battle`: Question generation, turn timers, the battle state machine
//! - `game`: Screen flow tying map, battles and progression together
//! - `persistence`: Progress and custom question sets in a versioned JSON save
//! - `platform`: Clock and input abstraction
//! - `renderer`: Draw-command sink (the actual backend lives outside this crate)

pub mod audio;
pub mod authoring;
pub mod battle;
pub mod error;
pub mod game;
pub mod hero;
pub mod map;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;

pub use error::{QuizError, Result};
pub use game::{Game, GameAction};
pub use hero::Hero;
pub use settings::Settings;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Logical screen size in pixels
    pub const SCREEN_WIDTH: i32 = 1920;
    pub const SCREEN_HEIGHT: i32 = 1080;
    /// Frame cap for every mode loop
    pub const FPS: u32 = 60;
    pub const FRAME_DT: f64 = 1.0 / FPS as f64;

    /// Campus map size after scaling the source image 3x
    pub const MAP_WIDTH: i32 = 10560;
    pub const MAP_HEIGHT: i32 = 7920;
    /// How close the character may walk to the map edge
    pub const MAP_MARGIN: i32 = 20;

    /// Character walking speed (pixels per tick)
    pub const CHARACTER_SPEED: i32 = 9;
    /// Scaled hero sprite size, used for on-screen clamping
    pub const HERO_SPRITE_WIDTH: i32 = 80;
    pub const HERO_SPRITE_HEIGHT: i32 = 120;
    /// Seconds between walk animation frames
    pub const ANIMATION_COOLDOWN: f64 = 0.1;
    /// Spawning puts the character this far below screen center
    pub const SPAWN_SCREEN_OFFSET_Y: i32 = 50;

    /// Collision defaults
    pub const DEFAULT_LINE_WIDTH: f32 = 3.0;
    pub const DEFAULT_CHARACTER_RADIUS: f32 = 20.0;

    /// Level zones
    pub const MAX_LEVEL: u32 = 20;
    pub const SPAWN_ZONE_ID: u32 = 0;
    pub const ZONE_INTERACTION_RADIUS: f32 = 75.0;
    /// Zone sprite size on the scaled map
    pub const ZONE_SIZE: i32 = 90;

    /// Battle rules
    pub const PLAYER_MAX_HP: u32 = 10;
    pub const HIT_DAMAGE: u32 = 1;
    pub const MIN_CUSTOM_QUESTIONS: usize = 10;
    pub const PVP_TIMER_SECONDS: f64 = 15.0;
    pub const CUSTOM_TIMER_SECONDS: f64 = 60.0;
    /// Battle banners stay up this long
    pub const MESSAGE_SECONDS: f64 = 2.0;
    /// Delay between a decided battle and returning to the previous screen
    pub const BATTLE_CLOSE_SECONDS: f64 = 2.0;
}

/// Center of the logical screen
#[inline]
pub fn screen_center() -> IVec2 {
    IVec2::new(consts::SCREEN_WIDTH / 2, consts::SCREEN_HEIGHT / 2)
}

/// Logical screen size as a vector
#[inline]
pub fn screen_size() -> IVec2 {
    IVec2::new(consts::SCREEN_WIDTH, consts::SCREEN_HEIGHT)
}

