//! Character movement with a recentering camera
//!
//! The character has a screen position and the map has a scroll offset, with
//! `world = screen - offset`. Each tick the directional input is turned into
//! either character displacement or map scroll:
//!
//! - centered character: scroll the map if the new offset stays in bounds,
//!   otherwise walk the character;
//! - off-center, walking toward center: walk; on crossing the center line snap
//!   back to center and hand the overshoot to the map;
//! - off-center, walking away: walk only, the map stays put.
//!
//! So the character walks to the edge of the screen once the map can't scroll
//! any further, and comes back to center before the map scrolls again.

use glam::IVec2;

use super::collision::CollisionHandler;
use crate::consts::{
    ANIMATION_COOLDOWN, CHARACTER_SPEED, HERO_SPRITE_HEIGHT, HERO_SPRITE_WIDTH, MAP_MARGIN,
};
use crate::hero::{Facing, Hero, Pose};
use crate::platform::MovementKeys;
use crate::renderer::{Canvas, Sprite};

/// Allowed range of the map scroll offset plus the map size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapBounds {
    pub min_offset: IVec2,
    pub max_offset: IVec2,
    pub map_size: IVec2,
}

impl MapBounds {
    /// Offset range `[screen - map, 0]` on each axis
    pub fn new(map_size: IVec2, screen: IVec2) -> Self {
        Self {
            min_offset: screen - map_size,
            max_offset: IVec2::ZERO,
            map_size,
        }
    }

    pub fn clamp_offset(&self, offset: IVec2) -> IVec2 {
        offset.min(self.max_offset).max(self.min_offset)
    }

    pub fn contains_offset(&self, offset: IVec2) -> bool {
        self.clamp_offset(offset) == offset
    }
}

/// Tuning for the movement controller
#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    /// Pixels per tick
    pub speed: i32,
    /// Closest the character may get to the map edge
    pub margin: i32,
    /// Sprite size, for keeping the character fully on screen
    pub sprite_size: IVec2,
    /// Seconds between walk frames
    pub animation_cooldown: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: CHARACTER_SPEED,
            margin: MAP_MARGIN,
            sprite_size: IVec2::new(HERO_SPRITE_WIDTH, HERO_SPRITE_HEIGHT),
            animation_cooldown: ANIMATION_COOLDOWN,
        }
    }
}

/// Resolve movement along one axis.
///
/// Returns the new `(character, offset)` pair for that axis.
pub fn resolve_axis(
    character: i32,
    offset: i32,
    delta: i32,
    center: i32,
    min_offset: i32,
    max_offset: i32,
) -> (i32, i32) {
    if character == center {
        let scrolled = offset - delta;
        if (min_offset..=max_offset).contains(&scrolled) {
            return (character, scrolled);
        }
        return (character + delta, offset);
    }

    let toward_center = (character < center && delta > 0) || (character > center && delta < 0);
    if !toward_center {
        return (character + delta, offset);
    }

    let moved = character + delta;
    let crossed = (delta > 0 && moved > center) || (delta < 0 && moved < center);
    if !crossed {
        return (moved, offset);
    }

    let overshoot = (moved - center).abs();
    let scrolled = (offset - delta.signum() * overshoot)
        .min(max_offset)
        .max(min_offset);
    (center, scrolled)
}

/// Drives the map character: displacement, camera scroll and walk animation
#[derive(Debug, Clone)]
pub struct CameraMovementController {
    hero: Hero,
    config: MovementConfig,
    /// Screen position of the sprite center
    character: IVec2,
    facing: Facing,
    walking: bool,
    animation_frame: usize,
    last_animation_update: f64,
}

impl CameraMovementController {
    pub fn new(hero: Hero, character: IVec2, now: f64) -> Self {
        Self::with_config(hero, character, MovementConfig::default(), now)
    }

    pub fn with_config(hero: Hero, character: IVec2, config: MovementConfig, now: f64) -> Self {
        Self {
            hero,
            config,
            character,
            facing: Facing::Front,
            walking: false,
            animation_frame: 0,
            last_animation_update: now,
        }
    }

    pub fn hero(&self) -> Hero {
        self.hero
    }

    pub fn character(&self) -> IVec2 {
        self.character
    }

    pub fn set_character(&mut self, character: IVec2) {
        self.character = character;
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn animation_frame(&self) -> usize {
        self.animation_frame
    }

    /// Turn held keys into a per-tick displacement.
    ///
    /// Left beats right and up beats down. Both axes may move in the same
    /// tick; the sprite faces the vertical direction when both are held.
    fn read_keys(&mut self, keys: MovementKeys) -> IVec2 {
        let speed = self.config.speed;
        let mut delta = IVec2::ZERO;
        self.walking = false;

        if keys.left {
            delta.x = -speed;
            self.facing = Facing::Left;
            self.walking = true;
        } else if keys.right {
            delta.x = speed;
            self.facing = Facing::Right;
            self.walking = true;
        }

        if keys.up {
            delta.y = -speed;
            self.facing = Facing::Back;
            self.walking = true;
        } else if keys.down {
            delta.y = speed;
            self.facing = Facing::Front;
            self.walking = true;
        }

        delta
    }

    /// Advance one tick and return the new map offset.
    ///
    /// Each axis is validated on its own: the candidate world coordinate must
    /// stay `margin` pixels inside the map and, when obstacles are given, the
    /// character must not touch one. A blocked axis simply doesn't move.
    pub fn handle_movement(
        &mut self,
        keys: MovementKeys,
        map_offset: IVec2,
        bounds: &MapBounds,
        screen: IVec2,
        obstacles: Option<&CollisionHandler>,
        now: f64,
    ) -> IVec2 {
        let was_walking = self.walking;
        let delta = self.read_keys(keys);
        let mut offset = map_offset;

        if delta != IVec2::ZERO {
            let world = self.character - offset;
            let target = world + delta;
            let margin = self.config.margin;
            let blocked = |pos: IVec2| obstacles.is_some_and(|o| o.any_collision(pos.as_vec2()));

            let valid_x = delta.x != 0
                && (margin..=bounds.map_size.x - margin).contains(&target.x)
                && !blocked(IVec2::new(target.x, world.y));
            let valid_y = delta.y != 0
                && (margin..=bounds.map_size.y - margin).contains(&target.y)
                && !blocked(IVec2::new(world.x, target.y));

            let center = screen / 2;
            if valid_x {
                let (x, off) = resolve_axis(
                    self.character.x,
                    offset.x,
                    delta.x,
                    center.x,
                    bounds.min_offset.x,
                    bounds.max_offset.x,
                );
                self.character.x = x;
                offset.x = off;
            }
            if valid_y {
                let (y, off) = resolve_axis(
                    self.character.y,
                    offset.y,
                    delta.y,
                    center.y,
                    bounds.min_offset.y,
                    bounds.max_offset.y,
                );
                self.character.y = y;
                offset.y = off;
            }

            let half = self.config.sprite_size / 2;
            self.character = self.character.max(half).min(screen - half);
        }

        if was_walking != self.walking {
            self.animation_frame = 0;
            self.last_animation_update = now;
        } else {
            self.update_animation(now);
        }

        offset
    }

    /// Step the walk cycle once the cooldown has elapsed
    pub fn update_animation(&mut self, now: f64) {
        if now - self.last_animation_update < self.config.animation_cooldown {
            return;
        }
        self.last_animation_update = now;
        self.animation_frame = if self.walking {
            (self.animation_frame + 1) % 4
        } else {
            0
        };
    }

    /// Sprite frame for the current facing and animation step
    pub fn pose(&self) -> Pose {
        if !self.walking {
            return Pose::Stand;
        }
        self.hero.walk_cycle(self.facing)[self.animation_frame % 4]
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let sprite = Sprite::MapHero {
            hero: self.hero,
            facing: self.facing,
            pose: self.pose(),
        };
        canvas.sprite(sprite, self.character - self.config.sprite_size / 2);
    }
}
