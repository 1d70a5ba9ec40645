//! Rendering interface
//!
//! The game core holds no rendering state. Every screen describes itself as a
//! sequence of draw calls against a [`Canvas`]; the window/backend that turns
//! those into pixels lives outside this crate. [`CommandList`] records the calls
//! and is what the headless binary and the tests use.

pub mod shapes;

use glam::{IVec2, Vec2};

use crate::battle::{CoinFace, EnemyKind};
use crate::hero::{Facing, Hero, Pose};

/// RGBA color, components in 0.0 - 1.0
pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
pub const GOLD: Color = [1.0, 0.84, 0.0, 1.0];

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    pub fn center(&self) -> IVec2 {
        self.pos + self.size / 2
    }

    /// Half-open containment, matching how pointer hit-tests usually work
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.pos.x
            && point.y >= self.pos.y
            && point.x < self.pos.x + self.size.x
            && point.y < self.pos.y + self.size.y
    }

    /// Grow the rectangle by `by` pixels on every side
    pub fn inflate(&self, by: i32) -> Self {
        Self {
            pos: self.pos - IVec2::splat(by),
            size: self.size + IVec2::splat(by * 2),
        }
    }
}

/// Images the backend knows how to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    CampusMap,
    MapHero { hero: Hero, facing: Facing, pose: Pose },
    Zone { id: u32, locked: bool },
    EnterButton,
    BattleBackground { level: u32 },
    BattleHero { hero: Hero, flipped: bool },
    Enemy(EnemyKind),
    Coin(CoinFace),
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Sprite { sprite: Sprite, pos: IVec2 },
    Rect { rect: Rect, color: Color },
    Line { start: Vec2, end: Vec2, width: f32, color: Color },
    Text { text: String, center: IVec2, color: Color },
}

/// Draw sink implemented by the rendering backend
pub trait Canvas {
    fn clear(&mut self, color: Color);
    /// Draw a sprite with its top-left corner at `pos`
    fn sprite(&mut self, sprite: Sprite, pos: IVec2);
    fn rect(&mut self, rect: Rect, color: Color);
    fn line(&mut self, start: Vec2, end: Vec2, width: f32, color: Color);
    /// Draw text centered on `center`
    fn text(&mut self, text: &str, center: IVec2, color: Color);
}

/// Canvas that just records what was drawn
#[derive(Debug, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// All text drawn this frame, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    pub fn sprites(&self) -> impl Iterator<Item = (&Sprite, IVec2)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite { sprite, pos } => Some((sprite, *pos)),
            _ => None,
        })
    }
}

impl Canvas for CommandList {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn sprite(&mut self, sprite: Sprite, pos: IVec2) {
        self.commands.push(DrawCommand::Sprite { sprite, pos });
    }

    fn rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn line(&mut self, start: Vec2, end: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            start,
            end,
            width,
            color,
        });
    }

    fn text(&mut self, text: &str, center: IVec2, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            center,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(IVec2::new(10, 10)));
        assert!(r.contains(IVec2::new(29, 29)));
        assert!(!r.contains(IVec2::new(30, 15)));
        assert_eq!(r.center(), IVec2::new(20, 20));
    }

    #[test]
    fn test_command_list_records_text() {
        let mut list = CommandList::new();
        list.text("Level 1", IVec2::ZERO, WHITE);
        list.rect(Rect::new(0, 0, 1, 1), RED);
        assert!(list.has_text("Level"));
        assert_eq!(list.commands.len(), 2);
    }
}
