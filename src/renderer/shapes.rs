//! Composite HUD primitives built from canvas calls

use glam::IVec2;

use super::{Canvas, Color, Rect, BLACK, GREEN, RED, WHITE};

pub const HEALTH_BAR_WIDTH: i32 = 200;
pub const HEALTH_BAR_HEIGHT: i32 = 20;

/// Width of the filled part of a health bar
pub fn health_fill_width(hp: u32, max_hp: u32, bar_width: i32) -> i32 {
    if max_hp == 0 {
        return 0;
    }
    let fraction = (hp as f32 / max_hp as f32).clamp(0.0, 1.0);
    (bar_width as f32 * fraction) as i32
}

/// Red background, green fill, "hp/max HP" caption
pub fn health_bar(canvas: &mut dyn Canvas, top_left: IVec2, hp: u32, max_hp: u32) {
    let back = Rect {
        pos: top_left,
        size: IVec2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT),
    };
    canvas.rect(back, RED);

    let fill = Rect {
        pos: top_left,
        size: IVec2::new(
            health_fill_width(hp, max_hp, HEALTH_BAR_WIDTH),
            HEALTH_BAR_HEIGHT,
        ),
    };
    canvas.rect(fill, GREEN);
    canvas.text(&format!("{hp}/{max_hp} HP"), back.center(), WHITE);
}

/// Text on a dark box padded by 10 px
pub fn banner(canvas: &mut dyn Canvas, text: &str, center: IVec2, text_color: Color) {
    // Rough glyph metrics for the pixel font: 24 px per character, 40 px tall
    let width = text.chars().count() as i32 * 24;
    let rect = Rect {
        pos: center - IVec2::new(width / 2, 20),
        size: IVec2::new(width, 40),
    };
    canvas.rect(rect.inflate(10), BLACK);
    canvas.text(text, center, text_color);
}

/// Filled button with a centered caption
pub fn button(canvas: &mut dyn Canvas, rect: Rect, caption: &str, fill: Color) {
    canvas.rect(rect, fill);
    canvas.text(caption, rect.center(), WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CommandList, DrawCommand};

    #[test]
    fn test_health_fill_width() {
        assert_eq!(health_fill_width(10, 10, 200), 200);
        assert_eq!(health_fill_width(5, 10, 200), 100);
        assert_eq!(health_fill_width(0, 10, 200), 0);
        assert_eq!(health_fill_width(3, 0, 200), 0);
    }

    #[test]
    fn test_health_bar_draws_two_rects_and_caption() {
        let mut list = CommandList::new();
        health_bar(&mut list, IVec2::new(100, 100), 4, 8);
        let rects = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count();
        assert_eq!(rects, 2);
        assert!(list.has_text("4/8 HP"));
    }
}
