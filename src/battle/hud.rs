//! Battle screen layout and drawing

use glam::IVec2;

use super::session::{Answer, BattleMode, BattleSession, PlayerSlot};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::shapes::{HEALTH_BAR_HEIGHT, HEALTH_BAR_WIDTH, banner, button, health_bar};
use crate::renderer::{BLACK, Canvas, Color, GOLD, GREEN, Rect, Sprite, WHITE};

pub const ANSWER_BUTTON_WIDTH: i32 = 200;
pub const ANSWER_BUTTON_HEIGHT: i32 = 60;
pub const ANSWER_BUTTON_MARGIN: i32 = 20;

const BUTTON_FILL: Color = [0.2, 0.2, 0.78, 1.0];
const PVP_BACKGROUND: Color = [0.2, 0.2, 0.4, 1.0];
const PLAYER_TWO_TURN: Color = [0.0, 0.78, 1.0, 1.0];

const HERO_POS: IVec2 = IVec2::new(300, 400);
const ENEMY_POS: IVec2 = IVec2::new(1200, 400);
const PVP_RIGHT_POS: IVec2 = IVec2::new(SCREEN_WIDTH - 475, 400);

/// One button per choice, centered in a row near the bottom
pub fn answer_buttons(count: usize) -> Vec<Rect> {
    let stride = ANSWER_BUTTON_WIDTH + ANSWER_BUTTON_MARGIN;
    let start_x = (SCREEN_WIDTH - stride * count as i32) / 2;
    (0..count as i32)
        .map(|i| {
            Rect::new(
                start_x + i * stride,
                SCREEN_HEIGHT - 150,
                ANSWER_BUTTON_WIDTH,
                ANSWER_BUTTON_HEIGHT,
            )
        })
        .collect()
}

/// Text box for free-text answers
pub fn answer_input_box() -> Rect {
    Rect::new(SCREEN_WIDTH / 2 - 300, SCREEN_HEIGHT - 150, 600, 60)
}

fn question_box() -> Rect {
    Rect::new(50, SCREEN_HEIGHT - 300, SCREEN_WIDTH - 100, 200)
}

/// Answer under a click, if it hit a button
pub fn answer_at(session: &BattleSession, click: IVec2) -> Option<Answer> {
    let choices = session.question().choices();
    answer_buttons(choices.len())
        .iter()
        .zip(choices)
        .find(|(rect, _)| rect.contains(click))
        .map(|(_, &choice)| Answer::Choice(choice))
}

/// Draw the whole battle screen. `typed` is the text entry buffer.
pub fn draw(session: &BattleSession, canvas: &mut dyn Canvas, typed: &str, now: f64) {
    let center_x = SCREEN_WIDTH / 2;
    let bar_y = SCREEN_HEIGHT - HEALTH_BAR_HEIGHT - 320;

    match session.mode() {
        BattleMode::Pvp { heroes } => {
            canvas.clear(PVP_BACKGROUND);
            canvas.sprite(
                Sprite::BattleHero {
                    hero: heroes[0],
                    flipped: false,
                },
                HERO_POS,
            );
            canvas.sprite(
                Sprite::BattleHero {
                    hero: heroes[1],
                    flipped: true,
                },
                PVP_RIGHT_POS,
            );
            for (slot, x) in [
                (PlayerSlot::One, SCREEN_WIDTH / 4),
                (PlayerSlot::Two, 3 * SCREEN_WIDTH / 4),
            ] {
                let side = session.combatant(slot);
                canvas.text(&format!("Player {}", slot.number()), IVec2::new(x, 30), WHITE);
                health_bar(
                    canvas,
                    IVec2::new(x - HEALTH_BAR_WIDTH / 2, 50),
                    side.hp,
                    side.max_hp,
                );
            }
            let owner = session.turn_owner();
            let color = match owner {
                PlayerSlot::One => GREEN,
                PlayerSlot::Two => PLAYER_TWO_TURN,
            };
            banner(
                canvas,
                &format!("Player {}'s Turn", owner.number()),
                IVec2::new(center_x, 100),
                color,
            );
        }
        mode => {
            let level = match mode {
                BattleMode::Campaign { level } => *level,
                _ => 1,
            };
            canvas.clear(BLACK);
            canvas.sprite(Sprite::BattleBackground { level }, IVec2::ZERO);
            canvas.sprite(
                Sprite::BattleHero {
                    hero: session.hero(),
                    flipped: false,
                },
                HERO_POS,
            );
            if let Some(kind) = session.enemy_kind() {
                canvas.sprite(Sprite::Enemy(kind), ENEMY_POS);
            }
            let player = session.player();
            let enemy = session.enemy();
            health_bar(canvas, IVec2::new(100, bar_y), player.hp, player.max_hp);
            health_bar(
                canvas,
                IVec2::new(SCREEN_WIDTH - HEALTH_BAR_WIDTH - 100, bar_y),
                enemy.hp,
                enemy.max_hp,
            );
        }
    }

    banner(
        canvas,
        &format!("Time: {}", session.time_left() as u32),
        IVec2::new(center_x, 50),
        WHITE,
    );

    if let Some((current, total)) = session.progress() {
        canvas.text(
            &format!("Question {current}/{total}"),
            IVec2::new(center_x, 150),
            WHITE,
        );
    }

    let qbox = question_box();
    canvas.rect(qbox, BLACK);
    canvas.text(
        session.question().prompt(),
        IVec2::new(center_x, SCREEN_HEIGHT - 250),
        WHITE,
    );

    if !session.is_paused() && !session.is_finished() {
        let choices = session.question().choices();
        if choices.is_empty() {
            let input = answer_input_box();
            canvas.rect(input, BLACK);
            canvas.text(typed, input.center(), WHITE);
        } else {
            for (rect, choice) in answer_buttons(choices.len()).into_iter().zip(choices) {
                button(canvas, rect, &choice.to_string(), BUTTON_FILL);
            }
        }
    }

    if let Some(message) = session.message(now) {
        banner(canvas, message, IVec2::new(center_x, SCREEN_HEIGHT / 2 - 50), GOLD);
    }

    if session.is_paused() {
        banner(canvas, "PAUSED", IVec2::new(center_x, SCREEN_HEIGHT / 2), WHITE);
    }
}
