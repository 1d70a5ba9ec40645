//! Coin toss deciding who opens a PvP battle

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::session::PlayerSlot;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::shapes::button;
use crate::renderer::{Canvas, Color, GOLD, GREEN, Rect, Sprite, WHITE};
use crate::screen_center;

/// Flips shown before the coin settles
pub const MAX_FLIPS: u32 = 10;
/// Seconds between flips
pub const FLIP_DELAY: f64 = 0.1;

const HEADS_FILL: Color = [0.2, 0.2, 0.78, 1.0];
const TAILS_FILL: Color = [0.78, 0.2, 0.2, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinFace {
    Heads,
    Tails,
}

impl CoinFace {
    pub fn flipped(&self) -> Self {
        match self {
            CoinFace::Heads => CoinFace::Tails,
            CoinFace::Tails => CoinFace::Heads,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CoinFace::Heads => "HEADS",
            CoinFace::Tails => "TAILS",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TossPhase {
    AwaitingCall,
    Flipping { flips: u32, last_flip: f64 },
    Done { first: PlayerSlot },
}

/// Player 1 calls a face, the coin flips a few times and settles on a
/// result rolled when the call was made
#[derive(Debug, Clone)]
pub struct CoinToss {
    phase: TossPhase,
    call: Option<CoinFace>,
    result: CoinFace,
    showing: CoinFace,
}

impl Default for CoinToss {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinToss {
    pub fn new() -> Self {
        Self {
            phase: TossPhase::AwaitingCall,
            call: None,
            result: CoinFace::Heads,
            showing: CoinFace::Heads,
        }
    }

    pub fn heads_button() -> Rect {
        Rect::new(SCREEN_WIDTH / 4 - 100, SCREEN_HEIGHT / 2 + 100, 275, 80)
    }

    pub fn tails_button() -> Rect {
        Rect::new(3 * SCREEN_WIDTH / 4 - 100, SCREEN_HEIGHT / 2 + 100, 275, 80)
    }

    /// Player 1 picks a face; ignored once a call has been made
    pub fn call(&mut self, face: CoinFace, now: f64, rng: &mut impl Rng) -> bool {
        if self.phase != TossPhase::AwaitingCall {
            return false;
        }
        self.call = Some(face);
        self.result = if rng.random_bool(0.5) {
            CoinFace::Heads
        } else {
            CoinFace::Tails
        };
        self.phase = TossPhase::Flipping {
            flips: 0,
            last_flip: now,
        };
        log::debug!("Player 1 called {}", face.label());
        true
    }

    /// Route a click to the heads/tails buttons
    pub fn click(&mut self, pos: IVec2, now: f64, rng: &mut impl Rng) -> bool {
        if Self::heads_button().contains(pos) {
            self.call(CoinFace::Heads, now, rng)
        } else if Self::tails_button().contains(pos) {
            self.call(CoinFace::Tails, now, rng)
        } else {
            false
        }
    }

    /// Advance the flip animation. Returns the opening player on the tick the
    /// coin settles.
    pub fn update(&mut self, now: f64) -> Option<PlayerSlot> {
        let TossPhase::Flipping { flips, last_flip } = self.phase else {
            return None;
        };

        let (mut flips, mut last_flip) = (flips, last_flip);
        if now - last_flip > FLIP_DELAY {
            flips += 1;
            last_flip = now;
            self.showing = self.showing.flipped();
        }

        if flips < MAX_FLIPS {
            self.phase = TossPhase::Flipping { flips, last_flip };
            return None;
        }

        self.showing = self.result;
        let first = if self.call == Some(self.result) {
            PlayerSlot::One
        } else {
            PlayerSlot::Two
        };
        self.phase = TossPhase::Done { first };
        log::info!("Coin landed {}, player {} goes first", self.result.label(), first.number());
        Some(first)
    }

    pub fn call_made(&self) -> Option<CoinFace> {
        self.call
    }

    /// Face currently shown on screen
    pub fn showing(&self) -> CoinFace {
        self.showing
    }

    pub fn first_player(&self) -> Option<PlayerSlot> {
        match self.phase {
            TossPhase::Done { first } => Some(first),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.first_player().is_some()
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let center = screen_center();
        canvas.text("Coin Toss", IVec2::new(center.x, 100), WHITE);

        let instruction = match self.call {
            None => "Player 1: Choose Heads or Tails".to_string(),
            Some(face) => format!("Player 1 chose {}", face.label()),
        };
        canvas.text(&instruction, IVec2::new(center.x, 170), GOLD);

        canvas.sprite(Sprite::Coin(self.showing), center);

        if self.call.is_none() {
            button(canvas, Self::heads_button(), CoinFace::Heads.label(), HEADS_FILL);
            button(canvas, Self::tails_button(), CoinFace::Tails.label(), TAILS_FILL);
        }

        if let Some(first) = self.first_player() {
            canvas.text(
                &format!("{}!", self.result.label()),
                center + IVec2::new(0, 150),
                GOLD,
            );
            canvas.text(
                &format!("Player {} goes first!", first.number()),
                center + IVec2::new(0, 220),
                GREEN,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CommandList;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Frame step that never lands exactly on the flip delay
    const FRAME: f64 = 0.03;

    fn run_to_completion(toss: &mut CoinToss, start: f64) -> (PlayerSlot, u32) {
        let mut frames = 0;
        loop {
            frames += 1;
            if let Some(first) = toss.update(start + frames as f64 * FRAME) {
                return (first, frames);
            }
            assert!(frames < 1000, "coin never settled");
        }
    }

    #[test]
    fn test_matching_call_goes_first() {
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut toss = CoinToss::new();
            assert!(toss.call(CoinFace::Heads, 0.0, &mut rng));
            let (first, _) = run_to_completion(&mut toss, 0.0);
            let expected = if toss.showing() == CoinFace::Heads {
                PlayerSlot::One
            } else {
                PlayerSlot::Two
            };
            assert_eq!(first, expected);
            assert_eq!(toss.first_player(), Some(first));
        }
    }

    #[test]
    fn test_takes_ten_flips() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut toss = CoinToss::new();
        toss.call(CoinFace::Tails, 0.0, &mut rng);
        let (_, frames) = run_to_completion(&mut toss, 0.0);
        // Each flip needs 4 frames of 30 ms to pass the 0.1 s delay
        assert_eq!(frames, 40);
        // Settled: further updates report nothing
        assert_eq!(toss.update(100.0), None);
    }

    #[test]
    fn test_second_call_ignored() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut toss = CoinToss::new();
        assert!(toss.click(CoinToss::tails_button().center(), 0.0, &mut rng));
        assert!(!toss.call(CoinFace::Heads, 0.0, &mut rng));
        assert_eq!(toss.call_made(), Some(CoinFace::Tails));
        assert!(!CoinToss::new().click(IVec2::ZERO, 0.0, &mut rng));
    }

    #[test]
    fn test_draw_shows_buttons_until_called() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut toss = CoinToss::new();
        let mut list = CommandList::new();
        toss.draw(&mut list);
        assert!(list.has_text("HEADS"));
        assert!(list.has_text("Choose Heads or Tails"));

        toss.call(CoinFace::Heads, 0.0, &mut rng);
        run_to_completion(&mut toss, 0.0);
        list.clear_commands();
        toss.draw(&mut list);
        assert!(list.has_text("goes first!"));
        assert!(list.has_text("Player 1 chose HEADS"));
    }
}
