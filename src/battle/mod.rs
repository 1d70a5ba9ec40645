//! Battle module
//!
//! Turn-based quiz fights: a question is asked, the answer (or the timer
//! running out) deals damage, and the fight ends when one side hits zero.
//! - Single-player campaign battles against a level enemy
//! - Hotseat PvP with alternating turns, opened by a coin toss
//! - Custom battles over a player-authored free-text question set

pub mod coin_toss;
pub mod combatant;
pub mod hud;
pub mod level;
pub mod question;
pub mod session;
pub mod timer;

pub use coin_toss::{CoinFace, CoinToss};
pub use combatant::{Combatant, Enemy, EnemyKind};
pub use level::LevelConfig;
pub use question::{CustomQuestion, Operator, Question, QuestionGenerator};
pub use session::{
    ActiveQuestion, Answer, BattleInput, BattleMode, BattlePhase, BattleSession, Outcome,
    PlayerSlot, TurnCause, TurnResult, VictoryReason,
};
pub use timer::{PauseTracker, TimerPoll, TurnTimer, remaining};
