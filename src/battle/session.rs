//! Battle state machine
//!
//! One session covers a whole fight. Every tick either does nothing, or
//! resolves exactly one turn: damage is applied, the terminal check runs and
//! the next question is loaded, all in the same step. A decided session
//! ignores further input.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::combatant::{Combatant, EnemyKind, MINI_BOSS_VARIANTS};
use super::level::LevelConfig;
use super::question::{CustomQuestion, Question, QuestionGenerator};
use super::timer::{PauseTracker, TurnTimer};
use crate::consts::{
    CUSTOM_TIMER_SECONDS, HIT_DAMAGE, MESSAGE_SECONDS, MIN_CUSTOM_QUESTIONS, PLAYER_MAX_HP,
    PVP_TIMER_SECONDS,
};
use crate::error::{QuizError, Result};
use crate::hero::Hero;

/// PvP side. In single-player battles `One` is the hero and `Two` the enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn other(&self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// 1 or 2, as shown to players
    pub fn number(&self) -> u8 {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 2,
        }
    }

    fn index(&self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleMode {
    /// Hero against a level enemy
    Campaign { level: u32 },
    /// Two players on one keyboard
    Pvp { heroes: [Hero; 2] },
    /// Hero against a player-authored question set
    Custom { set_name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryReason {
    EnemyDefeated,
    /// Custom battles: the question list ran out with the hero still standing
    AnsweredAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Pending,
    Victory(VictoryReason),
    Defeat,
    PlayerWins(PlayerSlot),
    /// Left the battle before it was decided
    Interrupted,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Pending)
    }

    pub fn is_victory(&self) -> bool {
        matches!(self, Outcome::Victory(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    AwaitingAnswer,
    Resolving,
    Finished,
}

/// What the player submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Clicked answer button
    Choice(i64),
    /// Typed answer
    Text(String),
}

/// The question on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveQuestion {
    Choice(Question),
    Text { index: usize, question: CustomQuestion },
}

impl ActiveQuestion {
    pub fn prompt(&self) -> &str {
        match self {
            ActiveQuestion::Choice(q) => &q.prompt,
            ActiveQuestion::Text { question, .. } => &question.question,
        }
    }

    /// Buttons to show; free-text questions have none
    pub fn choices(&self) -> &[i64] {
        match self {
            ActiveQuestion::Choice(q) => &q.choices,
            ActiveQuestion::Text { .. } => &[],
        }
    }

    /// Mismatched answer kinds are compared through their text form
    pub fn check(&self, answer: &Answer) -> bool {
        match (self, answer) {
            (ActiveQuestion::Choice(q), Answer::Choice(c)) => q.is_correct(*c),
            (ActiveQuestion::Choice(q), Answer::Text(t)) => {
                t.trim().parse::<i64>().is_ok_and(|c| q.is_correct(c))
            }
            (ActiveQuestion::Text { question, .. }, Answer::Text(t)) => question.is_correct(t),
            (ActiveQuestion::Text { question, .. }, Answer::Choice(c)) => {
                question.is_correct(&c.to_string())
            }
        }
    }
}

/// Per-tick battle input
#[derive(Debug, Clone, Default)]
pub struct BattleInput {
    pub answer: Option<Answer>,
    pub pause: bool,
    pub quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnCause {
    Correct,
    Wrong,
    TimedOut,
    Interrupted,
}

/// What happened on a resolving tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnResult {
    pub cause: TurnCause,
    /// Side that lost hp, if any
    pub damaged: Option<PlayerSlot>,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
struct BattleMessage {
    text: String,
    shown_at: f64,
}

#[derive(Debug, Clone)]
pub struct BattleSession {
    mode: BattleMode,
    hero: Hero,
    /// Hero/enemy, or player 1/player 2
    sides: [Combatant; 2],
    enemy_kind: Option<EnemyKind>,
    difficulty: u32,
    custom: Vec<CustomQuestion>,
    question: ActiveQuestion,
    turn_owner: PlayerSlot,
    timer: TurnTimer,
    pause: PauseTracker,
    time_left: f64,
    phase: BattlePhase,
    outcome: Outcome,
    message: Option<BattleMessage>,
    rng: Pcg32,
}

impl BattleSession {
    fn with_parts(
        mode: BattleMode,
        hero: Hero,
        sides: [Combatant; 2],
        difficulty: u32,
        time_limit: f64,
        seed: u64,
        now: f64,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let question = ActiveQuestion::Choice(QuestionGenerator::generate(difficulty, &mut rng));
        Self {
            mode,
            hero,
            sides,
            enemy_kind: None,
            difficulty,
            custom: Vec::new(),
            question,
            turn_owner: PlayerSlot::One,
            timer: TurnTimer::new(time_limit, now),
            pause: PauseTracker::new(),
            time_left: time_limit,
            phase: BattlePhase::AwaitingAnswer,
            outcome: Outcome::Pending,
            message: None,
            rng,
        }
    }

    /// Hero against the enemy of one campaign level
    pub fn campaign(level: &LevelConfig, hero: Hero, seed: u64, now: f64) -> Self {
        let mut session = Self::with_parts(
            BattleMode::Campaign { level: level.id },
            hero,
            [Combatant::player(), Combatant::player()],
            level.difficulty,
            level.timer_seconds,
            seed,
            now,
        );
        let enemy = level.create_enemy(&mut session.rng);
        session.sides[1] = enemy.stats;
        session.enemy_kind = Some(enemy.kind);
        log::info!("Battle started: {} as {}", level.name(), hero.as_str());
        session
    }

    /// Hotseat battle; `first` comes from the coin toss
    pub fn pvp(heroes: [Hero; 2], first: PlayerSlot, seed: u64, now: f64) -> Self {
        let mut session = Self::with_parts(
            BattleMode::Pvp { heroes },
            heroes[0],
            [Combatant::player(), Combatant::player()],
            1,
            PVP_TIMER_SECONDS,
            seed,
            now,
        );
        session.turn_owner = first;
        log::info!("PvP battle started, player {} opens", first.number());
        session
    }

    /// Walk through an authored question set. The enemy has one hp per
    /// question. Sets below the minimum size are refused.
    pub fn custom(
        set_name: &str,
        questions: Vec<CustomQuestion>,
        hero: Hero,
        seed: u64,
        now: f64,
    ) -> Result<Self> {
        if questions.len() < MIN_CUSTOM_QUESTIONS {
            return Err(QuizError::QuestionSetTooSmall {
                name: set_name.to_string(),
                found: questions.len(),
                required: MIN_CUSTOM_QUESTIONS,
            });
        }

        let enemy_hp = u32::try_from(questions.len()).unwrap_or(u32::MAX);
        let mut session = Self::with_parts(
            BattleMode::Custom {
                set_name: set_name.to_string(),
            },
            hero,
            [Combatant::player(), Combatant::new(enemy_hp, HIT_DAMAGE)],
            1,
            CUSTOM_TIMER_SECONDS,
            seed,
            now,
        );
        session.enemy_kind = Some(EnemyKind::mini_boss(MINI_BOSS_VARIANTS, &mut session.rng));
        session.question = ActiveQuestion::Text {
            index: 0,
            question: questions[0].clone(),
        };
        session.custom = questions;
        log::info!(
            "Custom battle started: '{set_name}' with {} questions",
            session.custom.len()
        );
        Ok(session)
    }

    /// Override the per-question time limit (settings)
    pub fn with_time_limit(mut self, seconds: f64, now: f64) -> Self {
        self.timer = TurnTimer::new(seconds, now);
        self.time_left = seconds;
        self
    }

    pub fn mode(&self) -> &BattleMode {
        &self.mode
    }

    pub fn hero(&self) -> Hero {
        self.hero
    }

    pub fn combatant(&self, slot: PlayerSlot) -> &Combatant {
        &self.sides[slot.index()]
    }

    /// The hero (or player 1)
    pub fn player(&self) -> &Combatant {
        self.combatant(PlayerSlot::One)
    }

    /// The enemy (or player 2)
    pub fn enemy(&self) -> &Combatant {
        self.combatant(PlayerSlot::Two)
    }

    pub fn enemy_kind(&self) -> Option<EnemyKind> {
        self.enemy_kind
    }

    pub fn question(&self) -> &ActiveQuestion {
        &self.question
    }

    /// Whose turn it is; only meaningful in PvP
    pub fn turn_owner(&self) -> PlayerSlot {
        self.turn_owner
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// Seconds left on the current question as of the last tick
    pub fn time_left(&self) -> f64 {
        self.time_left
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// `(current, total)` for custom battles, 1-based
    pub fn progress(&self) -> Option<(usize, usize)> {
        match &self.question {
            ActiveQuestion::Text { index, .. } => Some((index + 1, self.custom.len())),
            ActiveQuestion::Choice(_) => None,
        }
    }

    /// Banner text, while it is still on screen
    pub fn message(&self, now: f64) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|m| now - m.shown_at < MESSAGE_SECONDS)
            .map(|m| m.text.as_str())
    }

    /// Leave the battle. Does nothing once it is decided.
    pub fn interrupt(&mut self) -> Option<TurnResult> {
        if self.is_finished() {
            return None;
        }
        self.phase = BattlePhase::Finished;
        self.outcome = Outcome::Interrupted;
        log::info!("Battle interrupted");
        Some(TurnResult {
            cause: TurnCause::Interrupted,
            damaged: None,
            outcome: self.outcome,
        })
    }

    /// Advance one frame
    pub fn tick(&mut self, input: BattleInput, now: f64) -> Option<TurnResult> {
        if self.is_finished() {
            return None;
        }
        if input.quit {
            return self.interrupt();
        }

        if input.pause {
            let paused = self.pause.toggle(now);
            log::debug!("Battle {}", if paused { "paused" } else { "resumed" });
        }
        if self.pause.is_paused() {
            return None;
        }
        self.timer.absorb_pause(self.pause.drain());

        if let Some(answer) = input.answer {
            let cause = if self.question.check(&answer) {
                TurnCause::Correct
            } else {
                TurnCause::Wrong
            };
            return Some(self.resolve(cause, now));
        }

        let poll = self.timer.poll(now);
        self.time_left = poll.remaining;
        if poll.timed_out {
            return Some(self.resolve(TurnCause::TimedOut, now));
        }
        None
    }

    fn resolve(&mut self, cause: TurnCause, now: f64) -> TurnResult {
        self.phase = BattlePhase::Resolving;

        let answering = match self.mode {
            BattleMode::Pvp { .. } => self.turn_owner,
            _ => PlayerSlot::One,
        };
        let damaged = match cause {
            TurnCause::Correct => answering.other(),
            _ => answering,
        };
        let amount = match cause {
            TurnCause::Correct => HIT_DAMAGE,
            _ => self.sides[answering.other().index()].damage,
        };
        self.sides[damaged.index()].take_damage(amount);

        self.outcome = self.decide();
        let text = self.turn_message(cause, answering, amount);
        self.show(text, now);

        if !self.outcome.is_terminal() {
            self.next_turn(now);
        }
        if self.outcome.is_terminal() {
            self.phase = BattlePhase::Finished;
            log::info!("Battle over: {:?}", self.outcome);
        } else {
            self.phase = BattlePhase::AwaitingAnswer;
        }

        TurnResult {
            cause,
            damaged: Some(damaged),
            outcome: self.outcome,
        }
    }

    fn decide(&self) -> Outcome {
        let [first, second] = &self.sides;
        match self.mode {
            BattleMode::Pvp { .. } if first.is_defeated() => Outcome::PlayerWins(PlayerSlot::Two),
            BattleMode::Pvp { .. } if second.is_defeated() => Outcome::PlayerWins(PlayerSlot::One),
            BattleMode::Pvp { .. } => Outcome::Pending,
            _ if second.is_defeated() => Outcome::Victory(VictoryReason::EnemyDefeated),
            _ if first.is_defeated() => Outcome::Defeat,
            _ => Outcome::Pending,
        }
    }

    fn turn_message(&self, cause: TurnCause, answering: PlayerSlot, amount: u32) -> String {
        match (&self.mode, self.outcome) {
            (_, Outcome::Victory(_)) => "Victory! You defeated the enemy!".into(),
            (_, Outcome::Defeat) => "Defeat! You have been defeated!".into(),
            (_, Outcome::PlayerWins(winner)) => format!("Victory! Player {} wins!", winner.number()),
            (BattleMode::Pvp { .. }, _) => {
                let n = answering.number();
                match cause {
                    TurnCause::Correct => {
                        format!("Correct! Player {} takes damage!", answering.other().number())
                    }
                    TurnCause::TimedOut => format!("Time's up! Player {n} takes damage!"),
                    _ => format!("Wrong! Player {n} takes damage!"),
                }
            }
            (_, _) => match cause {
                TurnCause::Correct => "Correct! Enemy takes damage!".into(),
                TurnCause::TimedOut => "Time's up! You take damage!".into(),
                _ => format!("Wrong! You take {amount} damage!"),
            },
        }
    }

    fn show(&mut self, text: String, now: f64) {
        self.message = Some(BattleMessage {
            text,
            shown_at: now,
        });
    }

    /// Load the next question and rearm the timer
    fn next_turn(&mut self, now: f64) {
        match &mut self.question {
            ActiveQuestion::Text { index, question } => {
                let next = *index + 1;
                match self.custom.get(next) {
                    Some(q) => {
                        *index = next;
                        *question = q.clone();
                    }
                    None => {
                        self.outcome = Outcome::Victory(VictoryReason::AnsweredAll);
                        self.show("Victory! You answered all questions!".into(), now);
                        return;
                    }
                }
            }
            ActiveQuestion::Choice(q) => {
                *q = QuestionGenerator::generate(self.difficulty, &mut self.rng);
            }
        }
        if let BattleMode::Pvp { .. } = self.mode {
            self.turn_owner = self.turn_owner.other();
        }
        self.timer.arm(now);
        self.time_left = self.timer.duration();
    }
}

/// Hit points every side starts a PvP battle with
pub const PVP_START_HP: u32 = PLAYER_MAX_HP;
