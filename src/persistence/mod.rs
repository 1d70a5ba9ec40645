//! Save/load persistence
//!
//! Features:
//! - Per-user campaign progress (level reached + hero)
//! - Custom question sets, private to an owner or public
//! - Versioned JSON envelope, replaced atomically on every write

pub mod atomic;
pub mod document;
pub mod store;

pub use document::{SAVE_VERSION, SaveDocument, StoredQuestionSet};
pub use store::JsonStore;

use serde::{Deserialize, Serialize};

use crate::battle::CustomQuestion;
use crate::error::Result;
use crate::hero::Hero;

/// Account id handed out by the login service
pub type UserId = u32;

/// Saved campaign state for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Highest unlocked level
    pub level: u32,
    pub hero: Hero,
}

pub trait ProgressStore {
    fn save_progress(&mut self, user: UserId, level: u32, hero: Hero) -> Result<()>;

    fn load_progress(&self, user: UserId) -> Result<Option<Progress>>;

    /// Back to level 1, hero kept. `false` when there was nothing to reset.
    fn reset_progress(&mut self, user: UserId) -> Result<bool>;

    /// Change only the level. `false` when the user has no progress yet.
    fn update_level(&mut self, user: UserId, level: u32) -> Result<bool>;

    fn has_saved_progress(&self, user: UserId) -> bool {
        matches!(self.load_progress(user), Ok(Some(_)))
    }
}

pub trait QuestionStore {
    /// Store a new set; names are unique
    fn save_question_set(
        &mut self,
        name: &str,
        questions: &[CustomQuestion],
        owner: Option<UserId>,
    ) -> Result<()>;

    fn get_question_set(&self, name: &str) -> Result<Option<Vec<CustomQuestion>>>;

    /// Names visible to `owner` (their own sets plus public ones), newest
    /// first. Without an owner only public sets are listed.
    fn list_question_sets(&self, owner: Option<UserId>) -> Result<Vec<String>>;

    /// Delete a set if it belongs to `owner`; without an owner only public
    /// sets can be deleted. Returns whether anything was removed.
    fn delete_question_set(&mut self, name: &str, owner: Option<UserId>) -> Result<bool>;
}

/// Everything the game needs from storage
pub trait GameStore: ProgressStore + QuestionStore {}

impl<T: ProgressStore + QuestionStore> GameStore for T {}
