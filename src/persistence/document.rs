//! On-disk save layout

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Progress, UserId};
use crate::battle::CustomQuestion;

/// Bumped whenever the layout changes incompatibly
pub const SAVE_VERSION: u32 = 1;

/// A custom question set as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredQuestionSet {
    pub name: String,
    /// `None` for public sets
    pub owner: Option<UserId>,
    /// Insertion order; larger is newer
    pub created: u64,
    pub questions: Vec<CustomQuestion>,
}

/// Everything the game persists, behind a version tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveDocument {
    pub version: u32,
    #[serde(default)]
    pub progress: BTreeMap<UserId, Progress>,
    #[serde(default)]
    pub question_sets: Vec<StoredQuestionSet>,
    #[serde(default)]
    pub next_created: u64,
}

impl Default for SaveDocument {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            progress: BTreeMap::new(),
            question_sets: Vec::new(),
            next_created: 0,
        }
    }
}

impl SaveDocument {
    /// Next creation stamp
    pub fn stamp(&mut self) -> u64 {
        let stamp = self.next_created;
        self.next_created += 1;
        stamp
    }
}
