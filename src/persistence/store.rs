//! JSON file backed store

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::atomic::write_atomic;
use super::document::{SAVE_VERSION, SaveDocument, StoredQuestionSet};
use super::{Progress, ProgressStore, QuestionStore, UserId};
use crate::battle::CustomQuestion;
use crate::error::{QuizError, Result};
use crate::hero::Hero;

/// Keeps the whole save in memory and rewrites the file after each change
#[derive(Debug, Default)]
pub struct JsonStore {
    path: Option<PathBuf>,
    doc: SaveDocument,
}

impl JsonStore {
    /// Open a save file. A missing file is an empty save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let doc = match fs::read_to_string(&path) {
            Ok(text) => Self::parse(&path, &text)?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                log::info!("No save at {}, starting fresh", path.display());
                SaveDocument::default()
            }
            Err(source) => return Err(QuizError::Io { path, source }),
        };
        Ok(Self {
            path: Some(path),
            doc,
        })
    }

    /// Store that never touches the disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn parse(path: &Path, text: &str) -> Result<SaveDocument> {
        let doc: SaveDocument = serde_json::from_str(text).map_err(|source| QuizError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        if doc.version != SAVE_VERSION {
            return Err(QuizError::UnsupportedSaveVersion {
                path: path.to_path_buf(),
                found: doc.version,
                expected: SAVE_VERSION,
            });
        }
        Ok(doc)
    }

    fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.doc).map_err(|source| QuizError::Json {
            path: path.clone(),
            source,
        })?;
        write_atomic(path, &json).map_err(|source| QuizError::Io {
            path: path.clone(),
            source,
        })
    }
}

impl ProgressStore for JsonStore {
    fn save_progress(&mut self, user: UserId, level: u32, hero: Hero) -> Result<()> {
        self.doc.progress.insert(user, Progress { level, hero });
        self.flush()?;
        log::info!("Progress saved - level {level}, hero {}", hero.as_str());
        Ok(())
    }

    fn load_progress(&self, user: UserId) -> Result<Option<Progress>> {
        Ok(self.doc.progress.get(&user).copied())
    }

    fn reset_progress(&mut self, user: UserId) -> Result<bool> {
        let Some(progress) = self.doc.progress.get_mut(&user) else {
            return Ok(false);
        };
        progress.level = 1;
        self.flush()?;
        log::info!("Progress reset to level 1 for user {user}");
        Ok(true)
    }

    fn update_level(&mut self, user: UserId, level: u32) -> Result<bool> {
        let Some(progress) = self.doc.progress.get_mut(&user) else {
            return Ok(false);
        };
        progress.level = level;
        self.flush()?;
        Ok(true)
    }
}

impl QuestionStore for JsonStore {
    fn save_question_set(
        &mut self,
        name: &str,
        questions: &[CustomQuestion],
        owner: Option<UserId>,
    ) -> Result<()> {
        if self.doc.question_sets.iter().any(|s| s.name == name) {
            return Err(QuizError::DuplicateQuestionSet(name.to_string()));
        }
        let created = self.doc.stamp();
        self.doc.question_sets.push(StoredQuestionSet {
            name: name.to_string(),
            owner,
            created,
            questions: questions.to_vec(),
        });
        self.flush()?;
        log::info!("Saved question set '{name}' with {} questions", questions.len());
        Ok(())
    }

    fn get_question_set(&self, name: &str) -> Result<Option<Vec<CustomQuestion>>> {
        Ok(self
            .doc
            .question_sets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.questions.clone()))
    }

    fn list_question_sets(&self, owner: Option<UserId>) -> Result<Vec<String>> {
        let mut visible: Vec<&StoredQuestionSet> = self
            .doc
            .question_sets
            .iter()
            .filter(|s| s.owner.is_none() || (owner.is_some() && s.owner == owner))
            .collect();
        visible.sort_by_key(|set| std::cmp::Reverse(set.created));
        Ok(visible.into_iter().map(|s| s.name.clone()).collect())
    }

    fn delete_question_set(&mut self, name: &str, owner: Option<UserId>) -> Result<bool> {
        let before = self.doc.question_sets.len();
        self.doc
            .question_sets
            .retain(|s| !(s.name == name && s.owner == owner));
        let removed = self.doc.question_sets.len() != before;
        if removed {
            self.flush()?;
            log::info!("Question set '{name}' deleted");
        }
        Ok(removed)
    }
}
