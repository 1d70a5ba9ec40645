//! Crate-wide error type
//!
//! Wrong answers and timeouts are ordinary battle transitions and never show
//! up here. Errors are either load-time problems (files, JSON) or validation
//! failures the caller turns into a message for the player.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed save data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("save file {path} has version {found}, expected {expected}")]
    UnsupportedSaveVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
    #[error("Need at least {required} questions to start a battle ('{name}' has {found})")]
    QuestionSetTooSmall {
        name: String,
        found: usize,
        required: usize,
    },
    #[error("question set '{0}' does not exist")]
    QuestionSetMissing(String),
    #[error("a question set named '{0}' already exists")]
    DuplicateQuestionSet(String),
    #[error("Please add at least one question before finishing")]
    EmptyQuestionSet,
    #[error("Please enter both question and answer before proceeding")]
    InvalidQuestion,
    #[error("no user is logged in")]
    NotLoggedIn,
    #[error("no saved progress")]
    NoSavedProgress,
}

pub type Result<T> = std::result::Result<T, QuizError>;
