//! Building custom question sets

use std::fmt::Display;

use crate::battle::CustomQuestion;
use crate::error::{QuizError, Result};

/// Name given to a freshly saved set
pub fn set_name(stamp: impl Display) -> String {
    format!("Questions - {stamp}")
}

/// Questions collected while the player types them in
#[derive(Debug, Clone, Default)]
pub struct QuestionSetDraft {
    questions: Vec<CustomQuestion>,
}

impl QuestionSetDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[CustomQuestion] {
        &self.questions
    }

    /// Append a question. Both fields are trimmed and must be non-empty.
    /// Returns the new question count.
    pub fn add(&mut self, question: &str, answer: &str) -> Result<usize> {
        let (question, answer) = (question.trim(), answer.trim());
        if question.is_empty() || answer.is_empty() {
            return Err(QuizError::InvalidQuestion);
        }
        self.questions.push(CustomQuestion::new(question, answer));
        Ok(self.questions.len())
    }

    pub fn remove(&mut self, index: usize) -> Option<CustomQuestion> {
        (index < self.questions.len()).then(|| self.questions.remove(index))
    }

    /// Close the draft. A filled-in pending entry is added first; blank
    /// pending fields are dropped silently.
    pub fn finish(mut self, pending: Option<(&str, &str)>) -> Result<Vec<CustomQuestion>> {
        if let Some((question, answer)) = pending {
            let _ = self.add(question, answer);
        }
        if self.questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }
        Ok(self.questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_validates() {
        let mut draft = QuestionSetDraft::new();
        assert_eq!(draft.add("  2 + 2? ", " 4 ").unwrap(), 1);
        assert_eq!(draft.questions()[0], CustomQuestion::new("2 + 2?", "4"));
        assert!(matches!(draft.add("   ", "4"), Err(QuizError::InvalidQuestion)));
        assert!(matches!(draft.add("Q?", ""), Err(QuizError::InvalidQuestion)));
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn test_finish_rejects_empty_draft() {
        let err = QuestionSetDraft::new().finish(Some(("", ""))).unwrap_err();
        assert!(matches!(err, QuizError::EmptyQuestionSet));
        assert_eq!(
            err.to_string(),
            "Please add at least one question before finishing"
        );
    }

    #[test]
    fn test_finish_keeps_pending_entry() {
        let mut draft = QuestionSetDraft::new();
        draft.add("Q1", "A1").unwrap();
        let set = draft.finish(Some(("Q2", "A2"))).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set[1].answer, "A2");
    }

    #[test]
    fn test_remove() {
        let mut draft = QuestionSetDraft::new();
        draft.add("Q1", "A1").unwrap();
        assert!(draft.remove(3).is_none());
        assert_eq!(draft.remove(0).unwrap().question, "Q1");
        assert!(draft.is_empty());
        assert_eq!(set_name(42), "Questions - 42");
    }
}
