//! Error types for question construction and repository operations.
//!
//! Every failure is recoverable: the console reports it and returns to the
//! menu, nothing here is meant to terminate the process.

use thiserror::Error;

use crate::model::QuestionId;

/// A question value that breaks one of the structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    /// The question text is empty or whitespace only.
    #[error("question text must not be empty")]
    EmptyText,

    /// Estimated minutes must be at least one.
    #[error("estimated time must be at least 1 minute")]
    ZeroMinutes,

    /// An item list (options, left or right side) has the wrong size.
    #[error("{field} must have between {min} and {max} items, got {len}")]
    ItemCount {
        field: &'static str,
        len: usize,
        min: usize,
        max: usize,
    },

    /// The correct option does not point into the option list.
    #[error("correct option {index} is out of range for {len} options")]
    CorrectOptionOutOfRange { index: usize, len: usize },

    /// Left and right sides of a matching question differ in size.
    #[error("matching sides differ in size: {left} left items, {right} right items")]
    UnbalancedSides { left: usize, right: usize },

    /// The mapping does not have one entry per left item.
    #[error("expected {expected} mapping entries, got {len}")]
    MappingLength { expected: usize, len: usize },

    /// A mapping entry does not point into the right-hand items.
    #[error("mapping for left item {left} points to {index}, but there are only {len} right items")]
    MappingOutOfRange { left: usize, index: usize, len: usize },
}

/// Errors returned by [`QuestionRepository`](crate::repository::QuestionRepository).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The duplicate-prevention rule fired.
    #[error("question is similar to an existing one in the same or previous year")]
    Rejected { text: String, year: u32 },

    /// No live question has this id.
    #[error("question {0} not found")]
    NotFound(QuestionId),

    /// The submitted question failed validation.
    #[error("invalid question: {0}")]
    InvalidQuestion(#[from] QuestionError),
}

impl RepositoryError {
    /// Returns `true` for duplicate rejections.
    pub fn is_rejected(&self) -> bool {
        matches!(self, RepositoryError::Rejected { .. })
    }

    /// Returns `true` when the referenced id does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_))
    }
}
