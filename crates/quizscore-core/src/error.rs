//! Error types shared by the engine, the stores, and the API layer.

use thiserror::Error;

/// Failures raised by a quiz or question store.
///
/// Always a server-side failure from the caller's point of view.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An identifier could not be parsed into the store's id format.
    #[error("malformed identifier: {0}")]
    MalformedId(String),

    /// The storage backend failed (connection, query, constraint).
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// A stored record could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Errors from evaluating a submission.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The submitted answers were not a sequence.
    #[error("Answers must be in array format")]
    InvalidInputShape,

    /// The quiz has no questions, or does not exist at all.
    #[error("No questions are found for this quiz")]
    NoQuestionsForQuiz { quiz_id: String },

    /// Propagated unchanged from the question store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EvalError {
    /// Returns `true` if the caller sent bad input, `false` for server-side failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EvalError::InvalidInputShape | EvalError::NoQuestionsForQuiz { .. }
        )
    }
}

/// A quiz or question draft failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Path of the offending field (e.g. `options[1].id`).
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn required(field: impl Into<String>) -> Self {
        Self::new(field, "is required")
    }
}
