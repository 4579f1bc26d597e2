//! Core data model types for quizscore.
//!
//! Quizzes and questions as persisted by the stores, the two projections of a
//! question (participant-facing and answer-key only), and the ephemeral
//! submission/result types the evaluation engine works with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// A named collection of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Opaque unique identifier.
    pub id: String,
    /// Trimmed, non-empty title.
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List projection of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizTitle {
    pub id: String,
    pub title: String,
}

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Identifier, unique within its question.
    pub id: String,
    /// Text shown to the participant.
    pub text: String,
}

/// A multiple-choice question, including its answer key.
///
/// This is the author view returned on creation. Participants only ever see
/// [`PublicQuestion`], and the evaluation engine only ever sees [`AnswerKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    /// Back-reference to the owning quiz.
    pub quiz_id: String,
    pub text: String,
    pub options: Vec<QuizOption>,
    /// Expected to match one of `options[i].id`; not enforced on write.
    pub correct_option_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Question as shown to a participant before submission. Has no answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<QuizOption>,
}

/// Key-only projection of a question, used for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerKey {
    pub id: String,
    pub correct_option_id: String,
}

/// One answer in a participant's submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub selected_option_id: String,
}

impl SubmittedAnswer {
    pub fn new(question_id: impl Into<String>, selected_option_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            selected_option_id: selected_option_id.into(),
        }
    }
}

/// Outcome of scoring a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Number of correct answers counted.
    pub score: u64,
    /// Number of questions in the quiz, regardless of how many were answered.
    pub total: u64,
}

/// Generate a fresh store identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Parse a store identifier, rejecting anything that is not a UUID.
pub fn parse_id(id: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))
}
