//! Store traits the engine and the API layer are built against.
//!
//! These async traits are implemented by the `quizscore-store` crate. The
//! question store exposes the two question projections as separate methods so
//! that answer keys never travel through a participant-facing code path.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{AnswerKey, PublicQuestion, Question, Quiz, QuizTitle};
use crate::validate::{NewQuestion, NewQuiz};

/// Persistence for quiz titles.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Store a new quiz and return it with its generated id and timestamps.
    async fn create_quiz(&self, quiz: NewQuiz) -> Result<Quiz, StoreError>;

    /// Look up a quiz by id.
    async fn find_quiz(&self, quiz_id: &str) -> Result<Option<Quiz>, StoreError>;

    /// All quiz titles, oldest first.
    async fn list_titles(&self) -> Result<Vec<QuizTitle>, StoreError>;
}

/// Persistence for questions, keyed by owning quiz id.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Store a question under `quiz_id`. The quiz is not required to exist.
    async fn create_question(
        &self,
        quiz_id: &str,
        question: NewQuestion,
    ) -> Result<Question, StoreError>;

    /// Number of questions whose quiz id equals `quiz_id`.
    async fn count_by_quiz(&self, quiz_id: &str) -> Result<u64, StoreError>;

    /// Answer keys for the questions of `quiz_id` whose id is in `question_ids`.
    ///
    /// Ids that do not belong to the quiz are silently absent from the result.
    async fn find_answer_keys(
        &self,
        quiz_id: &str,
        question_ids: &BTreeSet<String>,
    ) -> Result<Vec<AnswerKey>, StoreError>;

    /// Participant view of all questions of `quiz_id`, in creation order.
    async fn find_public(&self, quiz_id: &str) -> Result<Vec<PublicQuestion>, StoreError>;
}
