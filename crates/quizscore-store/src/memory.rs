//! In-memory store for tests and throwaway servers.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quizscore_core::model::{
    new_id, parse_id, AnswerKey, PublicQuestion, Question, Quiz, QuizTitle,
};
use quizscore_core::traits::{QuestionStore, QuizStore};
use quizscore_core::validate::{NewQuestion, NewQuiz};
use quizscore_core::StoreError;

/// A store that keeps quizzes and questions in insertion order in memory.
///
/// Implements both [`QuizStore`] and [`QuestionStore`]. Ids are checked the
/// same way the SQLite store checks them, so a malformed id fails here too.
#[derive(Default)]
pub struct MemoryStore {
    quizzes: RwLock<Vec<Quiz>>,
    questions: RwLock<Vec<Question>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn create_quiz(&self, quiz: NewQuiz) -> Result<Quiz, StoreError> {
        let now = Utc::now();
        let quiz = Quiz {
            id: new_id(),
            title: quiz.title,
            created_at: now,
            updated_at: now,
        };
        self.quizzes.write().await.push(quiz.clone());
        Ok(quiz)
    }

    async fn find_quiz(&self, quiz_id: &str) -> Result<Option<Quiz>, StoreError> {
        parse_id(quiz_id)?;
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.iter().find(|q| q.id == quiz_id).cloned())
    }

    async fn list_titles(&self) -> Result<Vec<QuizTitle>, StoreError> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes
            .iter()
            .map(|q| QuizTitle {
                id: q.id.clone(),
                title: q.title.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn create_question(
        &self,
        quiz_id: &str,
        question: NewQuestion,
    ) -> Result<Question, StoreError> {
        parse_id(quiz_id)?;
        let now = Utc::now();
        let question = Question {
            id: new_id(),
            quiz_id: quiz_id.to_string(),
            text: question.text,
            options: question.options,
            correct_option_id: question.correct_option_id,
            created_at: now,
            updated_at: now,
        };
        self.questions.write().await.push(question.clone());
        Ok(question)
    }

    async fn count_by_quiz(&self, quiz_id: &str) -> Result<u64, StoreError> {
        parse_id(quiz_id)?;
        let questions = self.questions.read().await;
        Ok(questions.iter().filter(|q| q.quiz_id == quiz_id).count() as u64)
    }

    async fn find_answer_keys(
        &self,
        quiz_id: &str,
        question_ids: &BTreeSet<String>,
    ) -> Result<Vec<AnswerKey>, StoreError> {
        parse_id(quiz_id)?;
        for id in question_ids {
            parse_id(id)?;
        }

        let questions = self.questions.read().await;
        Ok(questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id && question_ids.contains(&q.id))
            .map(|q| AnswerKey {
                id: q.id.clone(),
                correct_option_id: q.correct_option_id.clone(),
            })
            .collect())
    }

    async fn find_public(&self, quiz_id: &str) -> Result<Vec<PublicQuestion>, StoreError> {
        parse_id(quiz_id)?;
        let questions = self.questions.read().await;
        Ok(questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .map(|q| PublicQuestion {
                id: q.id.clone(),
                text: q.text.clone(),
                options: q.options.clone(),
            })
            .collect())
    }
}
