//! SQLite-backed store using `sqlx`.

use std::collections::BTreeSet;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};

use quizscore_core::model::{
    new_id, parse_id, AnswerKey, PublicQuestion, Question, Quiz, QuizOption, QuizTitle,
};
use quizscore_core::traits::{QuestionStore, QuizStore};
use quizscore_core::validate::{NewQuestion, NewQuiz};
use quizscore_core::StoreError;

use crate::error::SqlxResultExt;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS quizzes (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS questions (
        id TEXT PRIMARY KEY,
        quiz_id TEXT NOT NULL,
        text TEXT NOT NULL,
        correct_option_id TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_questions_quiz_id ON questions(quiz_id)",
    r#"
    CREATE TABLE IF NOT EXISTS question_options (
        question_id TEXT NOT NULL,
        position INTEGER NOT NULL,
        option_id TEXT NOT NULL,
        text TEXT NOT NULL,
        PRIMARY KEY (question_id, position),
        FOREIGN KEY (question_id) REFERENCES questions(id) ON DELETE CASCADE
    )
    "#,
];

/// Question ids bound per answer-key query, well under SQLite's variable limit.
const ANSWER_KEY_CHUNK: usize = 500;

#[derive(sqlx::FromRow)]
struct QuizRow {
    id: String,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<QuizRow> for Quiz {
    fn from(row: QuizRow) -> Self {
        Quiz {
            id: row.id,
            title: row.title,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PublicQuestionRow {
    id: String,
    text: String,
}

#[derive(sqlx::FromRow)]
struct OptionRow {
    question_id: String,
    option_id: String,
    text: String,
}

/// A store backed by a SQLite database.
///
/// Questions carry no foreign key to `quizzes`: a question may reference a
/// quiz id that was never created.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `url` (e.g. `sqlite://quizscore.db` or `sqlite::memory:`),
    /// creating the database file and schema if needed.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .backend("parse database url")?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` opens a separate database.
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await
        }
        .backend("connect to database")?;

        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .backend("create schema")?;
        }

        tracing::info!("database connection has been verified");

        Ok(Self { pool })
    }
}

#[async_trait]
impl QuizStore for SqliteStore {
    async fn create_quiz(&self, quiz: NewQuiz) -> Result<Quiz, StoreError> {
        let now = Utc::now();
        let quiz = Quiz {
            id: new_id(),
            title: quiz.title,
            created_at: now,
            updated_at: now,
        };

        sqlx::query("INSERT INTO quizzes (id, title, created_at, updated_at) VALUES (?, ?, ?, ?)")
            .bind(&quiz.id)
            .bind(&quiz.title)
            .bind(quiz.created_at)
            .bind(quiz.updated_at)
            .execute(&self.pool)
            .await
            .backend("insert quiz")?;

        Ok(quiz)
    }

    async fn find_quiz(&self, quiz_id: &str) -> Result<Option<Quiz>, StoreError> {
        parse_id(quiz_id)?;
        let row = sqlx::query_as::<_, QuizRow>(
            "SELECT id, title, created_at, updated_at FROM quizzes WHERE id = ?",
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await
        .backend("find quiz")?;

        Ok(row.map(Quiz::from))
    }

    async fn list_titles(&self) -> Result<Vec<QuizTitle>, StoreError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT id, title FROM quizzes ORDER BY rowid")
                .fetch_all(&self.pool)
                .await
                .backend("list quiz titles")?;

        Ok(rows
            .into_iter()
            .map(|(id, title)| QuizTitle { id, title })
            .collect())
    }
}

#[async_trait]
impl QuestionStore for SqliteStore {
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

        let mut tx = self.pool.begin().await.backend("begin transaction")?;

        sqlx::query(
            r#"
            INSERT INTO questions (id, quiz_id, text, correct_option_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&question.id)
        .bind(&question.quiz_id)
        .bind(&question.text)
        .bind(&question.correct_option_id)
        .bind(question.created_at)
        .bind(question.updated_at)
        .execute(&mut *tx)
        .await
        .backend("insert question")?;

        for (position, option) in question.options.iter().enumerate() {
            sqlx::query(
                "INSERT INTO question_options (question_id, position, option_id, text) VALUES (?, ?, ?, ?)",
            )
            .bind(&question.id)
            .bind(position as i64)
            .bind(&option.id)
            .bind(&option.text)
            .execute(&mut *tx)
            .await
            .backend("insert question option")?;
        }

        tx.commit().await.backend("commit question")?;

        Ok(question)
    }

    async fn count_by_quiz(&self, quiz_id: &str) -> Result<u64, StoreError> {
        parse_id(quiz_id)?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE quiz_id = ?")
            .bind(quiz_id)
            .fetch_one(&self.pool)
            .await
            .backend("count questions")?;

        Ok(count as u64)
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
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<&String> = question_ids.iter().collect();
        let mut keys = Vec::new();

        for chunk in ids.chunks(ANSWER_KEY_CHUNK) {
            let mut query: QueryBuilder<Sqlite> =
                QueryBuilder::new("SELECT id, correct_option_id FROM questions WHERE quiz_id = ");
            query.push_bind(quiz_id.to_string());
            query.push(" AND id IN (");
            let mut separated = query.separated(", ");
            for id in chunk {
                separated.push_bind(id.to_string());
            }
            separated.push_unseparated(")");

            let rows: Vec<(String, String)> = query
                .build_query_as()
                .fetch_all(&self.pool)
                .await
                .backend("find answer keys")?;

            keys.extend(rows.into_iter().map(|(id, correct_option_id)| AnswerKey {
                id,
                correct_option_id,
            }));
        }

        Ok(keys)
    }

    async fn find_public(&self, quiz_id: &str) -> Result<Vec<PublicQuestion>, StoreError> {
        parse_id(quiz_id)?;

        let questions = sqlx::query_as::<_, PublicQuestionRow>(
            "SELECT id, text FROM questions WHERE quiz_id = ? ORDER BY rowid",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await
        .backend("find questions")?;

        let options = sqlx::query_as::<_, OptionRow>(
            r#"
            SELECT o.question_id, o.option_id, o.text
            FROM question_options o
            JOIN questions q ON q.id = o.question_id
            WHERE q.quiz_id = ?
            ORDER BY o.question_id, o.position
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await
        .backend("find question options")?;

        let mut public: Vec<PublicQuestion> = questions
            .into_iter()
            .map(|q| PublicQuestion {
                id: q.id,
                text: q.text,
                options: Vec::new(),
            })
            .collect();

        for option in options {
            match public.iter_mut().find(|q| q.id == option.question_id) {
                Some(question) => question.options.push(QuizOption {
                    id: option.option_id,
                    text: option.text,
                }),
                None => tracing::warn!(
                    question_id = %option.question_id,
                    "option row without a matching question, skipping"
                ),
            }
        }

        Ok(public)
    }
}
