//! HTTP API for quizscore.
//!
//! Exposes quiz authoring, the participant view of a quiz, and answer
//! submission as JSON routes over the configured stores.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use quizscore_core::traits::{QuestionStore, QuizStore};
use quizscore_core::{EvaluationEngine, EvaluationEngineConfig};
use quizscore_store::Stores;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub quizzes: Arc<dyn QuizStore>,
    pub questions: Arc<dyn QuestionStore>,
    pub engine: Arc<EvaluationEngine>,
}

impl AppState {
    /// Wire the stores and an engine reading from the same question store.
    pub fn new(stores: Stores, config: EvaluationEngineConfig) -> Self {
        let engine = EvaluationEngine::new(stores.questions.clone(), config);
        Self {
            quizzes: stores.quizzes,
            questions: stores.questions,
            engine: Arc::new(engine),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/api/quizzes", handlers::routes())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "message": "quizscore is up and running" }))
}

/// Bind `address` and serve the API until the process is stopped.
pub async fn serve(state: AppState, address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    let local = listener.local_addr()?;

    tracing::info!(address = %local, "server is listening");

    axum::serve(listener, router(state))
        .await
        .context("server terminated unexpectedly")
}
