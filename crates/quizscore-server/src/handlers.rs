use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use quizscore_core::model::{
    parse_id, EvaluationResult, PublicQuestion, Question, Quiz, QuizTitle,
};
use quizscore_core::validate::{QuestionDraft, QuizDraft};
use quizscore_core::ValidationError;

use crate::{error::ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_quiz).get(list_quizzes))
        .route(
            "/{quiz_id}/questions",
            post(create_question).get(list_questions),
        )
        .route("/{quiz_id}/submit", post(submit))
}

async fn create_quiz(
    State(state): State<AppState>,
    body: Result<Json<QuizDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Quiz>), ApiError> {
    let Json(draft) = body?;
    let quiz = state.quizzes.create_quiz(draft.validate()?).await?;

    tracing::info!(quiz_id = %quiz.id, title = %quiz.title, "created quiz");
    Ok((StatusCode::CREATED, Json(quiz)))
}

async fn list_quizzes(State(state): State<AppState>) -> Result<Json<Vec<QuizTitle>>, ApiError> {
    Ok(Json(state.quizzes.list_titles().await?))
}

async fn create_question(
    State(state): State<AppState>,
    Path(quiz_id): Path<String>,
    body: Result<Json<QuestionDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Question>), ApiError> {
    let Json(draft) = body?;
    // The owning quiz is not looked up, only the id format is checked.
    parse_id(&quiz_id).map_err(|_| ValidationError::new("quizId", "is not a valid identifier"))?;

    let question = state
        .questions
        .create_question(&quiz_id, draft.validate()?)
        .await?;

    tracing::info!(quiz_id = %quiz_id, question_id = %question.id, "created question");
    Ok((StatusCode::CREATED, Json(question)))
}

async fn list_questions(
    State(state): State<AppState>,
    Path(quiz_id): Path<String>,
) -> Result<Json<Vec<PublicQuestion>>, ApiError> {
    Ok(Json(state.questions.find_public(&quiz_id).await?))
}

async fn submit(
    State(state): State<AppState>,
    Path(quiz_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<EvaluationResult>, ApiError> {
    let Json(body) = body?;
    let answers = body.get("answers").unwrap_or(&Value::Null);

    let result = state.engine.evaluate_json(&quiz_id, answers).await?;
    Ok(Json(result))
}
