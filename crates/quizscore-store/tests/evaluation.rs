//! Evaluation engine against real store backends.
//!
//! Runs the same scoring scenarios over the in-memory and SQLite stores so the
//! two backends cannot drift apart in what the engine sees.

use std::sync::Arc;

use quizscore_core::model::{new_id, EvaluationResult, QuizOption, SubmittedAnswer};
use quizscore_core::validate::{NewQuestion, NewQuiz};
use quizscore_core::{
    DuplicateAnswerPolicy, EvalError, EvaluationEngine, EvaluationEngineConfig, StoreError,
};
use quizscore_store::{MemoryStore, SqliteStore, Stores};

struct Fixture {
    stores: Stores,
    quiz_id: String,
    empty_quiz_id: String,
    question_ids: [String; 3],
}

fn three_options() -> Vec<QuizOption> {
    ["opt1", "opt2", "opt3"]
        .iter()
        .map(|id| QuizOption {
            id: id.to_string(),
            text: format!("Option {id}"),
        })
        .collect()
}

async fn seed(stores: Stores) -> Fixture {
    let quiz = stores
        .quizzes
        .create_quiz(NewQuiz {
            title: "Test Quiz".into(),
        })
        .await
        .unwrap();
    let empty = stores
        .quizzes
        .create_quiz(NewQuiz {
            title: "Empty Quiz".into(),
        })
        .await
        .unwrap();

    let mut ids = Vec::new();
    for (text, correct) in [
        ("What is 2+2?", "opt2"),
        ("What is the capital of Japan?", "opt1"),
        ("What color is the sky?", "opt2"),
    ] {
        let question = stores
            .questions
            .create_question(
                &quiz.id,
                NewQuestion {
                    text: text.into(),
                    options: three_options(),
                    correct_option_id: correct.into(),
                },
            )
            .await
            .unwrap();
        ids.push(question.id);
    }

    Fixture {
        stores,
        quiz_id: quiz.id,
        empty_quiz_id: empty.id,
        question_ids: ids.try_into().unwrap(),
    }
}

async fn fixtures() -> Vec<Fixture> {
    let memory = Stores::shared(Arc::new(MemoryStore::new()));
    let sqlite = Stores::shared(Arc::new(
        SqliteStore::connect("sqlite::memory:").await.unwrap(),
    ));
    vec![seed(memory).await, seed(sqlite).await]
}

fn engine(fixture: &Fixture, policy: DuplicateAnswerPolicy) -> EvaluationEngine {
    EvaluationEngine::new(
        fixture.stores.questions.clone(),
        EvaluationEngineConfig {
            duplicate_answers: policy,
        },
    )
}

fn submit(fixture: &Fixture, picks: &[(usize, &str)]) -> Vec<SubmittedAnswer> {
    picks
        .iter()
        .map(|(i, opt)| SubmittedAnswer::new(fixture.question_ids[*i].clone(), *opt))
        .collect()
}

#[tokio::test]
async fn scoring_scenarios() {
    for fixture in fixtures().await {
        let engine = engine(&fixture, DuplicateAnswerPolicy::CountEach);
        let cases: [(&[(usize, &str)], u64); 4] = [
            (&[(0, "opt2"), (1, "opt1"), (2, "opt2")], 3),
            (&[(0, "opt2"), (1, "opt2"), (2, "opt2")], 2),
            (&[(0, "opt1"), (1, "opt2"), (2, "opt3")], 0),
            (&[(0, "opt2"), (1, "opt1")], 2),
        ];

        for (picks, expected) in cases {
            let result = engine
                .evaluate(&fixture.quiz_id, &submit(&fixture, picks))
                .await
                .unwrap();
            assert_eq!(
                result,
                EvaluationResult {
                    score: expected,
                    total: 3
                }
            );
        }
    }
}

#[tokio::test]
async fn nonexistent_question_is_ignored() {
    for fixture in fixtures().await {
        let engine = engine(&fixture, DuplicateAnswerPolicy::CountEach);
        let mut answers = submit(&fixture, &[(0, "opt2")]);
        answers.push(SubmittedAnswer::new(new_id(), "opt1"));

        let result = engine.evaluate(&fixture.quiz_id, &answers).await.unwrap();
        assert_eq!(result, EvaluationResult { score: 1, total: 3 });
    }
}

#[tokio::test]
async fn question_from_another_quiz_is_ignored() {
    for fixture in fixtures().await {
        let other_quiz = new_id();
        let foreign = fixture
            .stores
            .questions
            .create_question(
                &other_quiz,
                NewQuestion {
                    text: "Elsewhere".into(),
                    options: three_options(),
                    correct_option_id: "opt1".into(),
                },
            )
            .await
            .unwrap();

        let engine = engine(&fixture, DuplicateAnswerPolicy::CountEach);
        let answers = vec![SubmittedAnswer::new(foreign.id, "opt1")];
        let result = engine.evaluate(&fixture.quiz_id, &answers).await.unwrap();
        assert_eq!(result, EvaluationResult { score: 0, total: 3 });
    }
}

#[tokio::test]
async fn empty_and_unknown_quizzes_are_indistinguishable() {
    for fixture in fixtures().await {
        let engine = engine(&fixture, DuplicateAnswerPolicy::CountEach);

        let existing = engine.evaluate(&fixture.empty_quiz_id, &[]).await;
        assert!(matches!(existing, Err(EvalError::NoQuestionsForQuiz { .. })));

        let unknown = engine.evaluate(&new_id(), &[]).await;
        assert!(matches!(unknown, Err(EvalError::NoQuestionsForQuiz { .. })));
    }
}

#[tokio::test]
async fn duplicate_answers_follow_policy() {
    for fixture in fixtures().await {
        let answers = submit(&fixture, &[(0, "opt2"), (0, "opt2")]);

        let counted = engine(&fixture, DuplicateAnswerPolicy::CountEach)
            .evaluate(&fixture.quiz_id, &answers)
            .await
            .unwrap();
        assert_eq!(counted.score, 2);

        let first_only = engine(&fixture, DuplicateAnswerPolicy::FirstOnly)
            .evaluate(&fixture.quiz_id, &answers)
            .await
            .unwrap();
        assert_eq!(first_only.score, 1);
    }
}

#[tokio::test]
async fn malformed_quiz_id_is_a_store_failure() {
    for fixture in fixtures().await {
        let engine = engine(&fixture, DuplicateAnswerPolicy::CountEach);
        let err = engine.evaluate("invalid-id", &[]).await.unwrap_err();
        assert!(matches!(err, EvalError::Store(StoreError::MalformedId(_))));
        assert!(!err.is_client_error());
    }
}

#[tokio::test]
async fn empty_quiz_with_malformed_question_id_reports_no_questions() {
    for fixture in fixtures().await {
        let engine = engine(&fixture, DuplicateAnswerPolicy::CountEach);
        let answers = vec![SubmittedAnswer::new("Q1", "opt2")];

        for quiz_id in [fixture.empty_quiz_id.clone(), new_id()] {
            let err = engine.evaluate(&quiz_id, &answers).await.unwrap_err();
            assert!(matches!(err, EvalError::NoQuestionsForQuiz { .. }));
        }
    }
}
