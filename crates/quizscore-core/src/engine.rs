//! Answer evaluation engine.
//!
//! Scores a participant's submission against the answer keys held by a
//! [`QuestionStore`]. The engine is stateless: each call issues two reads
//! (question count and key-only fetch) and computes the result in memory.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EvalError;
use crate::model::{AnswerKey, EvaluationResult, SubmittedAnswer};
use crate::traits::QuestionStore;

/// How repeated answers to the same question are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateAnswerPolicy {
    /// Every submitted answer is scored independently, so a repeated correct
    /// answer counts more than once and `score` may exceed `total`.
    #[default]
    CountEach,
    /// Only the first answer per question id is scored.
    FirstOnly,
}

impl fmt::Display for DuplicateAnswerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateAnswerPolicy::CountEach => write!(f, "count-each"),
            DuplicateAnswerPolicy::FirstOnly => write!(f, "first-only"),
        }
    }
}

impl FromStr for DuplicateAnswerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "count-each" => Ok(DuplicateAnswerPolicy::CountEach),
            "first-only" => Ok(DuplicateAnswerPolicy::FirstOnly),
            other => Err(format!("unknown duplicate answer policy: {other}")),
        }
    }
}

/// Configuration for the evaluation engine.
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngineConfig {
    pub duplicate_answers: DuplicateAnswerPolicy,
}

/// The answer evaluation engine.
pub struct EvaluationEngine {
    questions: Arc<dyn QuestionStore>,
    config: EvaluationEngineConfig,
}

impl EvaluationEngine {
    pub fn new(questions: Arc<dyn QuestionStore>, config: EvaluationEngineConfig) -> Self {
        Self { questions, config }
    }

    /// Score `answers` against the quiz identified by `quiz_id`.
    ///
    /// Answers naming a question outside this quiz contribute nothing. Fails
    /// with [`EvalError::NoQuestionsForQuiz`] when the quiz has no questions,
    /// which also covers an unknown quiz id.
    pub async fn evaluate(
        &self,
        quiz_id: &str,
        answers: &[SubmittedAnswer],
    ) -> Result<EvaluationResult, EvalError> {
        let question_ids: BTreeSet<String> =
            answers.iter().map(|a| a.question_id.clone()).collect();

        let count = self.questions.count_by_quiz(quiz_id);
        let keys = async {
            if question_ids.is_empty() {
                Ok(Vec::new())
            } else {
                self.questions.find_answer_keys(quiz_id, &question_ids).await
            }
        };
        let (total, keys) = futures::join!(count, keys);

        // An empty quiz is reported as such even when the key read failed.
        let total = total?;
        if total == 0 {
            return Err(EvalError::NoQuestionsForQuiz {
                quiz_id: quiz_id.to_string(),
            });
        }
        let keys = keys?;

        let score = tally(answers, &keys, self.config.duplicate_answers);

        tracing::debug!(
            quiz_id,
            submitted = answers.len(),
            matched = keys.len(),
            score,
            total,
            "evaluated submission"
        );

        Ok(EvaluationResult { score, total })
    }

    /// Score an untyped submission, as received from the API layer.
    ///
    /// Anything other than a JSON array is rejected with
    /// [`EvalError::InvalidInputShape`] before the store is consulted.
    pub async fn evaluate_json(
        &self,
        quiz_id: &str,
        answers: &Value,
    ) -> Result<EvaluationResult, EvalError> {
        let answers = parse_submission(answers)?;
        self.evaluate(quiz_id, &answers).await
    }
}

/// Turn an untyped submission into answers.
///
/// Elements that are not `{questionId, selectedOptionId}` objects cannot
/// match any question, so they are dropped here rather than rejected.
pub fn parse_submission(answers: &Value) -> Result<Vec<SubmittedAnswer>, EvalError> {
    let Value::Array(items) = answers else {
        return Err(EvalError::InvalidInputShape);
    };

    let parsed: Vec<SubmittedAnswer> = items
        .iter()
        .filter_map(|item| SubmittedAnswer::deserialize(item).ok())
        .collect();

    if parsed.len() < items.len() {
        tracing::debug!(
            dropped = items.len() - parsed.len(),
            "ignoring malformed answers in submission"
        );
    }

    Ok(parsed)
}

/// Count the answers whose selected option equals the question's answer key.
pub fn tally(
    answers: &[SubmittedAnswer],
    keys: &[AnswerKey],
    policy: DuplicateAnswerPolicy,
) -> u64 {
    let key_map: HashMap<&str, &str> = keys
        .iter()
        .map(|k| (k.id.as_str(), k.correct_option_id.as_str()))
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut score = 0;

    for answer in answers {
        let first_seen = seen.insert(answer.question_id.as_str());
        if policy == DuplicateAnswerPolicy::FirstOnly && !first_seen {
            continue;
        }
        let Some(correct) = key_map.get(answer.question_id.as_str()) else {
            continue;
        };
        if answer.selected_option_id == *correct {
            score += 1;
        }
    }

    score
}
