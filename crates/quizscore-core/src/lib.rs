//! quizscore-core: data model, store traits, and the answer evaluation engine.
//!
//! This crate defines the quiz/question model, the store interfaces the rest
//! of quizscore is built against, draft validation, quiz definition parsing,
//! and the engine that scores submissions.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod traits;
pub mod validate;

pub use engine::{DuplicateAnswerPolicy, EvaluationEngine, EvaluationEngineConfig};
pub use error::{EvalError, StoreError, ValidationError};
