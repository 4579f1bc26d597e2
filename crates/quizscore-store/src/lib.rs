//! quizscore-store: quiz and question store implementations.
//!
//! Implements the `QuizStore` and `QuestionStore` traits in memory and on
//! SQLite, and builds the configured backend from `quizscore.toml`.

pub mod config;
mod error;
pub mod memory;
pub mod sqlite;

pub use config::{create_stores, load_config, load_config_from, QuizscoreConfig, StoreConfig, Stores};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
