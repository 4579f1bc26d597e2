//! Service configuration and store factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizscore_core::traits::{QuestionStore, QuizStore};
use quizscore_core::{DuplicateAnswerPolicy, EvaluationEngineConfig};

use crate::memory::MemoryStore;
use crate::sqlite::SqliteStore;

/// Which backend holds quizzes and questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Nothing survives a restart.
    #[default]
    Memory,
    Sqlite {
        #[serde(default = "default_sqlite_url")]
        url: String,
    },
}

fn default_sqlite_url() -> String {
    "sqlite://quizscore.db".to_string()
}

/// Top-level quizscore configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizscoreConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// How repeated answers to one question are scored.
    #[serde(default)]
    pub duplicate_answers: DuplicateAnswerPolicy,
    #[serde(default)]
    pub store: StoreConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1:8000".to_string()
}

impl Default for QuizscoreConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            duplicate_answers: DuplicateAnswerPolicy::default(),
            store: StoreConfig::default(),
        }
    }
}

impl QuizscoreConfig {
    pub fn engine_config(&self) -> EvaluationEngineConfig {
        EvaluationEngineConfig {
            duplicate_answers: self.duplicate_answers,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied as-is and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizscore.toml` in the current directory
/// 2. `~/.config/quizscore/config.toml`
///
/// Environment variable overrides: `QUIZSCORE_DATABASE_URL`, `PORT`.
pub fn load_config() -> Result<QuizscoreConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizscoreConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizscore.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizscoreConfig::default(),
    };

    if let Ok(url) = std::env::var("QUIZSCORE_DATABASE_URL") {
        config.store = StoreConfig::Sqlite { url };
    }

    if let Ok(port) = std::env::var("PORT") {
        let port: u16 = port
            .parse()
            .with_context(|| format!("invalid PORT value: {port}"))?;
        config.bind_address = format!("0.0.0.0:{port}");
    }

    if let StoreConfig::Sqlite { url } = &mut config.store {
        *url = resolve_env_vars(url);
    }
    config.bind_address = resolve_env_vars(&config.bind_address);

    Ok(config)
}

/// Parse a TOML configuration document.
pub fn parse_config(content: &str) -> Result<QuizscoreConfig> {
    Ok(toml::from_str::<QuizscoreConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizscore"))
}

/// Both store handles, possibly backed by the same instance.
#[derive(Clone)]
pub struct Stores {
    pub quizzes: Arc<dyn QuizStore>,
    pub questions: Arc<dyn QuestionStore>,
}

impl Stores {
    /// Use one value for both stores.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: QuizStore + QuestionStore + 'static,
    {
        Self {
            quizzes: store.clone(),
            questions: store,
        }
    }
}

/// Create the stores described by `config`.
pub async fn create_stores(config: &StoreConfig) -> Result<Stores> {
    match config {
        StoreConfig::Memory => {
            tracing::info!("using in-memory store");
            Ok(Stores::shared(Arc::new(MemoryStore::new())))
        }
        StoreConfig::Sqlite { url } => {
            tracing::info!(url = %url, "using sqlite store");
            let store = SqliteStore::connect(url)
                .await
                .with_context(|| format!("failed to open database: {url}"))?;
            Ok(Stores::shared(Arc::new(store)))
        }
    }
}
