//! The `quizscore serve` command.

use std::path::PathBuf;

use anyhow::Result;

use quizscore_server::AppState;
use quizscore_store::{create_stores, load_config_from};

pub async fn execute(config_path: Option<PathBuf>, address: Option<String>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let address = address.unwrap_or_else(|| config.bind_address.clone());

    let stores = create_stores(&config.store).await?;
    tracing::info!(
        duplicate_answers = %config.duplicate_answers,
        "evaluation engine configured"
    );

    let state = AppState::new(stores, config.engine_config());
    quizscore_server::serve(state, &address).await
}
