//! The `quizscore import` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizscore_store::{create_stores, load_config_from, StoreConfig};

use super::load_definitions;

pub async fn execute(file: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let definitions = load_definitions(&file)?;
    let config = load_config_from(config_path.as_deref())?;

    if config.store == StoreConfig::Memory {
        tracing::warn!("importing into the in-memory store; nothing will be kept after exit");
    }

    let stores = create_stores(&config.store).await?;

    let quiz_total = definitions.len();
    let mut question_total = 0;
    for def in definitions {
        let title = def.quiz.title.clone();
        let quiz = stores
            .quizzes
            .create_quiz(def.quiz)
            .await
            .with_context(|| format!("failed to create quiz '{title}'"))?;

        let count = def.questions.len();
        for (i, question) in def.questions.into_iter().enumerate() {
            stores
                .questions
                .create_question(&quiz.id, question)
                .await
                .with_context(|| format!("failed to create question #{} of '{title}'", i + 1))?;
        }

        println!("Imported '{title}' ({count} questions) as {}", quiz.id);
        question_total += count;
    }

    println!("\n{quiz_total} quiz(zes), {question_total} question(s) imported.");

    Ok(())
}
