//! The `quizscore list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizscore_store::{create_stores, load_config_from};

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let stores = create_stores(&config.store).await?;

    let quizzes = stores.quizzes.list_titles().await?;
    if quizzes.is_empty() {
        println!("No quizzes found. Run `quizscore import --file <quiz.toml>` to add one.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Questions"]);

    for quiz in &quizzes {
        let count = stores.questions.count_by_quiz(&quiz.id).await?;
        table.add_row(vec![
            Cell::new(&quiz.id),
            Cell::new(&quiz.title),
            Cell::new(count),
        ]);
    }

    println!("{table}");

    Ok(())
}
