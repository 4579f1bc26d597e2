//! The `quizscore validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizscore_core::parser::validate_quiz_definition;

use super::load_definitions;

pub fn execute(file: PathBuf) -> Result<()> {
    let definitions = load_definitions(&file)?;

    let mut total_warnings = 0;

    for def in &definitions {
        println!(
            "Quiz: {} ({} questions)",
            def.quiz.title,
            def.questions.len()
        );

        let warnings = validate_quiz_definition(def);
        for w in &warnings {
            let prefix = w
                .question
                .map(|n| format!("  [#{n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
