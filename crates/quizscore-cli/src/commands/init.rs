//! The `quizscore init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizscore.toml").exists() {
        println!("quizscore.toml already exists, skipping.");
    } else {
        std::fs::write("quizscore.toml", SAMPLE_CONFIG)?;
        println!("Created quizscore.toml");
    }

    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizscore validate --file quizzes/example.toml");
    println!("  2. Run: quizscore import --file quizzes");
    println!("  3. Run: quizscore serve");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizscore configuration

bind_address = "127.0.0.1:8000"

# "count-each" scores every submitted answer; "first-only" scores one answer per question.
duplicate_answers = "count-each"

[store]
type = "sqlite"
url = "sqlite://quizscore.db"
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
title = "Example Quiz"

[[questions]]
text = "What is 2+2?"
correct_option_id = "opt2"
options = [
    { id = "opt1", text = "3" },
    { id = "opt2", text = "4" },
    { id = "opt3", text = "5" },
]

[[questions]]
text = "What is the capital of Japan?"
correct_option_id = "opt1"
options = [
    { id = "opt1", text = "Tokyo" },
    { id = "opt2", text = "Osaka" },
    { id = "opt3", text = "Kyoto" },
]

[[questions]]
text = "What color is a clear daytime sky?"
correct_option_id = "opt2"
options = [
    { id = "opt1", text = "Green" },
    { id = "opt2", text = "Blue" },
    { id = "opt3", text = "Red" },
]
"#;
