//! TOML quiz definition parser.
//!
//! Loads quiz definitions (a title plus its questions) from TOML files and
//! directories, and checks them for authoring mistakes the stores accept.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::validate::{NewQuestion, NewQuiz, QuestionDraft, QuizDraft};

/// Layout of a quiz definition file.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: QuizDraft,
    #[serde(default)]
    questions: Vec<QuestionDraft>,
}

/// A validated quiz and its questions, ready to import into a store.
#[derive(Debug, Clone)]
pub struct QuizDefinition {
    pub quiz: NewQuiz,
    pub questions: Vec<NewQuestion>,
}

/// Parse a single TOML file into a `QuizDefinition`.
pub fn parse_quiz_file(path: &Path) -> Result<QuizDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `QuizDefinition` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<QuizDefinition> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let quiz = parsed
        .quiz
        .validate()
        .with_context(|| format!("invalid quiz in {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            q.validate().with_context(|| {
                format!("invalid question #{} in {}", i + 1, source_path.display())
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuizDefinition { quiz, questions })
}

/// Recursively list the `.toml` files under `dir`, in sorted order.
pub fn find_quiz_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(find_quiz_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }

    Ok(files)
}

/// A warning from quiz definition validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a quiz definition for mistakes that creation does not reject.
pub fn validate_quiz_definition(def: &QuizDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if def.questions.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "quiz has no questions and cannot be submitted".into(),
        });
    }

    for (i, question) in def.questions.iter().enumerate() {
        let number = Some(i + 1);

        if question.options.is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "question has no options".into(),
            });
        }

        let mut seen_ids = HashSet::new();
        for option in &question.options {
            if !seen_ids.insert(option.id.as_str()) {
                warnings.push(ValidationWarning {
                    question: number,
                    message: format!("duplicate option id: {}", option.id),
                });
            }
        }

        if !seen_ids.contains(question.correct_option_id.as_str()) {
            warnings.push(ValidationWarning {
                question: number,
                message: format!(
                    "correct_option_id '{}' does not match any option",
                    question.correct_option_id
                ),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_TOML: &str = r#"
[quiz]
title = "  General Knowledge  "

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
]
"#;

    #[test]
    fn parse_valid_toml() {
        let def = parse_quiz_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(def.quiz.title, "General Knowledge");
        assert_eq!(def.questions.len(), 2);
        assert_eq!(def.questions[0].options.len(), 3);
        assert_eq!(def.questions[1].correct_option_id, "opt1");
        assert!(validate_quiz_definition(&def).is_empty());
    }

    #[test]
    fn parse_rejects_question_without_text() {
        let toml = r#"
[quiz]
title = "Broken"

[[questions]]
correct_option_id = "a"
options = [{ id = "a", text = "A" }]
"#;
        let err = parse_quiz_str(toml, &PathBuf::from("broken.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("question #1"));
    }

    #[test]
    fn parse_rejects_missing_title() {
        let toml = "[quiz]\n";
        assert!(parse_quiz_str(toml, &PathBuf::from("t.toml")).is_err());
    }

    #[test]
    fn validate_unmatched_answer_key_and_duplicates() {
        let toml = r#"
[quiz]
title = "Sloppy"

[[questions]]
text = "Pick one"
correct_option_id = "c"
options = [{ id = "a", text = "A" }, { id = "a", text = "Also A" }]
"#;
        let def = parse_quiz_str(toml, &PathBuf::from("sloppy.toml")).unwrap();
        let warnings = validate_quiz_definition(&def);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate option id")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("does not match any option") && w.question == Some(1)));
    }

    #[test]
    fn validate_empty_quiz() {
        let def = parse_quiz_str("[quiz]\ntitle = \"Empty\"\n", &PathBuf::from("e.toml")).unwrap();
        let warnings = validate_quiz_definition(&def);
        assert!(warnings.iter().any(|w| w.message.contains("no questions")));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_quiz_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn find_files_recurses_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("a.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("nested/c.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("readme.md"), "").unwrap();

        let names: Vec<String> = find_quiz_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.toml", "b.toml", "c.toml"]);
    }
}
