//! Validation of quiz and question drafts.
//!
//! Drafts mirror what an author sends: every field is optional so that a
//! missing field is reported as a [`ValidationError`] rather than a
//! deserialization failure. A validated draft becomes a [`NewQuiz`] or
//! [`NewQuestion`], which is what the stores accept.
//!
//! No referential checks are made: the owning quiz is not looked
//! up, and `correct_option_id` is not matched against the option ids.

use serde::Deserialize;

use crate::error::ValidationError;
use crate::model::QuizOption;

/// Author input for a quiz.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizDraft {
    #[serde(default)]
    pub title: Option<String>,
}

/// A validated quiz, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuiz {
    pub title: String,
}

impl QuizDraft {
    pub fn validate(self) -> Result<NewQuiz, ValidationError> {
        let title = required_trimmed(self.title, "title")?;
        Ok(NewQuiz { title })
    }
}

/// Author input for a single option.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Author input for a question.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<OptionDraft>>,
    #[serde(default, alias = "correct_option_id")]
    pub correct_option_id: Option<String>,
}

/// A validated question, ready to be stored under a quiz id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub text: String,
    pub options: Vec<QuizOption>,
    pub correct_option_id: String,
}

impl QuestionDraft {
    pub fn validate(self) -> Result<NewQuestion, ValidationError> {
        let text = required_trimmed(self.text, "text")?;

        let options = self
            .options
            .ok_or_else(|| ValidationError::required("options"))?
            .into_iter()
            .enumerate()
            .map(|(i, opt)| {
                Ok(QuizOption {
                    id: required(opt.id, format!("options[{i}].id"))?,
                    text: required(opt.text, format!("options[{i}].text"))?,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let correct_option_id = required(self.correct_option_id, "correctOptionId")?;

        Ok(NewQuestion {
            text,
            options,
            correct_option_id,
        })
    }
}

fn required(value: Option<String>, field: impl Into<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::required(field)),
    }
}

fn required_trimmed(
    value: Option<String>,
    field: impl Into<String>,
) -> Result<String, ValidationError> {
    required(value.map(|v| v.trim().to_string()), field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str, text: &str) -> OptionDraft {
        OptionDraft {
            id: Some(id.into()),
            text: Some(text.into()),
        }
    }

    #[test]
    fn quiz_title_is_trimmed() {
        let quiz = QuizDraft {
            title: Some("  JavaScript Basics  ".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(quiz.title, "JavaScript Basics");
    }

    #[test]
    fn quiz_title_required() {
        let err = QuizDraft::default().validate().unwrap_err();
        assert_eq!(err.field, "title");

        let err = QuizDraft {
            title: Some("   ".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "title");
    }

    #[test]
    fn valid_question() {
        let question = QuestionDraft {
            text: Some(" What is JavaScript? ".into()),
            options: Some(vec![
                option("opt1", "A programming language"),
                option("opt2", "A coffee brand"),
            ]),
            correct_option_id: Some("opt1".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(question.text, "What is JavaScript?");
        assert_eq!(question.options.len(), 2);
        assert_eq!(question.correct_option_id, "opt1");
    }

    #[test]
    fn option_missing_text_or_id_rejected() {
        let draft = QuestionDraft {
            text: Some("Test question".into()),
            options: Some(vec![
                OptionDraft {
                    id: Some("opt1".into()),
                    text: None,
                },
                OptionDraft {
                    id: None,
                    text: Some("Option 2".into()),
                },
            ]),
            correct_option_id: Some("opt1".into()),
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(err.field, "options[0].text");
    }

    #[test]
    fn missing_options_and_answer_key_rejected() {
        let draft: QuestionDraft =
            serde_json::from_str(r#"{"text":"Incomplete question"}"#).unwrap();
        let err = draft.validate().unwrap_err();
        assert_eq!(err.field, "options");

        let draft: QuestionDraft = serde_json::from_str(
            r#"{"text":"No key","options":[{"id":"a","text":"A"}]}"#,
        )
        .unwrap();
        let err = draft.validate().unwrap_err();
        assert_eq!(err.field, "correctOptionId");
    }

    #[test]
    fn answer_key_not_checked_against_options() {
        let question = QuestionDraft {
            text: Some("Lenient".into()),
            options: Some(vec![option("a", "A"), option("b", "B")]),
            correct_option_id: Some("z".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(question.correct_option_id, "z");
    }

    #[test]
    fn answer_key_accepts_json_and_toml_spellings() {
        let from_json: QuestionDraft = serde_json::from_value(serde_json::json!({
            "text": "Q",
            "options": [{ "id": "a", "text": "A" }],
            "correctOptionId": "a",
        }))
        .unwrap();
        assert_eq!(from_json.correct_option_id.as_deref(), Some("a"));

        let from_toml: QuestionDraft = toml::from_str(
            "text = \"Q\"\ncorrect_option_id = \"a\"\noptions = [{ id = \"a\", text = \"A\" }]\n",
        )
        .unwrap();
        assert_eq!(from_toml.correct_option_id.as_deref(), Some("a"));
        assert_eq!(from_toml.validate().unwrap().options.len(), 1);
    }
}
