pub mod import;
pub mod init;
pub mod list;
pub mod serve;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use quizscore_core::parser::{self, QuizDefinition};

/// Parse a single quiz file, or every quiz file under a directory.
///
/// A file that fails to parse fails the whole load.
pub(crate) fn load_definitions(path: &Path) -> Result<Vec<QuizDefinition>> {
    if path.is_dir() {
        parser::find_quiz_files(path)?
            .iter()
            .map(|p| parser::parse_quiz_file(p))
            .collect()
    } else {
        Ok(vec![parser::parse_quiz_file(path)?])
    }
}
