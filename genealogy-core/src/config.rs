//! Paths for one merge run.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_ENGLISH_PATH: &str = "./src/assets/data/backup/genealogy-min.json";
pub const DEFAULT_TELUGU_PATH: &str = "./src/assets/data/backup/genealogy_telu-min.json";
pub const DEFAULT_OUTPUT_PATH: &str = "./src/assets/data/genealogy-bilingual-improved.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    pub english_path: PathBuf,
    pub telugu_path: PathBuf,
    pub output_path: PathBuf,
    /// `None` uses the bundled name table.
    pub dictionary_path: Option<PathBuf>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            english_path: PathBuf::from(DEFAULT_ENGLISH_PATH),
            telugu_path: PathBuf::from(DEFAULT_TELUGU_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            dictionary_path: None,
        }
    }
}

impl MergeConfig {
    /// Rejects runs that would overwrite one of their own inputs.
    pub fn validate(&self) -> Result<()> {
        let inputs: [(&str, &Path); 2] = [
            ("english", self.english_path.as_path()),
            ("telugu", self.telugu_path.as_path()),
        ];

        for (label, input) in inputs {
            if same_file(input, &self.output_path) {
                return Err(Error::Config(format!(
                    "output {:?} would overwrite the {label} input",
                    self.output_path
                )));
            }
        }

        if let Some(dict) = &self.dictionary_path {
            if same_file(dict, &self.output_path) {
                return Err(Error::Config(format!(
                    "output {:?} would overwrite the dictionary",
                    self.output_path
                )));
            }
        }

        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
