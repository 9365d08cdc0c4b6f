//! Error types for genealogy-core.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a file failed
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file did not contain the JSON shape we expected
    #[error("invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Input bytes could not be decoded to text
    #[error("cannot decode {path:?} as {encoding}")]
    Decode { path: PathBuf, encoding: String },

    /// Paths or options that cannot work together
    #[error("configuration error: {0}")]
    Config(String),

    /// Name dictionary failed validation
    #[error("dictionary error: {0}")]
    Dictionary(String),

    /// Malformed stdio request
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}
