//! Error types shared by the library.
//!
//! Per-record rejections (prose comments, unparseable signatures) are not
//! errors and never show up here; these variants cover file-level and
//! infrastructure failures only.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HmDocError>;

#[derive(Debug, Error)]
pub enum HmDocError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}:{column}: malformed source", path.display())]
    MalformedSource {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("parser produced no syntax tree for {}", path.display())]
    NoSyntaxTree { path: PathBuf },

    #[error("unsupported file type: {}", path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("failed to load JavaScript grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("invalid glob pattern {pattern}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("unknown format: {0}. Use markdown or json")]
    UnknownFormat(String),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl HmDocError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HmDocError::Io {
            path: path.into(),
            source,
        }
    }
}
