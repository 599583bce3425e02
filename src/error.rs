//! Error taxonomy for the galley import

use std::path::PathBuf;

use thiserror::Error;

/// Row-level failure. Recovered locally; the run continues with the next row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("data or delimiter # missing (expected {expected} fields, got {found})")]
    MalformedRow { expected: usize, found: usize },

    #[error("line is not valid UTF-8 (first bad byte at column {column})")]
    InvalidEncoding { column: usize },

    #[error("dates should be formatted YYYY-MM-DD: {value}")]
    BadDateFormat { value: String },

    #[error("file not found {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("locale not supported in context {code}")]
    UnsupportedLocale { code: String },

    #[error("NO MATCHES FOR {title}")]
    NoMatch { title: String },

    #[error("TOO MANY MATCHES FOR {title} ({count} candidates)")]
    AmbiguousMatch { title: String, count: usize },

    #[error("store operation failed for {title}: {detail}")]
    PersistenceFailure { title: String, detail: String },
}

impl RowError {
    /// Stable machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            RowError::MalformedRow { .. } => "MALFORMED_ROW",
            RowError::InvalidEncoding { .. } => "INVALID_ENCODING",
            RowError::BadDateFormat { .. } => "BAD_DATE_FORMAT",
            RowError::FileNotFound { .. } => "FILE_NOT_FOUND",
            RowError::UnsupportedLocale { .. } => "UNSUPPORTED_LOCALE",
            RowError::NoMatch { .. } => "NO_MATCH",
            RowError::AmbiguousMatch { .. } => "AMBIGUOUS_MATCH",
            RowError::PersistenceFailure { .. } => "PERSISTENCE_FAILURE",
        }
    }

    /// Title already named by the message, if any
    pub fn title(&self) -> Option<&str> {
        match self {
            RowError::NoMatch { title }
            | RowError::AmbiguousMatch { title, .. }
            | RowError::PersistenceFailure { title, .. } => Some(title),
            _ => None,
        }
    }
}

/// Run-level precondition failure. Aborts the whole import.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("manifest file does not exist: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("files directory does not exist: {}", .0.display())]
    FilesDirectoryNotFound(PathBuf),

    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("unknown context path: {0}")]
    UnknownContext(String),

    #[error("no genre with key {key} in context {context_path}")]
    NoGenre { key: String, context_path: String },
}
