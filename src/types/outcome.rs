//! Per-row import outcomes

use std::fmt;

use crate::error::RowError;

/// Result of processing one manifest row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Galley and file were created
    Success {
        row: usize,
        title: String,
        publication_id: i64,
    },
    /// The row was rejected. `title` is absent when the line could not be split.
    Error {
        row: usize,
        title: Option<String>,
        error: RowError,
    },
    /// The publication already has a galley; nothing was created
    Notice {
        row: usize,
        title: String,
        publication_id: i64,
    },
}

/// Counters of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows: {} galleys added, {} errors, {} notices",
            self.total(),
            self.succeeded,
            self.failed,
            self.skipped
        )
    }
}
