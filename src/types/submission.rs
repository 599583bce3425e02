//! Submission and publication types

use std::collections::HashMap;

/// An editorial work together with its current publication
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: i64,
    pub context_id: i64,
    /// Primary language of the submission
    pub locale: Option<String>,
    pub current_publication: Publication,
}

/// The versioned metadata of a submission targeted by the import
#[derive(Debug, Clone, Default)]
pub struct Publication {
    pub id: i64,
    /// Title per locale, e.g. `"en_US" -> "Foo"`
    pub titles: HashMap<String, String>,
}

impl Publication {
    pub fn title(&self, locale: &str) -> Option<&str> {
        self.titles.get(locale).map(String::as_str)
    }
}
