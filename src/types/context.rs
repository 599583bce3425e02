//! Publication context (journal) types

use sqlx::FromRow;

/// A publication venue with its own locale configuration
#[derive(Debug, Clone)]
pub struct Context {
    pub id: i64,
    pub path: String,
    pub primary_locale: String,
    /// Locales accepted for submissions; may be empty when the context declares none
    pub supported_submission_locales: Vec<String>,
}

impl Context {
    /// Locales a manifest row may target.
    ///
    /// Falls back to the primary locale when no submission locales are configured.
    pub fn effective_locales(&self) -> Vec<String> {
        if self.supported_submission_locales.is_empty() {
            vec![self.primary_locale.clone()]
        } else {
            self.supported_submission_locales.clone()
        }
    }
}

/// File category required by the store for every uploaded file
#[derive(Debug, Clone, FromRow)]
pub struct Genre {
    #[sqlx(rename = "genre_id")]
    pub id: i64,
    pub context_id: i64,
    pub entry_key: String,
}
