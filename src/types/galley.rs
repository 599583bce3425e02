//! Galley (published rendition) types

use sqlx::FromRow;

/// A galley as stored for a publication
#[derive(Debug, Clone, FromRow)]
pub struct Galley {
    #[sqlx(rename = "galley_id")]
    pub id: i64,
    pub publication_id: i64,
    pub label: Option<String>,
    pub locale: Option<String>,
    pub file_id: Option<i64>,
    pub url_path: Option<String>,
    pub url_remote: Option<String>,
}

/// Fully populated galley ready for insertion.
///
/// Galleys created by the import are file-backed, so URL fields stay unset and
/// the file reference is filled in afterwards with `attach_file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGalley {
    pub publication_id: i64,
    pub label: String,
    pub locale: String,
}
