//! Manifest row types

use std::path::PathBuf;

use chrono::NaiveDate;

/// Field delimiter of a manifest line
pub const MANIFEST_DELIMITER: char = '#';

/// Number of fields every manifest line must carry
pub const MANIFEST_FIELD_COUNT: usize = 5;

/// A validated manifest line.
///
/// Line format: `articleTitle#issueDate(YYYY-MM-DD)#fileName#fileLabel#localeCode`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    /// 1-based line number in the manifest
    pub row_number: usize,
    /// Title as written in the manifest (untrimmed)
    pub article_title: String,
    pub issue_date: NaiveDate,
    pub file_name: String,
    /// `files_directory/file_name`
    pub file_path: PathBuf,
    pub file_label: String,
    /// Canonical locale tag, e.g. `fi_FI`
    pub locale: String,
}
