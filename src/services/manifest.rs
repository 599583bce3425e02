//! Manifest line parsing and validation
//!
//! Checks run in a fixed order and the first failure wins:
//! field count, date format, file existence, locale support.

use std::path::{Component, Path};

use chrono::NaiveDate;

use crate::error::RowError;
use crate::services::locale::normalize_locale;
use crate::types::{ManifestRow, MANIFEST_DELIMITER, MANIFEST_FIELD_COUNT};

/// Split raw manifest bytes into lines without decoding them.
///
/// A trailing newline does not produce an extra empty line.
pub fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = bytes.split(|b| *b == b'\n').collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Parse `YYYY-MM-DD` strictly: exact shape and a real calendar date.
pub fn parse_issue_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// A file name may only descend into the files directory: no root,
/// drive prefix, `.` or `..` components.
fn is_contained(file_name: &str) -> bool {
    !file_name.is_empty()
        && Path::new(file_name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Validate one manifest line against the files directory and the
/// locales the context accepts.
pub fn parse_row(
    row_number: usize,
    line: &str,
    files_directory: &Path,
    supported_locales: &[String],
) -> Result<ManifestRow, RowError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let parts: Vec<&str> = line.split(MANIFEST_DELIMITER).collect();
    if parts.len() != MANIFEST_FIELD_COUNT {
        return Err(RowError::MalformedRow {
            expected: MANIFEST_FIELD_COUNT,
            found: parts.len(),
        });
    }

    let (article_title, raw_date, file_name, file_label, raw_locale) =
        (parts[0], parts[1], parts[2], parts[3], parts[4]);

    let issue_date = parse_issue_date(raw_date).ok_or_else(|| RowError::BadDateFormat {
        value: raw_date.to_string(),
    })?;

    let file_path = files_directory.join(file_name);
    if !is_contained(file_name) || !file_path.is_file() {
        return Err(RowError::FileNotFound { path: file_path });
    }

    let code = raw_locale.trim();
    let locale = normalize_locale(code)
        .filter(|tag| supported_locales.iter().any(|s| s == tag))
        .ok_or_else(|| RowError::UnsupportedLocale {
            code: code.to_string(),
        })?;

    Ok(ManifestRow {
        row_number,
        article_title: article_title.to_string(),
        issue_date,
        file_name: file_name.to_string(),
        file_path,
        file_label: file_label.to_string(),
        locale: locale.to_string(),
    })
}
