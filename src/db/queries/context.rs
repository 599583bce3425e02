//! Journal (context) database queries

use anyhow::Result;
use sqlx::{FromRow, PgPool};
use tracing::warn;

use crate::types::Context;

const SUPPORTED_SUBMISSION_LOCALES: &str = "supportedSubmissionLocales";

#[derive(Debug, FromRow)]
struct JournalRow {
    journal_id: i64,
    path: String,
    primary_locale: String,
    supported_submission_locales: Option<String>,
}

/// Get journal by URL path, including its submission locale setting
pub async fn get_context_by_path(pool: &PgPool, path: &str) -> Result<Option<Context>> {
    let row = sqlx::query_as::<_, JournalRow>(
        r#"
        SELECT
            j.journal_id, j.path, j.primary_locale,
            s.setting_value AS supported_submission_locales
        FROM journals j
        LEFT JOIN journal_settings s
            ON s.journal_id = j.journal_id AND s.setting_name = $2
        WHERE j.path = $1
        "#,
    )
    .bind(path)
    .bind(SUPPORTED_SUBMISSION_LOCALES)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Context {
        id: row.journal_id,
        supported_submission_locales: row
            .supported_submission_locales
            .as_deref()
            .map(parse_locale_list)
            .unwrap_or_default(),
        path: row.path,
        primary_locale: row.primary_locale,
    }))
}

/// Decode a stored locale list.
///
/// Newer installs store a JSON array, older ones a PHP-serialized array such
/// as `a:2:{i:0;s:5:"en_US";i:1;s:5:"fi_FI";}`; for the latter the quoted
/// strings are the values.
pub fn parse_locale_list(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    if raw.starts_with('[') {
        return match serde_json::from_str::<Vec<String>>(raw) {
            Ok(locales) => locales,
            Err(e) => {
                warn!("Unreadable locale list {:?}: {}", raw, e);
                Vec::new()
            }
        };
    }
    raw.split('"')
        .skip(1)
        .step_by(2)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_list() {
        assert_eq!(parse_locale_list(r#"["en_US","fi_FI"]"#), vec!["en_US", "fi_FI"]);
    }

    #[test]
    fn test_parse_php_serialized_list() {
        let raw = r#"a:2:{i:0;s:5:"en_US";i:1;s:5:"sv_SE";}"#;
        assert_eq!(parse_locale_list(raw), vec!["en_US", "sv_SE"]);
    }

    #[test]
    fn test_parse_empty_values() {
        assert!(parse_locale_list("").is_empty());
        assert!(parse_locale_list("a:0:{}").is_empty());
        assert!(parse_locale_list("[]").is_empty());
    }

    #[test]
    fn test_parse_broken_json_is_empty() {
        assert!(parse_locale_list("[\"en_US\"").is_empty());
    }
}
