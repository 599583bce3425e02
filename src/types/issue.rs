//! Issue types

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// A dated collection of submissions within a context
#[derive(Debug, Clone, FromRow)]
pub struct Issue {
    #[sqlx(rename = "issue_id")]
    pub id: i64,
    #[sqlx(rename = "journal_id")]
    pub context_id: i64,
    /// Unpublished issues have no date
    pub date_published: Option<NaiveDateTime>,
}
