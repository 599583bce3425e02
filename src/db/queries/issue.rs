//! Issue database queries

use anyhow::Result;
use sqlx::PgPool;

use crate::types::Issue;

/// List all issues of a journal
pub async fn list_issues(pool: &PgPool, context_id: i64) -> Result<Vec<Issue>> {
    let issues = sqlx::query_as::<_, Issue>(
        r#"
        SELECT issue_id, journal_id, date_published
        FROM issues
        WHERE journal_id = $1
        ORDER BY issue_id
        "#,
    )
    .bind(context_id)
    .fetch_all(pool)
    .await?;

    Ok(issues)
}
