//! Submission and publication database queries

use std::collections::HashMap;

use anyhow::Result;
use sqlx::{FromRow, PgPool};

use crate::types::{Publication, Submission};

#[derive(Debug, FromRow)]
struct SubmissionTitleRow {
    submission_id: i64,
    context_id: i64,
    locale: Option<String>,
    publication_id: i64,
    title_locale: Option<String>,
    title: Option<String>,
}

/// List submissions whose current publication is assigned to an issue,
/// with the publication titles in every locale.
pub async fn list_issue_submissions(pool: &PgPool, context_id: i64, issue_id: i64) -> Result<Vec<Submission>> {
    let rows = sqlx::query_as::<_, SubmissionTitleRow>(
        r#"
        SELECT
            s.submission_id, s.context_id, s.locale,
            p.publication_id,
            t.locale AS title_locale, t.setting_value AS title
        FROM submissions s
        JOIN publications p ON p.publication_id = s.current_publication_id
        JOIN publication_settings i
            ON i.publication_id = p.publication_id
            AND i.setting_name = 'issueId'
            AND i.setting_value = $2::text
        LEFT JOIN publication_settings t
            ON t.publication_id = p.publication_id AND t.setting_name = 'title'
        WHERE s.context_id = $1
        ORDER BY s.submission_id
        "#,
    )
    .bind(context_id)
    .bind(issue_id)
    .fetch_all(pool)
    .await?;

    Ok(group_submissions(rows))
}

/// Fold one-row-per-title results into submissions, keeping query order.
fn group_submissions(rows: Vec<SubmissionTitleRow>) -> Vec<Submission> {
    let mut submissions: Vec<Submission> = Vec::new();
    let mut positions: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let idx = *positions.entry(row.submission_id).or_insert_with(|| {
            submissions.push(Submission {
                id: row.submission_id,
                context_id: row.context_id,
                locale: row.locale.clone(),
                current_publication: Publication {
                    id: row.publication_id,
                    titles: HashMap::new(),
                },
            });
            submissions.len() - 1
        });
        if let (Some(locale), Some(title)) = (row.title_locale, row.title) {
            submissions[idx].current_publication.titles.insert(locale, title);
        }
    }

    submissions
}
