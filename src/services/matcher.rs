//! Resolve a manifest row to exactly one submission

use tracing::{debug, warn};

use crate::error::RowError;
use crate::services::issue_index::IssueIndex;
use crate::services::store::ImportStore;
use crate::types::{ManifestRow, Submission};

/// Keep submissions whose current title in `locale` equals `title`.
///
/// Both sides are trimmed once; no case folding or other normalization.
pub fn filter_by_title(submissions: Vec<Submission>, title: &str, locale: &str) -> Vec<Submission> {
    let wanted = title.trim();
    submissions
        .into_iter()
        .filter(|s| {
            s.current_publication
                .title(locale)
                .is_some_and(|t| t.trim() == wanted)
        })
        .collect()
}

/// Find the unique submission in the row's issue carrying the row's title.
///
/// A date without an issue is treated as zero candidates.
pub async fn find_submission(
    store: &dyn ImportStore,
    context_id: i64,
    index: &IssueIndex,
    row: &ManifestRow,
) -> Result<Submission, RowError> {
    let Some(issue_id) = index.issue_for(row.issue_date) else {
        debug!("No issue published on {}", row.issue_date);
        return Err(RowError::NoMatch {
            title: row.article_title.clone(),
        });
    };

    let submissions = store
        .list_issue_submissions(context_id, issue_id)
        .await
        .map_err(|e| {
            warn!("Failed to list submissions of issue {}: {:#}", issue_id, e);
            RowError::PersistenceFailure {
                title: row.article_title.clone(),
                detail: format!("{e:#}"),
            }
        })?;
    let total = submissions.len();
    let mut candidates = filter_by_title(submissions, &row.article_title, &row.locale);
    debug!(
        "Issue {}: {} of {} submissions match title",
        issue_id,
        candidates.len(),
        total
    );

    match candidates.len() {
        0 => Err(RowError::NoMatch {
            title: row.article_title.clone(),
        }),
        1 => Ok(candidates.remove(0)),
        count => Err(RowError::AmbiguousMatch {
            title: row.article_title.clone(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::memory::MemoryImportStore;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn row(title: &str, date: &str) -> ManifestRow {
        ManifestRow {
            row_number: 1,
            article_title: title.to_string(),
            issue_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            file_name: "f.pdf".to_string(),
            file_path: PathBuf::from("f.pdf"),
            file_label: "PDF".to_string(),
            locale: "en_US".to_string(),
        }
    }

    async fn store_with(titles: &[&str]) -> (MemoryImportStore, IssueIndex, i64) {
        let store = MemoryImportStore::new();
        let ctx = store.add_context("journal", "en_US", &["en_US", "fi_FI"]);
        let issue = store.add_issue(ctx, "2020-05-01");
        for title in titles {
            store.add_submission(ctx, issue, &[("en_US", title)]);
        }
        let issues = store.list_issues(ctx).await.unwrap();
        (store, IssueIndex::build(&issues), ctx)
    }

    #[tokio::test]
    async fn test_unique_match() {
        let (store, index, ctx) = store_with(&["Foo", "Bar"]).await;
        let found = find_submission(&store, ctx, &index, &row("Bar", "2020-05-01"))
            .await
            .unwrap();
        assert_eq!(found.current_publication.title("en_US"), Some("Bar"));
    }

    #[tokio::test]
    async fn test_title_compared_after_trim() {
        let (store, index, ctx) = store_with(&["  Foo "]).await;
        let result = find_submission(&store, ctx, &index, &row(" Foo", "2020-05-01")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_no_case_folding() {
        let (store, index, ctx) = store_with(&["Foo"]).await;
        let result = find_submission(&store, ctx, &index, &row("foo", "2020-05-01")).await;
        assert_eq!(result.unwrap_err(), RowError::NoMatch { title: "foo".to_string() });
    }

    #[tokio::test]
    async fn test_duplicate_titles_are_ambiguous() {
        let (store, index, ctx) = store_with(&["Foo", "Foo"]).await;
        let result = find_submission(&store, ctx, &index, &row("Foo", "2020-05-01")).await;
        assert_eq!(
            result.unwrap_err(),
            RowError::AmbiguousMatch { title: "Foo".to_string(), count: 2 }
        );
    }

    #[tokio::test]
    async fn test_unknown_issue_date_is_no_match() {
        let (store, index, ctx) = store_with(&["Foo"]).await;
        let result = find_submission(&store, ctx, &index, &row("Foo", "2021-01-01")).await;
        assert!(matches!(result, Err(RowError::NoMatch { .. })));
    }

    #[test]
    fn test_filter_ignores_other_locales() {
        let mut publication = crate::types::Publication::default();
        publication.titles.insert("fi_FI".to_string(), "Foo".to_string());
        let submission = Submission {
            id: 1,
            context_id: 1,
            locale: None,
            current_publication: publication,
        };
        assert!(filter_by_title(vec![submission], "Foo", "en_US").is_empty());
    }
}
