//! Publication date to issue lookup, built once per run

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::types::Issue;

/// Read-only mapping from publication day to issue id.
///
/// Issues sharing a publication day overwrite each other in list order;
/// the last one wins. Unpublished issues are not indexed.
#[derive(Debug, Clone, Default)]
pub struct IssueIndex {
    by_date: HashMap<NaiveDate, i64>,
}

impl IssueIndex {
    pub fn build(issues: &[Issue]) -> Self {
        let mut by_date = HashMap::with_capacity(issues.len());
        for issue in issues {
            let Some(published) = issue.date_published else {
                debug!("Issue {} has no publication date, not indexed", issue.id);
                continue;
            };
            if let Some(previous) = by_date.insert(published.date(), issue.id) {
                debug!(
                    "Issue {} replaces issue {} for date {}",
                    issue.id,
                    previous,
                    published.date()
                );
            }
        }
        Self { by_date }
    }

    pub fn issue_for(&self, date: NaiveDate) -> Option<i64> {
        self.by_date.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }
}
