//! Collaborator store abstraction.
//!
//! `ImportStore` is everything the import needs from the host system: lookups
//! of users, contexts, genres, issues and submissions, and creation of
//! galleys and submission files. `PgImportStore` talks to PostgreSQL and the
//! on-disk file storage; the in-memory store in `memory` backs the tests.
//!
//! The trait is object-safe so the pipeline can hold `&dyn ImportStore`.

mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgImportStore;

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{Context, Galley, Genre, Issue, NewGalley, NewSubmissionFile, Submission, User};

#[async_trait]
pub trait ImportStore: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn find_context_by_path(&self, path: &str) -> Result<Option<Context>>;

    async fn find_genre_by_key(&self, context_id: i64, key: &str) -> Result<Option<Genre>>;

    /// All issues of a context, in store order
    async fn list_issues(&self, context_id: i64) -> Result<Vec<Issue>>;

    /// Submissions assigned to an issue, each with its current publication
    async fn list_issue_submissions(&self, context_id: i64, issue_id: i64) -> Result<Vec<Submission>>;

    async fn list_galleys(&self, publication_id: i64) -> Result<Vec<Galley>>;

    /// Insert a galley without a file reference; returns the new galley id
    async fn create_galley(&self, galley: &NewGalley) -> Result<i64>;

    /// Set the file reference of a galley created earlier
    async fn attach_file(&self, galley_id: i64, file_id: i64) -> Result<()>;

    async fn delete_galley(&self, galley_id: i64) -> Result<()>;

    /// Insert a file record and move the bytes at `source` into permanent
    /// storage; returns the new file id
    async fn create_submission_file(&self, file: &NewSubmissionFile, source: &Path) -> Result<i64>;
}
