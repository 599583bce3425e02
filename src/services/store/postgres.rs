//! PostgreSQL-backed `ImportStore`

use std::path::Path;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::ImportStore;
use crate::db::queries;
use crate::services::file_storage::FileStorage;
use crate::types::{Context, Galley, Genre, Issue, NewGalley, NewSubmissionFile, Submission, User};

pub struct PgImportStore {
    pool: PgPool,
    storage: FileStorage,
}

impl PgImportStore {
    pub fn new(pool: PgPool, storage: FileStorage) -> Self {
        Self { pool, storage }
    }
}

#[async_trait]
impl ImportStore for PgImportStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        queries::user::get_user_by_username(&self.pool, username).await
    }

    async fn find_context_by_path(&self, path: &str) -> Result<Option<Context>> {
        queries::context::get_context_by_path(&self.pool, path).await
    }

    async fn find_genre_by_key(&self, context_id: i64, key: &str) -> Result<Option<Genre>> {
        queries::genre::get_genre_by_key(&self.pool, context_id, key).await
    }

    async fn list_issues(&self, context_id: i64) -> Result<Vec<Issue>> {
        queries::issue::list_issues(&self.pool, context_id).await
    }

    async fn list_issue_submissions(&self, context_id: i64, issue_id: i64) -> Result<Vec<Submission>> {
        queries::submission::list_issue_submissions(&self.pool, context_id, issue_id).await
    }

    async fn list_galleys(&self, publication_id: i64) -> Result<Vec<Galley>> {
        queries::galley::list_galleys(&self.pool, publication_id).await
    }

    async fn create_galley(&self, galley: &NewGalley) -> Result<i64> {
        queries::galley::create_galley(&self.pool, galley)
            .await
            .context("Failed to insert galley")
    }

    async fn attach_file(&self, galley_id: i64, file_id: i64) -> Result<()> {
        queries::galley::set_galley_file(&self.pool, galley_id, file_id)
            .await
            .context("Failed to link file to galley")
    }

    async fn delete_galley(&self, galley_id: i64) -> Result<()> {
        queries::galley::delete_galley(&self.pool, galley_id).await
    }

    /// The row insert and the byte copy share one transaction: if the copy
    /// fails the record is rolled back, and if the commit fails the copied
    /// bytes are removed.
    async fn create_submission_file(&self, file: &NewSubmissionFile, source: &Path) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let context_id = queries::submission_file::submission_context_id(&mut tx, file.submission_id).await?;
        let file_id = queries::submission_file::insert_submission_file(&mut tx, file)
            .await
            .context("Failed to insert submission file")?;

        let destination = self.storage.proof_path(context_id, file, file_id);
        self.storage.store(source, &destination).await?;

        if let Err(e) = tx.commit().await {
            self.storage.discard(&destination).await;
            return Err(e).context("Failed to commit submission file");
        }
        info!("Stored file {} at {}", file_id, destination.display());
        Ok(file_id)
    }
}
