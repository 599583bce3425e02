//! Create-or-skip galley creation for a matched submission
//!
//! A publication that already has any galley is left alone. Otherwise a
//! galley is created, the source file is staged, recorded and stored, and the
//! galley is pointed at the new file. A failure after the galley exists
//! deletes that galley again.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::RowError;
use crate::services::file_storage::StagedFile;
use crate::services::mime::detect_mime_type;
use crate::services::store::ImportStore;
use crate::types::{
    Genre, ManifestRow, NewGalley, NewSubmissionFile, Outcome, Submission, User,
    ASSOC_TYPE_REPRESENTATION, INITIAL_REVISION, SUBMISSION_FILE_PROOF,
};

/// Run-wide inputs of galley creation
pub struct Materializer<'a> {
    store: &'a dyn ImportStore,
    uploader: &'a User,
    genre: &'a Genre,
    temp_dir: &'a Path,
}

/// Ids of a galley and its file after a successful creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedGalley {
    pub galley_id: i64,
    pub file_id: i64,
}

impl<'a> Materializer<'a> {
    pub fn new(store: &'a dyn ImportStore, uploader: &'a User, genre: &'a Genre, temp_dir: &'a Path) -> Self {
        Self {
            store,
            uploader,
            genre,
            temp_dir,
        }
    }

    /// Produce the row's outcome: a notice when a galley exists, success when
    /// one was created, or a persistence error.
    pub async fn materialize(&self, row: &ManifestRow, submission: &Submission) -> Outcome {
        let publication_id = submission.current_publication.id;
        let title = row.article_title.clone();

        let existing = match self.store.list_galleys(publication_id).await {
            Ok(galleys) => galleys,
            Err(e) => return self.failure(row, e),
        };
        if !existing.is_empty() {
            let labels: Vec<&str> = existing.iter().filter_map(|g| g.label.as_deref()).collect();
            debug!(
                "Publication {} already has galley(s) {:?}, skipping",
                publication_id, labels
            );
            return Outcome::Notice {
                row: row.row_number,
                title,
                publication_id,
            };
        }

        match self.create(row, submission).await {
            Ok(created) => {
                info!(
                    "Added galley {} with file {} to publication {}",
                    created.galley_id, created.file_id, publication_id
                );
                Outcome::Success {
                    row: row.row_number,
                    title,
                    publication_id,
                }
            }
            Err(e) => self.failure(row, e),
        }
    }

    async fn create(&self, row: &ManifestRow, submission: &Submission) -> Result<CreatedGalley> {
        let galley = NewGalley {
            publication_id: submission.current_publication.id,
            label: row.file_label.clone(),
            locale: row.locale.clone(),
        };
        let galley_id = self.store.create_galley(&galley).await?;

        match self.attach_new_file(row, submission, galley_id).await {
            Ok(file_id) => Ok(CreatedGalley { galley_id, file_id }),
            Err(e) => {
                if let Err(cleanup) = self.store.delete_galley(galley_id).await {
                    warn!("Failed to remove orphaned galley {}: {:#}", galley_id, cleanup);
                }
                Err(e)
            }
        }
    }

    async fn attach_new_file(&self, row: &ManifestRow, submission: &Submission, galley_id: i64) -> Result<i64> {
        // Dropping `staged` removes the temporary copy on every path out of here
        let staged = StagedFile::stage(&row.file_path, self.temp_dir).await?;

        let file_type = detect_mime_type(&row.file_path).await?;
        let file_size = tokio::fs::metadata(&row.file_path)
            .await
            .with_context(|| format!("Failed to read size of {}", row.file_path.display()))?
            .len();
        let now = Utc::now().naive_utc();
        let record = self.file_record(row, submission, galley_id, file_type, file_size as i64, now);

        let file_id = self.store.create_submission_file(&record, staged.path()).await?;
        self.store.attach_file(galley_id, file_id).await?;
        Ok(file_id)
    }

    fn file_record(
        &self,
        row: &ManifestRow,
        submission: &Submission,
        galley_id: i64,
        file_type: String,
        file_size: i64,
        now: NaiveDateTime,
    ) -> NewSubmissionFile {
        NewSubmissionFile {
            submission_id: submission.id,
            submission_locale: submission.locale.clone(),
            genre_id: self.genre.id,
            file_stage: SUBMISSION_FILE_PROOF,
            revision: INITIAL_REVISION,
            uploader_user_id: self.uploader.id,
            original_file_name: row.file_name.clone(),
            file_type,
            file_size,
            viewable: true,
            assoc_type: ASSOC_TYPE_REPRESENTATION,
            assoc_id: galley_id,
            date_uploaded: now,
            date_modified: now,
        }
    }

    fn failure(&self, row: &ManifestRow, e: anyhow::Error) -> Outcome {
        warn!("Row {} ({}): {:#}", row.row_number, row.article_title, e);
        Outcome::Error {
            row: row.row_number,
            title: Some(row.article_title.clone()),
            error: RowError::PersistenceFailure {
                title: row.article_title.clone(),
                detail: format!("{e:#}"),
            },
        }
    }
}
