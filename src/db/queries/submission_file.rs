//! Submission file database queries

use anyhow::Result;
use sqlx::{Postgres, Transaction};

use crate::types::NewSubmissionFile;

/// Insert a submission file record; returns the new file id
pub async fn insert_submission_file(tx: &mut Transaction<'_, Postgres>, file: &NewSubmissionFile) -> Result<i64> {
    let file_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO submission_files (
            revision, submission_id, submission_locale, genre_id, file_stage,
            file_type, file_size, original_file_name, viewable,
            uploader_user_id, assoc_type, assoc_id,
            date_uploaded, date_modified
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING file_id
        "#,
    )
    .bind(file.revision)
    .bind(file.submission_id)
    .bind(&file.submission_locale)
    .bind(file.genre_id)
    .bind(file.file_stage)
    .bind(&file.file_type)
    .bind(file.file_size)
    .bind(&file.original_file_name)
    .bind(file.viewable)
    .bind(file.uploader_user_id)
    .bind(file.assoc_type)
    .bind(file.assoc_id)
    .bind(file.date_uploaded)
    .bind(file.date_modified)
    .fetch_one(&mut **tx)
    .await?;

    Ok(file_id)
}

/// Context that owns a submission; needed to place the file on disk
pub async fn submission_context_id(tx: &mut Transaction<'_, Postgres>, submission_id: i64) -> Result<i64> {
    let context_id: i64 = sqlx::query_scalar("SELECT context_id FROM submissions WHERE submission_id = $1")
        .bind(submission_id)
        .fetch_one(&mut **tx)
        .await?;

    Ok(context_id)
}
