//! Galley database queries

use anyhow::Result;
use sqlx::PgPool;

use crate::types::{Galley, NewGalley};

/// List galleys of a publication
pub async fn list_galleys(pool: &PgPool, publication_id: i64) -> Result<Vec<Galley>> {
    let galleys = sqlx::query_as::<_, Galley>(
        r#"
        SELECT
            galley_id, publication_id, label, locale, file_id,
            url_path, remote_url AS url_remote
        FROM publication_galleys
        WHERE publication_id = $1
        ORDER BY seq, galley_id
        "#,
    )
    .bind(publication_id)
    .fetch_all(pool)
    .await?;

    Ok(galleys)
}

/// Insert a file-backed galley without a file reference
pub async fn create_galley(pool: &PgPool, galley: &NewGalley) -> Result<i64> {
    let galley_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO publication_galleys
            (publication_id, label, locale, file_id, url_path, remote_url, seq, is_approved)
        VALUES ($1, $2, $3, NULL, NULL, NULL, 0, false)
        RETURNING galley_id
        "#,
    )
    .bind(galley.publication_id)
    .bind(&galley.label)
    .bind(&galley.locale)
    .fetch_one(pool)
    .await?;

    Ok(galley_id)
}

/// Point a galley at its submission file
pub async fn set_galley_file(pool: &PgPool, galley_id: i64, file_id: i64) -> Result<()> {
    let result = sqlx::query("UPDATE publication_galleys SET file_id = $1 WHERE galley_id = $2")
        .bind(file_id)
        .bind(galley_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        anyhow::bail!("galley {galley_id} not found");
    }
    Ok(())
}

/// Delete a galley
pub async fn delete_galley(pool: &PgPool, galley_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM publication_galleys WHERE galley_id = $1")
        .bind(galley_id)
        .execute(pool)
        .await?;

    Ok(())
}
