//! Genre database queries

use anyhow::Result;
use sqlx::PgPool;

use crate::types::Genre;

/// Get genre by entry key within a context
pub async fn get_genre_by_key(pool: &PgPool, context_id: i64, key: &str) -> Result<Option<Genre>> {
    let genre = sqlx::query_as::<_, Genre>(
        r#"
        SELECT genre_id, context_id, entry_key
        FROM genres
        WHERE context_id = $1 AND entry_key = $2
        "#,
    )
    .bind(context_id)
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(genre)
}
