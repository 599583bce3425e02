//! User types

use sqlx::FromRow;

/// Account that performs the import and is recorded as uploader
#[derive(Debug, Clone, FromRow)]
pub struct User {
    #[sqlx(rename = "user_id")]
    pub id: i64,
    pub username: String,
}
