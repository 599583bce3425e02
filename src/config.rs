//! Configuration management

use std::path::PathBuf;

use anyhow::{self, Context, Result};

const DEFAULT_GENRE_KEY: &str = "SUBMISSION";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Root of permanent submission file storage
    pub files_dir: PathBuf,

    /// Directory for staged copies during upload
    pub temp_dir: PathBuf,

    /// Directory for rotated log files
    pub logs_dir: PathBuf,

    /// Genre entry key assigned to imported files
    pub genre_key: String,

    pub max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set")?;

        let files_dir = std::env::var("FILES_DIR")
            .map(PathBuf::from)
            .context("FILES_DIR must be set to the submission file storage root")?;

        let temp_dir = std::env::var("TEMP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir());

        let logs_dir = std::env::var("LOGS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./logs"));

        let genre_key = std::env::var("GALLEY_GENRE_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GENRE_KEY.to_string());

        let max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS is not a number: {raw}"))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        Ok(Self {
            database_url,
            files_dir,
            temp_dir,
            logs_dir,
            genre_key,
            max_connections,
        })
    }
}
