//! Staging and permanent storage of submission files on disk

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::{debug, warn};

use crate::types::NewSubmissionFile;

/// Prefix of staged copies in the temporary directory
const STAGING_PREFIX: &str = "embed";

/// A temporary copy of a source file.
///
/// The copy is deleted when the value is dropped, on every exit path.
pub struct StagedFile {
    file: NamedTempFile,
}

impl StagedFile {
    /// Copy `source` into a fresh file under `temp_dir`
    pub async fn stage(source: &Path, temp_dir: &Path) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(temp_dir)
            .with_context(|| format!("Failed to create staging file in {}", temp_dir.display()))?;
        fs::copy(source, file.path())
            .await
            .with_context(|| format!("Failed to stage {}", source.display()))?;
        debug!("Staged {} at {}", source.display(), file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Permanent file storage rooted at the configured files directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of a proof file:
    /// `journals/<ctx>/articles/<sub>/submission/proof/<sub>-<genre>-<file>-<rev>-<stage>-<yyyymmdd>.<ext>`
    pub fn proof_path(&self, context_id: i64, file: &NewSubmissionFile, file_id: i64) -> PathBuf {
        self.root
            .join("journals")
            .join(context_id.to_string())
            .join("articles")
            .join(file.submission_id.to_string())
            .join("submission")
            .join("proof")
            .join(stored_file_name(file, file_id, file.date_uploaded))
    }

    /// Copy `source` to `destination`, creating parent directories
    pub async fn store(&self, source: &Path, destination: &Path) -> Result<u64> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let bytes = fs::copy(source, destination)
            .await
            .with_context(|| format!("Failed to store file at {}", destination.display()))?;
        debug!("Stored {} bytes at {}", bytes, destination.display());
        Ok(bytes)
    }

    /// Remove a stored file whose record never made it into the database.
    /// A file that is already gone is fine.
    pub async fn discard(&self, path: &Path) {
        match fs::remove_file(path).await {
            Ok(()) => debug!("Discarded {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to discard {}: {}", path.display(), e),
        }
    }
}

fn stored_file_name(file: &NewSubmissionFile, file_id: i64, uploaded: NaiveDateTime) -> String {
    let extension = Path::new(&file.original_file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();
    format!(
        "{}-{}-{}-{}-{}-{}{}",
        file.submission_id,
        file.genre_id,
        file_id,
        file.revision,
        file.file_stage,
        uploaded.format("%Y%m%d"),
        extension
    )
}
