//! Galley import run: load run-wide state once, then process the manifest
//! line by line through parsing, matching and galley creation.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::{debug, info, info_span, Instrument};

use crate::error::{RowError, SetupError};
use crate::services::issue_index::IssueIndex;
use crate::services::manifest::{parse_row, split_lines};
use crate::services::matcher::find_submission;
use crate::services::materializer::Materializer;
use crate::services::reporter::Reporter;
use crate::services::store::ImportStore;
use crate::types::{Context, ImportSummary, Outcome, MANIFEST_DELIMITER};

/// What to import and where
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub manifest: PathBuf,
    pub files_directory: PathBuf,
    pub context_path: String,
    pub username: String,
}

/// Run settings that come from configuration rather than the command line
#[derive(Debug, Clone)]
pub struct ImportSettings {
    /// Where source files are staged before upload
    pub temp_dir: PathBuf,
    /// Entry key of the genre assigned to every uploaded file
    pub genre_key: String,
}

/// Import every manifest line and report outcomes.
///
/// Missing inputs, an unknown user or context, and a missing genre abort the
/// run with a `SetupError`. Row failures are reported and never abort.
pub async fn run_import<W: Write>(
    store: &dyn ImportStore,
    request: &ImportRequest,
    settings: &ImportSettings,
    mut reporter: Reporter<W>,
) -> Result<(W, ImportSummary)> {
    if !request.manifest.is_file() {
        return Err(SetupError::ManifestNotFound(request.manifest.clone()).into());
    }
    if !request.files_directory.is_dir() {
        return Err(SetupError::FilesDirectoryNotFound(request.files_directory.clone()).into());
    }

    let manifest = tokio::fs::read(&request.manifest)
        .await
        .with_context(|| format!("Failed to read manifest {}", request.manifest.display()))?;

    let user = store
        .find_user_by_username(&request.username)
        .await?
        .ok_or_else(|| SetupError::UnknownUser(request.username.clone()))?;

    let context = store
        .find_context_by_path(&request.context_path)
        .await?
        .ok_or_else(|| SetupError::UnknownContext(request.context_path.clone()))?;
    let locales = context.effective_locales();

    let genre = store
        .find_genre_by_key(context.id, &settings.genre_key)
        .await?
        .ok_or_else(|| SetupError::NoGenre {
            key: settings.genre_key.clone(),
            context_path: context.path.clone(),
        })?;

    let issues = store.list_issues(context.id).await?;
    let index = IssueIndex::build(&issues);
    info!(
        "Importing into context {} ({}): {} issues indexed, locales {:?}",
        context.path,
        context.id,
        index.len(),
        locales
    );

    let materializer = Materializer::new(store, &user, &genre, &settings.temp_dir);
    let run = RowRun {
        store,
        context: &context,
        locales: &locales,
        index: &index,
        files_directory: &request.files_directory,
        materializer: &materializer,
    };

    for (idx, line) in split_lines(&manifest).into_iter().enumerate() {
        let row_number = idx + 1;
        let outcome = run
            .process(row_number, line)
            .instrument(info_span!("row", row = row_number))
            .await;
        reporter.record(outcome).context("Failed to write report")?;
    }

    let (out, summary) = reporter.finish().context("Failed to write report")?;
    info!("Import finished: {}", summary);
    Ok((out, summary))
}

/// Read-only state shared by every row of one run
struct RowRun<'a> {
    store: &'a dyn ImportStore,
    context: &'a Context,
    locales: &'a [String],
    index: &'a IssueIndex,
    files_directory: &'a Path,
    materializer: &'a Materializer<'a>,
}

impl RowRun<'_> {
    async fn process(&self, row_number: usize, raw: &[u8]) -> Outcome {
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                let error = RowError::InvalidEncoding {
                    column: e.valid_up_to() + 1,
                };
                debug!(code = error.code(), "Rejected: {}", error);
                return Outcome::Error {
                    row: row_number,
                    title: None,
                    error,
                };
            }
        };

        let row = match parse_row(row_number, line, self.files_directory, self.locales) {
            Ok(row) => row,
            Err(error) => {
                debug!(code = error.code(), "Rejected: {}", error);
                return Outcome::Error {
                    row: row_number,
                    title: raw_title(line, &error),
                    error,
                };
            }
        };

        let submission = match find_submission(self.store, self.context.id, self.index, &row).await {
            Ok(submission) => submission,
            Err(error) => {
                debug!(code = error.code(), "Unmatched: {}", error);
                return Outcome::Error {
                    row: row_number,
                    title: Some(row.article_title.clone()),
                    error,
                };
            }
        };

        self.materializer.materialize(&row, &submission).await
    }
}

/// Title field of a line whose split succeeded
fn raw_title(line: &str, error: &RowError) -> Option<String> {
    match error {
        RowError::MalformedRow { .. } | RowError::InvalidEncoding { .. } => None,
        _ => line.split(MANIFEST_DELIMITER).next().map(str::to_string),
    }
}
