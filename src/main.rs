//! Galley import - attaches galley files to published submissions
//!
//! Reads a `#`-delimited manifest, matches each line to one submission by
//! issue date and title, and creates a file-backed galley for it.

mod cli;
mod config;
mod db;
mod error;
mod pipeline;
mod services;
mod types;

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::error::SetupError;
use crate::pipeline::{ImportRequest, ImportSettings};
use crate::services::file_storage::FileStorage;
use crate::services::reporter::Reporter;
use crate::services::store::PgImportStore;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    std::fs::create_dir_all(&config.logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.logs_dir, "galley-import.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // stdout carries the import report, so console logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,galley_import=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    match cli.command {
        Command::Run {
            manifest,
            files_dir,
            context_path,
            username,
            no_color,
        } => {
            let request = ImportRequest {
                manifest,
                files_directory: files_dir,
                context_path,
                username,
            };
            let color = !no_color && std::io::stdout().is_terminal();
            match run(&config, &request, color).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("Import aborted: {:#}", e);
                    let tag = if color { "\x1b[31mERROR\x1b[0m" } else { "ERROR" };
                    match e.downcast_ref::<SetupError>() {
                        Some(setup) => println!("{tag} {setup}"),
                        None => println!("{tag} {e:#}"),
                    }
                    ExitCode::FAILURE
                }
            }
        }
    }
}

async fn run(config: &config::Config, request: &ImportRequest, color: bool) -> Result<()> {
    info!("Starting galley import from {}", request.manifest.display());

    let pool = db::create_pool(&config.database_url, config.max_connections).await?;
    info!("Connected to PostgreSQL");

    let storage = FileStorage::new(config.files_dir.clone());
    info!("File storage at {}", storage.root().display());
    let store = PgImportStore::new(pool, storage);

    let settings = ImportSettings {
        temp_dir: config.temp_dir.clone(),
        genre_key: config.genre_key.clone(),
    };
    let reporter = Reporter::new(std::io::stdout().lock(), color);

    let (stdout, summary) = pipeline::run_import(&store, request, &settings, reporter).await?;
    drop(stdout);
    if summary.failed > 0 {
        warn!("{} of {} rows were rejected", summary.failed, summary.total());
    }
    Ok(())
}
