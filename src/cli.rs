//! CLI argument parsing for the galley-import binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "galley-import", about = "Attach galley files to published submissions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import galleys listed in a manifest
    ///
    /// Manifest lines: articleTitle#issueDate(YYYY-MM-DD)#fileName#fileLabel#localeCode
    Run {
        /// Manifest file, one galley per line
        manifest: PathBuf,
        /// Directory holding the files named in the manifest
        files_dir: PathBuf,
        /// URL path of the journal
        context_path: String,
        /// Username recorded as uploader
        username: String,
        /// Disable colored ERROR/NOTICE tags
        #[arg(long)]
        no_color: bool,
    },
}
