use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliFormat {
    Markdown,
    Html,
    Plaintext,
}

#[derive(Parser, Debug)]
#[command(
    name = "chatlift",
    author,
    version,
    about = "Extract chat transcripts from saved ChatGPT, Claude, and Poe pages."
)]
pub struct Cli {
    /// Path to the saved HTML page.
    #[arg(value_name = "PAGE")]
    pub page: PathBuf,

    /// Output directory for the transcript file.
    #[arg(long = "out", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<CliFormat>,

    /// Original page URL for the document header (defaults to a file:// URL
    /// of the input path).
    #[arg(long)]
    pub url: Option<String>,

    /// Detect the platform and exit without extracting.
    #[arg(long, action = ArgAction::SetTrue)]
    pub detect: bool,

    /// Copy the assembled document to the clipboard as well.
    #[arg(long, action = ArgAction::SetTrue)]
    pub clipboard: bool,

    /// Emit the protocol response envelope as JSON (for script consumption).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Path to the TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Suppress informational logging.
    #[arg(long, short = 'q', action = ArgAction::SetTrue)]
    pub quiet: bool,
}
