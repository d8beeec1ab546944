//! Command-line interface for `jobboard`.
//!
//! # Examples
//!
//! ```bash
//! # Browse the built-in sample catalog in Georgian
//! jobboard
//!
//! # English labels, 5 results per page, custom catalog
//! jobboard --locale en --per-page 5 --data jobs.json
//!
//! # Render once and exit (for CI)
//! jobboard --self-check
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::catalog::Locale;

/// Job board - filter job listings by category, region and keyword.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "jobboard",
    version,
    about = "Terminal job board with accessible dropdown filters"
)]
pub struct Cli {
    /// TOML config file
    ///
    /// Values given on the command line take precedence over the file
    #[arg(long, short = 'c', env = "JOBBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog JSON file (categories, regions, jobs)
    ///
    /// Defaults to the built-in sample catalog
    #[arg(long, short = 'd', env = "JOBBOARD_DATA")]
    pub data: Option<PathBuf>,

    /// Display language
    #[arg(long, short = 'l', value_enum, env = "JOBBOARD_LOCALE")]
    pub locale: Option<Locale>,

    /// Results shown per page
    #[arg(
        long,
        env = "JOBBOARD_PER_PAGE",
        value_parser = clap::value_parser!(u16).range(1..=100)
    )]
    pub per_page: Option<u16>,

    /// File that keeps recent searches
    #[arg(long, env = "JOBBOARD_HISTORY")]
    pub history: Option<PathBuf>,

    /// Write logs to this file
    ///
    /// The terminal belongs to the UI, so logs are off unless a file is given
    #[arg(long, env = "JOBBOARD_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Disable mouse support
    #[arg(long, env = "JOBBOARD_NO_MOUSE")]
    pub no_mouse: bool,

    /// Render the initial screen to stdout and exit
    #[arg(long)]
    pub self_check: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }
}
