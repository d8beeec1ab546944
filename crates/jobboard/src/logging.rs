//! Log subscriber setup.
//!
//! The interactive screen owns the terminal, so logs are written to the
//! configured log file or dropped. In `--self-check` mode, with no file
//! given, they go to stderr. `RUST_LOG` overrides the `-v` level.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;
use crate::error::{Error, Result};

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    File,
    Stderr,
    Off,
}

/// Chooses the log target for `config`.
#[must_use]
pub const fn target(config: &Config) -> Target {
    if config.log_file.is_some() {
        Target::File
    } else if config.self_check {
        Target::Stderr
    } else {
        Target::Off
    }
}

/// Builds the filter: `RUST_LOG` when set, otherwise the `-v` level.
#[must_use]
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_directive()))
}

/// Installs the global subscriber. Returns the target chosen.
///
/// # Errors
///
/// Returns [`Error::LogFile`] if the log file cannot be opened and
/// [`Error::Subscriber`] if a subscriber is already installed.
pub fn init(config: &Config) -> Result<Target> {
    let target = target(config);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true);

    match (target, &config.log_file) {
        (Target::File, Some(path)) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(Error::LogFile)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish()
                .try_init()?;
        }
        (Target::Stderr, _) => {
            builder.with_writer(std::io::stderr).finish().try_init()?;
        }
        _ => {}
    }
    Ok(target)
}
