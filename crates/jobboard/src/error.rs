//! Application errors.

use std::io;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Errors that stop the job board.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O error during terminal operations.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),

    /// Failed to enable or disable raw mode.
    ///
    /// Usually means stdin is not a terminal; `--self-check` works without
    /// one.
    #[error("failed to {action} raw mode: {source}")]
    RawModeFailure {
        /// Whether we were trying to enable or disable raw mode.
        action: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to poll for terminal events.
    #[error("failed to poll terminal events: {0}")]
    EventPoll(io::Error),

    /// Failed to render the view to the terminal.
    #[error("failed to render view: {0}")]
    Render(io::Error),

    /// The configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The log file could not be opened.
    #[error("failed to open log file: {0}")]
    LogFile(io::Error),

    /// A global tracing subscriber was already installed.
    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// A specialized [`Result`] type for job board operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_raw_mode_failure_display_and_source() {
        let err = Error::RawModeFailure {
            action: "enable",
            source: io::Error::other("not a tty"),
        };
        assert_eq!(err.to_string(), "failed to enable raw mode: not a tty");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: Error = ConfigError::Invalid("per_page must be at least 1".into()).into();
        assert_eq!(err.to_string(), "invalid config value: per_page must be at least 1");
    }

    #[test]
    fn test_io_from() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
