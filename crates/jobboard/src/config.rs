//! Runtime configuration.
//!
//! [`Config`] is the resolved set of options, independent of where each
//! came from. Resolution order, highest first: command line (and its
//! environment fallbacks), the TOML config file, built-in defaults.
//!
//! ```toml
//! locale = "en"
//! per_page = 5
//! data = "jobs.json"
//! history = "~/.cache/jobboard/recent.json"
//! history_size = 20
//! debounce_ms = 250
//! mouse = true
//! log_file = "jobboard.log"
//!
//! [keys.next]
//! keys = ["down", "j"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use droplist::keymap::KeyMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::Locale;
use crate::cli::Cli;

const DEFAULT_PER_PAGE: usize = 6;
/// Upper bound for `per_page`; the result area is sized from it.
pub const MAX_PER_PAGE: usize = 100;
const DEFAULT_HISTORY_SIZE: usize = 10;
const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Errors from loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Contents of the TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub locale: Option<Locale>,
    pub data: Option<PathBuf>,
    pub per_page: Option<usize>,
    pub history: Option<PathBuf>,
    pub history_size: Option<usize>,
    pub debounce_ms: Option<u64>,
    pub mouse: Option<bool>,
    pub log_file: Option<PathBuf>,
    pub keys: Option<KeyMap>,
}

impl FileConfig {
    /// Parses config TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on syntax errors or unknown keys.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml`](Self::from_toml).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), "config file loaded");
        Ok(config)
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Display language.
    pub locale: Locale,
    /// Catalog file; `None` uses the built-in sample.
    pub data: Option<PathBuf>,
    /// Results per page (at least 1).
    pub per_page: usize,
    /// Recent-search file; `None` keeps history in memory only.
    pub history: Option<PathBuf>,
    /// Recent searches kept.
    pub history_size: usize,
    /// Quiet period before a typed keyword is applied.
    pub debounce: Duration,
    /// Whether mouse input is captured.
    pub mouse: bool,
    /// Log file; `None` disables logging in interactive mode.
    pub log_file: Option<PathBuf>,
    /// Log verbosity (0=warn, 1=info, 2=debug, 3+=trace).
    pub verbosity: u8,
    /// Render once to stdout and exit.
    pub self_check: bool,
    /// Key bindings for both dropdowns.
    pub keymap: KeyMap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            data: None,
            per_page: DEFAULT_PER_PAGE,
            history: None,
            history_size: DEFAULT_HISTORY_SIZE,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            mouse: true,
            log_file: None,
            verbosity: 0,
            self_check: false,
            keymap: KeyMap::default(),
        }
    }
}

impl Config {
    /// Resolves the configuration from CLI arguments, reading the config
    /// file they name (if any).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be loaded or holds
    /// an invalid value.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Layers CLI values over file values over defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `per_page` resolves to zero or
    /// exceeds [`MAX_PER_PAGE`].
    pub fn merge(cli: &Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let per_page = cli
            .per_page
            .map(usize::from)
            .or(file.per_page)
            .unwrap_or(defaults.per_page);
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(ConfigError::Invalid(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {per_page}"
            )));
        }

        Ok(Self {
            locale: cli.locale.or(file.locale).unwrap_or(defaults.locale),
            data: cli.data.clone().or(file.data),
            per_page,
            history: cli.history.clone().or(file.history),
            history_size: file.history_size.unwrap_or(defaults.history_size),
            debounce: file
                .debounce_ms
                .map_or(defaults.debounce, Duration::from_millis),
            mouse: !cli.no_mouse && file.mouse.unwrap_or(defaults.mouse),
            log_file: cli.log_file.clone().or(file.log_file),
            verbosity: cli.verbose,
            self_check: cli.self_check,
            keymap: file.keys.unwrap_or_default(),
        })
    }

    /// Default `EnvFilter` directive for the verbosity level.
    #[must_use]
    pub const fn log_directive(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["jobboard"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::merge(&cli(&[]), FileConfig::default()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.locale, Locale::Ka);
        assert_eq!(config.log_directive(), "warn");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = FileConfig::from_toml(
            r#"
            locale = "en"
            per_page = 3
            history_size = 4
            debounce_ms = 50
            mouse = false
            "#,
        )
        .unwrap();
        let config = Config::merge(&cli(&[]), file).unwrap();
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.per_page, 3);
        assert_eq!(config.history_size, 4);
        assert_eq!(config.debounce, Duration::from_millis(50));
        assert!(!config.mouse);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            locale: Some(Locale::En),
            per_page: Some(3),
            data: Some(PathBuf::from("file.json")),
            ..FileConfig::default()
        };
        let config = Config::merge(
            &cli(&["--locale", "ka", "--per-page", "9", "--data", "cli.json", "-vvv"]),
            file,
        )
        .unwrap();
        assert_eq!(config.locale, Locale::Ka);
        assert_eq!(config.per_page, 9);
        assert_eq!(config.data, Some(PathBuf::from("cli.json")));
        assert_eq!(config.log_directive(), "trace");
    }

    #[test]
    fn test_no_mouse_flag_wins() {
        let file = FileConfig {
            mouse: Some(true),
            ..FileConfig::default()
        };
        let config = Config::merge(&cli(&["--no-mouse"]), file).unwrap();
        assert!(!config.mouse);
    }

    #[test]
    fn test_zero_per_page_in_file_is_invalid() {
        let file = FileConfig {
            per_page: Some(0),
            ..FileConfig::default()
        };
        let err = Config::merge(&cli(&[]), file).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_huge_per_page_in_file_is_invalid() {
        let file = FileConfig::from_toml("per_page = 9223372036854775807").unwrap();
        let err = Config::merge(&cli(&[]), file).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("between 1 and 100"));

        let file = FileConfig::from_toml("per_page = 100").unwrap();
        assert_eq!(Config::merge(&cli(&[]), file).unwrap().per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_keys_table_rebinds_dropdown() {
        let file = FileConfig::from_toml(
            r#"
            [keys.next]
            keys = ["down", "j"]
            "#,
        )
        .unwrap();
        let config = Config::merge(&cli(&[]), file).unwrap();
        assert_eq!(config.keymap.next.keys, ["down", "j"]);
        assert_eq!(config.keymap.select, KeyMap::default().select);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = FileConfig::from_toml("colour = \"red\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_resolve_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "locale = \"en\"\nper_page = 2").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = Config::resolve(&cli(&["--config", &path])).unwrap();
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.per_page, 2);
    }

    #[test]
    fn test_resolve_missing_file() {
        let err = Config::resolve(&cli(&["--config", "/no/such/jobboard.toml"])).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().starts_with("failed to read config"));
    }
}
