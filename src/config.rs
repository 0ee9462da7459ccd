use std::path::PathBuf;

use crate::error::{SantaError, SantaResult};

pub const DEFAULT_DB_PATH: &str = ".data/santa.db";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings for the `santa` binary.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_filter: String,
    pub show_help: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            show_help: false,
        }
    }
}

impl AppConfig {
    /// Reads the process arguments and environment.
    pub fn from_env() -> SantaResult<Self> {
        Self::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Flags take precedence over `SANTA_DB` / `SANTA_LOG`, which take
    /// precedence over the defaults.
    pub fn parse<I, E>(args: I, env: E) -> SantaResult<Self>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(path) = env("SANTA_DB").filter(|s| !s.is_empty()) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(filter) = env("SANTA_LOG").filter(|s| !s.is_empty()) {
            config.log_filter = filter;
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" | "-f" => {
                    config.db_path = args.next().map(PathBuf::from).ok_or_else(|| {
                        SantaError::Other("--file requires a path argument".into())
                    })?;
                }
                "--log" => {
                    config.log_filter = args.next().ok_or_else(|| {
                        SantaError::Other("--log requires a filter argument".into())
                    })?;
                }
                "--help" | "-h" => config.show_help = true,
                other => {
                    return Err(SantaError::Other(format!(
                        "Unknown argument: {}. Use --help for usage information.",
                        other
                    )))
                }
            }
        }

        Ok(config)
    }
}

pub fn usage() -> &'static str {
    "Secret Santa organizer

Usage: santa [OPTIONS]

Options:
  -f, --file <PATH>   Database file path (default: .data/santa.db, env SANTA_DB)
  --log <FILTER>      Log filter, e.g. info or santa=debug (env SANTA_LOG, RUST_LOG)
  -h, --help          Show this help"
}
