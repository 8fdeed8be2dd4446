use std::{env, path::PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the log filter, in `tracing-subscriber` `EnvFilter` syntax.
pub const LOG_ENV_VAR: &str = "LOX_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Prompt,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub log_filter: String,
}

impl Config {
    /// Reads the process arguments (program name excluded) and `LOX_LOG`.
    pub fn from_env() -> Result<Config> {
        Config::new(env::args_os().skip(1), env::var(LOG_ENV_VAR).ok())
    }

    pub fn new<I, A>(args: I, log_filter: Option<String>) -> Result<Config>
    where
        I: IntoIterator<Item = A>,
        A: Into<PathBuf>,
    {
        let mut args: Vec<PathBuf> = args.into_iter().map(Into::into).collect();
        let mode = match args.len() {
            0 => Mode::Prompt,
            1 => Mode::File(args.remove(0)),
            _ => return Err(Error::Usage),
        };

        let log_filter = log_filter
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Config { mode, log_filter })
    }
}
