//! File logging.
//!
//! The terminal belongs to the UI, so all tracing output goes to a daily
//! rolling file through a non-blocking writer.

use std::path::PathBuf;

use directories::BaseDirs;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::result::{LookupError, Result};

const LOG_ENV_VAR: &str = "GHLOOKUP_LOG";
const LOG_FORMAT_ENV_VAR: &str = "GHLOOKUP_LOG_FORMAT";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `None` disables logging entirely
    pub log_dir: Option<PathBuf>,
    pub file_level: LevelFilter,
    pub json: bool,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let log_dir = BaseDirs::new()
            .map(|dirs| dirs.data_local_dir().join("ghlookup").join("logs"))
            .unwrap_or_else(|| PathBuf::from("ghlookup-logs"));

        let json = std::env::var(LOG_FORMAT_ENV_VAR).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

        Self {
            log_dir: Some(log_dir),
            file_level: LevelFilter::INFO,
            json,
        }
    }

    /// Applies a level name from the config file; "off" disables logging.
    pub fn with_level(mut self, level: &str) -> Self {
        if level.eq_ignore_ascii_case("off") {
            self.log_dir = None;
        } else if let Ok(level) = level.parse() {
            self.file_level = level;
        }
        self
    }
}

pub fn init_logging(config: LoggingConfig) -> Result<Option<WorkerGuard>> {
    let Some(log_dir) = config.log_dir else {
        return Ok(None);
    };

    std::fs::create_dir_all(&log_dir)?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "ghlookup.log"));

    let filter = EnvFilter::builder()
        .with_default_directive(config.file_level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let json_layer = config
        .json
        .then(|| fmt::layer().json().with_writer(writer.clone()));
    let text_layer = (!config.json).then(|| fmt::layer().with_ansi(false).with_writer(writer));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| LookupError::GeneralError(format!("Failed to initialize logging: {e}").into()))?;

    Ok(Some(guard))
}
