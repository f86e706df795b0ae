//! Tracing subscriber setup: coloured console output plus a plain-text log file.

use std::fs::{self, OpenOptions};
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};

/// Install the global subscriber.
///
/// The level defaults to `info` and can be overridden with `RUST_LOG`. Log lines are appended to
/// `paths.log_file`; its parent directory is created if needed.
pub fn init_logging(config: &Config) -> PipelineResult<()> {
    let log_file = &config.paths.log_file;
    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer().with_target(false);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_line_number(true)
        .with_writer(Arc::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| PipelineError::Logging {
            message: e.to_string(),
        })
}
