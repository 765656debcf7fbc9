use std::fs::File;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::catalog::ids;
use crate::options::ParsedOptions;

/// Initialize tracing from the log options.
///
/// Writes to stdout unless `--log-file` names a file, filtered by
/// `--log-level`. `RUST_LOG` takes precedence when set.
pub fn init_logging(options: &ParsedOptions) -> Result<()> {
    let log_file = options.string(ids::LOG_FILE)?;
    let log_file = (!log_file.is_empty()).then(|| PathBuf::from(log_file));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.log_level().filter_directive()));

    let (writer, ansi) = match &log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file '{}'", path.display()))?;
            (BoxMakeWriter::new(Arc::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stdout), std::io::stdout().is_terminal()),
    };

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
