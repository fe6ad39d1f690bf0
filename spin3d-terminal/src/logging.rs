//! Logger setup for the terminal front end.
//!
//! The scene owns the alternate screen, so records only ever go to a file.
//! Without a file, logging stays off whatever filter is given.

use anyhow::Context;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "info",
/// "spin3d_core=debug").
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub file: Option<PathBuf>,
}

static INIT: Once = Once::new();

/// Filter to install, or `None` when logging stays off.
fn effective_filter(filter: Option<String>, has_file: bool) -> Option<String> {
    if !has_file {
        return None;
    }
    Some(filter.unwrap_or_else(|| "warn".to_string()))
}

fn install(config: LoggingConfig) -> anyhow::Result<()> {
    let filter = config.filter.or_else(|| std::env::var("RUST_LOG").ok());
    let mut builder = env_logger::Builder::new();

    match (effective_filter(filter, config.file.is_some()), &config.file) {
        (Some(filter), Some(path)) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder
                .parse_filters(&filter)
                .target(env_logger::Target::Pipe(Box::new(file)))
                .write_style(env_logger::WriteStyle::Never);
        }
        _ => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    if builder.try_init().is_ok() {
        log::debug!("logging initialized");
    }
    Ok(())
}

/// Initializes the global logger once; later calls are ignored and touch
/// no files.
pub fn init_logging(config: LoggingConfig) -> anyhow::Result<()> {
    let mut result = Ok(());
    INIT.call_once(|| result = install(config));
    result
}
