//! Tracing setup.
//!
//! The dashboard owns stdout, so logs are appended to the file named in
//! `[logger] dest`. `RUST_LOG` overrides the level picked from config.

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LoggerConfig, LoggerKind};

/// Level used when `RUST_LOG` is unset, or `None` when logging is off.
pub fn default_level(config: &LoggerConfig, verbose: bool) -> Option<&'static str> {
    match (config.kind, verbose) {
        (LoggerKind::Nope, _) => None,
        (_, true) | (LoggerKind::Development, false) => Some("debug"),
        (LoggerKind::Production, false) => Some("info"),
    }
}

pub fn init_tracing(config: &LoggerConfig, verbose: bool) -> io::Result<()> {
    let Some(level) = default_level(config, verbose) else {
        return Ok(());
    };

    let path = config.dest_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(Mutex::new(file))
        .init();

    tracing::debug!(dest = %path.display(), "logging initialised");
    Ok(())
}
