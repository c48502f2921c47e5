//! Application logging: colored console plus `latest.log`
//!
//! Console output goes to stderr; stdout carries only prediction output.
//!
//! On startup an existing `latest.log` is moved to
//! `Logs/<YYYY-MM-DD-HH-MM-SS>.log` so every run starts a fresh file.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use chrono::Local;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::types::LoggingError;

/// Name of the current run's log file
pub const LATEST_LOG: &str = "latest.log";

/// Directory holding previous runs' log files
pub const ARCHIVE_DIR: &str = "Logs";

/// Move `<dir>/latest.log` into `<dir>/Logs/`, returning the archived path
pub fn rotate_latest_log(dir: &Path) -> std::io::Result<Option<PathBuf>> {
    let latest = dir.join(LATEST_LOG);
    if !latest.exists() {
        return Ok(None);
    }
    let archive = dir.join(ARCHIVE_DIR);
    std::fs::create_dir_all(&archive)?;

    let stamp = Local::now().format("%Y-%m-%d-%H-%M-%S").to_string();
    let mut target = archive.join(format!("{}.log", stamp));
    let mut n = 1;
    while target.exists() {
        target = archive.join(format!("{}-{}.log", stamp, n));
        n += 1;
    }
    std::fs::rename(&latest, &target)?;
    Ok(Some(target))
}

/// Install the global subscriber; returns the path of the log file
pub fn init_logging(dir: &Path, debug: bool, color: bool) -> Result<PathBuf, LoggingError> {
    std::fs::create_dir_all(dir)?;
    rotate_latest_log(dir)?;
    let path = dir.join(LATEST_LOG);
    let file = File::create(&path)?;

    let level = if debug { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let console = fmt::layer()
        .with_target(false)
        .with_ansi(color)
        .with_writer(std::io::stderr);
    let file_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(level)
        .with(console)
        .with(file_layer)
        .try_init()?;

    Ok(path)
}
