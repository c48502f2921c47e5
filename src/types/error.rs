//! Error types
//!
//! The prediction engine itself never fails; these cover catalog
//! construction and the collaborators around it.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{Bucket, RoundKind};

/// Round catalog definition errors, fatal at startup
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("round {kind} is assigned to both {first} and {second}")]
    Conflict {
        kind: RoundKind,
        first: Bucket,
        second: Bucket,
    },

    #[error("round name {name:?} maps to both {first} and {second}")]
    DuplicateName {
        name: String,
        first: RoundKind,
        second: RoundKind,
    },

    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("cannot read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Language pack loading errors
#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("invalid language pack {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("cannot read language directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Log file discovery and tailing errors
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("cannot scan log directory {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read log file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// OSC signal sink errors
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("invalid OSC target {0}")]
    Target(String),

    #[error("OSC socket error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// A missing file is expected while the game rotates logs
    pub fn is_not_found(&self) -> bool {
        let source = match self {
            SourceError::Scan { source, .. } => source,
            SourceError::Read { source, .. } => source,
        };
        source.kind() == std::io::ErrorKind::NotFound
    }
}

/// Application logging setup errors
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("cannot prepare log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger already initialized: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}
