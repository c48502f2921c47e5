//! Game log discovery and tailing
//!
//! The game writes one `output_log_*.txt` per launch into its LocalLow
//! directory. We follow the newest one and hand complete lines to the
//! session; a partial trailing line is held back until its newline arrives.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::types::SourceError;

/// Extension of the game's log files
pub const LOG_EXTENSION: &str = "txt";

/// Default log directory: `<home>/AppData/LocalLow/VRChat/VRChat`
pub fn default_log_dir() -> Option<PathBuf> {
    let home = std::env::var_os("USERPROFILE").or_else(|| std::env::var_os("HOME"))?;
    Some(
        PathBuf::from(home)
            .join("AppData")
            .join("LocalLow")
            .join("VRChat")
            .join("VRChat"),
    )
}

/// Newest log file in `dir` by modification time
pub fn find_latest_log(dir: &Path) -> Result<Option<PathBuf>, SourceError> {
    let scan_err = |source| SourceError::Scan { path: dir.to_path_buf(), source };
    let mut latest: Option<(SystemTime, PathBuf)> = None;

    for entry in std::fs::read_dir(dir).map_err(scan_err)? {
        let entry = entry.map_err(scan_err)?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(LOG_EXTENSION) {
            continue;
        }
        let metadata = match entry.metadata() {
            Ok(m) if m.is_file() => m,
            _ => continue,
        };
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        if latest.as_ref().map_or(true, |(t, _)| modified > *t) {
            latest = Some((modified, path));
        }
    }

    Ok(latest.map(|(_, path)| path))
}

/// Read every complete line of a log file at once
pub fn read_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    let bytes = std::fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(|l| l.trim_end_matches('\r').to_string())
        .collect())
}

/// Incremental reader over a growing log file
#[derive(Debug)]
pub struct LogTail {
    path: PathBuf,
    position: u64,
    pending: Vec<u8>,
}

impl LogTail {
    /// Follow `path` from its beginning
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            position: 0,
            pending: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes consumed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Read lines appended since the last call
    ///
    /// Restarts from the beginning if the file shrank.
    pub async fn read_new_lines(&mut self) -> Result<Vec<String>, SourceError> {
        let read_err = |source| SourceError::Read { path: self.path.clone(), source };

        let mut file = tokio::fs::File::open(&self.path).await.map_err(read_err)?;
        let len = file.metadata().await.map_err(read_err)?.len();
        if len < self.position {
            self.position = 0;
            self.pending.clear();
        }

        file.seek(SeekFrom::Start(self.position)).await.map_err(read_err)?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).await.map_err(read_err)?;
        self.position += buf.len() as u64;
        self.pending.extend_from_slice(&buf);

        Ok(self.drain_complete_lines())
    }

    fn drain_complete_lines(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&raw);
            lines.push(text.trim_end_matches(['\n', '\r']).to_string());
        }
        lines
    }
}

// =============================================================================
// TESTS
// =============================================================================
