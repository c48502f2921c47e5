//! Polling loop: newest log file → session → OSC sink, logs and status API
//!
//! Each poll first checks whether the game started a newer log file (it
//! writes one per launch); if so the session is reset and the new file is
//! followed from its beginning. New complete lines are then processed as
//! one batch.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::core::api::StatusBoard;
use crate::core::i18n::Localizer;
use crate::core::log_source::{find_latest_log, read_lines, LogTail};
use crate::core::osc::OscSink;
use crate::core::session::{BatchResult, Session};
use crate::types::{EngineEvent, PredictionOutput, SourceError};

/// How predictions are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Only the localized log lines
    Log,
    /// One colored summary line per prediction
    Terminal,
    /// One plain summary line per prediction
    Parseable,
    /// One JSON object per prediction
    Json,
}

/// Turns events into localized log lines and predictions into stdout output
#[derive(Debug, Clone)]
pub struct Reporter {
    localizer: Localizer,
    mode: OutputMode,
}

impl Reporter {
    pub fn new(localizer: Localizer, mode: OutputMode) -> Self {
        Self { localizer, mode }
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Log one event at its level
    pub fn event(&self, event: &EngineEvent) {
        let line = self.localizer.render(event);
        if event.is_debug() {
            debug!("{}", line);
        } else {
            info!("{}", line);
        }
    }

    /// Write one prediction to stdout according to the output mode
    pub fn prediction(&self, output: &PredictionOutput) {
        match self.mode {
            OutputMode::Log => {}
            OutputMode::Terminal => println!("{}", output.to_terminal_string()),
            OutputMode::Parseable => println!("{}", output.to_parseable_string()),
            OutputMode::Json => match serde_json::to_string(output) {
                Ok(json) => println!("{}", json),
                Err(e) => warn!("cannot serialize prediction: {}", e),
            },
        }
    }
}

/// Log watcher driving one session
#[derive(Debug)]
pub struct Watcher {
    session: Session,
    reporter: Reporter,
    log_dir: PathBuf,
    poll_interval: Duration,
    tail: Option<LogTail>,
    sink: Option<OscSink>,
    board: Option<Arc<StatusBoard>>,
    warned_missing: bool,
}

impl Watcher {
    pub fn new(session: Session, reporter: Reporter, log_dir: PathBuf, poll_interval: Duration) -> Self {
        Self {
            session,
            reporter,
            log_dir,
            poll_interval,
            tail: None,
            sink: None,
            board: None,
            warned_missing: false,
        }
    }

    /// Send signals through `sink`
    pub fn with_sink(mut self, sink: OscSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Publish state to the status API
    pub fn with_board(mut self, board: Arc<StatusBoard>) -> Self {
        self.board = Some(board);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// File currently followed
    pub fn current_log(&self) -> Option<&Path> {
        self.tail.as_ref().map(LogTail::path)
    }

    /// Switch to the newest log file if it changed
    fn follow_latest(&mut self) -> Result<(), SourceError> {
        let latest = match find_latest_log(&self.log_dir) {
            Ok(latest) => latest,
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };

        let Some(latest) = latest else {
            if self.tail.is_none() && !self.warned_missing {
                let dir = self.log_dir.display().to_string();
                warn!("{}", self.reporter.localizer.format("log.no_log_file", &[dir.as_str()]));
                self.warned_missing = true;
            }
            return Ok(());
        };

        if self.current_log() == Some(latest.as_path()) {
            return Ok(());
        }

        let name = latest.display().to_string();
        if self.tail.is_some() {
            info!("{}", self.reporter.localizer.format("log.switched_log", &[name.as_str()]));
            self.session.reset();
        } else {
            info!("{}", self.reporter.localizer.format("log.current_log_running", &[name.as_str()]));
        }
        self.tail = Some(LogTail::new(latest));
        self.warned_missing = false;
        Ok(())
    }

    /// One poll: follow the newest log and process its new lines
    pub async fn poll_once(&mut self) -> Result<BatchResult, SourceError> {
        self.follow_latest()?;
        let Some(tail) = self.tail.as_mut() else {
            return Ok(BatchResult::default());
        };

        let lines = tail.read_new_lines().await?;
        let batch = self.session.handle_batch(lines.iter().map(String::as_str));
        self.dispatch(&batch).await;
        Ok(batch)
    }

    /// Process a finished log file once, from its beginning
    pub async fn replay(&mut self, path: &Path) -> Result<BatchResult, SourceError> {
        let lines = read_lines(path)?;
        let batch = self.session.handle_batch(lines.iter().map(String::as_str));
        self.dispatch(&batch).await;

        let line_count = batch.lines.to_string();
        let round_count = batch.predictions.len().to_string();
        info!(
            "{}",
            self.reporter
                .localizer
                .format("log.replay_done", &[line_count.as_str(), round_count.as_str()])
        );
        Ok(batch)
    }

    /// Report events, send signals in order, publish predictions
    async fn dispatch(&self, batch: &BatchResult) {
        for event in &batch.events {
            self.reporter.event(event);
            if let Some(value) = event.signal() {
                self.send_signal(value).await;
            }
        }
        for output in &batch.predictions {
            self.reporter.prediction(output);
        }

        if let Some(board) = &self.board {
            for output in &batch.predictions {
                board.publish_prediction(output);
            }
            board.publish_session(&self.session, self.current_log()).await;
        }
    }

    async fn send_signal(&self, value: bool) {
        let Some(sink) = &self.sink else {
            return;
        };
        if let Err(e) = sink.send(value).await {
            let reason = e.to_string();
            warn!("{}", self.reporter.localizer.format("log.osc_failed", &[reason.as_str()]));
        }
    }

    /// Poll until Ctrl-C
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.poll_once().await {
                        let reason = e.to_string();
                        warn!("{}", self.reporter.localizer.format("log.read_failed", &[reason.as_str()]));
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("{}", self.reporter.localizer.get("log.exit"));
                    break;
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
