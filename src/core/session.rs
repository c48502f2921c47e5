//! Session controller: log lines → round tokens → prediction → signal
//!
//! Owns the single `History` and bonus flag of one log-watching session.
//! Pure: consumes text and returns events, the caller does all I/O.
//!
//! Line markers, first match wins:
//! 1. `BONUS ACTIVE!`          → bonus on
//! 2. `OnMasterClientSwitched` → signal `true`
//! 3. `Saving Avatar Data:`    → resend last prediction
//! 4. `round type is <name>`   → resolve, predict, signal

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;

use crate::core::catalog::RoundCatalog;
use crate::core::predictor::predict_next;
use crate::core::resolver::resolve_and_append;
use crate::types::{EngineEvent, History, PredictionOutput};
use crate::{AVATAR_SAVE_MARKER, BONUS_MARKER, BONUS_RESET_LEN, HOST_SWITCH_MARKER};

lazy_static! {
    static ref RE_ROUND_TYPE: Regex = Regex::new(r"(?i)round type is\s*(.*)$").unwrap();
}

/// Everything produced by one log line
#[derive(Debug, Clone, Default)]
pub struct LineResult {
    pub events: Vec<EngineEvent>,
    pub prediction: Option<PredictionOutput>,
}

impl LineResult {
    fn push(&mut self, event: EngineEvent) {
        self.events.push(event);
    }
}

/// Everything produced by one batch of log lines
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub events: Vec<EngineEvent>,
    pub predictions: Vec<PredictionOutput>,
    pub lines: usize,
}

impl BatchResult {
    /// Signal values in the order they must be sent
    pub fn signals(&self) -> Vec<bool> {
        self.events.iter().filter_map(EngineEvent::signal).collect()
    }
}

/// State of one log-watching session
#[derive(Debug, Clone)]
pub struct Session {
    catalog: RoundCatalog,
    history: History,
    bonus: bool,
    last_prediction: bool,
    rounds_seen: u64,
    last_output: Option<PredictionOutput>,
}

impl Session {
    /// Create a session with empty history
    pub fn new(catalog: RoundCatalog) -> Self {
        Self {
            catalog,
            history: History::new(),
            bonus: false,
            last_prediction: false,
            rounds_seen: 0,
            last_output: None,
        }
    }

    /// Process a single log line
    pub fn handle_line(&mut self, line: &str) -> LineResult {
        let mut result = LineResult::default();

        if line.contains(BONUS_MARKER) {
            self.bonus = true;
            result.push(EngineEvent::BonusDetected);
        } else if line.contains(HOST_SWITCH_MARKER) {
            self.last_prediction = true;
            result.push(EngineEvent::HostSwitched);
            result.push(EngineEvent::SignalEmitted { value: true });
        } else if line.contains(AVATAR_SAVE_MARKER) {
            result.push(EngineEvent::AvatarDataSaved);
            result.push(EngineEvent::SignalEmitted { value: self.last_prediction });
        } else if let Some(caps) = RE_ROUND_TYPE.captures(line) {
            let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            self.handle_round(raw, &mut result);
        }

        result
    }

    fn handle_round(&mut self, raw: &str, result: &mut LineResult) {
        let Some((kind, name)) = self.catalog.match_token(raw) else {
            result.push(EngineEvent::UnknownRound { name: raw.trim().to_string() });
            return;
        };
        let Some(resolved) = resolve_and_append(&self.catalog, &mut self.history, kind) else {
            result.push(EngineEvent::UnknownRound { name });
            return;
        };

        self.rounds_seen += 1;
        result.push(EngineEvent::RoundStarted { kind, name: name.clone() });

        let prediction = predict_next(&mut self.history, self.bonus);
        if prediction.corrected {
            result.push(EngineEvent::HostDisconnectCorrected);
        }
        result.push(EngineEvent::PredictionMade {
            history: self.history.to_vec(),
            prediction: prediction.bucket,
        });

        let signal = prediction.signal();
        self.last_prediction = signal;
        result.push(EngineEvent::SignalEmitted { value: signal });

        let output = PredictionOutput {
            timestamp: Utc::now(),
            round: kind,
            round_name: name,
            resolved,
            history: self.history.to_vec(),
            prediction: prediction.bucket,
            signal,
            corrected: prediction.corrected,
            bonus: self.bonus,
        };
        self.last_output = Some(output.clone());
        result.prediction = Some(output);
    }

    /// End-of-batch bookkeeping: clear the bonus once enough rounds are recorded
    pub fn finish_batch(&mut self) -> Vec<EngineEvent> {
        if self.bonus && self.history.len() >= BONUS_RESET_LEN {
            self.bonus = false;
            return vec![EngineEvent::BonusCleared];
        }
        Vec::new()
    }

    /// Process a batch of lines followed by `finish_batch`
    pub fn handle_batch<'a, I>(&mut self, lines: I) -> BatchResult
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut batch = BatchResult::default();
        for line in lines {
            let result = self.handle_line(line);
            batch.lines += 1;
            batch.events.extend(result.events);
            batch.predictions.extend(result.prediction);
        }
        batch.events.extend(self.finish_batch());
        batch
    }

    /// Start over with empty history, keeping the catalog
    pub fn reset(&mut self) {
        *self = Self::new(self.catalog.clone());
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn bonus(&self) -> bool {
        self.bonus
    }

    /// Last value sent to the signal sink
    pub fn last_prediction(&self) -> bool {
        self.last_prediction
    }

    /// Rounds recognized and resolved since the session started
    pub fn rounds_seen(&self) -> u64 {
        self.rounds_seen
    }

    /// Most recent prediction output
    pub fn last_output(&self) -> Option<&PredictionOutput> {
        self.last_output.as_ref()
    }
}

// =============================================================================
// TESTS
// =============================================================================
