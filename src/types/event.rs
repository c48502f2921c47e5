//! Structured notifications emitted by the session
//!
//! Events carry typed parameters only; the `Localizer` turns them into text.

use serde::{Deserialize, Serialize};

use crate::types::{Bucket, RoundKind};

/// Everything the session reports while consuming log lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A recognized round announcement; `name` is the text as logged
    RoundStarted { kind: RoundKind, name: String },
    /// A round announcement whose name is not in the catalog
    UnknownRound { name: String },
    /// Double-special tail dropped from history before predicting
    HostDisconnectCorrected,
    /// Prediction for the next round with the history it was based on
    PredictionMade { history: Vec<Bucket>, prediction: Bucket },
    /// Bonus marker seen in the log
    BonusDetected,
    /// Bonus bias cleared after enough rounds were recorded
    BonusCleared,
    /// Lobby host changed
    HostSwitched,
    /// Avatar data save announced
    AvatarDataSaved,
    /// Boolean to publish to the signal sink
    SignalEmitted { value: bool },
}

impl EngineEvent {
    /// Language-pack key for this event
    pub fn key(&self) -> &'static str {
        match self {
            EngineEvent::RoundStarted { .. } => "log.new_round_started",
            EngineEvent::UnknownRound { .. } => "log.unknown_round",
            EngineEvent::HostDisconnectCorrected => "log.host_left_before",
            EngineEvent::PredictionMade { .. } => "log.next_round_should_be",
            EngineEvent::BonusDetected => "log.think_terror_nights",
            EngineEvent::BonusCleared => "log.bonus_cleared",
            EngineEvent::HostSwitched => "log.host_just_left",
            EngineEvent::AvatarDataSaved => "log.saving_avatar_data",
            EngineEvent::SignalEmitted { .. } => "log.signal_sent",
        }
    }

    /// Events only worth showing in debug output
    pub fn is_debug(&self) -> bool {
        matches!(
            self,
            EngineEvent::UnknownRound { .. } | EngineEvent::SignalEmitted { .. }
        )
    }

    /// Signal value, if this event asks for one to be sent
    pub fn signal(&self) -> Option<bool> {
        match self {
            EngineEvent::SignalEmitted { value } => Some(*value),
            _ => None,
        }
    }
}
