//! Output structures for terminal display

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use colored::Colorize;
use crate::types::{Bucket, RoundKind};

/// Output structure for each prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Round that triggered the prediction
    pub round: RoundKind,
    /// Round name as it appeared in the log
    pub round_name: String,
    /// Bucket the round was resolved to
    pub resolved: Bucket,
    /// History after resolution (and correction)
    pub history: Vec<Bucket>,
    /// Predicted bucket of the next round
    pub prediction: Bucket,
    /// Value sent to the signal sink
    pub signal: bool,
    /// Was the double-special correction applied?
    pub corrected: bool,
    /// Bonus bias active while predicting
    pub bonus: bool,
}

impl PredictionOutput {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let history: Vec<String> = self
            .history
            .iter()
            .map(|b| short_bucket(*b).color(b.color()).to_string())
            .collect();
        let bonus = if self.bonus { " BONUS".yellow().to_string() } else { String::new() };

        format!(
            "{} {} -> {} [{}] next={}{}",
            "▶".bright_black(),
            self.round_name.bold(),
            self.resolved.to_string().color(self.resolved.color()),
            history.join(" "),
            self.prediction.to_string().color(self.prediction.color()).bold(),
            bonus,
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let history: Vec<&str> = self.history.iter().map(|b| short_bucket(*b)).collect();
        format!(
            "round={} | resolved={} | history={} | next={} | signal={} | corrected={} | bonus={}",
            self.round,
            self.resolved,
            history.join(""),
            self.prediction,
            self.signal,
            self.corrected,
            self.bonus
        )
    }
}

fn short_bucket(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Special => "S",
        Bucket::Classic => "C",
        Bucket::Exempt => "E",
        Bucket::Unresolved => "?",
    }
}
