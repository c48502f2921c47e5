//! Alternation detection and next-round prediction
//!
//! Rules:
//! - fewer than 2 rounds recorded → CLASSIC
//! - tail [SPECIAL, SPECIAL] → the host dropped mid-sequence, pop the last entry once
//! - alternating (more than 2 specials in the last 6, or bonus) → flip the last entry
//! - otherwise [CLASSIC, CLASSIC] → SPECIAL, anything else → CLASSIC

use serde::{Deserialize, Serialize};

use crate::{ALTERNATION_THRESHOLD, ALTERNATION_WINDOW};
use crate::types::{Bucket, History};

/// Result of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted bucket of the next round
    pub bucket: Bucket,
    /// Was the double-special entry popped before predicting?
    pub corrected: bool,
}

impl Prediction {
    /// Boolean published to the signal sink
    pub fn signal(&self) -> bool {
        self.bucket == Bucket::Special
    }
}

/// Does the recent history look like an alternating lobby?
pub fn is_alternating(history: &History, bonus: bool) -> bool {
    history.special_count_in_last(ALTERNATION_WINDOW) > ALTERNATION_THRESHOLD || bonus
}

/// Predict the bucket of the next round
///
/// May pop one entry from `history` (see module docs).
pub fn predict_next(history: &mut History, bonus: bool) -> Prediction {
    if history.len() < 2 {
        return Prediction { bucket: Bucket::Classic, corrected: false };
    }

    let mut corrected = false;
    if history.last_two() == Some((Bucket::Special, Bucket::Special)) {
        history.pop_last();
        corrected = true;
    }

    let bucket = if is_alternating(history, bonus) {
        history.last().map_or(Bucket::Classic, |last| last.flipped())
    } else if history.last_two() == Some((Bucket::Classic, Bucket::Classic)) {
        Bucket::Special
    } else {
        Bucket::Classic
    };

    Prediction { bucket, corrected }
}

// =============================================================================
// TESTS
// =============================================================================
