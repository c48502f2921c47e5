//! TONSign: Terrors of Nowhere round tracker
//!
//! Watches the game log, classifies each announced round as SPECIAL or
//! CLASSIC, predicts the next one and publishes the prediction as an OSC
//! avatar parameter.
//!
//! log line → Session → RoundCatalog → resolver → predictor → signal

pub mod core;
pub mod types;

// =============================================================================
// HISTORY & PREDICTION [C]
// =============================================================================

/// Maximum number of resolved rounds kept in history
pub const HISTORY_CAPACITY: usize = 7;

/// Number of most recent rounds inspected for alternation
pub const ALTERNATION_WINDOW: usize = 6;

/// Alternating when specials in the window exceed this (strictly greater)
pub const ALTERNATION_THRESHOLD: usize = 2;

/// History length at which the bonus bias is cleared
pub const BONUS_RESET_LEN: usize = 6;

// =============================================================================
// LOG MARKERS [C]
// =============================================================================

/// Bonus mode (Terror Nights) announcement
pub const BONUS_MARKER: &str = "BONUS ACTIVE!";

/// Lobby host changed
pub const HOST_SWITCH_MARKER: &str = "OnMasterClientSwitched";

/// Avatar parameters were saved and need the signal again
pub const AVATAR_SAVE_MARKER: &str = "Saving Avatar Data:";

// =============================================================================
// OSC & POLLING
// =============================================================================

/// Default OSC receiver (the game's local OSC port)
pub const OSC_DEFAULT_TARGET: &str = "127.0.0.1:9000";

/// Avatar parameter receiving the prediction
pub const OSC_PARAMETER_PATH: &str = "/avatar/parameters/TON_Sign";

/// Seconds between log polls
pub const POLL_INTERVAL_SECS: u64 = 10;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
