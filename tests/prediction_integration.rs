//! Integration tests for classification and prediction
//!
//! Tests the path: RoundKind → RoundCatalog → resolver → History → predictor

use tonsign::core::{is_alternating, predict_next, resolve_and_append, RoundCatalog};
use tonsign::types::{Bucket, History, RoundKind};
use tonsign::HISTORY_CAPACITY;
use Bucket::{Classic, Special};

fn catalog() -> RoundCatalog {
    RoundCatalog::standard().expect("default catalog loads")
}

/// Empty history always predicts classic
#[test]
fn test_empty_history_predicts_classic() {
    let mut history = History::new();
    let prediction = predict_next(&mut history, false);
    assert_eq!(prediction.bucket, Classic);
    assert!(!prediction.signal());
}

/// Two classics in a row without alternation → special
#[test]
fn test_two_classics_predict_special() {
    let catalog = catalog();
    let mut history = History::new();
    resolve_and_append(&catalog, &mut history, RoundKind::Classic);
    resolve_and_append(&catalog, &mut history, RoundKind::Run);

    assert!(!is_alternating(&history, false));
    let prediction = predict_next(&mut history, false);
    assert_eq!(prediction.bucket, Special);
    assert!(prediction.signal());
}

/// Two specials in a row means the host dropped: pop once, then predict
#[test]
fn test_double_special_is_corrected() {
    let catalog = catalog();
    let mut history = History::new();
    resolve_and_append(&catalog, &mut history, RoundKind::Fog);
    resolve_and_append(&catalog, &mut history, RoundKind::Ghost);

    let prediction = predict_next(&mut history, false);
    assert!(prediction.corrected);
    assert_eq!(history.to_vec(), vec![Special]);
    assert_eq!(prediction.bucket, Classic);
}

/// Exempt round after [.., SPECIAL, CLASSIC] in an alternating lobby → special
#[test]
fn test_exempt_round_in_alternating_lobby() {
    let catalog = catalog();
    let mut history = History::from_buckets(&[Special, Classic, Special, Classic, Special, Classic]);
    assert!(is_alternating(&history, false));

    let stored = resolve_and_append(&catalog, &mut history, RoundKind::MysticMoon);
    assert_eq!(stored, Some(Special));
    assert_eq!(history.last(), Some(Special));
    assert_eq!(history.len(), 7);
}

/// Exempt round after [SPECIAL, CLASSIC] in a quiet lobby → classic
#[test]
fn test_exempt_round_in_quiet_lobby() {
    let catalog = catalog();
    let mut history = History::from_buckets(&[Classic, Classic, Special, Classic]);
    let stored = resolve_and_append(&catalog, &mut history, RoundKind::Twilight);
    assert_eq!(stored, Some(Classic));
}

/// History never grows past its capacity
#[test]
fn test_history_keeps_most_recent_seven() {
    let catalog = catalog();
    let mut history = History::new();
    resolve_and_append(&catalog, &mut history, RoundKind::Fog);
    for _ in 0..8 {
        resolve_and_append(&catalog, &mut history, RoundKind::Classic);
    }
    assert_eq!(history.len(), HISTORY_CAPACITY);
    assert!(history.iter().all(|b| *b == Classic));
}

/// Kinds outside every bucket are never stored
#[test]
fn test_unknown_kind_is_not_stored() {
    let catalog = catalog();
    let mut history = History::from_buckets(&[Classic]);
    assert_eq!(resolve_and_append(&catalog, &mut history, RoundKind::Unknown), None);
    assert_eq!(history.to_vec(), vec![Classic]);
}

/// Every stored entry is a concrete bucket, whatever the input sequence
#[test]
fn test_history_holds_only_resolved_buckets() {
    let catalog = catalog();
    let mut history = History::new();
    for kind in RoundKind::ALL.iter().chain(RoundKind::ALL.iter().rev()) {
        resolve_and_append(&catalog, &mut history, *kind);
        predict_next(&mut history, false);
        assert!(history.len() <= HISTORY_CAPACITY);
        assert!(history.iter().all(|b| matches!(b, Classic | Special)));
    }
}

/// Bonus forces alternation even with few specials
#[test]
fn test_bonus_alternates_from_last_entry() {
    let mut history = History::from_buckets(&[Classic, Classic]);
    assert_eq!(predict_next(&mut history, true).bucket, Special);

    let mut history = History::from_buckets(&[Classic, Special]);
    assert_eq!(predict_next(&mut history, true).bucket, Classic);
}

/// Exactly two specials in the window is not alternating
#[test]
fn test_alternation_needs_more_than_two_specials() {
    let history = History::from_buckets(&[Classic, Special, Classic, Classic, Special, Classic]);
    assert!(!is_alternating(&history, false));

    let history = History::from_buckets(&[Special, Classic, Special, Classic, Special, Classic]);
    assert!(is_alternating(&history, false));
}

/// Only the last six entries count towards alternation
#[test]
fn test_alternation_window_ignores_oldest_entry() {
    let history = History::from_buckets(&[Special, Classic, Special, Classic, Classic, Special, Classic]);
    assert!(!is_alternating(&history, false));
}
