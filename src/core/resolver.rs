//! History resolver: classifies a round and appends it to history
//!
//! Exempt rounds are stored as whichever bucket the last two entries make
//! most likely:
//! - [CLASSIC, CLASSIC] → SPECIAL
//! - [CLASSIC, SPECIAL] → CLASSIC
//! - [SPECIAL, CLASSIC] → SPECIAL if alternating (bonus ignored), else CLASSIC
//! - anything else, or fewer than 2 entries → CLASSIC

use crate::core::catalog::RoundCatalog;
use crate::core::predictor::is_alternating;
use crate::types::{Bucket, History, RoundKind};

/// Infer the bucket of an exempt round from recent history
pub fn resolve_exempt(history: &History) -> Bucket {
    match history.last_two() {
        Some((Bucket::Classic, Bucket::Classic)) => Bucket::Special,
        Some((Bucket::Classic, Bucket::Special)) => Bucket::Classic,
        Some((Bucket::Special, Bucket::Classic)) => {
            if is_alternating(history, false) {
                Bucket::Special
            } else {
                Bucket::Classic
            }
        }
        _ => Bucket::Classic,
    }
}

/// Classify `kind`, resolve exempt rounds, and append to `history`
///
/// Returns the bucket that was stored, or `None` when the kind is not
/// assigned to any bucket (history is left untouched).
pub fn resolve_and_append(
    catalog: &RoundCatalog,
    history: &mut History,
    kind: RoundKind,
) -> Option<Bucket> {
    let resolved = match catalog.classify(kind) {
        Bucket::Unresolved => return None,
        Bucket::Exempt => resolve_exempt(history),
        bucket => bucket,
    };
    history.push(resolved);
    Some(resolved)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HISTORY_CAPACITY;
    use Bucket::{Classic, Special};

    fn catalog() -> RoundCatalog {
        RoundCatalog::standard().unwrap()
    }

    #[test]
    fn test_direct_buckets_are_appended() {
        let catalog = catalog();
        let mut history = History::new();
        assert_eq!(resolve_and_append(&catalog, &mut history, RoundKind::Fog), Some(Special));
        assert_eq!(resolve_and_append(&catalog, &mut history, RoundKind::Run), Some(Classic));
        assert_eq!(history.to_vec(), vec![Special, Classic]);
    }

    #[test]
    fn test_unresolved_is_dropped() {
        let catalog = catalog();
        let mut history = History::from_buckets(&[Classic]);
        assert_eq!(resolve_and_append(&catalog, &mut history, RoundKind::Unknown), None);
        assert_eq!(history.to_vec(), vec![Classic]);
    }

    #[test]
    fn test_exempt_resolution_table() {
        let catalog = catalog();
        let cases = [
            (vec![Classic, Classic], Special),
            (vec![Classic, Special], Classic),
            (vec![Special, Classic], Classic),
            (vec![Special, Special], Classic),
            (vec![Classic], Classic),
            (vec![], Classic),
        ];
        for (before, expected) in cases {
            let mut history = History::from_buckets(&before);
            let resolved = resolve_and_append(&catalog, &mut history, RoundKind::Twilight);
            assert_eq!(resolved, Some(expected), "history {:?}", before);
            assert_eq!(history.last(), Some(expected));
        }
    }

    #[test]
    fn test_exempt_special_classic_with_alternation() {
        let catalog = catalog();
        let mut history = History::from_buckets(&[Special, Classic, Special, Classic, Special, Classic]);
        assert_eq!(
            resolve_and_append(&catalog, &mut history, RoundKind::Solstice),
            Some(Special)
        );
    }

    #[test]
    fn test_exempt_is_never_stored() {
        let catalog = catalog();
        let mut history = History::new();
        for _ in 0..5 {
            resolve_and_append(&catalog, &mut history, RoundKind::MysticMoon);
        }
        assert!(history.iter().all(|b| b.is_resolved()));
    }

    #[test]
    fn test_length_capped() {
        let catalog = catalog();
        let mut history = History::new();
        for kind in RoundKind::ALL.iter().cycle().take(50) {
            resolve_and_append(&catalog, &mut history, *kind);
            assert!(history.len() <= HISTORY_CAPACITY);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
    }
}
