//! Integration tests for the session controller
//!
//! Tests the full path: log text → Session → events → signals (→ OSC)

use std::time::Duration;
use tokio::net::UdpSocket;
use tonsign::core::{
    encode_bool_message, Localizer, OscSink, OutputMode, Reporter, RoundCatalog, Session, Watcher,
};
use tonsign::types::{Bucket, EngineEvent, RoundKind};
use tonsign::OSC_PARAMETER_PATH;

fn session() -> Session {
    Session::new(RoundCatalog::standard().unwrap())
}

fn round(name: &str) -> String {
    format!("2024.05.01 21:14:03 Log        -  round type is {}", name)
}

/// Rounds, bonus and host markers produce signals in log order
#[test]
fn test_log_text_to_signals() {
    let mut session = session();
    let lines = [
        round("Classic"),
        round("Classic"),
        "2024.05.01 21:20:00 Log        -  BONUS ACTIVE!".to_string(),
        round("Fog"),
        "2024.05.01 21:25:00 Log        -  [Behaviour] OnMasterClientSwitched".to_string(),
        "2024.05.01 21:25:01 Log        -  [Always] Saving Avatar Data: avtr_x".to_string(),
    ];

    let batch = session.handle_batch(lines.iter().map(String::as_str));
    assert_eq!(batch.lines, 6);
    assert_eq!(batch.predictions.len(), 3);
    assert_eq!(batch.signals(), vec![false, true, false, true, true]);
    assert!(session.bonus());
    assert_eq!(session.history().to_vec(), vec![Bucket::Classic, Bucket::Classic, Bucket::Special]);
}

/// Bonus is cleared at the end of the batch that fills six entries
#[test]
fn test_bonus_lifecycle() {
    let mut session = session();
    let first = ["BONUS ACTIVE!".to_string(), round("Classic"), round("Fog")];
    let batch = session.handle_batch(first.iter().map(String::as_str));
    assert!(!batch.events.contains(&EngineEvent::BonusCleared));
    assert!(session.bonus());

    let second = [round("Classic"), round("Sabotage"), round("RUN"), round("Punished")];
    let batch = session.handle_batch(second.iter().map(String::as_str));
    assert_eq!(session.history().len(), 6);
    assert_eq!(batch.events.last(), Some(&EngineEvent::BonusCleared));
    assert!(!session.bonus());
    // Predictions inside the batch still saw the bonus
    assert!(batch.predictions.iter().all(|p| p.bonus));

    let batch = session.handle_batch([round("Classic")].iter().map(String::as_str));
    assert!(!batch.events.contains(&EngineEvent::BonusCleared));
}

/// Consecutive specials are reported and the history corrected
#[test]
fn test_host_disconnect_correction() {
    let mut session = session();
    let lines = [round("Classic"), round("Fog"), round("Midnight")];
    let batch = session.handle_batch(lines.iter().map(String::as_str));

    assert!(batch.events.contains(&EngineEvent::HostDisconnectCorrected));
    assert_eq!(session.history().to_vec(), vec![Bucket::Classic, Bucket::Special]);
    let last = session.last_output().unwrap();
    assert!(last.corrected);
    assert_eq!(last.prediction, Bucket::Classic);
}

/// Localized names, multi-word names and trailing text all match
#[test]
fn test_round_name_matching() {
    let mut session = session();
    let result = session.handle_line(&round("霧"));
    assert!(result.events.contains(&EngineEvent::RoundStarted {
        kind: RoundKind::Fog,
        name: "霧".to_string(),
    }));

    let result = session.handle_line(&round("Mystic Moon (host: someone)"));
    assert!(result.events.contains(&EngineEvent::RoundStarted {
        kind: RoundKind::MysticMoon,
        name: "Mystic Moon".to_string(),
    }));
    assert_eq!(session.rounds_seen(), 2);
}

/// Unrecognized rounds leave history alone and send nothing
#[test]
fn test_unknown_round_sends_nothing() {
    let mut session = session();
    let result = session.handle_line(&round("Brand New Mode"));
    assert_eq!(
        result.events,
        vec![EngineEvent::UnknownRound { name: "Brand New Mode".to_string() }]
    );
    assert!(result.prediction.is_none());
    assert!(session.history().is_empty());
}

/// Unrelated lines are ignored
#[test]
fn test_noise_lines_are_ignored() {
    let mut session = session();
    let batch = session.handle_batch(["", "[Behaviour] Joining wrld_123", "OnPlayerJoined"]);
    assert_eq!(batch.lines, 3);
    assert!(batch.events.is_empty());
    assert_eq!(session.rounds_seen(), 0);
}

/// Events render to localized messages in both bundled languages
#[test]
fn test_events_render_in_each_language() {
    let mut session = session();
    let batch = session.handle_batch([round("Classic"), round("Classic")].iter().map(String::as_str));

    for lang in ["en", "ja"] {
        let localizer = Localizer::new(lang).unwrap();
        for event in &batch.events {
            let line = localizer.render(event);
            assert!(!line.is_empty());
            assert!(!line.contains("{}"), "{}: unfilled placeholder in {:?}", lang, line);
        }
    }
}

/// Replaying a log sends every signal to the OSC receiver in order
#[tokio::test]
async fn test_replay_sends_osc_signals() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("output_log_2024-05-01_21-00-00.txt");
    let text = [round("Classic"), round("Classic"), round("Fog")].join("\n");
    std::fs::write(&log, text).unwrap();

    let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let target = receiver.local_addr().unwrap().to_string();
    let sink = OscSink::connect(&target, OSC_PARAMETER_PATH).await.unwrap();

    let reporter = Reporter::new(Localizer::new("en").unwrap(), OutputMode::Log);
    let mut watcher = Watcher::new(session(), reporter, dir.path().to_path_buf(), Duration::from_secs(10))
        .with_sink(sink);
    let batch = watcher.replay(&log).await.unwrap();
    assert_eq!(batch.signals(), vec![false, true, false]);

    let mut buf = [0u8; 128];
    for expected in [false, true, false] {
        let (n, _) = tokio::time::timeout(Duration::from_secs(2), receiver.recv_from(&mut buf))
            .await
            .expect("signal arrives")
            .unwrap();
        assert_eq!(&buf[..n], encode_bool_message(OSC_PARAMETER_PATH, expected).as_slice());
    }
}

/// Repeated whitespace inside a round name still matches
#[test]
fn test_round_name_with_repeated_spaces() {
    let mut session = session();
    session.handle_line(&round("Classic"));
    let result = session.handle_line(&round("Mystic  Moon"));
    assert!(result.events.contains(&EngineEvent::RoundStarted {
        kind: RoundKind::MysticMoon,
        name: "Mystic Moon".to_string(),
    }));
    assert_eq!(session.history().len(), 2);
}

/// A named round whose kind has no bucket is reported and otherwise ignored
#[test]
fn test_named_round_without_bucket_is_ignored() {
    let catalog = RoundCatalog::new(&[], &[RoundKind::Fog], &[RoundKind::Classic])
        .and_then(|c| c.with_name("Fog", RoundKind::Fog))
        .and_then(|c| c.with_name("Ghost", RoundKind::Ghost))
        .unwrap();
    let mut session = Session::new(catalog);

    let result = session.handle_line(&round("Ghost"));
    assert_eq!(result.events, vec![EngineEvent::UnknownRound { name: "Ghost".to_string() }]);
    assert!(result.prediction.is_none());
    assert!(session.history().is_empty());
    assert_eq!(session.rounds_seen(), 0);

    let result = session.handle_line(&round("Fog"));
    assert!(result.prediction.is_some());
    assert_eq!(session.history().to_vec(), vec![Bucket::Special]);
}
