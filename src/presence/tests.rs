use super::*;
use crate::reading::{Identifier, RawReading};
use crate::registration::{AudioCue, Registration, RegistrationTable};

const MAERSK: [u8; 4] = [0xC0, 0x05, 0x1F, 0x3B];
const BARE_NECESSITIES: [u8; 4] = [0xF0, 0xBE, 0x1F, 0x3B];

fn id(bytes: &[u8]) -> Identifier {
    Identifier::new(bytes.to_vec()).unwrap()
}

fn seen(bytes: &[u8], timestamp_ms: u32) -> RawReading {
    RawReading::present(id(bytes), timestamp_ms)
}

fn table() -> RegistrationTable {
    let maersk = Registration {
        identifier: Some(id(&MAERSK)),
        name: "Maersk".to_string(),
        audio_cue: Some(AudioCue::Asset("TrainHorn".to_string())),
        symbol: None,
        actuator: None,
    };
    RegistrationTable::new(Registration::unknown(), vec![maersk]).unwrap()
}

fn engine() -> PresenceEngine {
    PresenceEngine::new(table(), PresenceConfig::default())
}

fn detection(transition: Transition) -> Detection {
    match transition {
        Transition::Detected(d) => d,
        other => panic!("Expected detection, got {:?}", other),
    }
}

#[test]
fn test_arrival_dwell_round_departure() {
    let mut engine = engine();

    let d = detection(engine.ingest(seen(&MAERSK, 1000)));
    assert_eq!(d.classification, Classification::NewArrival);
    assert_eq!(d.pass_count, 1);
    assert_eq!(d.registration.name, "Maersk");

    // 500ms gap is within the noise threshold
    let d = detection(engine.ingest(seen(&MAERSK, 1500)));
    assert_eq!(d.classification, Classification::ContinuedDwell);
    assert_eq!(d.pass_count, 1);
    assert_eq!(d.round_start_ms, 1500);

    // 5500ms gap starts another round
    let d = detection(engine.ingest(seen(&MAERSK, 7000)));
    assert_eq!(d.classification, Classification::RepeatedRound);
    assert_eq!(d.pass_count, 2);
    assert_eq!(d.round_start_ms, 7000);

    assert_eq!(engine.ingest(RawReading::absent(7100)), Transition::Departed);
    assert!(engine.current().is_none());
}

#[test]
fn test_unregistered_tag_uses_fallback() {
    let mut engine = engine();

    let d = detection(engine.ingest(seen(&BARE_NECESSITIES, 10)));
    assert_eq!(d.classification, Classification::NewArrival);
    assert_eq!(d.registration.name, "Unknown");
    assert!(d.registration.is_fallback());
}

#[test]
fn test_gap_equal_to_threshold_is_dwell() {
    let mut engine = engine();
    engine.ingest(seen(&MAERSK, 1000));

    let d = detection(engine.ingest(seen(&MAERSK, 4000)));
    assert_eq!(d.classification, Classification::ContinuedDwell);
    assert_eq!(d.pass_count, 1);

    let d = detection(engine.ingest(seen(&MAERSK, 7001)));
    assert_eq!(d.classification, Classification::RepeatedRound);
    assert_eq!(d.pass_count, 2);
}

#[test]
fn test_dwell_refreshes_round_start() {
    // Readings every 2s never exceed the threshold, however long the dwell
    let mut engine = engine();
    engine.ingest(seen(&MAERSK, 0));
    for t in (2000..20_000).step_by(2000) {
        let d = detection(engine.ingest(seen(&MAERSK, t)));
        assert_eq!(d.classification, Classification::ContinuedDwell);
        assert_eq!(d.pass_count, 1);
    }
}

#[test]
fn test_pass_count_increments_only_on_large_gaps() {
    let mut engine = engine();
    let gaps = [100u32, 3500, 200, 2999, 3001, 10_000, 1, 50_000];

    let mut t = 1u32;
    engine.ingest(seen(&MAERSK, t));
    let mut expected = 1;
    for gap in gaps {
        t += gap;
        if gap > 3000 {
            expected += 1;
        }
        let d = detection(engine.ingest(seen(&MAERSK, t)));
        assert_eq!(d.pass_count, expected, "after gap {}", gap);
        assert_eq!(engine.current().unwrap().round_start_ms, t);
    }
    assert_eq!(expected, 5);
}

#[test]
fn test_timestamp_wraparound() {
    let mut engine = engine();
    engine.ingest(seen(&MAERSK, u32::MAX - 499));

    // Clock wrapped: true gap is 1000ms
    let d = detection(engine.ingest(seen(&MAERSK, 500)));
    assert_eq!(d.classification, Classification::ContinuedDwell);
    assert_eq!(d.pass_count, 1);

    // Wrapped gap of 4000ms is a new round
    engine.ingest(seen(&MAERSK, u32::MAX - 999));
    let d = detection(engine.ingest(seen(&MAERSK, 3000)));
    assert_eq!(d.classification, Classification::RepeatedRound);
}

#[test]
fn test_backwards_clock_counts_as_round() {
    let mut engine = engine();
    engine.ingest(seen(&MAERSK, 5000));

    let d = detection(engine.ingest(seen(&MAERSK, 4999)));
    assert_eq!(d.classification, Classification::RepeatedRound);
    assert_eq!(d.pass_count, 2);
}

#[test]
fn test_duplicate_reading_is_unchanged() {
    let mut engine = engine();
    engine.ingest(seen(&MAERSK, 1000));
    let before = engine.current().cloned();

    assert_eq!(engine.ingest(seen(&MAERSK, 1000)), Transition::Unchanged);
    assert_eq!(engine.current().cloned(), before);
}

#[test]
fn test_duplicate_sentinel_is_unchanged() {
    let mut engine = engine();
    assert!(!engine.ingest(RawReading::absent(5)).is_unchanged());
    assert!(engine.ingest(RawReading::absent(5)).is_unchanged());
}

#[test]
fn test_sentinel_departs_without_prior_state() {
    let mut engine = engine();
    assert_eq!(engine.ingest(RawReading::absent(0)), Transition::Departed);
    assert!(engine.current().is_none());
}

#[test]
fn test_different_tag_replaces_current() {
    let mut engine = engine();
    engine.ingest(seen(&MAERSK, 1000));
    engine.ingest(seen(&MAERSK, 9000));
    assert_eq!(engine.current().unwrap().pass_count, 2);

    let d = detection(engine.ingest(seen(&BARE_NECESSITIES, 9100)));
    assert_eq!(d.classification, Classification::NewArrival);
    assert_eq!(d.pass_count, 1);
    assert_eq!(engine.current().unwrap().tag, id(&BARE_NECESSITIES));

    // Coming back to the first tag starts from scratch
    let d = detection(engine.ingest(seen(&MAERSK, 9200)));
    assert_eq!(d.classification, Classification::NewArrival);
    assert_eq!(d.pass_count, 1);
}

#[test]
fn test_arrival_after_departure_restarts_count() {
    let mut engine = engine();
    engine.ingest(seen(&MAERSK, 1000));
    engine.ingest(seen(&MAERSK, 9000));
    engine.ingest(RawReading::absent(9100));

    let d = detection(engine.ingest(seen(&MAERSK, 9200)));
    assert_eq!(d.classification, Classification::NewArrival);
    assert_eq!(d.pass_count, 1);
}

#[test]
fn test_expire_current_reading_departs() {
    let mut engine = engine();
    let reading = seen(&MAERSK, 1000);
    engine.ingest(reading.clone());

    assert_eq!(engine.expire(&reading), Transition::Departed);
    assert!(engine.current().is_none());

    // Fires only once
    assert_eq!(engine.expire(&reading), Transition::Unchanged);
}

#[test]
fn test_expire_superseded_reading_is_noop() {
    let mut engine = engine();
    let first = seen(&MAERSK, 1000);
    engine.ingest(first.clone());
    engine.ingest(seen(&MAERSK, 1500));

    assert_eq!(engine.expire(&first), Transition::Unchanged);
    assert_eq!(engine.current().unwrap().round_start_ms, 1500);
}

#[test]
fn test_redelivery_after_expire_does_not_resurrect() {
    let mut engine = engine();
    let reading = seen(&MAERSK, 1000);
    engine.ingest(reading.clone());
    engine.expire(&reading);

    assert_eq!(engine.ingest(reading), Transition::Unchanged);
    assert!(engine.current().is_none());
}

#[test]
fn test_reset_clears_state_and_dedup() {
    let mut engine = engine();
    let reading = seen(&MAERSK, 1000);
    engine.ingest(reading.clone());

    assert_eq!(engine.reset(), Transition::Departed);
    assert!(engine.last_reading().is_none());
    assert_eq!(engine.reset(), Transition::Unchanged);

    // Same value is processed again after a reset
    let d = detection(engine.ingest(reading));
    assert_eq!(d.classification, Classification::NewArrival);
}

#[test]
fn test_watched_reading() {
    let mut engine = engine();
    let reading = seen(&MAERSK, 1000);

    let transition = engine.ingest(reading.clone());
    assert_eq!(transition.watched_reading(), Some(&reading));
    assert_eq!(
        transition.classification(),
        Some(Classification::NewArrival)
    );
    assert!(engine.ingest(RawReading::absent(1)).watched_reading().is_none());
}

#[test]
fn test_custom_noise_threshold() {
    let config = PresenceConfig {
        noise_threshold_ms: 100,
        ..PresenceConfig::default()
    };
    let mut engine = PresenceEngine::new(table(), config);
    engine.ingest(seen(&MAERSK, 0));

    let d = detection(engine.ingest(seen(&MAERSK, 101)));
    assert_eq!(d.classification, Classification::RepeatedRound);
}
