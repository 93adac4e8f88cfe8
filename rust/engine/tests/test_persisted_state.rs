use std::sync::Arc;

use luckydraw_engine::clock::ManualClock;
use luckydraw_engine::engine::DrawEngine;
use luckydraw_engine::errors::RestoreError;
use luckydraw_engine::history::HistoryEntry;
use luckydraw_engine::random::SeededIndexSource;
use luckydraw_engine::snapshot::PersistedState;

fn restore(state: PersistedState) -> Result<DrawEngine, RestoreError> {
    DrawEngine::restore(
        state,
        Box::new(SeededIndexSource::new(1)),
        Arc::new(ManualClock::new(10_000)),
    )
}

#[test]
fn legacy_single_winner_history_is_upgraded() {
    let raw = r#"{
        "originalNames": ["Ada", "Miles", "Jo"],
        "remainingNames": ["Miles"],
        "history": [
            {"round": 2, "name": "Jo", "timestamp": 200},
            {"round": 1, "names": ["Ada"], "timestamp": 100, "groupSize": 1}
        ],
        "roundCounter": 2,
        "rigRules": [],
        "rigEnabled": false,
        "autoDrawEnabled": false,
        "autoDrawIntervalSec": 10,
        "soundEnabled": true
    }"#;
    let state: PersistedState = serde_json::from_str(raw).expect("parse");
    let engine = restore(state).expect("restore");
    assert_eq!(
        engine.history()[0],
        HistoryEntry {
            round: 2,
            names: vec!["Jo".into()],
            timestamp: 200,
            group_size: 1
        }
    );
    assert_eq!(engine.history()[1].names, vec!["Ada".to_string()]);
    assert_eq!(engine.winner().map(|w| w.round), Some(2));
    assert!(engine.sound_enabled());
    assert_eq!(engine.group_mode().initial, 1);
    assert!(!engine.group_mode().enabled);
}

#[test]
fn round_trip_preserves_engine_state() {
    let mut engine = restore(PersistedState::default()).unwrap();
    engine.apply_names(vec!["A".into(), "B".into(), "C".into(), "D".into()]);
    engine.set_rig_enabled(true);
    engine.add_rig_rule("C", 1).unwrap();
    engine.configure_group_mode(true, 2, true);
    engine.draw().unwrap();

    let saved = engine.to_persisted();
    assert_eq!(saved.group_size_current, Some(1));
    let json = serde_json::to_string(&saved).unwrap();
    assert!(json.contains("\"remainingNames\""));
    assert!(json.contains("\"groupSize\":2"));
    let reloaded = restore(serde_json::from_str(&json).unwrap()).unwrap();

    assert_eq!(reloaded.pool(), engine.pool());
    assert_eq!(reloaded.history(), engine.history());
    assert_eq!(reloaded.round_counter(), 1);
    assert_eq!(reloaded.rig_rules(), engine.rig_rules());
    assert_eq!(reloaded.group_size_current(), 1);
    assert!(reloaded.rig_enabled());
}

#[test]
fn remaining_names_outside_original_list_are_rejected() {
    let state = PersistedState {
        original_names: vec!["A".into(), "B".into()],
        remaining_names: vec!["A".into(), "A".into()],
        ..PersistedState::default()
    };
    assert_eq!(
        restore(state).unwrap_err(),
        RestoreError::UnknownRemaining("A".into())
    );
}

#[test]
fn round_counter_must_match_latest_history() {
    let raw = r#"{
        "originalNames": ["A", "B"],
        "remainingNames": ["B"],
        "history": [{"round": 1, "name": "A", "timestamp": 1}],
        "roundCounter": 3
    }"#;
    let state: PersistedState = serde_json::from_str(raw).unwrap();
    assert!(matches!(
        restore(state),
        Err(RestoreError::RoundMismatch {
            round_counter: 3,
            latest: 1
        })
    ));
}

#[test]
fn enabled_auto_draw_is_rearmed_from_restore_time() {
    let raw = r#"{
        "originalNames": ["A"],
        "remainingNames": ["A"],
        "autoDrawEnabled": true,
        "autoDrawIntervalSec": 0
    }"#;
    let engine = restore(serde_json::from_str(raw).unwrap()).unwrap();
    let auto = engine.auto_draw();
    assert!(auto.enabled);
    assert_eq!(auto.interval_secs, 10);
    assert_eq!(auto.next_fire_at, Some(20_000));
}

#[test]
fn missing_fields_default_to_empty_state() {
    let state: PersistedState = serde_json::from_str("{}").unwrap();
    assert_eq!(state, PersistedState::default());
    let engine = restore(state).unwrap();
    assert!(engine.pool().is_empty());
    assert_eq!(engine.round_counter(), 0);
}

#[test]
fn drawn_names_outside_original_list_are_rejected() {
    let raw = r#"{
        "originalNames": ["A", "B"],
        "remainingNames": ["A", "B"],
        "history": [{"round": 1, "names": ["Z"], "timestamp": 1, "groupSize": 1}],
        "roundCounter": 1
    }"#;
    let state: PersistedState = serde_json::from_str(raw).unwrap();
    assert_eq!(
        restore(state).unwrap_err(),
        RestoreError::UnknownDrawn {
            round: 1,
            name: "Z".into()
        }
    );
}

#[test]
fn drawn_name_already_remaining_is_rejected() {
    let raw = r#"{
        "originalNames": ["A", "B"],
        "remainingNames": ["A", "B"],
        "history": [{"round": 1, "names": ["A"], "timestamp": 1}],
        "roundCounter": 1
    }"#;
    let state: PersistedState = serde_json::from_str(raw).unwrap();
    assert_eq!(
        restore(state).unwrap_err(),
        RestoreError::UnknownDrawn {
            round: 1,
            name: "A".into()
        }
    );
}

#[test]
fn names_neither_remaining_nor_drawn_are_rejected() {
    let raw = r#"{
        "originalNames": ["A", "B", "C"],
        "remainingNames": ["C"],
        "history": [{"round": 1, "names": ["A"], "timestamp": 1}],
        "roundCounter": 1
    }"#;
    let state: PersistedState = serde_json::from_str(raw).unwrap();
    assert_eq!(
        restore(state).unwrap_err(),
        RestoreError::UnaccountedNames(1)
    );
}

#[test]
fn round_counter_without_history_is_rejected() {
    let state = PersistedState {
        original_names: vec!["A".into()],
        remaining_names: vec!["A".into()],
        round_counter: 7,
        ..PersistedState::default()
    };
    assert_eq!(
        restore(state).unwrap_err(),
        RestoreError::RoundMismatch {
            round_counter: 7,
            latest: 0
        }
    );
}

#[test]
fn history_rounds_must_be_contiguous() {
    let raw = r#"{
        "originalNames": ["A", "B", "C"],
        "remainingNames": ["C"],
        "history": [
            {"round": 3, "names": ["B"], "timestamp": 3},
            {"round": 1, "names": ["A"], "timestamp": 1}
        ],
        "roundCounter": 3
    }"#;
    let state: PersistedState = serde_json::from_str(raw).unwrap();
    assert_eq!(
        restore(state).unwrap_err(),
        RestoreError::HistoryLength {
            round_counter: 3,
            entries: 2
        }
    );

    let raw = r#"{
        "originalNames": ["A", "B", "C"],
        "remainingNames": [],
        "history": [
            {"round": 3, "names": ["C"], "timestamp": 3},
            {"round": 1, "names": ["B"], "timestamp": 2},
            {"round": 1, "names": ["A"], "timestamp": 1}
        ],
        "roundCounter": 3
    }"#;
    let state: PersistedState = serde_json::from_str(raw).unwrap();
    assert_eq!(
        restore(state).unwrap_err(),
        RestoreError::HistoryGap {
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn used_rule_without_matching_winner_is_rejected() {
    let raw = r#"{
        "originalNames": ["A", "B"],
        "remainingNames": ["A", "B"],
        "roundCounter": 7,
        "rigRules": [
            {"id": "r1", "name": "A", "round": 7, "enabled": true, "used": true}
        ]
    }"#;
    let state: PersistedState = serde_json::from_str(raw).unwrap();
    assert!(matches!(
        restore(state),
        Err(RestoreError::RoundMismatch {
            round_counter: 7,
            latest: 0
        })
    ));

    let raw = r#"{
        "originalNames": ["A", "B"],
        "remainingNames": ["A"],
        "history": [{"round": 1, "names": ["B"], "timestamp": 1}],
        "roundCounter": 1,
        "rigRules": [
            {"id": "r1", "name": "A", "round": 1, "enabled": true, "used": true},
            {"id": "r2", "name": "B", "round": 1, "enabled": true, "used": true}
        ]
    }"#;
    let state: PersistedState = serde_json::from_str(raw).unwrap();
    assert_eq!(
        restore(state).unwrap_err(),
        RestoreError::OrphanUsedRule {
            id: "r1".into(),
            round: 1,
            name: "A".into()
        }
    );
}

#[test]
fn used_rule_matching_its_round_winner_is_accepted() {
    let raw = r#"{
        "originalNames": ["A", "B"],
        "remainingNames": ["A"],
        "history": [{"round": 1, "names": ["B"], "timestamp": 1}],
        "roundCounter": 1,
        "rigRules": [
            {"id": "r2", "name": "B", "round": 1, "enabled": true, "used": true},
            {"id": "r3", "name": "A", "round": 2, "enabled": true, "used": false}
        ]
    }"#;
    let state: PersistedState = serde_json::from_str(raw).unwrap();
    let engine = restore(state).unwrap();
    assert_eq!(engine.rig_rules().len(), 2);
    assert_eq!(engine.round_counter(), 1);
}
