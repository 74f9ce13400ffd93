// SPDX-License-Identifier: MIT OR Apache-2.0

//! Save/restore tests for game sessions

use blockdoku_core::snapshot::{GameSnapshot, SnapshotError};
use blockdoku_core::{BlockShape, Difficulty, GameSession, ShapeCatalog};
use std::io::Write;

fn mid_game_session() -> GameSession {
    let catalog = ShapeCatalog::standard();
    let mut session = GameSession::new();
    let line = catalog.get("line4_h").unwrap();
    let square = catalog.get("square").unwrap();

    assert!(session.attempt_placement(line, 0, 0, Difficulty::Normal).success);
    assert!(session.attempt_placement(line, 0, 4, Difficulty::Normal).success);
    assert!(session.attempt_placement(square, 3, 3, Difficulty::Normal).success);
    session
}

#[test]
fn cbor_roundtrip_preserves_session() {
    let session = mid_game_session();
    let snapshot = session.snapshot();

    let bytes = snapshot.to_cbor().expect("Failed to serialize to CBOR");
    let restored = GameSnapshot::from_cbor(&bytes).expect("Failed to deserialize from CBOR");
    assert_eq!(restored, snapshot);

    let resumed = GameSession::from_snapshot(restored);
    assert_eq!(resumed.board(), session.board());
    assert_eq!(resumed.score(), session.score());
    assert_eq!(resumed.stats(), session.stats());
    assert_eq!(resumed.chain_stats(), session.chain_stats());
    assert_eq!(resumed.patterns().history(), session.patterns().history());
    assert_eq!(resumed.config(), session.config());
}

#[test]
fn json_roundtrip_preserves_session() {
    let snapshot = mid_game_session().snapshot();
    let json = snapshot.to_json().expect("Failed to serialize to JSON");
    assert!(json.contains("\"score\""));

    let restored = GameSnapshot::from_json(&json).expect("Failed to deserialize from JSON");
    assert_eq!(restored.board, snapshot.board);
    assert_eq!(restored.patterns.counts(), snapshot.patterns.counts());
}

#[test]
fn resumed_session_continues_identically() {
    let mut original = mid_game_session();
    let mut resumed = GameSession::from_snapshot(
        GameSnapshot::from_cbor(&original.snapshot().to_cbor().unwrap()).unwrap(),
    );

    // Completing row 0 should score the same in both sessions
    let single = BlockShape::from_rows("single", &["#"]);
    let a = original.attempt_placement(&single, 0, 8, Difficulty::Hard);
    let b = resumed.attempt_placement(&single, 0, 8, Difficulty::Hard);

    assert!(a.success);
    assert_eq!(a.clear_result.rows, vec![0]);
    assert_eq!(a, b);
    assert_eq!(original.score(), resumed.score());
}

#[test]
fn snapshot_file_on_disk() {
    let session = mid_game_session();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&session.snapshot().to_cbor().unwrap()).unwrap();

    let bytes = std::fs::read(file.path()).unwrap();
    let resumed = GameSession::from_snapshot(GameSnapshot::from_cbor(&bytes).unwrap());
    assert_eq!(resumed.score(), session.score());
}

#[test]
fn garbage_is_rejected() {
    assert!(matches!(
        GameSnapshot::from_cbor(&[0xff, 0x00, 0x13]),
        Err(SnapshotError::Cbor(_))
    ));
    assert!(matches!(
        GameSnapshot::from_json("{\"board\": 3}"),
        Err(SnapshotError::Json(_))
    ));
}
