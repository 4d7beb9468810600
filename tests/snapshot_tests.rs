//! Snapshot tests - read-only views handed to front ends

use blockfall::core::{Cell, EngineConfig, Session, SessionSnapshot};
use blockfall::types::{Color, Command, SessionState};

#[test]
fn test_menu_snapshot_has_no_pieces() {
    let session = Session::new(EngineConfig::default(), 5).unwrap();
    let snap = session.snapshot();
    assert_eq!(snap.state, SessionState::MainMenu);
    assert!(snap.active.is_none());
    assert!(snap.next.is_none());
    assert!(!snap.playable());
    assert_eq!((snap.columns, snap.rows), (10, 16));
}

#[test]
fn test_snapshot_mirrors_session() {
    let mut session = Session::new(EngineConfig::default(), 5).unwrap();
    session.go_to(SessionState::Running);
    session.apply(Command::HardDrop);

    let snap = session.snapshot();
    assert!(snap.playable());
    assert_eq!(snap.pieces_locked, 1);
    assert_eq!(snap.locked.len(), 4);
    assert_eq!(snap.drop_interval_ms, 500);

    let active = snap.active.unwrap();
    let current = session.current().unwrap();
    assert_eq!(active.pivot, current.pivot());
    for (shot, cell) in active.cells.iter().zip(current.cells()) {
        assert_eq!((shot.column, shot.row), (cell.column, cell.row));
    }

    let next = snap.next.unwrap();
    assert!(next.cells.iter().all(|c| (0..4).contains(&c.column)));
}

#[test]
fn test_snapshot_into_reuses_buffer() {
    let mut session = Session::new(EngineConfig::default(), 5).unwrap();
    session.go_to(SessionState::Running);
    session
        .playfield_mut()
        .lock_cells((0..3).map(|c| Cell::locked(c, 15, Color::Red)));

    let mut out = SessionSnapshot::default();
    session.snapshot_into(&mut out);
    assert_eq!(out.locked.len(), 3);

    session.go_to(SessionState::Running);
    session.snapshot_into(&mut out);
    assert!(out.locked.is_empty());
    assert_eq!(out, session.snapshot());
}

#[test]
fn test_color_at_prefers_active_piece() {
    let mut session = Session::new(EngineConfig::default(), 5).unwrap();
    session.go_to(SessionState::Running);
    session
        .playfield_mut()
        .lock_cells([Cell::locked(9, 15, Color::Gray)]);

    let snap = session.snapshot();
    assert_eq!(snap.color_at(9, 15), Some(Color::Gray));
    assert_eq!(snap.color_at(8, 15), None);

    let active = snap.active.unwrap();
    let first = active.cells[0];
    assert_eq!(snap.color_at(first.column, first.row), Some(active.color));
}

#[test]
fn test_snapshot_json_shape() {
    let mut session = Session::new(EngineConfig::default(), 5).unwrap();
    session.go_to(SessionState::Running);
    session.pause();

    let value = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(value["state"], "running");
    assert_eq!(value["paused"], true);
    assert_eq!(value["score"], 0);
    assert_eq!(value["locked"].as_array().unwrap().len(), 0);
    assert_eq!(value["active"]["cells"].as_array().unwrap().len(), 4);
    assert!(value["active"]["color"].is_string());
    assert!(value["next"]["shape"].is_string());
}

#[test]
fn test_lock_event_serializes() {
    let mut session = Session::new(EngineConfig::default(), 5).unwrap();
    session.go_to(SessionState::Running);
    session.apply(Command::HardDrop);

    let event = session.take_last_event().unwrap();
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["rows_cleared"], 0);
    assert_eq!(value["cleared_rows"].as_array().unwrap().len(), 0);
    assert_eq!(value["game_over"], false);
}
