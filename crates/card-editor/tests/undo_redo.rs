//! Integration tests: snapshot history driven through the editor session.

use card_core::{EditorConfig, Scene, ShapeKind};
use card_editor::{EditorSession, History, PropertyEdit, ShortcutAction};
use pretty_assertions::assert_eq;

fn make_session() -> EditorSession {
    EditorSession::new(EditorConfig::default())
}

#[test]
fn fresh_session_has_nothing_to_undo() {
    let mut session = make_session();
    assert!(!session.can_undo());
    assert!(!session.can_redo());
    assert!(!session.undo());
    assert!(!session.redo());
}

#[test]
fn undo_all_then_redo_all() {
    let mut session = make_session();
    session.add_text();
    session.add_shape(ShapeKind::Circle);
    session.add_shape(ShapeKind::Heart);
    let last = session.scene().clone();

    while session.undo() {}
    assert!(session.scene().is_empty());
    assert!(session.can_redo());

    while session.redo() {}
    assert_eq!(session.scene(), &last);
    assert!(!session.can_redo());
}

#[test]
fn new_edit_discards_redo() {
    let mut session = make_session();
    session.add_text();
    session.add_text();
    session.undo();
    assert!(session.can_redo());

    session.add_shape(ShapeKind::Rectangle);
    assert!(!session.can_redo());
    assert_eq!(session.scene().len(), 2);
    assert_eq!(session.scene().elements[1].tag(), "shape");
}

#[test]
fn shortcuts_drive_history() {
    let mut session = make_session();
    session.add_text();
    assert!(session.dispatch(ShortcutAction::Undo).unwrap());
    assert!(session.scene().is_empty());
    assert!(session.dispatch(ShortcutAction::Redo).unwrap());
    assert_eq!(session.scene().len(), 1);
}

#[test]
fn undo_restores_panel_edit() {
    let mut session = make_session();
    session.add_text();
    session.select_index(0);
    session.edit_selected(PropertyEdit::FontSize(48.0)).unwrap();
    assert_eq!(session.text_panel().unwrap().font_size, 48.0);

    session.undo();
    assert_eq!(session.text_panel().unwrap().font_size, 24.0);
}

#[test]
fn snapshots_are_independent_copies() {
    let mut history = History::new(&Scene::blank(), None);
    let mut scene = Scene::blank();
    scene.name = "First".to_string();
    history.record(&scene);

    scene.name = "Mutated".to_string();
    let back = history.undo().unwrap();
    assert_eq!(back.name, "Blank Card");
    assert_eq!(history.redo().unwrap().name, "First");
}

#[test]
fn history_limit_drops_oldest() {
    let config = EditorConfig {
        history_limit: Some(3),
        ..EditorConfig::default()
    };
    let mut session = EditorSession::new(config);
    for _ in 0..5 {
        session.add_text();
    }
    assert_eq!(session.history().len(), 3);

    let mut steps = 0;
    while session.undo() {
        steps += 1;
    }
    assert_eq!(steps, 2);
    assert_eq!(session.scene().len(), 3);
}
