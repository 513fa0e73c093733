use mailfold_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn drag_hover_marks_dirty_only_on_change() {
    let (mut state, _) = update(AppState::new(), Msg::DragEntered);
    assert!(state.view().drop_zone.dragging);
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::DragEntered);
    assert!(!state.consume_dirty());

    let (state, _) = update(state, Msg::DragLeft);
    assert!(!state.view().drop_zone.dragging);
}
