use feed_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::with_session();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn tick_leaves_state_untouched() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::Tick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn load_without_session_is_ignored() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::LoadNextClicked);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
