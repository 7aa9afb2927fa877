//! Reducer and keyboard-to-action tests
//!
//! Store-level dispatch assertions plus the grid's key handling, driven
//! through the dispatch test harness.

use pokedex::{
    action::Action,
    components::{Component, RosterGrid, RosterGridProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, DetailPhase, ListItem, Screen},
};
use tui_dispatch::testing::*;
use tui_dispatch::{assert_emitted, assert_not_emitted, DataResource, EffectStore, NumericComponentId};

fn roster_items() -> Vec<ListItem> {
    ["bulbasaur", "ivysaur", "venusaur"]
        .iter()
        .enumerate()
        .map(|(position, name)| ListItem {
            name: name.to_string(),
            index: position + 1,
        })
        .collect()
}

fn loaded_state() -> AppState {
    AppState {
        roster: DataResource::Loaded(roster_items()),
        ..Default::default()
    }
}

#[test]
fn test_reducer_roster_fetch() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(store.state().roster.is_empty());

    // Dispatch fetch - should set loading and return LoadRoster effect
    let result = store.dispatch(Action::RosterFetch);
    assert!(result.changed, "State should change");
    assert!(store.state().roster.is_loading());
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(result.effects[0], Effect::LoadRoster { limit: 1000 }));
}

#[test]
fn test_reducer_roster_load() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::RosterFetch); // Set loading
    store.dispatch(Action::RosterDidLoad(roster_items()));

    assert!(store.state().roster.is_loaded());
    assert_eq!(store.state().roster.data(), Some(&roster_items()));
    assert_eq!(store.state().selected, 0);
}

#[test]
fn test_reducer_open_and_back() {
    let mut store = EffectStore::new(loaded_state(), reducer);

    let result = store.dispatch(Action::Open);
    assert!(result.changed);
    assert_eq!(
        store.state().screen,
        Screen::Detail {
            name: "bulbasaur".into(),
            index: 1
        }
    );
    assert!(matches!(result.effects[0], Effect::LoadDetails { index: 1 }));

    store.dispatch(Action::Back);
    assert_eq!(store.state().screen, Screen::List);
    assert_eq!(store.state().detail, DetailPhase::Idle);
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::new(loaded_state());
    let mut component = RosterGrid::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        let props = RosterGridProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::RosterFetch);
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::new(loaded_state());
    let mut component = RosterGrid::new();

    // An unfocused grid must not produce actions
    let actions = harness.send_keys::<NumericComponentId, _, _>("r j q", |state, event| {
        let props = RosterGridProps {
            state,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    // Categories come from the variant naming convention
    let did_load = Action::RosterDidLoad(roster_items());
    let did_error = Action::DetailDidError {
        index: 1,
        error: "timeout".into(),
    };
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("roster_did"));
    assert_eq!(did_error.category(), Some("detail_did"));
    assert_eq!(tick.category(), None); // Uncategorized

    // Generated predicates for categorized actions
    assert!(did_load.is_roster_did());
    assert!(did_error.is_detail_did());
}

#[test]
fn test_harness_emit_and_drain() {
    let mut harness = TestHarness::<(), Action>::new(());

    harness.emit(Action::RosterFetch);
    harness.emit(Action::SelectionMove(1));
    harness.emit(Action::RosterDidError("oops".into()));

    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![Action::RosterFetch, Action::RosterDidLoad(roster_items())];

    assert_emitted!(actions, Action::RosterFetch);
    assert_emitted!(actions, Action::RosterDidLoad(_));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::RosterDidError(_));
}

#[test]
fn test_custom_limit() {
    let state = AppState::new(151);
    assert_eq!(state.limit, 151);

    let mut store = EffectStore::new(state, reducer);
    let result = store.dispatch(Action::RosterFetch);
    assert!(matches!(result.effects[0], Effect::LoadRoster { limit: 151 }));
}
