//! Reducer - pure function: (state, action) -> DispatchResult
//!
//! The detail chain lives here: each `*DidLoad` result advances the phase
//! and emits the next fetch, whose URL only exists in the response that
//! just arrived. Results carrying an index that is no longer in flight are
//! dropped without touching state.

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, DetailPhase, Screen};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Roster actions =====
        Action::RosterFetch => {
            state.roster = DataResource::Loading;
            state.screen = Screen::List;
            state.detail = DetailPhase::Idle;
            state.selected = 0;
            state.message = None;
            DispatchResult::changed_with(Effect::LoadRoster { limit: state.limit })
        }

        Action::RosterDidLoad(items) => {
            state.roster = DataResource::Loaded(items);
            state.selected = 0;
            DispatchResult::changed()
        }

        Action::RosterDidError(error) => {
            state.message = Some(format!("Roster error: {error}"));
            state.roster = DataResource::Failed(error);
            DispatchResult::changed()
        }

        // ===== Navigation =====
        Action::SelectionMove(delta) => {
            if state.screen != Screen::List {
                return DispatchResult::unchanged();
            }
            if state.move_selection(delta) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Open => {
            if state.screen != Screen::List {
                return DispatchResult::unchanged();
            }
            let Some(item) = state.selected_item().cloned() else {
                return DispatchResult::unchanged();
            };
            state.screen = Screen::Detail {
                name: item.name,
                index: item.index,
            };
            state.detail = DetailPhase::FetchingDetails { index: item.index };
            state.message = None;
            DispatchResult::changed_with(Effect::LoadDetails { index: item.index })
        }

        Action::Back => {
            if state.screen == Screen::List {
                return DispatchResult::unchanged();
            }
            state.screen = Screen::List;
            state.detail = DetailPhase::Idle;
            DispatchResult::changed()
        }

        // ===== Detail chain =====
        Action::DetailDidLoad { index, details } => match state.detail {
            DetailPhase::FetchingDetails { index: pending } if pending == index => {
                let url = details.species_url.clone();
                state.detail = DetailPhase::FetchingSpecies { index, details };
                DispatchResult::changed_with(Effect::LoadSpecies { index, url })
            }
            _ => DispatchResult::unchanged(),
        },

        Action::SpeciesDidLoad { index, species } => {
            match std::mem::take(&mut state.detail) {
                DetailPhase::FetchingSpecies {
                    index: pending,
                    details,
                } if pending == index => match species.evolution_chain_url {
                    Some(url) => {
                        state.detail = DetailPhase::FetchingEvolution { index, details };
                        DispatchResult::changed_with(Effect::LoadEvolution { index, url })
                    }
                    // No chain to follow: the species is its own terminal form.
                    None => {
                        state.detail = DetailPhase::Loaded {
                            index,
                            details,
                            evolution: None,
                        };
                        DispatchResult::changed()
                    }
                },
                other => {
                    state.detail = other;
                    DispatchResult::unchanged()
                }
            }
        }

        Action::EvolutionDidLoad { index, node } => match std::mem::take(&mut state.detail) {
            DetailPhase::FetchingEvolution {
                index: pending,
                details,
            } if pending == index => {
                state.detail = DetailPhase::Loaded {
                    index,
                    details,
                    evolution: Some(node),
                };
                DispatchResult::changed()
            }
            other => {
                state.detail = other;
                DispatchResult::unchanged()
            }
        },

        Action::DetailDidError { index, error } => fail_chain(state, index, "Details", error),
        Action::SpeciesDidError { index, error } => fail_chain(state, index, "Species", error),
        Action::EvolutionDidError { index, error } => fail_chain(state, index, "Evolution", error),

        // ===== Global actions =====
        Action::Tick => {
            if state.loading_active() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Any chain step failure is terminal: the phase flips to `Failed` and the
/// message lands in the status bar. Stale failures are dropped like stale
/// successes.
fn fail_chain(
    state: &mut AppState,
    index: usize,
    step: &str,
    error: String,
) -> DispatchResult<Effect> {
    if state.detail.pending_index() != Some(index) {
        return DispatchResult::unchanged();
    }
    state.message = Some(format!("{step} fetch failed: {error}"));
    state.detail = DetailPhase::Failed { index, error };
    DispatchResult::changed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ListItem, PokemonDetails, SpeciesInfo};

    fn details(species_url: &str) -> PokemonDetails {
        PokemonDetails {
            sprite_front_default: None,
            height: 7,
            weight: 69,
            base_experience: Some(64),
            types: vec!["grass".into(), "poison".into()],
            abilities: vec!["overgrow".into()],
            moves: vec!["tackle".into()],
            species_url: species_url.to_string(),
        }
    }

    fn loaded_state() -> AppState {
        AppState {
            roster: DataResource::Loaded(vec![
                ListItem {
                    name: "bulbasaur".into(),
                    index: 1,
                },
                ListItem {
                    name: "ivysaur".into(),
                    index: 2,
                },
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn test_roster_fetch_sets_loading() {
        let mut state = AppState::new(151);
        let result = reducer(&mut state, Action::RosterFetch);

        assert!(result.changed);
        assert!(state.roster.is_loading());
        assert_eq!(result.effects, vec![Effect::LoadRoster { limit: 151 }]);
    }

    #[test]
    fn test_open_starts_chain_with_selected_index() {
        let mut state = loaded_state();
        state.selected = 1;

        let result = reducer(&mut state, Action::Open);

        assert!(result.changed);
        assert_eq!(
            state.screen,
            Screen::Detail {
                name: "ivysaur".into(),
                index: 2
            }
        );
        assert_eq!(state.detail, DetailPhase::FetchingDetails { index: 2 });
        assert_eq!(result.effects, vec![Effect::LoadDetails { index: 2 }]);
    }

    #[test]
    fn test_chain_follows_urls_from_responses() {
        let mut state = loaded_state();
        reducer(&mut state, Action::Open);

        let result = reducer(
            &mut state,
            Action::DetailDidLoad {
                index: 1,
                details: details("https://example.test/species/1/"),
            },
        );
        assert_eq!(
            result.effects,
            vec![Effect::LoadSpecies {
                index: 1,
                url: "https://example.test/species/1/".into()
            }]
        );

        let result = reducer(
            &mut state,
            Action::SpeciesDidLoad {
                index: 1,
                species: SpeciesInfo {
                    evolution_chain_url: Some("https://example.test/evolution-chain/1/".into()),
                },
            },
        );
        assert_eq!(
            result.effects,
            vec![Effect::LoadEvolution {
                index: 1,
                url: "https://example.test/evolution-chain/1/".into()
            }]
        );
        assert!(state.detail.in_flight());
    }

    #[test]
    fn test_species_without_chain_completes() {
        let mut state = loaded_state();
        reducer(&mut state, Action::Open);
        reducer(
            &mut state,
            Action::DetailDidLoad {
                index: 1,
                details: details("url"),
            },
        );

        let result = reducer(
            &mut state,
            Action::SpeciesDidLoad {
                index: 1,
                species: SpeciesInfo {
                    evolution_chain_url: None,
                },
            },
        );

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert!(matches!(
            state.detail,
            DetailPhase::Loaded {
                evolution: None,
                ..
            }
        ));
    }

    #[test]
    fn test_stale_results_are_discarded() {
        let mut state = loaded_state();
        reducer(&mut state, Action::Open); // index 1 in flight

        // A response for an index that is not in flight must not advance
        // the chain or emit effects.
        let result = reducer(
            &mut state,
            Action::DetailDidLoad {
                index: 2,
                details: details("url"),
            },
        );
        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.detail, DetailPhase::FetchingDetails { index: 1 });

        let result = reducer(
            &mut state,
            Action::DetailDidError {
                index: 2,
                error: "timeout".into(),
            },
        );
        assert!(!result.changed);
        assert_eq!(state.detail, DetailPhase::FetchingDetails { index: 1 });
    }

    #[test]
    fn test_step_failure_is_terminal() {
        let mut state = loaded_state();
        reducer(&mut state, Action::Open);
        reducer(
            &mut state,
            Action::DetailDidLoad {
                index: 1,
                details: details("url"),
            },
        );

        let result = reducer(
            &mut state,
            Action::SpeciesDidError {
                index: 1,
                error: "500".into(),
            },
        );

        assert!(result.changed);
        assert_eq!(
            state.detail,
            DetailPhase::Failed {
                index: 1,
                error: "500".into()
            }
        );
        assert!(state.message.as_deref().unwrap().contains("Species"));

        // Failure is terminal: a late success for the same index is dropped.
        let result = reducer(
            &mut state,
            Action::SpeciesDidLoad {
                index: 1,
                species: SpeciesInfo::default(),
            },
        );
        assert!(!result.changed);
        assert!(matches!(state.detail, DetailPhase::Failed { .. }));
    }

    #[test]
    fn test_back_resets_chain() {
        let mut state = loaded_state();
        reducer(&mut state, Action::Open);
        let result = reducer(&mut state, Action::Back);

        assert!(result.changed);
        assert_eq!(state.screen, Screen::List);
        assert_eq!(state.detail, DetailPhase::Idle);
    }

    #[test]
    fn test_selection_ignored_on_detail_screen() {
        let mut state = loaded_state();
        reducer(&mut state, Action::Open);

        let result = reducer(&mut state, Action::SelectionMove(1));
        assert!(!result.changed);
    }

    #[test]
    fn test_tick_only_animates_while_loading() {
        let mut state = loaded_state();
        assert!(!reducer(&mut state, Action::Tick).changed);

        reducer(&mut state, Action::Open);
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);
    }
}
