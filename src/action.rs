//! Actions - user intents and async fetch results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{EvolutionNode, ListItem, PokemonDetails, SpeciesInfo};

/// Application actions with automatic category inference.
///
/// Every chain result carries the index it was fetched for so the reducer
/// can drop responses that arrive after the user navigated away.
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Roster category =====
    /// Intent: (re)fetch the pokemon list
    RosterFetch,

    /// Result: list loaded
    RosterDidLoad(Vec<ListItem>),

    /// Result: list fetch failed
    RosterDidError(String),

    // ===== Navigation =====
    /// Move the grid selection by a cell delta (±1 within a row,
    /// ±GRID_COLUMNS between rows)
    SelectionMove(i16),

    /// Open the detail screen for the selected card
    Open,

    /// Leave the detail screen
    Back,

    // ===== Detail chain category =====
    /// Result: step 1, details by index
    DetailDidLoad { index: usize, details: PokemonDetails },

    /// Result: step 1 failed
    DetailDidError { index: usize, error: String },

    /// Result: step 2, species resource at the details' species URL
    SpeciesDidLoad { index: usize, species: SpeciesInfo },

    /// Result: step 2 failed
    SpeciesDidError { index: usize, error: String },

    /// Result: step 3, evolution chain tree
    EvolutionDidLoad { index: usize, node: EvolutionNode },

    /// Result: step 3 failed
    EvolutionDidError { index: usize, error: String },

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
