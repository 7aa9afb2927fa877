//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Cards per grid row on the list screen.
pub const GRID_COLUMNS: usize = 3;

/// Spinner animation timing.
pub const SPINNER_TICK_MS: u64 = 120;

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub fn spinner_frame(tick: u32) -> &'static str {
    SPINNER_FRAMES[tick as usize % SPINNER_FRAMES.len()]
}

/// One entry of the pokemon list. `index` is the 1-based position in the
/// fetched list and doubles as the species identifier for the detail fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ListItem {
    pub name: String,
    pub index: usize,
}

/// Details for a single pokemon, fetched fresh every time the detail screen
/// opens. `species_url` is the link the next chain step follows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonDetails {
    pub sprite_front_default: Option<String>,
    pub height: u16,
    pub weight: u16,
    pub base_experience: Option<u16>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub moves: Vec<String>,
    pub species_url: String,
}

impl PokemonDetails {
    pub fn height_label(&self) -> String {
        format_height(self.height)
    }

    pub fn weight_label(&self) -> String {
        format_weight(self.weight)
    }

    pub fn base_experience_label(&self) -> String {
        match self.base_experience {
            Some(xp) => xp.to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// API heights are decimeters: 70 -> "7 m", 69 -> "6.9 m".
pub fn format_height(decimeters: u16) -> String {
    format_tenths(decimeters, "m")
}

/// API weights are hectograms: 69 -> "6.9 kg".
pub fn format_weight(hectograms: u16) -> String {
    format_tenths(hectograms, "kg")
}

fn format_tenths(raw: u16, unit: &str) -> String {
    if raw % 10 == 0 {
        format!("{} {unit}", raw / 10)
    } else {
        format!("{}.{} {unit}", raw / 10, raw % 10)
    }
}

/// The part of the species resource the chain consumes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpeciesInfo {
    pub evolution_chain_url: Option<String>,
}

/// One node of the evolution tree. Children are the possible evolutions;
/// `min_level` comes from the first evolution condition when one exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvolutionNode {
    pub species_name: String,
    pub min_level: Option<u16>,
    pub children: Vec<EvolutionNode>,
}

/// Which screen owns the main area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum Screen {
    List,
    Detail { name: String, index: usize },
}

/// Detail-screen fetch chain, one phase per dependent request:
/// details -> species -> evolution chain. Data renders only in `Loaded`;
/// any step failure is terminal for the chain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum DetailPhase {
    #[default]
    Idle,
    FetchingDetails {
        index: usize,
    },
    FetchingSpecies {
        index: usize,
        details: PokemonDetails,
    },
    FetchingEvolution {
        index: usize,
        details: PokemonDetails,
    },
    Loaded {
        index: usize,
        details: PokemonDetails,
        evolution: Option<EvolutionNode>,
    },
    Failed {
        index: usize,
        error: String,
    },
}

impl DetailPhase {
    /// Index of the chain currently in flight, if any.
    pub fn pending_index(&self) -> Option<usize> {
        match self {
            DetailPhase::FetchingDetails { index }
            | DetailPhase::FetchingSpecies { index, .. }
            | DetailPhase::FetchingEvolution { index, .. } => Some(*index),
            DetailPhase::Idle | DetailPhase::Loaded { .. } | DetailPhase::Failed { .. } => None,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.pending_index().is_some()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, DetailPhase::Loaded { .. })
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// How many entries the roster fetch requests
    #[debug(section = "Roster", label = "Limit")]
    pub limit: u32,

    /// Pokemon list lifecycle: Empty -> Loading -> Loaded/Failed
    #[debug(section = "Roster", label = "Items", debug_fmt)]
    pub roster: DataResource<Vec<ListItem>>,

    /// Selected grid cell (0-based position into the roster)
    #[debug(section = "Roster", label = "Selected")]
    pub selected: usize,

    /// Which screen owns the main area
    #[debug(section = "Navigation", label = "Screen", debug_fmt)]
    pub screen: Screen,

    /// Detail fetch chain phase
    #[debug(section = "Detail", label = "Phase", debug_fmt)]
    pub detail: DetailPhase,

    /// Last chain failure, surfaced in the status bar
    #[debug(section = "Detail", label = "Message", debug_fmt)]
    pub message: Option<String>,

    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            roster: DataResource::Empty,
            selected: 0,
            screen: Screen::List,
            detail: DetailPhase::Idle,
            message: None,
            tick_count: 0,
        }
    }

    pub fn selected_item(&self) -> Option<&ListItem> {
        self.roster.data()?.get(self.selected)
    }

    /// Move the grid selection by `delta` cells, clamped to the roster.
    /// Row moves are `delta = ±GRID_COLUMNS`.
    pub fn move_selection(&mut self, delta: i16) -> bool {
        let Some(items) = self.roster.data() else {
            return false;
        };
        if items.is_empty() {
            return false;
        }
        let last = items.len() as isize - 1;
        let next = (self.selected as isize + delta as isize).clamp(0, last) as usize;
        if next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }

    pub fn loading_active(&self) -> bool {
        self.roster.is_loading() || self.detail.in_flight()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(1000)
    }
}
