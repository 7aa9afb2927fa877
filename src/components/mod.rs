pub mod detail_panel;
pub mod evolution_tree;
pub mod roster_grid;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_panel::{DetailPanel, DetailPanelProps};
pub use evolution_tree::{evolution_lines, evolution_rows, EvolutionRow};
pub use roster_grid::{RosterGrid, RosterGridProps};
