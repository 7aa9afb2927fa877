//! Evolution tree flattening
//!
//! The tree is built once from the API response; rendering flattens it
//! with an explicit stack so arbitrarily deep chains cannot recurse the
//! renderer. Pre-order, children one indent level under their parent,
//! sibling order preserved.

use ratatui::text::Line;

use crate::palette::TEXT_MAIN;
use crate::state::EvolutionNode;
use ratatui::style::Style;

/// One rendered row of the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvolutionRow {
    pub depth: usize,
    pub label: String,
}

/// Flatten the tree into display rows.
pub fn evolution_rows(root: &EvolutionNode) -> Vec<EvolutionRow> {
    let mut rows = Vec::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        rows.push(EvolutionRow {
            depth,
            label: node_label(node),
        });
        for child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    rows
}

fn node_label(node: &EvolutionNode) -> String {
    let name = node.species_name.to_uppercase();
    match node.min_level {
        Some(level) => format!("{name} (Level: {level})"),
        None => name,
    }
}

pub fn evolution_lines(root: &EvolutionNode) -> Vec<Line<'static>> {
    evolution_rows(root)
        .into_iter()
        .map(|row| {
            Line::styled(
                format!("{}{}", "  ".repeat(row.depth), row.label),
                Style::default().fg(TEXT_MAIN),
            )
        })
        .collect()
}
