//! UI palette and the type-name to display-color lookup

use ratatui::style::{Color, Modifier, Style};

pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);

/// Display color for a pokemon type. Total: unknown names map to a
/// neutral default.
pub fn type_color(name: &str) -> &'static str {
    match name {
        "fire" => "#fba500",
        "water" => "#6493eb",
        "grass" => "#7ac74c",
        "electric" => "#f7d02c",
        "psychic" => "#f95587",
        "normal" => "#a8a77a",
        "bug" => "#a6b91a",
        "dragon" => "#6f35fc",
        "poison" => "#a33ea1",
        "ghost" => "#735797",
        "flying" => "#a98ff3",
        "fighting" => "#c22e28",
        "ground" => "#e2bf65",
        "steel" => "#b7b7ce",
        "fairy" => "#d685ad",
        _ => "#ccc",
    }
}

/// Parse a `#rrggbb` or `#rgb` hex color. Anything unparseable falls back
/// to gray rather than failing.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    let (r, g, b) = match digits.len() {
        3 => {
            let Some((r, g, b)) = (|| {
                let r = u8::from_str_radix(&digits[0..1], 16).ok()?;
                let g = u8::from_str_radix(&digits[1..2], 16).ok()?;
                let b = u8::from_str_radix(&digits[2..3], 16).ok()?;
                Some((r * 17, g * 17, b * 17))
            })() else {
                return Color::Gray;
            };
            (r, g, b)
        }
        6 => {
            let Some((r, g, b)) = (|| {
                let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
                let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
                let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
                Some((r, g, b))
            })() else {
                return Color::Gray;
            };
            (r, g, b)
        }
        _ => return Color::Gray,
    };
    Color::Rgb(r, g, b)
}

/// Style for a type chip on the detail screen.
pub fn type_style(name: &str) -> Style {
    Style::default()
        .fg(hex_color(type_color(name)))
        .add_modifier(Modifier::BOLD)
}
