//! Detail screen - stats, types, abilities, moves and the evolution tree
//!
//! Rendering is gated on the chain phase: anything short of `Loaded` shows
//! the spinner or the terminal error, never partial data.

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::prelude::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tui_dispatch::EventKind;

use super::evolution_tree::evolution_lines;
use super::Component;
use crate::action::Action;
use crate::palette::{type_style, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::state::{spinner_frame, AppState, DetailPhase, EvolutionNode, PokemonDetails, Screen};

const MOVES_SHOWN: usize = 8;

pub struct DetailPanelProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct DetailPanel;

impl Component<Action> for DetailPanel {
    type Props<'a> = DetailPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                    Some(Action::Back)
                }
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let name = match &state.screen {
            Screen::Detail { name, .. } => name.as_str(),
            Screen::List => "",
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(name.to_uppercase())
            .style(Style::default().fg(TEXT_MAIN).bg(BG_PANEL))
            .border_style(Style::default().fg(ACCENT_TEAL));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = match &state.detail {
            DetailPhase::Idle => vec![Line::styled(
                "Nothing selected.",
                Style::default().fg(TEXT_DIM),
            )],
            DetailPhase::FetchingDetails { .. }
            | DetailPhase::FetchingSpecies { .. }
            | DetailPhase::FetchingEvolution { .. } => {
                let spinner = spinner_frame(state.tick_count);
                vec![Line::styled(
                    format!("{spinner} Loading {}...", name.to_uppercase()),
                    Style::default().fg(TEXT_DIM),
                )]
            }
            DetailPhase::Failed { error, .. } => vec![
                Line::styled(
                    "Error loading pokemon.",
                    Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
                ),
                Line::styled(error.clone(), Style::default().fg(TEXT_DIM)),
                Line::default(),
                Line::styled("Press Esc to go back.", Style::default().fg(TEXT_DIM)),
            ],
            DetailPhase::Loaded {
                details, evolution, ..
            } => loaded_lines(details, evolution.as_ref()),
        };

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

fn loaded_lines(details: &PokemonDetails, evolution: Option<&EvolutionNode>) -> Vec<Line<'static>> {
    let label = Style::default().fg(TEXT_DIM);
    let value = Style::default().fg(TEXT_MAIN);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Sprite: ", label),
            Span::styled(
                details
                    .sprite_front_default
                    .clone()
                    .unwrap_or_else(|| "N/A".to_string()),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled("Height: ", label),
            Span::styled(details.height_label(), value),
        ]),
        Line::from(vec![
            Span::styled("Weight: ", label),
            Span::styled(details.weight_label(), value),
        ]),
        Line::from(vec![
            Span::styled("Base Experience: ", label),
            Span::styled(details.base_experience_label(), value),
        ]),
        type_line(&details.types),
        Line::from(vec![
            Span::styled("Abilities: ", label),
            Span::styled(join_or_na(&details.abilities), value),
        ]),
        moves_line(&details.moves),
        Line::default(),
        Line::styled(
            "EVOLUTION",
            Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
        ),
    ];

    match evolution {
        Some(node) => lines.extend(evolution_lines(node)),
        None => lines.push(Line::styled("No evolution data.", label)),
    }
    lines
}

fn type_line(types: &[String]) -> Line<'static> {
    let mut spans = vec![Span::styled("Types: ", Style::default().fg(TEXT_DIM))];
    if types.is_empty() {
        spans.push(Span::styled("N/A", Style::default().fg(TEXT_MAIN)));
    }
    for (position, name) in types.iter().enumerate() {
        if position > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(name.clone(), type_style(name)));
    }
    Line::from(spans)
}

fn moves_line(moves: &[String]) -> Line<'static> {
    let label = Style::default().fg(TEXT_DIM);
    let shown = moves
        .iter()
        .take(MOVES_SHOWN)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let text = if moves.is_empty() {
        "N/A".to_string()
    } else if moves.len() > MOVES_SHOWN {
        format!("{shown} (+{} more)", moves.len() - MOVES_SHOWN)
    } else {
        shown
    };
    Line::from(vec![
        Span::styled("Moves: ", label),
        Span::styled(text, Style::default().fg(TEXT_MAIN)),
    ])
}

fn join_or_na(values: &[String]) -> String {
    if values.is_empty() {
        "N/A".to_string()
    } else {
        values.join(", ")
    }
}
