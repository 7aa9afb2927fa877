//! List screen - fixed-column grid of pokemon cards

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::prelude::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_dispatch::{DataResource, EventKind};

use super::Component;
use crate::action::Action;
use crate::api::sprite_url;
use crate::palette::{ACCENT_TEAL, TEXT_DIM, TEXT_MAIN};
use crate::state::{spinner_frame, AppState, ListItem, GRID_COLUMNS};

const CARD_HEIGHT: u16 = 4;

pub struct RosterGridProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The pokemon grid. Keeps only its scroll offset; everything else comes
/// from props.
#[derive(Default)]
pub struct RosterGrid {
    scroll_row: usize,
}

impl RosterGrid {
    pub fn new() -> Self {
        Self::default()
    }

    fn render_grid(&mut self, frame: &mut Frame, area: Rect, state: &AppState, items: &[ListItem]) {
        if items.is_empty() {
            frame.render_widget(
                Paragraph::new("No pokemon returned.").style(Style::default().fg(TEXT_DIM)),
                area,
            );
            return;
        }

        let total_rows = items.len().div_ceil(GRID_COLUMNS);
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        let selected_row = state.selected / GRID_COLUMNS;

        // Keep the selected row inside the viewport.
        if selected_row < self.scroll_row {
            self.scroll_row = selected_row;
        }
        if selected_row >= self.scroll_row + visible_rows {
            self.scroll_row = selected_row + 1 - visible_rows;
        }
        if self.scroll_row + visible_rows > total_rows {
            self.scroll_row = total_rows.saturating_sub(visible_rows);
        }

        let last_row = total_rows.min(self.scroll_row + visible_rows);
        for (slot, row) in (self.scroll_row..last_row).enumerate() {
            let row_area = Rect {
                x: area.x,
                y: area.y + slot as u16 * CARD_HEIGHT,
                width: area.width,
                height: CARD_HEIGHT,
            };
            let cells = Layout::horizontal([Constraint::Ratio(1, 3); GRID_COLUMNS]).split(row_area);
            for col in 0..GRID_COLUMNS {
                let position = row * GRID_COLUMNS + col;
                let Some(item) = items.get(position) else {
                    break;
                };
                render_card(frame, cells[col], item, position == state.selected);
            }
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, item: &ListItem, selected: bool) {
    let border_style = if selected {
        Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("#{:03}", item.index))
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);

    let name_style = if selected {
        Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MAIN)
    };
    frame.render_widget(
        Paragraph::new(item.name.to_uppercase())
            .alignment(Alignment::Center)
            .style(name_style),
        rows[0],
    );

    // Thumbnail URL follows from the card's 1-based position; narrow
    // terminals clip it.
    frame.render_widget(
        Paragraph::new(sprite_url(item.index))
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_DIM)),
        rows[1],
    );
}

impl Component<Action> for RosterGrid {
    type Props<'a> = RosterGridProps<'a>;

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
                KeyCode::Left | KeyCode::Char('h') => Some(Action::SelectionMove(-1)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::SelectionMove(1)),
                KeyCode::Up | KeyCode::Char('k') => {
                    Some(Action::SelectionMove(-(GRID_COLUMNS as i16)))
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    Some(Action::SelectionMove(GRID_COLUMNS as i16))
                }
                KeyCode::Enter => Some(Action::Open),
                KeyCode::Char('r') => Some(Action::RosterFetch),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match &props.state.roster {
            DataResource::Empty | DataResource::Loading => {
                let spinner = spinner_frame(props.state.tick_count);
                frame.render_widget(
                    Paragraph::new(format!("{spinner} Loading pokemon list..."))
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(TEXT_DIM)),
                    area,
                );
            }
            DataResource::Failed(error) => {
                frame.render_widget(
                    Paragraph::new(format!("Error: {error}\nPress r to retry."))
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(TEXT_MAIN)),
                    area,
                );
            }
            DataResource::Loaded(items) => {
                self.render_grid(frame, area, props.state, items);
            }
        }
    }
}
