//! Pokedex TUI - browse the PokeAPI pokemon list and per-pokemon details

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Span,
    Frame, Terminal,
};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex::action::Action;
use pokedex::api;
use pokedex::components::{Component, DetailPanel, DetailPanelProps, RosterGrid, RosterGridProps};
use pokedex::effect::Effect;
use pokedex::palette::ACCENT_GOLD;
use pokedex::reducer::reducer;
use pokedex::state::{AppState, Screen, SPINNER_TICK_MS};

/// Pokedex TUI built on tui-dispatch
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the PokeAPI pokemon list with per-pokemon details")]
struct Args {
    /// How many entries to request from the list endpoint
    #[arg(long, short, default_value = "1000", value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokedexComponentId {
    Roster,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokedexContext {
    List,
    Detail,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        match self.screen {
            Screen::List => Some(PokedexComponentId::Roster),
            Screen::Detail { .. } => Some(PokedexComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        None
    }

    fn binding_context(&self, id: PokedexComponentId) -> PokedexContext {
        match id {
            PokedexComponentId::Roster => PokedexContext::List,
            PokedexComponentId::Detail => PokedexContext::Detail,
        }
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::List
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        limit,
        debug: debug_args,
    } = Args::parse();

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move { Ok::<AppState, io::Error>(AppState::new(limit)) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct PokedexUi {
    roster: RosterGrid,
    detail: DetailPanel,
}

impl PokedexUi {
    fn new() -> Self {
        Self {
            roster: RosterGrid::new(),
            detail: DetailPanel,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokedexComponentId>,
    ) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        match state.screen {
            Screen::List => {
                event_ctx.set_component_area(PokedexComponentId::Roster, chunks[0]);
                event_ctx
                    .component_areas
                    .remove(&PokedexComponentId::Detail);
                self.roster.render(
                    frame,
                    chunks[0],
                    RosterGridProps {
                        state,
                        is_focused: render_ctx.is_focused(),
                    },
                );
            }
            Screen::Detail { .. } => {
                event_ctx.set_component_area(PokedexComponentId::Detail, chunks[0]);
                event_ctx
                    .component_areas
                    .remove(&PokedexComponentId::Roster);
                self.detail.render(
                    frame,
                    chunks[0],
                    DetailPanelProps {
                        state,
                        is_focused: render_ctx.is_focused(),
                    },
                );
            }
        }

        render_status_bar(frame, chunks[1], state);
    }

    fn handle_roster_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .roster
            .handle_event(
                event,
                RosterGridProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .detail
            .handle_event(
                event,
                DetailPanelProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints: &[StatusBarHint] = match state.screen {
        Screen::List => &[
            StatusBarHint::new("hjkl", "move"),
            StatusBarHint::new("Enter", "open"),
            StatusBarHint::new("r", "refresh"),
            StatusBarHint::new("q", "quit"),
        ],
        Screen::Detail { .. } => &[
            StatusBarHint::new("Esc", "back"),
            StatusBarHint::new("q", "quit"),
        ],
    };

    let message = state.message.clone().unwrap_or_default();
    let message_span = Span::styled(message.as_str(), Style::default().fg(ACCENT_GOLD));
    let message_items = [StatusBarItem::span(message_span)];

    let mut status_bar = StatusBar::new();
    <StatusBar as Component<Action>>::render(
        &mut status_bar,
        frame,
        area,
        StatusBarProps {
            left: StatusBarSection::empty(),
            center: StatusBarSection::hints(hints),
            right: StatusBarSection::items(&message_items),
            style: StatusBarStyle::default(),
            is_focused: false,
        },
    );
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, PokedexComponentId, PokedexContext> = EventBus::new();
    let keybindings: Keybindings<PokedexContext> = Keybindings::new();

    let ui_roster = Rc::clone(&ui);
    bus.register(PokedexComponentId::Roster, move |event, state| {
        ui_roster
            .borrow_mut()
            .handle_roster_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(PokedexComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::RosterFetch),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks. Chain fetches are keyed by index so a
/// newer chain replaces a superseded in-flight one.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadRoster { limit } => {
            ctx.tasks().spawn(TaskKey::new("roster"), async move {
                match api::fetch_roster(&api::ReqwestHttp, limit).await {
                    Ok(items) => Action::RosterDidLoad(items),
                    Err(err) => Action::RosterDidError(err),
                }
            });
        }
        Effect::LoadDetails { index } => {
            let key = format!("detail_{index}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_details(&api::ReqwestHttp, index).await {
                    Ok(details) => Action::DetailDidLoad { index, details },
                    Err(error) => Action::DetailDidError { index, error },
                }
            });
        }
        Effect::LoadSpecies { index, url } => {
            let key = format!("species_{index}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_species(&api::ReqwestHttp, &url).await {
                    Ok(species) => Action::SpeciesDidLoad { index, species },
                    Err(error) => Action::SpeciesDidError { index, error },
                }
            });
        }
        Effect::LoadEvolution { index, url } => {
            let key = format!("evo_{index}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_evolution(&api::ReqwestHttp, &url).await {
                    Ok(node) => Action::EvolutionDidLoad { index, node },
                    Err(error) => Action::EvolutionDidError { index, error },
                }
            });
        }
    }
}
