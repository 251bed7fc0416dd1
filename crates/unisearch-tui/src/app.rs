//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Each frame it also polls
//! the [`SearchWorker`] for a finished search and restarts the search when
//! the schema or query changed.

use crate::{
    commands::{execute_command, Command, CommandError},
    event::{self, AppEvent, KeyBindings},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        header::Header,
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        results_table::{ResultsTable, ResultsTableState},
        schema_picker::{SchemaPicker, SchemaPickerState},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};
use std::{io, sync::Arc, time::Duration};
use tokio::runtime::Handle;
use unisearch_core::{config::Config, Dataset, SchemaName, SearchWorker};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Picker,
    QueryBar,
    Results,
    /// Vim-style `:` command line is active.
    Command,
}

impl Focus {
    fn next(self) -> Focus {
        match self {
            Focus::Picker => Focus::QueryBar,
            Focus::QueryBar => Focus::Results,
            Focus::Results | Focus::Command => Focus::Picker,
        }
    }

    fn prev(self) -> Focus {
        match self {
            Focus::Picker => Focus::Results,
            Focus::QueryBar | Focus::Command => Focus::Picker,
            Focus::Results => Focus::QueryBar,
        }
    }
}

/// Initial state handed to [`App::new`].
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub dataset: Arc<Dataset>,
    pub schema: SchemaName,
    pub query: String,
    pub delay: Duration,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub picker: SchemaPickerState,
    pub query: QueryBarState,
    pub results: ResultsTableState,
    pub worker: SearchWorker,
    /// The (schema, query) pair most recently handed to the worker.
    pub submitted: Option<(SchemaName, String)>,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub keys: KeyBindings,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    /// Build the app and submit the initial search. Delayed searches run on
    /// `handle`.
    pub fn new(options: AppOptions, handle: Handle) -> Self {
        let theme = Theme::by_name(&options.config.ui.theme);
        let worker = SearchWorker::new(options.dataset, options.delay, handle);

        let state = AppState {
            picker: SchemaPickerState::new(options.schema),
            query: QueryBarState::new(options.query),
            results: ResultsTableState::default(),
            worker,
            submitted: None,
            focus: Focus::QueryBar,
            prev_focus: Focus::QueryBar,
            theme,
            keys: KeyBindings::from_config(&options.config.keybindings),
            config: options.config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        };

        let mut app = App { state };
        app.sync_search(false);
        app
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.poll_worker();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        // Use insert-mode mapping when a text widget is focused
                        let insert = is_insert_mode(self.state.focus);
                        if let Some(ev) = self.state.keys.resolve(Event::Key(key), insert) {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Pick up a finished search, if any, and advance the spinner.
    pub fn poll_worker(&mut self) {
        let s = &mut self.state;
        s.results.tick = s.results.tick.wrapping_add(1);
        if let Some(outcome) = s.worker.try_next() {
            tracing::debug!(generation = outcome.generation, "search delivered");
            s.results.set_results(outcome.results);
        }
    }

    /// Submit a search when the schema or query differs from the last
    /// submission, or unconditionally when `force` is set.
    fn sync_search(&mut self, force: bool) {
        let s = &mut self.state;
        let current = (s.picker.selected, s.query.query.clone());
        if !force && s.submitted.as_ref() == Some(&current) {
            return;
        }
        s.worker.submit(current.0, current.1.clone());
        s.results.searching = true;
        s.submitted = Some(current);
    }

    pub fn handle(&mut self, event: AppEvent) {
        let force = self.handle_inner(event);
        self.sync_search(force);
    }

    /// Returns true when the event asks for the current search to be re-run.
    fn handle_inner(&mut self, event: AppEvent) -> bool {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return false;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => match Command::parse(&s.command_bar.input) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        s.command_bar.clear();
                        s.focus = s.prev_focus;
                        execute_command(s, cmd);
                    }
                    Err(CommandError::Empty) => {
                        s.command_bar.clear();
                        s.focus = s.prev_focus;
                    }
                    Err(err) => {
                        // Show the error; bar stays open
                        s.command_bar.error = Some(err.to_string());
                    }
                },
                AppEvent::Quit => s.quit = true,
                other => s.command_bar.handle(&other),
            }
            return false;
        }

        match event {
            AppEvent::Char('?') if s.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            AppEvent::Char(':') if s.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::Escape => {
                if s.focus == Focus::QueryBar {
                    tracing::debug!("focus: QueryBar -> Picker");
                    s.focus = Focus::Picker;
                }
            }

            AppEvent::FocusNext => {
                let next = s.focus.next();
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }
            AppEvent::FocusPrev => {
                let prev = s.focus.prev();
                tracing::debug!(from = ?s.focus, to = ?prev, "focus cycle");
                s.focus = prev;
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> QueryBar");
                s.focus = Focus::QueryBar;
            }

            AppEvent::Enter if s.focus == Focus::QueryBar => return true,

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
        false
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::Picker => s.picker.handle(&event),
        Focus::QueryBar => s.query.handle(&event),
        Focus::Results => s.results.handle(&event),
        Focus::Command => {} // handled before dispatch
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 2-line header | body | 1-line status
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    // Horizontal body: picker | (query bar over results)
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([
            Constraint::Length(state.config.ui.picker_width),
            Constraint::Fill(1),
        ])
        .split(vert[1]);

    let right = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(3), Constraint::Fill(1)])
        .split(horiz[1]);

    let picker_area = Rect {
        height: horiz[0].height.min(SchemaName::ALL.len() as u16 + 2),
        ..horiz[0]
    };

    frame.render_widget(Header::new(&state.theme), vert[0]);
    frame.render_widget(
        SchemaPicker::new(&state.picker, state.focus == Focus::Picker, &state.theme),
        picker_area,
    );
    frame.render_widget(
        QueryBar::new(&state.query, state.focus == Focus::QueryBar, &state.theme),
        right[0],
    );
    frame.render_widget(
        ResultsTable::new(&state.results, state.focus == Focus::Results, &state.theme),
        right[1],
    );
    frame.render_widget(Paragraph::new(status_line(state)), vert[2]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar {
        let qb = QueryBar::new(&state.query, true, &state.theme);
        let (cx, cy) = qb.cursor_position(right[0]);
        frame.set_cursor_position((cx, cy));
    }
}

fn status_line(state: &AppState) -> Line<'static> {
    let activity = if state.results.searching {
        "searching".to_string()
    } else {
        format!("{} results", state.results.results.len())
    };
    Line::styled(
        format!(
            " {} · {} · delay {}ms",
            state.picker.selected,
            activity,
            state.worker.delay().as_millis()
        ),
        Style::default().add_modifier(Modifier::DIM),
    )
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
