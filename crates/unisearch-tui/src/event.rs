//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] on every [`crossterm::event::Event`]
//! and match on the returned [`AppEvent`] instead of crossterm types.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `Shift+Tab`             | `FocusPrev`                |
//! | `/`                     | `QueryFocus`               |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`                 |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`               |
//! | `g`, `Home`             | `ScrollToTop`              |
//! | `G`, `End`              | `ScrollToBottom`           |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `←` / `h`               | `Nav(Left)`                |
//! | `→` / `l`               | `Nav(Right)`               |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! When a text-input widget (query bar, command bar) is focused, the event
//! loop calls [`to_app_event_insert`] instead. In insert mode:
//! - hjkl, q, g, G produce `Char` events
//! - Arrow keys still produce `Nav` for cursor movement
//! - Only `Ctrl+c`, `Escape`, `Enter`, `Tab`, and `Backspace` keep their
//!   special bindings
//!
//! ## Configurable keys
//!
//! The focus-cycle and query-focus keys come from the `[keybindings]`
//! section of the config file and are applied by [`KeyBindings::resolve`]
//! before the fixed tables above.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use unisearch_core::config::KeybindingsConfig;

/// Cardinal direction for picker, results, and text-cursor navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
///
/// Widgets receive `AppEvent` values and never inspect crossterm types. The
/// App shell routes events to the widget that owns the current focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the next pane.
    FocusNext,
    /// Move keyboard focus to the previous pane.
    FocusPrev,
    /// Transfer focus to the query bar.
    QueryFocus,
    /// Page the results table up.
    ScrollUp,
    /// Page the results table down.
    ScrollDown,
    /// Jump to the first result row.
    ScrollToTop,
    /// Jump to the last result row.
    ScrollToBottom,
    /// Arrow-key / hjkl navigation within the focused pane.
    Nav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    /// Delete the character before the cursor in the active text input.
    Backspace,
    /// Confirm the active input.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Dismiss the active modal (query bar focus, help popup, command bar).
    Escape,
}

// ---------------------------------------------------------------------------
// Configurable bindings
// ---------------------------------------------------------------------------

/// User-configurable keys from the `[keybindings]` config section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub toggle_focus: KeyCode,
    pub query_focus: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_focus: KeyCode::Tab,
            query_focus: KeyCode::Char('/'),
        }
    }
}

impl KeyBindings {
    /// Build from config. Unparseable names keep the default and log a warning.
    pub fn from_config(cfg: &KeybindingsConfig) -> Self {
        let defaults = Self::default();
        Self {
            toggle_focus: parse_key_or(&cfg.toggle_focus, defaults.toggle_focus),
            query_focus: parse_key_or(&cfg.query_focus, defaults.query_focus),
        }
    }

    /// Map a raw event, honouring the configured keys first.
    ///
    /// In insert mode a configured printable key is typed rather than bound,
    /// so a binding like `query_focus = "/"` never swallows input.
    pub fn resolve(&self, event: Event, insert: bool) -> Option<AppEvent> {
        if let Event::Key(key) = &event {
            let plain = key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT;
            let bindable = !(insert && matches!(key.code, KeyCode::Char(_)));
            if plain && bindable {
                if key.code == self.toggle_focus {
                    return Some(AppEvent::FocusNext);
                }
                if key.code == self.query_focus {
                    return Some(AppEvent::QueryFocus);
                }
            }
        }
        if insert {
            to_app_event_insert(event)
        } else {
            to_app_event(event)
        }
    }
}

/// Parse a key name: a single character, or one of `Tab`, `Enter`, `Esc`,
/// `Space`, `Backspace`, `F1`–`F12`. Names are case-insensitive.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match name.to_ascii_lowercase().as_str() {
        "tab" => Some(KeyCode::Tab),
        "enter" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        "backspace" => Some(KeyCode::Backspace),
        other => other
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F),
    }
}

fn parse_key_or(name: &str, fallback: KeyCode) -> KeyCode {
    parse_key(name).unwrap_or_else(|| {
        tracing::warn!(key = name, "unrecognised key binding, using default");
        fallback
    })
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for events that carry no meaning for the application
/// (mouse events, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input ("insert") mode.
///
/// Navigation letters are forwarded as [`AppEvent::Char`] so the user can
/// type freely. Arrow keys still produce [`AppEvent::Nav`] so `←`/`→` move
/// the text cursor.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        BackTab => Some(AppEvent::FocusPrev),

        Char('/') if key.modifiers == Mod::NONE => Some(AppEvent::QueryFocus),

        PageUp => Some(AppEvent::ScrollUp),
        PageDown => Some(AppEvent::ScrollDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollDown),

        Home => Some(AppEvent::ScrollToTop),
        End => Some(AppEvent::ScrollToBottom),
        Char('g') if key.modifiers == Mod::NONE => Some(AppEvent::ScrollToTop),
        // Uppercase: SHIFT may or may not be set depending on the terminal
        Char('G') => Some(AppEvent::ScrollToBottom),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

/// Key mapping for text-input / insert mode.
fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Ctrl+c always quits, even while typing
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        BackTab => Some(AppEvent::FocusPrev),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
