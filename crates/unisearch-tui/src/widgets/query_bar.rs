//! Query bar widget: free-text search input beside the schema picker.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! Every edit changes the query, and the App shell restarts the search on
//! the next frame.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

const PLACEHOLDER: &str = "Enter your search query";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    /// The search text typed by the user.
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl QueryBarState {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let cursor = query.len();
        Self { query, cursor }
    }

    /// Empty the query and reset the cursor.
    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Handle a key event from the app shell. Events other than text
    /// editing are ignored.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: char inserted");
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    // Walk back one char boundary
                    let prev = self.query[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.query.remove(prev);
                    self.cursor = prev;
                    tracing::debug!(query = %self.query, cursor = self.cursor, "query: backspace");
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.query[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.query.len() {
                    self.cursor = self.query[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.query.len());
                }
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.state.query[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(2));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Query")
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.state.query.is_empty() {
            let hint = if self.focused { PLACEHOLDER } else { "press / to search" };
            Line::from(Span::styled(hint, Style::default().add_modifier(Modifier::DIM)))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(line).render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::testing::{contains, render_lines};

    fn typed(text: &str) -> QueryBarState {
        let mut s = QueryBarState::default();
        for c in text.chars() {
            s.handle(&AppEvent::Char(c));
        }
        s
    }

    #[test]
    fn typing_and_backspace() {
        let mut s = typed("cs101");
        assert_eq!(s.query, "cs101");
        assert_eq!(s.cursor, 5);
        s.handle(&AppEvent::Backspace);
        assert_eq!(s.query, "cs10");
        assert_eq!(s.cursor, 4);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut s = typed("CS11");
        s.handle(&AppEvent::Nav(Direction::Left));
        s.handle(&AppEvent::Char('0'));
        assert_eq!(s.query, "CS101");
    }

    #[test]
    fn cursor_respects_multibyte_chars() {
        let mut s = typed("né");
        s.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(s.cursor, 1);
        s.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(s.cursor, 3);
        s.handle(&AppEvent::Backspace);
        assert_eq!(s.query, "n");
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut s = QueryBarState::default();
        s.handle(&AppEvent::Backspace);
        assert_eq!(s.query, "");
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn clear_resets_cursor() {
        let mut s = QueryBarState::new("law");
        assert_eq!(s.cursor, 3);
        s.clear();
        assert_eq!(s.query, "");
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn placeholder_shown_when_focused_and_empty() {
        let theme = Theme::load_default();
        let state = QueryBarState::default();
        let lines = render_lines(QueryBar::new(&state, true, &theme), 40, 3);
        assert!(contains(&lines, PLACEHOLDER));
    }

    #[test]
    fn query_text_rendered() {
        let theme = Theme::load_default();
        let state = QueryBarState::new("Intro");
        let lines = render_lines(QueryBar::new(&state, false, &theme), 40, 3);
        assert!(lines[1].contains("Intro"));
    }
}
