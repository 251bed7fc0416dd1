//! Schema picker widget: the list of the eleven schemas in the left pane.
//!
//! # Navigation
//! - `↑`/`k` and `←`/`h` select the previous schema.
//! - `↓`/`j` and `→`/`l` select the next schema.
//!
//! The list wraps at both ends. The selection applies immediately: the App
//! shell notices the change and restarts the search.

use crate::{
    event::{AppEvent, Direction},
    theme::Theme,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};
use unisearch_core::SchemaName;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SchemaPickerState {
    pub selected: SchemaName,
}

impl SchemaPickerState {
    pub fn new(selected: SchemaName) -> Self {
        Self { selected }
    }

    /// Handle an [`AppEvent`], moving the selection as appropriate.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up | Direction::Left) => {
                self.selected = self.selected.prev();
                tracing::debug!(schema = %self.selected, "picker: previous");
            }
            AppEvent::Nav(Direction::Down | Direction::Right) => {
                self.selected = self.selected.next();
                tracing::debug!(schema = %self.selected, "picker: next");
            }
            AppEvent::ScrollToTop => {
                self.selected = SchemaName::ALL[0];
            }
            AppEvent::ScrollToBottom => {
                self.selected = SchemaName::ALL[SchemaName::ALL.len() - 1];
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SchemaPicker<'a> {
    state: &'a SchemaPickerState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SchemaPicker<'a> {
    pub fn new(state: &'a SchemaPickerState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for SchemaPicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Schema")
            .border_style(self.theme.border(self.focused));

        let items: Vec<ListItem> = SchemaName::ALL
            .iter()
            .map(|schema| ListItem::new(Line::from(format!(" {schema}"))))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(self.theme.picker_selected)
            .highlight_symbol("▶");

        let mut list_state = ListState::default().with_selected(Some(self.state.selected.index()));
        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
