//! Results table widget: the scrollable pane showing matching records.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row (scrolls view if needed) |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Scroll up one page |
//! | `PageDown` / `Ctrl+d` | Scroll down one page |
//! | `g` / `G` | Jump to first / last row |
//!
//! # Display states
//!
//! While a search is pending the pane shows a spinner. With zero results it
//! shows `No results found.`. Otherwise it shows a table whose headers are
//! the first record's field names in insertion order. Cells are looked up
//! by header name, so records listing their fields in another order still
//! line up.

use std::cell::Cell as StdCell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{
        Block, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Table, Widget,
    },
};
use unisearch_core::{SearchResults, EMPTY_MESSAGE};

pub const SEARCHING_MESSAGE: &str = "Searching…";

const PAGE_STEP: usize = 10;
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
/// Widest a column may grow before its cells are truncated.
const MAX_COLUMN_WIDTH: u16 = 36;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ResultsTableState {
    pub results: SearchResults,
    /// True while a search is in flight; the stale results are hidden.
    pub searching: bool,
    /// Index of the highlighted row.
    pub cursor: usize,
    /// Index of the first visible row.
    pub offset: usize,
    /// Frame counter driving the spinner animation.
    pub tick: usize,
    /// Cached from the last render so `handle()` can do cursor-aware scrolling.
    last_height: StdCell<usize>,
}

impl ResultsTableState {
    /// Replace the displayed results and leave the searching state.
    pub fn set_results(&mut self, results: SearchResults) {
        tracing::debug!(schema = %results.schema, hits = results.len(), "results: replaced");
        self.results = results;
        self.searching = false;
        self.cursor = 0;
        self.offset = 0;
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    fn keep_cursor_visible(&mut self) {
        let height = self.height();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.results.len();
        if total == 0 || self.searching {
            return;
        }
        let last = total - 1;

        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                self.cursor = (self.cursor + 1).min(last);
            }
            AppEvent::ScrollUp => {
                self.cursor = self.cursor.saturating_sub(PAGE_STEP);
            }
            AppEvent::ScrollDown => {
                self.cursor = (self.cursor + PAGE_STEP).min(last);
            }
            AppEvent::ScrollToTop => {
                self.cursor = 0;
            }
            AppEvent::ScrollToBottom => {
                self.cursor = last;
            }
            _ => return,
        }

        self.keep_cursor_visible();
        tracing::debug!(cursor = self.cursor, offset = self.offset, "results: moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultsTable<'a> {
    state: &'a ResultsTableState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultsTable<'a> {
    pub fn new(state: &'a ResultsTableState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for ResultsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let results = &self.state.results;
        let title = if self.state.searching {
            format!("Results — {}", results.schema)
        } else {
            format!("Results — {} ({})", results.schema, results.len())
        };

        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.state.searching {
            let frame = SPINNER[(self.state.tick / 4) % SPINNER.len()];
            let line = Line::from(vec![
                Span::styled(format!(" {frame} "), self.theme.spinner),
                Span::raw(SEARCHING_MESSAGE),
            ]);
            Paragraph::new(line).render(inner, buf);
            return;
        }

        if results.is_empty() {
            let line = Line::from(Span::styled(format!(" {EMPTY_MESSAGE}"), self.theme.empty_state));
            Paragraph::new(line).render(inner, buf);
            return;
        }

        // One row goes to the header.
        let height = (inner.height as usize).saturating_sub(1);
        self.state.last_height.set(height);

        let total = results.len();
        let start = self.state.offset.min(total.saturating_sub(1));
        let end = (start + height).min(total);

        let columns = results.columns();
        let widths = column_widths(results, &columns);

        let header = Row::new(
            columns
                .iter()
                .map(|c| Cell::from(*c).style(self.theme.column_style(c))),
        )
        .style(self.theme.table_header);

        let rows: Vec<Row> = results.records[start..end]
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let row = Row::new(record.render_columns(&columns).into_iter().map(Cell::from));
                if self.focused && start + i == self.state.cursor {
                    row.style(self.theme.selected_row)
                } else {
                    row
                }
            })
            .collect();

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Widget::render(
            Table::new(rows, widths).header(header).column_spacing(2),
            text_area,
            buf,
        );

        if total > height {
            let mut sb_state = ScrollbarState::new(total)
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

/// Width of each column: the widest of its header and cells, capped.
fn column_widths(results: &SearchResults, columns: &[&str]) -> Vec<Constraint> {
    let rows: Vec<Vec<String>> = results
        .records
        .iter()
        .map(|r| r.render_columns(columns))
        .collect();
    columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let widest = rows
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0);
            Constraint::Length(clamp_width(widest))
        })
        .collect()
}

fn clamp_width(chars: usize) -> u16 {
    u16::try_from(chars).unwrap_or(u16::MAX).min(MAX_COLUMN_WIDTH)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::testing::{contains, render_lines};
    use unisearch_core::{Dataset, SchemaName};

    fn state_for(schema: SchemaName, query: &str) -> ResultsTableState {
        let mut state = ResultsTableState::default();
        state.set_results(SearchResults::run(&Dataset::builtin(), schema, query));
        state
    }

    #[test]
    fn renders_headers_in_field_order() {
        let theme = Theme::load_default();
        let state = state_for(SchemaName::Instructor, "90000");
        let lines = render_lines(ResultsTable::new(&state, false, &theme), 80, 6);
        let header = &lines[1];
        let id = header.find("id").unwrap();
        let name = header.find("name").unwrap();
        let dept = header.find("deptName").unwrap();
        let salary = header.find("salary").unwrap();
        assert!(id < name && name < dept && dept < salary, "{header}");
        assert!(contains(&lines, "George Harris"));
        assert!(contains(&lines, "(1)"));
    }

    #[test]
    fn empty_results_show_message() {
        let theme = Theme::load_default();
        let state = state_for(SchemaName::Classroom, "zzz");
        let lines = render_lines(ResultsTable::new(&state, false, &theme), 60, 5);
        assert!(contains(&lines, EMPTY_MESSAGE));
    }

    #[test]
    fn searching_shows_spinner_instead_of_rows() {
        let theme = Theme::load_default();
        let mut state = state_for(SchemaName::Course, "");
        state.searching = true;
        let lines = render_lines(ResultsTable::new(&state, false, &theme), 60, 8);
        assert!(contains(&lines, SEARCHING_MESSAGE));
        assert!(!contains(&lines, "CS101"));
    }

    #[test]
    fn cursor_moves_and_clamps() {
        let mut state = state_for(SchemaName::Student, "");
        state.handle(&AppEvent::Nav(Direction::Up));
        assert_eq!(state.cursor, 0);
        state.handle(&AppEvent::ScrollToBottom);
        assert_eq!(state.cursor, 9);
        state.handle(&AppEvent::Nav(Direction::Down));
        assert_eq!(state.cursor, 9);
        state.handle(&AppEvent::ScrollUp);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn scrolling_keeps_cursor_in_view() {
        let theme = Theme::load_default();
        let mut state = state_for(SchemaName::Student, "");
        // 3 inner rows: header + 2 data rows
        render_lines(ResultsTable::new(&state, true, &theme), 60, 5);
        state.handle(&AppEvent::Nav(Direction::Down));
        state.handle(&AppEvent::Nav(Direction::Down));
        assert_eq!(state.cursor, 2);
        assert_eq!(state.offset, 1);
        state.handle(&AppEvent::ScrollToTop);
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn cells_follow_headers_when_field_order_differs() {
        let theme = Theme::load_default();
        let dataset = Dataset::from_json_str(
            r#"{"Course":[{"courseId":"CS101","credits":3},{"credits":4,"courseId":"MA201"}]}"#,
        )
        .unwrap();
        let mut state = ResultsTableState::default();
        state.set_results(SearchResults::run(&dataset, SchemaName::Course, ""));

        let lines = render_lines(ResultsTable::new(&state, false, &theme), 40, 6);
        let header_col = lines[1].find("courseId").unwrap();
        let row = lines.iter().find(|l| l.contains("MA201")).unwrap();
        assert_eq!(row.find("MA201"), Some(header_col), "{lines:#?}");
        let credits_col = lines[1].find("credits").unwrap();
        assert_eq!(row.find('4'), Some(credits_col), "{lines:#?}");
    }

    #[test]
    fn oversized_cells_hit_the_width_cap() {
        assert_eq!(clamp_width(5), 5);
        assert_eq!(clamp_width(usize::from(u16::MAX) + 3), MAX_COLUMN_WIDTH);
        assert_eq!(clamp_width(70_000), MAX_COLUMN_WIDTH);
    }

    #[test]
    fn new_results_reset_cursor() {
        let mut state = state_for(SchemaName::Student, "");
        state.handle(&AppEvent::ScrollToBottom);
        state.set_results(SearchResults::run(&Dataset::builtin(), SchemaName::Advisor, ""));
        assert_eq!(state.cursor, 0);
        assert_eq!(state.offset, 0);
    }
}
