//! Ratatui widgets for the unisearch TUI.

pub mod command_bar;
pub mod header;
pub mod help;
pub mod query_bar;
pub mod results_table;
pub mod schema_picker;

#[cfg(test)]
pub(crate) mod testing {
    use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

    /// Render `widget` into a fresh buffer and return its rows as strings.
    pub fn render_lines(widget: impl Widget, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    pub fn contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|l| l.contains(needle))
    }
}
