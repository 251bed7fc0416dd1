//! Header widget: title and subtitle strip at the top of the screen.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub const TITLE: &str = "University Information Search";
pub const SUBTITLE: &str = "Search across various university data schemas";

/// Renders the 2-line header. Keybinding hints (`q:quit  ?:help`) are
/// right-aligned on the title row.
pub struct Header<'a> {
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let title = Line::from(Span::styled(format!(" {TITLE}"), self.theme.title));
        buf.set_line(area.x, area.y, &title, area.width);

        if area.height > 1 {
            let subtitle = Line::from(Span::styled(format!(" {SUBTITLE}"), self.theme.subtitle));
            buf.set_line(area.x, area.y + 1, &subtitle, area.width);
        }

        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
