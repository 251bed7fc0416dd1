//! Colour theme for the unisearch TUI.
//!
//! Themes are defined as TOML files. Both bundled themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Resolve one at startup with [`Theme::by_name`] and pass it through
//! the application as a shared reference.
//!
//! # Column colours
//!
//! Column names are hashed to a stable index into the palette, so a field
//! such as `deptName` keeps its colour when switching between schemas.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawHeader {
    title: RawStyle,
    subtitle: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawPicker {
    selected: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    header: RawStyle,
    selected_row: RawStyle,
    empty: RawStyle,
    spinner: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawColumns {
    palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    borders: RawBorders,
    header: RawHeader,
    picker: RawPicker,
    table: RawTable,
    columns: RawColumns,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme.
///
/// All styles are pre-resolved ratatui [`Style`] values, so rendering does
/// not allocate.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border style for the currently focused pane.
    pub border_focused: Style,
    /// Border style for the command bar pane.
    pub border_command_bar: Style,
    /// Border style for unfocused panes.
    pub border_unfocused: Style,

    pub title: Style,
    pub subtitle: Style,

    /// Highlight for the selected schema in the picker.
    pub picker_selected: Style,

    pub table_header: Style,
    pub selected_row: Style,
    /// Style of the "No results found." message.
    pub empty_state: Style,
    pub spinner: Style,

    /// Ordered colour palette used for column colour cycling.
    column_palette: Vec<Color>,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. Covered by the
    /// `default_theme_loads` test.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a bundled theme by name, falling back to the default theme.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            "default" => Self::load_default(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using default");
                Self::load_default()
            }
        }
    }

    /// Parse a theme from a TOML string.
    ///
    /// Unknown keys are ignored so user themes stay forward-compatible.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            title: raw.header.title.into_style(),
            subtitle: raw.header.subtitle.into_style(),
            picker_selected: raw.picker.selected.into_style(),
            table_header: raw.table.header.into_style(),
            selected_row: raw.table.selected_row.into_style(),
            empty_state: raw.table.empty.into_style(),
            spinner: raw.table.spinner.into_style(),
            column_palette: raw
                .columns
                .palette
                .iter()
                .filter_map(|s| parse_color(s))
                .collect(),
        })
    }

    /// Border style for a pane, depending on whether it has focus.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }

    /// Return a stable [`Style`] for a column name.
    pub fn column_style(&self, column: &str) -> Style {
        if self.column_palette.is_empty() {
            return Style::default();
        }
        let idx = stable_hash(column) % self.column_palette.len();
        Style::default().fg(self.column_palette[idx])
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// djb2-style hash, stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> usize {
    s.bytes().fold(5381usize, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(b as usize)
    })
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_loads() {
        let theme = Theme::load_default();
        assert_ne!(theme.border_focused, Style::default());
        assert_ne!(theme.picker_selected, Style::default());
        assert_ne!(theme.empty_state, Style::default());
        assert!(!theme.column_palette.is_empty());
    }

    #[test]
    fn gruvbox_dark_theme_loads() {
        let theme = Theme::load_gruvbox_dark();
        assert_ne!(theme.border_focused, Style::default());
        assert_ne!(theme.table_header, Style::default());
        assert!(!theme.column_palette.is_empty());
    }

    #[test]
    fn by_name_falls_back_to_default() {
        let fallback = Theme::by_name("solarized");
        let default = Theme::load_default();
        assert_eq!(fallback.border_focused, default.border_focused);
        let gruvbox = Theme::by_name("Gruvbox");
        assert_ne!(gruvbox.border_focused, default.border_focused);
    }

    #[test]
    fn column_style_is_stable() {
        let theme = Theme::load_default();
        assert_eq!(theme.column_style("deptName"), theme.column_style("deptName"));
    }

    #[test]
    fn different_columns_can_differ() {
        let theme = Theme::load_default();
        let styles: Vec<_> = ["id", "name", "deptName", "salary", "building", "capacity"]
            .iter()
            .map(|n| theme.column_style(n))
            .collect();
        let unique: std::collections::HashSet<_> = styles.iter().collect();
        assert!(unique.len() > 1, "all columns mapped to the same colour");
    }

    #[test]
    fn parse_hex_color() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
    }

    #[test]
    fn parse_indexed_color() {
        assert_eq!(parse_color("indexed:42"), Some(Color::Indexed(42)));
    }

    #[test]
    fn parse_unknown_color_returns_none() {
        assert_eq!(parse_color("chartreuse"), None);
    }
}
