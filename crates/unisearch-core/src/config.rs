//! Configuration types for unisearch.
//!
//! [`Config::load`] reads `~/.config/unisearch/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::types::SchemaName;
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[search]
default_schema   = "Classroom"
loading_delay_ms = 1000

[ui]
theme        = "default"
picker_width = 24

[keybindings]
toggle_focus = "Tab"
query_focus  = "/"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/unisearch/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub default_schema: SchemaName,
    #[serde(default = "default_loading_delay_ms")]
    pub loading_delay_ms: u64,
}

fn default_loading_delay_ms() -> u64 { 1000 }

impl SearchConfig {
    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_schema: SchemaName::default(),
            loading_delay_ms: default_loading_delay_ms(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_picker_width")]
    pub picker_width: u16,
}

fn default_theme() -> String { "default".to_string() }
fn default_picker_width() -> u16 { 24 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            picker_width: default_picker_width(),
        }
    }
}

/// `[keybindings]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_toggle_focus")]
    pub toggle_focus: String,
    #[serde(default = "default_query_focus")]
    pub query_focus: String,
}

fn default_toggle_focus() -> String { "Tab".to_string() }
fn default_query_focus() -> String { "/".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            toggle_focus: default_toggle_focus(),
            query_focus: default_query_focus(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/unisearch/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        Self::load_from(&path)
    }

    /// Load `path` layered on top of the built-in defaults. A missing file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("unisearch")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
