//! Configuration loading and parsing for `vedit.toml`.
//!
//! Recognized tables:
//! ```toml
//! [viewport]
//! max_lines = 20          # buffer rows drawn per frame
//!
//! [display]
//! line_numbers = true
//! hints = true            # key hint row under the status line
//! alternate_screen = true
//!
//! [undo]
//! history = 200
//! ```
//! Missing tables and fields take their defaults. Unknown fields are ignored.
//! A file that fails to parse is reported at `warn` and replaced by defaults,
//! so a broken config never prevents an editing session.
//!
//! The effective viewport height is clamped against the terminal size by
//! `Config::apply_context`; the raw value is retained so a later resize can
//! re-clamp.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "vedit.toml";

/// Rows used by everything other than buffer lines: title, two rules, status, hint.
pub const CHROME_ROWS: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub terminal_columns: u16,
    pub terminal_rows: u16,
}

impl ConfigContext {
    pub fn new(terminal_columns: u16, terminal_rows: u16) -> Self {
        Self {
            terminal_columns,
            terminal_rows,
        }
    }

    pub fn text_rows(&self) -> u16 {
        self.terminal_rows.saturating_sub(CHROME_ROWS)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ViewportConfig {
    #[serde(default = "ViewportConfig::default_max_lines")]
    pub max_lines: u16,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            max_lines: Self::default_max_lines(),
        }
    }
}

impl ViewportConfig {
    const fn default_max_lines() -> u16 {
        20
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default = "enabled")]
    pub line_numbers: bool,
    #[serde(default = "enabled")]
    pub hints: bool,
    #[serde(default = "enabled")]
    pub alternate_screen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            line_numbers: true,
            hints: true,
            alternate_screen: true,
        }
    }
}

const fn enabled() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct UndoConfig {
    #[serde(default = "UndoConfig::default_history")]
    pub history: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            history: Self::default_history(),
        }
    }
}

impl UndoConfig {
    const fn default_history() -> usize {
        200
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub undo: UndoConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub raw: Option<String>,      // original file string (optional)
    pub file: ConfigFile,         // parsed (or default) data
    pub effective_max_lines: u16, // clamped to the terminal height
}

impl Default for Config {
    fn default() -> Self {
        let file = ConfigFile::default();
        Self {
            raw: None,
            effective_max_lines: file.viewport.max_lines.max(1),
            file,
        }
    }
}

/// Best-effort config path: `./vedit.toml`, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("vedit").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                effective_max_lines: file.viewport.max_lines.max(1),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Clamp the viewport height so the whole frame fits the terminal.
    /// Returns the effective value (never below one row).
    pub fn apply_context(&mut self, ctx: ConfigContext) -> u16 {
        let raw = self.file.viewport.max_lines;
        let text_rows = ctx.text_rows().max(1);
        let clamped = raw.clamp(1, text_rows);
        if clamped != raw && clamped != self.effective_max_lines {
            info!(
                target: "config",
                raw,
                clamped,
                text_rows,
                terminal_rows = ctx.terminal_rows,
                "viewport_max_lines_clamped"
            );
        }
        self.effective_max_lines = clamped;
        clamped
    }

    /// Recompute after a terminal resize. `Some(new)` when the effective value changed.
    pub fn recompute_with_context(&mut self, ctx: ConfigContext) -> Option<u16> {
        let prev = self.effective_max_lines;
        let current = self.apply_context(ctx);
        if current != prev { Some(current) } else { None }
    }

    pub fn undo_history(&self) -> usize {
        self.file.undo.history
    }
}
