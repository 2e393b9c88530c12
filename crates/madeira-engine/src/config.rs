use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::logging::LoggingConfig;
use crate::math::Color;
use crate::resource::SearchPaths;

/// Host and window configuration.
///
/// Every field is optional in TOML; missing fields keep their defaults.
///
/// ```toml
/// title = "demo"
/// width = 640
/// target_fps = 30
/// clear_color = { r = 0.1, g = 0.1, b = 0.1, a = 1.0 }
///
/// [search]
/// root = "assets"
///
/// [logging]
/// env_filter = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub title: String,

    /// Inner size in logical pixels.
    pub width: u32,
    pub height: u32,

    pub resizable: bool,
    pub cursor_visible: bool,

    /// Ticks per second; `0` runs uncapped.
    pub target_fps: u32,

    pub clear_color: Color,

    pub search: SearchPaths,

    pub logging: LoggingConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "madeira".to_string(),
            width: 480,
            height: 480,
            resizable: false,
            cursor_visible: false,
            target_fps: 60,
            clear_color: Color::rgba(0.3, 0.3, 0.6, 0.0),
            search: SearchPaths::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl HostConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid host configuration")
    }

    /// Reads a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config `{}`", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in `{}`", path.display()))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_cursor_visible(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_resource_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search.root = Some(root.into());
        self
    }

    pub fn with_search_paths(mut self, search: SearchPaths) -> Self {
        self.search = search;
        self
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }
}
