use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::{Color, Palette};

const APP_NAME: &str = "status-square";
const CONFIG_FILE: &str = "config.json";

/// Immutable settings for one invocation.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Wait before motion and fetch both start.
    pub delay_ms: u64,
    /// How long the shape takes to travel `distance`.
    pub duration_ms: u64,
    /// Distance travelled along the horizontal axis, in pixels.
    pub distance: f64,
    /// Edge length of the square, in pixels.
    pub size: f64,
    /// Color of the shape until the fetch outcome is applied.
    pub initial_color: Color,
    /// Spacing of frame opportunities.
    pub frame_interval_ms: u64,
    pub palette: Palette,
    /// Base used to resolve relative target URLs.
    pub base_url: Option<String>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            duration_ms: 1000,
            distance: 100.0,
            size: 100.0,
            initial_color: Color::Black,
            frame_interval_ms: 16,
            palette: Palette::default(),
            base_url: None,
        }
    }
}

impl AnimationConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Never zero; a zero interval would make `tokio::time::interval` panic.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    /// Load configuration from the user's config directory.
    /// Returns default config if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        match get_config_path().and_then(|path| Self::try_load(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit path. Unlike [`load`](Self::load),
    /// a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    fn try_load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
