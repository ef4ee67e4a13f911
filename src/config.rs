use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment switch that forces headless rendering.
pub const HEADLESS_ENV: &str = "COURTSIDE_HEADLESS";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Runtime settings. Every field has a default, so a config file only
/// needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    /// Record figures in memory instead of opening windows.
    pub headless: bool,
    pub point_radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            headless: false,
            point_radius: 3.0,
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            inner_size: [1000.0, 700.0],
            min_inner_size: [480.0, 320.0],
        }
    }
}

impl Settings {
    /// Read settings from an optional JSON file, then apply the
    /// environment override.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Self::from_json(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Self::default(),
        };
        if let Ok(value) = std::env::var(HEADLESS_ENV) {
            settings.headless = env_flag(&value);
        }
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
