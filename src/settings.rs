//! Game settings and preferences
//!
//! Persisted separately from the high score as `settings.json`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Show key help on the menu screen
    pub show_controls: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            show_fps: false,
            show_controls: true,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match persistence::load_json::<Settings>(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Best-effort save
    pub fn save(&self, path: &Path) {
        match persistence::save_json(path, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings to {}: {}", path.display(), e),
        }
    }
}
