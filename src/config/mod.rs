pub mod loader;
pub mod menu;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::game::{
    HIT_GRACE, MAX_TARGET_AGE, OFFSCREEN_MARGIN, Playfield, SPAWN_BAND_HEIGHT, SPAWN_BAND_TOP,
    TargetTiming, VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
};
use crate::storage::{FileStore, MemoryStore, SharedStore, StorageError};

// Where the records live when no path is configured and there is no config dir
const FALLBACK_STORE_PATH: &str = "showdown_records.toml";

/// Everything that can be tuned from `config.toml`. Missing sections and
/// keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub viewport: ViewportConfig,
    pub timing: TimingConfig,
    pub storage: StorageConfig,
    pub menu: menu::MenuConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub spawn_top: f32,
    pub spawn_height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
            margin: OFFSCREEN_MARGIN,
            spawn_top: SPAWN_BAND_TOP,
            spawn_height: SPAWN_BAND_HEIGHT,
        }
    }
}

impl ViewportConfig {
    #[must_use]
    pub fn playfield(&self) -> Playfield {
        Playfield {
            width: self.width,
            height: self.height,
            margin: self.margin,
            spawn_top: self.spawn_top,
            spawn_height: self.spawn_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub render_tick_ms: u64,
    pub game_tick_ms: u64,
    pub hit_grace_ms: u64,
    pub max_target_age_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            render_tick_ms: 33,
            game_tick_ms: 16,
            hit_grace_ms: u64::try_from(HIT_GRACE.as_millis()).unwrap_or(200),
            max_target_age_ms: u64::try_from(MAX_TARGET_AGE.as_millis()).unwrap_or(8000),
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn render_tick(&self) -> Duration {
        Duration::from_millis(self.render_tick_ms.max(1))
    }

    #[must_use]
    pub fn game_tick(&self) -> Duration {
        Duration::from_millis(self.game_tick_ms.max(1))
    }

    #[must_use]
    pub fn target_timing(&self) -> TargetTiming {
        TargetTiming {
            max_age: Duration::from_millis(self.max_target_age_ms),
            hit_grace: Duration::from_millis(self.hit_grace_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// The records file: the configured path, or `records.toml` next to the
    /// user's config.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        dirs::config_dir().map_or_else(
            || PathBuf::from(FALLBACK_STORE_PATH),
            |dir| dir.join("showdown").join("records.toml"),
        )
    }

    /// Opens the configured backend.
    pub fn open(&self) -> Result<SharedStore, StorageError> {
        match self.backend {
            StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StorageBackend::File => Ok(Arc::new(FileStore::open(self.resolved_path())?)),
        }
    }
}
