#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::Resource;
use log::debug;
use std::fmt;
use std::str::FromStr;

use crate::storage::{self, SharedStore, StoreKey};

pub const DEFAULT_SFX_VOLUME: u8 = 70;
pub const DEFAULT_MUSIC_VOLUME: u8 = 50;
pub const MAX_VOLUME: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrosshairStyle {
    #[default]
    Classic,
    Modern,
    Minimal,
}

impl CrosshairStyle {
    pub const ALL: [CrosshairStyle; 3] = [
        CrosshairStyle::Classic,
        CrosshairStyle::Modern,
        CrosshairStyle::Minimal,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CrosshairStyle::Classic => "classic",
            CrosshairStyle::Modern => "modern",
            CrosshairStyle::Minimal => "minimal",
        }
    }

    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            CrosshairStyle::Classic => "+",
            CrosshairStyle::Modern => "⊕",
            CrosshairStyle::Minimal => "·",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            CrosshairStyle::Classic => CrosshairStyle::Modern,
            CrosshairStyle::Modern => CrosshairStyle::Minimal,
            CrosshairStyle::Minimal => CrosshairStyle::Classic,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            CrosshairStyle::Classic => CrosshairStyle::Minimal,
            CrosshairStyle::Modern => CrosshairStyle::Classic,
            CrosshairStyle::Minimal => CrosshairStyle::Modern,
        }
    }
}

impl fmt::Display for CrosshairStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrosshairStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(CrosshairStyle::Classic),
            "modern" => Ok(CrosshairStyle::Modern),
            "minimal" => Ok(CrosshairStyle::Minimal),
            other => Err(format!("unknown crosshair style: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub sfx_volume: u8,
    pub music_volume: u8,
    pub crosshair_style: CrosshairStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx_volume: DEFAULT_SFX_VOLUME,
            music_volume: DEFAULT_MUSIC_VOLUME,
            crosshair_style: CrosshairStyle::Classic,
        }
    }
}

impl Settings {
    /// Volumes as gain factors for the audio engine.
    #[must_use]
    pub fn sfx_gain(&self) -> f32 {
        f32::from(self.sfx_volume) / f32::from(MAX_VOLUME)
    }

    #[must_use]
    pub fn music_gain(&self) -> f32 {
        f32::from(self.music_volume) / f32::from(MAX_VOLUME)
    }
}

/// Any subset of settings to change. Volumes outside 0..=100 are clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub sfx_volume: Option<i32>,
    pub music_volume: Option<i32>,
    pub crosshair_style: Option<CrosshairStyle>,
}

impl SettingsUpdate {
    fn from_settings(settings: Settings) -> Self {
        Self {
            sfx_volume: Some(i32::from(settings.sfx_volume)),
            music_volume: Some(i32::from(settings.music_volume)),
            crosshair_style: Some(settings.crosshair_style),
        }
    }
}

fn clamp_volume(volume: i32) -> u8 {
    u8::try_from(volume.clamp(0, i32::from(MAX_VOLUME))).unwrap_or(MAX_VOLUME)
}

/// Player preferences, persisted key by key.
#[derive(Resource)]
pub struct SettingsStore {
    current: Settings,
    store: SharedStore,
}

impl SettingsStore {
    /// Reads the saved settings; anything missing or unreadable keeps its
    /// default.
    #[must_use]
    pub fn load(store: SharedStore) -> Self {
        let defaults = Settings::default();
        let current = Settings {
            sfx_volume: storage::load::<i32>(store.as_ref(), StoreKey::SfxVolume)
                .map_or(defaults.sfx_volume, clamp_volume),
            music_volume: storage::load::<i32>(store.as_ref(), StoreKey::MusicVolume)
                .map_or(defaults.music_volume, clamp_volume),
            crosshair_style: storage::load(store.as_ref(), StoreKey::CrosshairStyle)
                .unwrap_or(defaults.crosshair_style),
        };
        debug!("Loaded settings: {current:?}");

        Self { current, store }
    }

    #[must_use]
    pub fn get(&self) -> Settings {
        self.current
    }

    /// Merges `update` and persists the fields it touched. A failed write is
    /// logged and the new value is still kept for this run.
    pub fn update(&mut self, update: SettingsUpdate) -> Settings {
        let store = self.store.as_ref();
        if let Some(volume) = update.sfx_volume {
            self.current.sfx_volume = clamp_volume(volume);
            storage::save(store, StoreKey::SfxVolume, self.current.sfx_volume);
        }
        if let Some(volume) = update.music_volume {
            self.current.music_volume = clamp_volume(volume);
            storage::save(store, StoreKey::MusicVolume, self.current.music_volume);
        }
        if let Some(style) = update.crosshair_style {
            self.current.crosshair_style = style;
            storage::save(store, StoreKey::CrosshairStyle, style);
        }
        self.current
    }

    pub fn reset(&mut self) -> Settings {
        self.update(SettingsUpdate::from_settings(Settings::default()))
    }
}
