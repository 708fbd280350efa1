pub mod app;
pub mod components;
pub mod config;
pub mod game;
pub mod generator;
pub mod menu;
pub mod menu_types;
pub mod particles;
pub mod screenshake;
pub mod session;
pub mod settings;
pub mod sound;
pub mod storage;
pub mod store;
pub mod systems;
pub mod timers;
pub mod ui;

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

// Longest frame the simulation will step in one go
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Measures the wall-clock time between game ticks.
///
/// Deltas are capped so a stalled terminal doesn't teleport every target
/// off the range at once.
#[derive(Debug, Clone)]
pub struct FrameClock {
    delta: Duration,
    last_update: Instant,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    #[must_use]
    pub fn starting_at(now: Instant) -> Self {
        Self {
            delta: Duration::default(),
            last_update: now,
        }
    }

    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Duration {
        self.delta = now.saturating_duration_since(self.last_update).min(MAX_FRAME_DELTA);
        self.last_update = now;
        self.delta
    }

    #[must_use]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
