#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::Resource;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::components::TargetKind;

// Playfield, in virtual pixels. The renderer scales this onto terminal cells.
pub const VIEWPORT_WIDTH: f32 = 1200.0;
pub const VIEWPORT_HEIGHT: f32 = 600.0;
pub const OFFSCREEN_MARGIN: f32 = 100.0;
pub const SPAWN_BAND_TOP: f32 = 150.0;
pub const SPAWN_BAND_HEIGHT: f32 = 300.0;

// Every target is a square hit box anchored at its top-left corner
pub const TARGET_SIZE: f32 = 48.0;

// Target lifetime
pub const MAX_TARGET_AGE: Duration = Duration::from_millis(8000);
pub const HIT_GRACE: Duration = Duration::from_millis(200);

// Movement: 2 px per speed unit for every 60 Hz frame
pub const FRAME_SCALE: f32 = 2.0;
pub const REFERENCE_FRAME: Duration = Duration::from_nanos(16_666_667);

// Countdown
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);
pub const URGENT_TIME: u32 = 10;

// Best accuracy ignores tiny samples
pub const MIN_SHOTS_FOR_BEST_ACCURACY: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Seconds on the clock when a session starts.
    #[must_use]
    pub fn time_limit(self) -> u32 {
        match self {
            Difficulty::Easy => 90,
            Difficulty::Medium => 60,
            Difficulty::Hard => 45,
        }
    }

    #[must_use]
    pub fn spawn_interval(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(2000),
            Difficulty::Medium => Duration::from_millis(1500),
            Difficulty::Hard => Duration::from_millis(1000),
        }
    }

    #[must_use]
    pub fn archetypes(self) -> &'static [Archetype] {
        match self {
            Difficulty::Easy => EASY_TARGETS,
            Difficulty::Medium => MEDIUM_TARGETS,
            Difficulty::Hard => HARD_TARGETS,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A spawnable kind of target with its score and speed for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Archetype {
    pub kind: TargetKind,
    pub points: i32,
    pub speed: f32,
}

const fn archetype(kind: TargetKind, points: i32, speed: f32) -> Archetype {
    Archetype { kind, points, speed }
}

pub const EASY_TARGETS: &[Archetype] = &[
    archetype(TargetKind::Bottle, 50, 0.5),
    archetype(TargetKind::Outlaw, 100, 0.8),
    archetype(TargetKind::Poster, 75, 0.6),
];

pub const MEDIUM_TARGETS: &[Archetype] = &[
    archetype(TargetKind::Bottle, 75, 1.0),
    archetype(TargetKind::Outlaw, 150, 1.2),
    archetype(TargetKind::Poster, 100, 1.0),
    archetype(TargetKind::Bandit, 200, 1.5),
];

// Don't shoot the sheriff
pub const HARD_TARGETS: &[Archetype] = &[
    archetype(TargetKind::Bottle, 100, 1.8),
    archetype(TargetKind::Outlaw, 200, 2.0),
    archetype(TargetKind::Poster, 150, 1.8),
    archetype(TargetKind::Bandit, 300, 2.5),
    archetype(TargetKind::Sheriff, -100, 1.2),
];

/// Geometry of the shooting range, in virtual pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub spawn_top: f32,
    pub spawn_height: f32,
}

impl Default for Playfield {
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

impl Playfield {
    /// Left spawn edge, fully outside the visible area.
    #[must_use]
    pub fn left_edge(&self) -> f32 {
        -self.margin
    }

    /// Right spawn edge, fully outside the visible area.
    #[must_use]
    pub fn right_edge(&self) -> f32 {
        self.width + self.margin
    }

    #[must_use]
    pub fn is_offscreen(&self, x: f32) -> bool {
        x < self.left_edge() || x > self.right_edge()
    }
}

/// Target lifetime limits applied by the frame driver.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetTiming {
    pub max_age: Duration,
    pub hit_grace: Duration,
}

impl Default for TargetTiming {
    fn default() -> Self {
        Self {
            max_age: MAX_TARGET_AGE,
            hit_grace: HIT_GRACE,
        }
    }
}
