#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use ratatui::style::Color;
use std::fmt;
use std::time::Duration;

use crate::game::TARGET_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Outlaw,
    Bottle,
    Poster,
    Bandit,
    Sheriff,
}

impl TargetKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TargetKind::Outlaw => "outlaw",
            TargetKind::Bottle => "bottle",
            TargetKind::Poster => "poster",
            TargetKind::Bandit => "bandit",
            TargetKind::Sheriff => "sheriff",
        }
    }

    /// Single-character sprite drawn in the middle of the target box.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            TargetKind::Outlaw => "☻",
            TargetKind::Bottle => "♜",
            TargetKind::Poster => "▤",
            TargetKind::Bandit => "☠",
            TargetKind::Sheriff => "★",
        }
    }

    #[must_use]
    pub fn get_color(self) -> Color {
        match self {
            TargetKind::Outlaw | TargetKind::Bandit => Color::LightRed,
            TargetKind::Bottle => Color::LightCyan,
            TargetKind::Poster => Color::Yellow,
            TargetKind::Sheriff => Color::LightGreen,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Horizontal travel direction of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    #[must_use]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }

    #[must_use]
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        if rng.bool() {
            Heading::Right
        } else {
            Heading::Left
        }
    }
}

/// A live target in the shooting range.
///
/// Times are measured on the session clock, which only runs while a session
/// is playing and unpaused.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub kind: TargetKind,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub points: i32,
    pub direction: Heading,
    pub is_hit: bool,
    pub created_at: Duration,
    pub hit_at: Option<Duration>,
}

impl Target {
    #[must_use]
    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.created_at)
    }

    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + TARGET_SIZE && y >= self.y && y < self.y + TARGET_SIZE
    }

    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + TARGET_SIZE / 2.0, self.y + TARGET_SIZE / 2.0)
    }
}

/// Partial description of a target. Unset fields get defaults on insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetSpec {
    pub kind: Option<TargetKind>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub speed: Option<f32>,
    pub points: Option<i32>,
    pub direction: Option<Heading>,
    pub created_at: Option<Duration>,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

// Particle system for muzzle flashes and hit sparks, in playfield pixels
#[derive(Component, Debug, Clone)]
pub struct Particle {
    pub position: Position,
    pub velocity: (f32, f32),
    pub color: Color,
    pub lifetime: f32,
    pub size: f32,
}

// Screen shake effect
#[derive(Debug, Clone, Resource, Default)]
pub struct ScreenShake {
    pub intensity: f32,
    pub duration: f32,
    pub current_offset: (i16, i16),
    pub is_active: bool,
}

/// Last known mouse position in terminal cells, used to draw the crosshair.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pointer {
    pub cell: Option<(u16, u16)>,
}
