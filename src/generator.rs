#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

use crate::components::{Heading, TargetSpec};
use crate::game::{Difficulty, Playfield};

/// Picks a target for `difficulty` and places it just outside one edge of
/// the playfield, heading across it.
#[must_use]
pub fn generate(difficulty: Difficulty, bounds: &Playfield, now: Duration) -> TargetSpec {
    generate_with(&mut fastrand::Rng::new(), difficulty, bounds, now)
}

#[must_use]
pub fn generate_with(
    rng: &mut fastrand::Rng,
    difficulty: Difficulty,
    bounds: &Playfield,
    now: Duration,
) -> TargetSpec {
    let table = difficulty.archetypes();
    let template = table[rng.usize(..table.len())];

    let (x, direction) = if rng.bool() {
        (bounds.left_edge(), Heading::Right)
    } else {
        (bounds.right_edge(), Heading::Left)
    };
    let y = bounds.spawn_top + rng.f32() * bounds.spawn_height;

    TargetSpec {
        kind: Some(template.kind),
        x: Some(x),
        y: Some(y),
        speed: Some(template.speed),
        points: Some(template.points),
        direction: Some(direction),
        created_at: Some(now),
    }
}
