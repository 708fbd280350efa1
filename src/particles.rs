#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow defining constants after statements in functions as it's clearer to define them near where they're used
    clippy::items_after_statements
)]

use bevy_ecs::prelude::*;
use log::trace;
use ratatui::style::Color;

use crate::components::{Particle, Position, TargetKind};
use crate::screenshake;

// Particle motion, in playfield pixels per second
const GRAVITY: f32 = 600.0;
const FRICTION: f32 = 0.92;

/// Short bright flash where a shot landed.
pub fn spawn_muzzle_flash(world: &mut World, x: f32, y: f32) {
    const FLASH_PARTICLES: usize = 6;

    for _ in 0..FLASH_PARTICLES {
        let vx = (fastrand::f32() - 0.5) * 240.0;
        let vy = (fastrand::f32() - 0.5) * 240.0;
        let color = if fastrand::bool() {
            Color::LightYellow
        } else {
            Color::White
        };

        spawn_particle(
            world,
            Position { x, y },
            (vx, vy),
            color,
            fastrand::f32() * 0.1 + 0.08, // lifetime: 0.08 to 0.18 seconds
            fastrand::f32() * 0.4 + 0.6,
        );
    }
}

/// Sparks flying off a target that was hit. Bigger awards throw more sparks
/// and shake the screen harder.
pub fn spawn_hit_sparks(world: &mut World, center: (f32, f32), kind: TargetKind, award: i64) {
    let particles = 10 + usize::try_from(award / 50).unwrap_or(0).min(20);
    trace!("Spawning {particles} hit sparks for {kind}");

    for _ in 0..particles {
        // Burst outwards with an upward bias
        let vx = (fastrand::f32() - 0.5) * 500.0;
        let vy = (fastrand::f32() - 0.7) * 500.0;
        let color = if fastrand::u8(0..3) == 0 {
            Color::Yellow
        } else {
            kind.get_color()
        };

        spawn_particle(
            world,
            Position {
                x: center.0,
                y: center.1,
            },
            (vx, vy),
            color,
            fastrand::f32() * 0.5 + 0.3, // lifetime: 0.3 to 0.8 seconds
            fastrand::f32() * 0.8 + 0.2,
        );
    }

    #[allow(clippy::cast_precision_loss)]
    let intensity = 0.8 + (award as f32 / 200.0).min(2.0);
    screenshake::trigger_screen_shake(world, intensity, 0.25);
}

/// Grey smoke puff for shooting the sheriff.
pub fn spawn_sheriff_smoke(world: &mut World, center: (f32, f32)) {
    const SMOKE_PARTICLES: usize = 14;

    for _ in 0..SMOKE_PARTICLES {
        let vx = (fastrand::f32() - 0.5) * 150.0;
        let vy = -fastrand::f32() * 200.0;

        spawn_particle(
            world,
            Position {
                x: center.0,
                y: center.1,
            },
            (vx, vy),
            Color::DarkGray,
            fastrand::f32() * 0.6 + 0.4,
            fastrand::f32() * 0.8 + 0.4,
        );
    }
}

/// A few dust specks kicked up by a missed shot.
pub fn spawn_ricochet_dust(world: &mut World, x: f32, y: f32) {
    const DUST_PARTICLES: usize = 4;

    for _ in 0..DUST_PARTICLES {
        let vx = (fastrand::f32() - 0.5) * 180.0;
        let vy = -fastrand::f32() * 180.0;

        spawn_particle(
            world,
            Position { x, y },
            (vx, vy),
            Color::Rgb(194, 154, 108),
            fastrand::f32() * 0.3 + 0.2,
            fastrand::f32() * 0.5 + 0.2,
        );
    }
}

pub fn update_particles(world: &mut World, delta_seconds: f32) {
    // First update all particle lifetimes and collect entities to despawn
    let mut entities_to_despawn = Vec::new();

    for (entity, mut particle) in world.query::<(Entity, &mut Particle)>().iter_mut(world) {
        particle.lifetime -= delta_seconds;

        if particle.lifetime <= 0.0 {
            entities_to_despawn.push(entity);
            continue;
        }

        particle.position.x += particle.velocity.0 * delta_seconds;
        particle.position.y += particle.velocity.1 * delta_seconds;

        particle.velocity.0 *= FRICTION;
        particle.velocity.1 = particle.velocity.1 * FRICTION + GRAVITY * delta_seconds;

        // Shrink towards the end of the particle's life
        if particle.lifetime < 0.2 {
            particle.size *= 0.9;
        }
    }

    for entity in entities_to_despawn {
        world.despawn(entity);
    }

    screenshake::update_screen_shake(world, delta_seconds);
}

/// Removes every particle, e.g. when leaving the playfield.
pub fn clear_particles(world: &mut World) {
    let particles: Vec<Entity> = world
        .query_filtered::<Entity, With<Particle>>()
        .iter(world)
        .collect();

    for entity in particles {
        world.despawn(entity);
    }
}

fn spawn_particle(
    world: &mut World,
    position: Position,
    velocity: (f32, f32),
    color: Color,
    lifetime: f32,
    size: f32,
) {
    world.spawn(Particle {
        position,
        velocity,
        color,
        lifetime,
        size,
    });
}
