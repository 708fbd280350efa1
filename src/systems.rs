#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info, trace};
use std::time::Duration;

use crate::components::{TargetId, TargetKind};
use crate::game::{Difficulty, FRAME_SCALE, Playfield, REFERENCE_FRAME, TargetTiming, URGENT_TIME};
use crate::generator;
use crate::session::{Session, SessionPhase, TickOutcome};
use crate::store::TargetStore;
use crate::timers::SessionTimers;

/// Something the presentation layer may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted(Difficulty),
    TargetSpawned {
        id: TargetId,
        kind: TargetKind,
    },
    TargetHit {
        id: TargetId,
        kind: TargetKind,
        award: i64,
        combo: u32,
        center: (f32, f32),
    },
    SheriffShot {
        id: TargetId,
        penalty: i64,
        center: (f32, f32),
    },
    Miss {
        x: f32,
        y: f32,
    },
    CountdownWarning(u32),
    PauseChanged(bool),
    SessionEnded {
        score: u32,
        new_high_score: bool,
    },
}

/// Queue of events produced since the presentation layer last drained it.
#[derive(Resource, Debug, Default)]
pub struct GameEvents {
    queue: Vec<GameEvent>,
}

impl GameEvents {
    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.queue)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

fn emit(world: &mut World, event: GameEvent) {
    if let Some(mut events) = world.get_resource_mut::<GameEvents>() {
        events.push(event);
    }
}

/// Result of a click on the playfield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    Hit {
        id: TargetId,
        kind: TargetKind,
        award: i64,
    },
    Miss,
    /// No session is running, or it is paused.
    Ignored,
}

/// Starts a fresh session, tearing down whatever was running first.
pub fn start_session(world: &mut World, difficulty: Difficulty) {
    stop_session(world);
    world.resource_mut::<Session>().start(difficulty);
    world.insert_resource(SessionTimers::new(difficulty));
    emit(world, GameEvent::SessionStarted(difficulty));
}

/// Cancels the spawn, animation and countdown timers and empties the range.
pub fn stop_session(world: &mut World) {
    if world.remove_resource::<SessionTimers>().is_some() {
        debug!("Session timers cancelled");
    }
    if let Some(mut store) = world.get_resource_mut::<TargetStore>() {
        store.clear();
    }
}

pub fn end_session(world: &mut World) {
    world.resource_mut::<Session>().end();
    stop_session(world);

    let event = {
        let state = world.resource::<Session>().state();
        GameEvent::SessionEnded {
            score: state.score(),
            new_high_score: state.is_new_high_score(),
        }
    };
    emit(world, event);
}

/// Abandons the current session and goes back to idle.
pub fn quit_to_menu(world: &mut World) {
    stop_session(world);
    world.resource_mut::<Session>().reset();
    info!("Returned to menu");
}

/// Returns the new paused flag; false when nothing is running.
pub fn toggle_pause(world: &mut World) -> bool {
    if !world.resource::<Session>().state().is_playing() {
        return false;
    }
    let paused = world.resource_mut::<Session>().pause_toggle();
    debug!("Paused: {paused}");
    emit(world, GameEvent::PauseChanged(paused));
    paused
}

/// How far a speed-1 target moves during `delta`, in pixels.
#[must_use]
pub fn frame_scale(delta: Duration) -> f32 {
    FRAME_SCALE * delta.as_secs_f32() / REFERENCE_FRAME.as_secs_f32()
}

/// One frame of the game loop: spawns, moves and evicts targets, then runs
/// the countdown. A pause only holds the countdown.
pub fn game_tick_system(world: &mut World, delta: Duration) {
    let (playing, paused) = {
        let state = world.resource::<Session>().state();
        (state.is_playing(), state.is_paused())
    };

    if !playing {
        if world.contains_resource::<SessionTimers>() {
            stop_session(world);
        }
        return;
    }

    let Some(now) = world.get_resource_mut::<SessionTimers>().map(|mut timers| {
        if !paused {
            timers.advance_countdown(delta);
        }
        timers.advance(delta)
    }) else {
        return;
    };

    spawn_system(world, now);
    advance_targets(world, frame_scale(delta), now);
    if !paused {
        countdown_system(world);
    }
}

pub fn spawn_system(world: &mut World, now: Duration) {
    let due = match world.get_resource_mut::<SessionTimers>() {
        Some(mut timers) => timers.spawn.fire_count(now),
        None => return,
    };
    if due == 0 {
        return;
    }

    let difficulty = world.resource::<Session>().state().difficulty();
    let bounds = *world.resource::<Playfield>();
    for _ in 0..due {
        let spec = generator::generate(difficulty, &bounds, now);
        let target = world.resource_mut::<TargetStore>().create(spec, now);
        emit(
            world,
            GameEvent::TargetSpawned {
                id: target.id,
                kind: target.kind,
            },
        );
    }
}

/// Moves every live target by `scale` pixels per speed unit and drops the
/// ones that left the range, grew too old, or finished their hit grace.
pub fn advance_targets(world: &mut World, scale: f32, now: Duration) {
    let bounds = *world.resource::<Playfield>();
    let timing = *world.resource::<TargetTiming>();

    let removed = world.resource_mut::<TargetStore>().retain(|target| {
        if let Some(hit_at) = target.hit_at {
            return now.saturating_sub(hit_at) < timing.hit_grace;
        }
        target.x += target.direction.sign() * target.speed * scale;
        !bounds.is_offscreen(target.x) && target.age(now) <= timing.max_age
    });

    if !removed.is_empty() {
        trace!("Evicted {} targets", removed.len());
    }
}

pub fn countdown_system(world: &mut World) {
    let due = match world.get_resource_mut::<SessionTimers>() {
        Some(mut timers) => {
            let now = timers.countdown_clock;
            timers.countdown.fire_count(now)
        }
        None => return,
    };

    for _ in 0..due {
        let outcome = world.resource_mut::<Session>().tick();
        match outcome {
            TickOutcome::Ticked(remaining) => {
                if remaining <= URGENT_TIME {
                    emit(world, GameEvent::CountdownWarning(remaining));
                }
            }
            TickOutcome::Expired => {
                end_session(world);
                return;
            }
            TickOutcome::Stopped => return,
        }
    }
}

/// Resolves a click at playfield point (`x`, `y`) into a hit or a miss and
/// records it in the session.
pub fn resolve_shot(world: &mut World, x: f32, y: f32) -> ShotOutcome {
    let Some(now) = world.get_resource::<SessionTimers>().map(|timers| timers.clock) else {
        return ShotOutcome::Ignored;
    };
    if world.resource::<Session>().state().phase() != SessionPhase::Playing {
        return ShotOutcome::Ignored;
    }

    let hit = {
        let mut store = world.resource_mut::<TargetStore>();
        let under_cursor = store.target_at(x, y);
        under_cursor.and_then(|id| store.mark_hit(id, now))
    };

    let Some(target) = hit else {
        {
            let mut session = world.resource_mut::<Session>();
            let update = session.state().miss_update();
            session.apply_update(update);
        }
        trace!("Miss at ({x:.0}, {y:.0})");
        emit(world, GameEvent::Miss { x, y });
        return ShotOutcome::Miss;
    };

    let (award, combo) = {
        let mut session = world.resource_mut::<Session>();
        let award = session.state().award_for(target.points);
        let update = session.state().hit_update(target.points);
        session.apply_update(update);
        (award, session.state().combo())
    };
    debug!("Hit {} {} for {award}", target.kind, target.id);

    let event = if target.points > 0 {
        GameEvent::TargetHit {
            id: target.id,
            kind: target.kind,
            award,
            combo,
            center: target.center(),
        }
    } else {
        GameEvent::SheriffShot {
            id: target.id,
            penalty: award,
            center: target.center(),
        }
    };
    emit(world, event);

    ShotOutcome::Hit {
        id: target.id,
        kind: target.kind,
        award,
    }
}
