#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::Resource;
use std::time::Duration;

use crate::game::{COUNTDOWN_INTERVAL, Difficulty};

/// A fixed-interval timer driven by an external clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeating {
    interval: Duration,
    next_due: Duration,
}

impl Repeating {
    /// The first firing is one full interval after `now`.
    #[must_use]
    pub fn new(interval: Duration, now: Duration) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    /// Number of times the timer fired up to `now`. Firings missed by a long
    /// frame are caught up rather than dropped.
    pub fn fire_count(&mut self, now: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        let mut fired = 0;
        while self.next_due <= now {
            self.next_due += self.interval;
            fired += 1;
        }
        fired
    }
}

/// The running session's clocks and timers.
///
/// Present in the world exactly while a session is playing; removing it
/// cancels spawning, animation and the countdown in one step. `clock` drives
/// spawning and animation and keeps running through a pause;
/// `countdown_clock` stops while paused.
#[derive(Resource, Debug, Clone)]
pub struct SessionTimers {
    pub clock: Duration,
    pub countdown_clock: Duration,
    pub spawn: Repeating,
    pub countdown: Repeating,
    pub frames: u64,
}

impl SessionTimers {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        let clock = Duration::ZERO;
        Self {
            clock,
            countdown_clock: clock,
            spawn: Repeating::new(difficulty.spawn_interval(), clock),
            countdown: Repeating::new(COUNTDOWN_INTERVAL, clock),
            frames: 0,
        }
    }

    pub fn advance(&mut self, delta: Duration) -> Duration {
        self.clock += delta;
        self.frames += 1;
        self.clock
    }

    pub fn advance_countdown(&mut self, delta: Duration) -> Duration {
        self.countdown_clock += delta;
        self.countdown_clock
    }
}
