#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::Resource;
use log::{debug, info};

use crate::game::{Difficulty, MIN_SHOTS_FOR_BEST_ACCURACY};
use crate::storage::{self, SharedStore, StoreKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Playing,
    Paused,
    Ended,
}

/// Any subset of the session fields a caller may overwrite in one go.
///
/// `score` is signed so a penalty can be expressed directly; it is clamped
/// at zero when applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    pub score: Option<i64>,
    pub combo: Option<u32>,
    pub shots_hit: Option<u32>,
    pub shots_fired: Option<u32>,
    pub time_remaining: Option<u32>,
    pub is_paused: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub new_high_score: bool,
    pub new_best_accuracy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock isn't running (idle, paused or already at zero).
    Stopped,
    Ticked(u32),
    Expired,
}

/// End-of-session rating derived from accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Performance {
    Legendary,
    SharpShooter,
    GoodAim,
    KeepPracticing,
    BetterLuck,
}

impl Performance {
    #[must_use]
    pub fn from_accuracy(accuracy: u32) -> Self {
        match accuracy {
            90.. => Performance::Legendary,
            75..=89 => Performance::SharpShooter,
            60..=74 => Performance::GoodAim,
            40..=59 => Performance::KeepPracticing,
            _ => Performance::BetterLuck,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Performance::Legendary => "Legendary Gunslinger!",
            Performance::SharpShooter => "Sharp Shooter!",
            Performance::GoodAim => "Good Aim, Partner",
            Performance::KeepPracticing => "Keep Practicing",
            Performance::BetterLuck => "Better Luck Next Time",
        }
    }
}

/// Score, counters and clock of one play session, plus the best-ever records.
///
/// `accuracy` is never written directly: it is recomputed from the shot
/// counters whenever they change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    score: u32,
    accuracy: u32,
    time_remaining: u32,
    combo: u32,
    difficulty: Difficulty,
    shots_hit: u32,
    shots_fired: u32,
    high_score: u32,
    best_accuracy: u32,
    phase: SessionPhase,
    new_high_score: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::with_records(0, 0)
    }
}

impl SessionState {
    #[must_use]
    pub fn with_records(high_score: u32, best_accuracy: u32) -> Self {
        let difficulty = Difficulty::default();
        Self {
            score: 0,
            accuracy: 100,
            time_remaining: difficulty.time_limit(),
            combo: 0,
            difficulty,
            shots_hit: 0,
            shots_fired: 0,
            high_score,
            best_accuracy: best_accuracy.min(100),
            phase: SessionPhase::Idle,
            new_high_score: false,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub fn combo(&self) -> u32 {
        self.combo
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn shots_hit(&self) -> u32 {
        self.shots_hit
    }

    #[must_use]
    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    #[must_use]
    pub fn misses(&self) -> u32 {
        self.shots_fired - self.shots_hit
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn best_accuracy(&self) -> u32 {
        self.best_accuracy
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, SessionPhase::Playing | SessionPhase::Paused)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    /// True once this session has beaten the previous high score.
    #[must_use]
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    #[must_use]
    pub fn performance(&self) -> Performance {
        Performance::from_accuracy(self.accuracy)
    }

    pub fn start(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.zero_counters();
        self.time_remaining = difficulty.time_limit();
        self.phase = SessionPhase::Playing;
        self.new_high_score = false;
    }

    /// Merges `update`, then re-derives accuracy and promotes the records.
    pub fn apply(&mut self, update: SessionUpdate) -> UpdateOutcome {
        if let Some(score) = update.score {
            self.score = u32::try_from(score.max(0)).unwrap_or(u32::MAX);
        }
        if let Some(combo) = update.combo {
            self.combo = combo;
        }
        if let Some(shots_fired) = update.shots_fired {
            self.shots_fired = shots_fired;
        }
        if let Some(shots_hit) = update.shots_hit {
            self.shots_hit = shots_hit;
        }
        // A hit is always also a shot
        self.shots_hit = self.shots_hit.min(self.shots_fired);

        if let Some(time_remaining) = update.time_remaining {
            self.time_remaining = time_remaining;
        }
        if let Some(paused) = update.is_paused {
            self.set_paused(paused);
        }

        self.accuracy = accuracy_percent(self.shots_hit, self.shots_fired);

        let mut outcome = UpdateOutcome::default();
        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_high_score = true;
            outcome.new_high_score = true;
        }
        if self.shots_fired >= MIN_SHOTS_FOR_BEST_ACCURACY && self.accuracy > self.best_accuracy {
            self.best_accuracy = self.accuracy;
            outcome.new_best_accuracy = true;
        }
        outcome
    }

    /// Points a hit on a target worth `points` is worth right now.
    #[must_use]
    pub fn award_for(&self, points: i32) -> i64 {
        i64::from(points) * i64::from(self.combo.max(1))
    }

    /// Update for a shot that hit a target worth `points`.
    #[must_use]
    pub fn hit_update(&self, points: i32) -> SessionUpdate {
        let rewarded = points > 0;
        SessionUpdate {
            score: Some(i64::from(self.score) + self.award_for(points)),
            combo: Some(if rewarded { self.combo + 1 } else { 0 }),
            shots_hit: Some(if rewarded {
                self.shots_hit + 1
            } else {
                self.shots_hit
            }),
            shots_fired: Some(self.shots_fired + 1),
            ..SessionUpdate::default()
        }
    }

    /// Update for a shot that hit nothing.
    #[must_use]
    pub fn miss_update(&self) -> SessionUpdate {
        SessionUpdate {
            combo: Some(0),
            shots_fired: Some(self.shots_fired + 1),
            ..SessionUpdate::default()
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != SessionPhase::Playing || self.time_remaining == 0 {
            return TickOutcome::Stopped;
        }
        self.time_remaining -= 1;
        if self.time_remaining == 0 {
            self.end();
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked(self.time_remaining)
        }
    }

    /// Flips pause while a session is running. Returns the new paused flag.
    pub fn pause_toggle(&mut self) -> bool {
        let paused = !self.is_paused();
        self.set_paused(paused);
        self.is_paused()
    }

    pub fn end(&mut self) {
        self.phase = SessionPhase::Ended;
        self.time_remaining = 0;
    }

    pub fn reset(&mut self) {
        self.zero_counters();
        self.time_remaining = self.difficulty.time_limit();
        self.phase = SessionPhase::Idle;
        self.new_high_score = false;
    }

    fn set_paused(&mut self, paused: bool) {
        self.phase = match (self.phase, paused) {
            (SessionPhase::Playing, true) => SessionPhase::Paused,
            (SessionPhase::Paused, false) => SessionPhase::Playing,
            (phase, _) => phase,
        };
    }

    fn zero_counters(&mut self) {
        self.score = 0;
        self.combo = 0;
        self.shots_hit = 0;
        self.shots_fired = 0;
        self.accuracy = 100;
    }
}

/// `round(100 * hit / fired)`, rounding halves up; 100 before the first shot.
#[must_use]
pub fn accuracy_percent(shots_hit: u32, shots_fired: u32) -> u32 {
    if shots_fired == 0 {
        return 100;
    }
    let hit = u64::from(shots_hit);
    let fired = u64::from(shots_fired);
    let rounded = (200 * hit + fired) / (2 * fired);
    u32::try_from(rounded).unwrap_or(100)
}

/// The session controller: session state plus persistence of its records.
#[derive(Resource)]
pub struct Session {
    state: SessionState,
    store: SharedStore,
}

impl Session {
    /// Builds an idle session, restoring the records from `store`.
    #[must_use]
    pub fn load(store: SharedStore) -> Self {
        let high_score = storage::load(store.as_ref(), StoreKey::HighScore).unwrap_or(0);
        let best_accuracy = storage::load(store.as_ref(), StoreKey::BestAccuracy).unwrap_or(0);
        debug!("Loaded records: high score {high_score}, best accuracy {best_accuracy}%");

        Self {
            state: SessionState::with_records(high_score, best_accuracy),
            store,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn start(&mut self, difficulty: Difficulty) {
        info!("Starting {difficulty} session");
        self.state.start(difficulty);
    }

    pub fn apply_update(&mut self, update: SessionUpdate) -> UpdateOutcome {
        let outcome = self.state.apply(update);
        if outcome.new_high_score {
            storage::save(self.store.as_ref(), StoreKey::HighScore, self.state.high_score());
        }
        if outcome.new_best_accuracy {
            storage::save(
                self.store.as_ref(),
                StoreKey::BestAccuracy,
                self.state.best_accuracy(),
            );
        }
        outcome
    }

    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.state.tick();
        if outcome == TickOutcome::Expired {
            self.log_summary();
        }
        outcome
    }

    pub fn pause_toggle(&mut self) -> bool {
        self.state.pause_toggle()
    }

    /// Ends a running session. Does nothing once the session is over.
    pub fn end(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.state.end();
        self.log_summary();
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    fn log_summary(&self) {
        info!(
            "Session over: score {}, accuracy {}%, {} of {} shots",
            self.state.score(),
            self.state.accuracy(),
            self.state.shots_hit(),
            self.state.shots_fired()
        );
    }
}
