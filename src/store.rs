#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::Resource;
use log::trace;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::components::{Heading, Target, TargetId, TargetKind, TargetSpec};
use crate::game::Playfield;

// Fallbacks for fields a `TargetSpec` leaves unset
const DEFAULT_KIND: TargetKind = TargetKind::Outlaw;
const DEFAULT_SPEED: f32 = 1.0;
const DEFAULT_POINTS: i32 = 100;

/// Owns every target currently in the shooting range.
///
/// Ids are handed out from a monotonic counter and never reused, so a stale
/// id from an earlier session can only ever miss.
#[derive(Resource, Debug, Clone)]
pub struct TargetStore {
    targets: BTreeMap<TargetId, Target>,
    next_id: u64,
    bounds: Playfield,
    rng: fastrand::Rng,
}

impl Default for TargetStore {
    fn default() -> Self {
        Self::new(Playfield::default())
    }
}

impl TargetStore {
    #[must_use]
    pub fn new(bounds: Playfield) -> Self {
        Self::with_rng(bounds, fastrand::Rng::new())
    }

    #[must_use]
    pub fn with_rng(bounds: Playfield, rng: fastrand::Rng) -> Self {
        Self {
            targets: BTreeMap::new(),
            next_id: 1,
            bounds,
            rng,
        }
    }

    /// Snapshot of all targets, ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<Target> {
        self.targets.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    #[must_use]
    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Inserts a target built from `spec` and returns the stored copy.
    ///
    /// Missing position fields are drawn uniformly from the visible area and a
    /// missing direction is picked at random.
    pub fn create(&mut self, spec: TargetSpec, now: Duration) -> Target {
        let id = TargetId(self.next_id);
        self.next_id += 1;

        let x = spec
            .x
            .unwrap_or_else(|| self.rng.f32() * self.bounds.width);
        let y = spec
            .y
            .unwrap_or_else(|| self.rng.f32() * self.bounds.height);
        let direction = match spec.direction {
            Some(direction) => direction,
            None => Heading::random(&mut self.rng),
        };

        let target = Target {
            id,
            kind: spec.kind.unwrap_or(DEFAULT_KIND),
            x,
            y,
            speed: spec.speed.unwrap_or(DEFAULT_SPEED),
            points: spec.points.unwrap_or(DEFAULT_POINTS),
            direction,
            is_hit: false,
            created_at: spec.created_at.unwrap_or(now),
            hit_at: None,
        };

        trace!("Created target {id} ({}) at ({x:.0}, {y:.0})", target.kind);
        self.targets.insert(id, target.clone());
        target
    }

    pub fn update_position(&mut self, id: TargetId, x: f32) -> Option<Target> {
        let target = self.targets.get_mut(&id)?;
        target.x = x;
        Some(target.clone())
    }

    /// Flags a target as hit. Returns `None` if the target is gone or was
    /// already hit, so a target can only ever be scored once.
    pub fn mark_hit(&mut self, id: TargetId, now: Duration) -> Option<Target> {
        let target = self.targets.get_mut(&id)?;
        if target.is_hit {
            return None;
        }
        target.is_hit = true;
        target.hit_at = Some(now);
        Some(target.clone())
    }

    pub fn remove(&mut self, id: TargetId) -> bool {
        self.targets.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        if !self.targets.is_empty() {
            trace!("Clearing {} targets", self.targets.len());
        }
        self.targets.clear();
    }

    /// Batch update: keeps only the targets for which `keep` returns true.
    /// `keep` may mutate the target in place. Returns the removed ids.
    pub fn retain<F>(&mut self, mut keep: F) -> Vec<TargetId>
    where
        F: FnMut(&mut Target) -> bool,
    {
        let mut removed = Vec::new();
        self.targets.retain(|id, target| {
            let kept = keep(target);
            if !kept {
                removed.push(*id);
            }
            kept
        });
        removed
    }

    /// The live target under a point, preferring the most recently spawned
    /// one when targets overlap.
    #[must_use]
    pub fn target_at(&self, x: f32, y: f32) -> Option<TargetId> {
        self.targets
            .values()
            .rev()
            .find(|target| !target.is_hit && target.contains(x, y))
            .map(|target| target.id)
    }
}
