use bevy_ecs::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use crate::app::App;
use crate::components::{Pointer, ScreenShake, Target, TargetKind, TargetSpec};
use crate::config::GameConfig;
use crate::game::{Playfield, TargetTiming};
use crate::session::Session;
use crate::settings::SettingsStore;
use crate::sound::AudioState;
use crate::storage::{KeyValueStore, MemoryStore, SharedStore, StorageError};
use crate::store::TargetStore;
use crate::systems::GameEvents;

#[must_use]
pub fn memory_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

/// Creates a test world with every gameplay resource initialized
#[must_use]
pub fn create_test_world() -> World {
    create_test_world_with(memory_store())
}

#[must_use]
pub fn create_test_world_with(store: SharedStore) -> World {
    let mut world = World::new();
    let playfield = Playfield::default();

    world.insert_resource(playfield);
    world.insert_resource(TargetTiming::default());
    world.insert_resource(TargetStore::with_rng(playfield, fastrand::Rng::with_seed(7)));
    world.insert_resource(Session::load(store.clone()));
    world.insert_resource(SettingsStore::load(store));
    world.insert_resource(GameEvents::default());
    world.insert_resource(ScreenShake::default());
    world.insert_resource(Pointer::default());

    world
}

#[must_use]
pub fn create_test_app() -> App {
    App::new(&GameConfig::default(), memory_store(), AudioState::silent())
}

/// A slow right-heading target at a fixed spot.
#[must_use]
pub fn target_at(kind: TargetKind, x: f32, y: f32, points: i32) -> TargetSpec {
    TargetSpec {
        kind: Some(kind),
        x: Some(x),
        y: Some(y),
        speed: Some(1.0),
        points: Some(points),
        direction: Some(crate::components::Heading::Right),
        created_at: None,
    }
}

/// Puts a target straight into the world's store.
pub fn place_target(world: &mut World, spec: TargetSpec, now: Duration) -> Target {
    world.resource_mut::<TargetStore>().create(spec, now)
}

/// A backend whose every operation fails.
pub struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Poisoned)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Poisoned)
    }
}
