//! Testing utilities for Bevy systems.

#![cfg(test)]

use std::time::Duration;

use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::gameplay::{Health, Target, Team};

/// Creates a minimal app for testing with essential plugins.
pub fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app
}

/// Creates a minimal app whose clock advances by exactly `dt` per update.
/// The first update (run here) only initializes time: `elapsed == 0`.
pub fn create_stepped_app(dt: Duration) -> App {
    let mut app = create_test_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(dt));
    app.update();
    app
}

/// Helper to advance the app by multiple frames.
pub fn tick_multiple(app: &mut App, count: usize) {
    for _ in 0..count {
        app.update();
    }
}

/// Asserts how many entities match the query filter `F`.
pub fn assert_entity_count<F: QueryFilter>(app: &mut App, expected: usize) {
    let world = app.world_mut();
    let count = world.query_filtered::<Entity, F>().iter(world).count();
    assert_eq!(count, expected, "unexpected entity count");
}

// === Event capture ===

/// Names of observed events, in trigger order.
#[derive(Resource, Debug, Default)]
pub struct EventLog(pub Vec<&'static str>);

impl EventLog {
    pub fn names(&self) -> Vec<&'static str> {
        self.0.clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.0.iter().filter(|n| **n == name).count()
    }
}

/// Adds a global observer that appends `name` to [`EventLog`] whenever `E` fires.
pub fn record<E: Event>(app: &mut App, name: &'static str) {
    app.init_resource::<EventLog>();
    app.add_observer(move |_event: On<E>, mut log: ResMut<EventLog>| {
        log.0.push(name);
    });
}

// === Spawn helpers ===

/// Spawns a targetable combatant with `Health` at `position`.
pub fn spawn_test_combatant(world: &mut World, team: Team, position: Vec2, hp: u32) -> Entity {
    world
        .spawn((
            team,
            Target,
            Health::new(hp),
            Transform::from_translation(position.extend(0.0)),
            GlobalTransform::from(Transform::from_translation(position.extend(0.0))),
        ))
        .id()
}

/// Moves an entity, keeping `Transform` and `GlobalTransform` in sync
/// (no transform propagation runs under `MinimalPlugins`).
pub fn place(world: &mut World, entity: Entity, position: Vec2) {
    let transform = Transform::from_translation(position.extend(0.0));
    if let Some(mut t) = world.get_mut::<Transform>(entity) {
        *t = transform;
    }
    if let Some(mut g) = world.get_mut::<GlobalTransform>(entity) {
        *g = GlobalTransform::from(transform);
    }
}
