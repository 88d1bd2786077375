//! Movement service: "walk me toward this point, avoiding obstacles".
//!
//! The agent state machine only talks to [`MovementService`]. [`Navigator`] is
//! the in-engine implementation: destinations become navmesh waypoints in
//! [`pathfinding`] and waypoints become velocities in [`steering`].

pub mod pathfinding;
pub mod steering;

use bevy::prelude::*;

use crate::GameSet;

/// Contract the state machine needs from whatever moves an agent's body.
pub trait MovementService {
    /// Walk toward `point`, replacing any previous destination.
    fn set_destination(&mut self, point: Vec2);
    /// Cancel the current destination and stop.
    fn reset_path(&mut self);
    /// Whether the body is currently in motion.
    fn is_moving(&self) -> bool;
    /// Change travel speed (world units per second).
    fn set_speed(&mut self, speed: f32);
    /// Stop permanently. Later requests are ignored.
    fn disable(&mut self) {
        self.reset_path();
    }
}

/// Stand-in for an agent without a navigator: every request is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMovement;

impl MovementService for NullMovement {
    fn set_destination(&mut self, _point: Vec2) {}
    fn reset_path(&mut self) {}
    fn is_moving(&self) -> bool {
        false
    }
    fn set_speed(&mut self, _speed: f32) {}
}

// === Components ===

/// Per-agent movement request and speed. Read by `compute_paths` and `steer_agents`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Navigator {
    destination: Option<Vec2>,
    speed: f32,
    base_speed: f32,
    enabled: bool,
    moving: bool,
}

impl Navigator {
    /// A navigator walking at `base_speed`, with no destination.
    #[must_use]
    pub const fn new(base_speed: f32) -> Self {
        Self {
            destination: None,
            speed: base_speed,
            base_speed,
            enabled: true,
            moving: false,
        }
    }

    #[must_use]
    pub const fn destination(&self) -> Option<Vec2> {
        self.destination
    }

    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current speed over base (roaming) speed, for animation blending.
    #[must_use]
    pub fn speed_ratio(&self) -> f32 {
        if self.base_speed > 0.0 {
            self.speed / self.base_speed
        } else {
            1.0
        }
    }

    /// Destination reached: keep the speed, drop the request.
    pub(crate) const fn arrive(&mut self) {
        self.destination = None;
    }

    pub(crate) const fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
    }
}

impl MovementService for Navigator {
    fn set_destination(&mut self, point: Vec2) {
        if self.enabled {
            self.destination = Some(point);
        }
    }

    fn reset_path(&mut self) {
        self.destination = None;
    }

    fn is_moving(&self) -> bool {
        self.moving
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    fn disable(&mut self) {
        self.destination = None;
        self.enabled = false;
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Navigator>()
        .register_type::<pathfinding::NavPath>()
        .register_type::<pathfinding::PathRefreshTimer>()
        .init_resource::<pathfinding::PathRefreshTimer>();

    app.add_systems(
        FixedUpdate,
        (pathfinding::compute_paths, steering::steer_agents)
            .chain()
            .in_set(GameSet::Movement),
    );
}
