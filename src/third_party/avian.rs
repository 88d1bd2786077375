//! Avian2d physics configuration for top-down combat.

use avian2d::prelude::*;
use bevy::prelude::*;

// === Collision Layers ===

/// Physics collision layers for the hitbox/hurtbox system.
///
/// - **Pushbox**: Physical presence. Bodies push and block each other.
/// - **Hitbox**: Attack collider (arrows and bombs).
/// - **Hurtbox**: Damageable surface (agents and the player).
/// - **Obstacle**: Static scenery that stops arrows and paths.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum CollisionLayer {
    /// Physical body. All solid entities are pushboxes.
    #[default]
    Pushbox,
    /// Attack collider on projectiles.
    Hitbox,
    /// Damageable surface on anything with `Health`.
    Hurtbox,
    /// Walls, rocks, buildings.
    Obstacle,
}

impl CollisionLayer {
    /// Layers for a damageable body (agent or player).
    #[must_use]
    pub fn combatant() -> CollisionLayers {
        CollisionLayers::new(
            [Self::Pushbox, Self::Hurtbox],
            [Self::Pushbox, Self::Hitbox, Self::Obstacle],
        )
    }

    /// Layers for a projectile sensor: hits hurtboxes and obstacles only.
    #[must_use]
    pub fn projectile() -> CollisionLayers {
        CollisionLayers::new(Self::Hitbox, [Self::Hurtbox, Self::Obstacle])
    }

    /// Layers for static scenery.
    #[must_use]
    pub fn obstacle() -> CollisionLayers {
        CollisionLayers::new(
            [Self::Pushbox, Self::Obstacle],
            [Self::Pushbox, Self::Hitbox],
        )
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity::ZERO);
}
