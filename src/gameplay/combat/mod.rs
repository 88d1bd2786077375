//! Combat resolution: melee sweeps, arrows, arcing bombs and their damage.
//!
//! Every projectile carries a [`Projectile`] whose `active` flag makes its
//! resolution happen exactly once, no matter how many collisions, expiries
//! or fuse ticks land on it within the same step.

pub mod arrow;
pub mod bomb;
mod hits;
pub mod melee;

use bevy::prelude::*;

pub use arrow::{ArrowTuning, DirectFlight, spawn_arrow};
pub use bomb::{ArcFlight, BombTuning, spawn_bomb};
pub use melee::strike_area;

use crate::GameSet;

// === Constants ===

/// Collider radius of arrows and bombs.
pub const PROJECTILE_RADIUS: f32 = 0.15;

// === Components ===

/// A shot or thrown charge in flight.
/// The owner is never damaged by its own projectile.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    pub owner: Entity,
    damage: u32,
    active: bool,
}

impl Projectile {
    #[must_use]
    pub const fn new(owner: Entity, damage: u32) -> Self {
        Self {
            owner,
            damage,
            active: true,
        }
    }

    /// Payload damage.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.damage
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Claims the single resolution. Returns false if already resolved.
    pub(crate) const fn resolve(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }
}

// === Events ===

/// A projectile struck something. `muted` is set for obstacle impacts,
/// which presentation plays without the flesh-hit sound.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct ProjectileHit {
    pub entity: Entity,
    pub struck: Entity,
    pub muted: bool,
}

/// A projectile left the simulation (hit, expiry or detonation).
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct ProjectileDestroyed {
    pub entity: Entity,
}

/// A bomb burst at `position`.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct Detonated {
    pub entity: Entity,
    pub position: Vec2,
    pub radius: f32,
}

/// Resolves a projectile for good: notifies and despawns.
fn destroy_projectile(commands: &mut Commands, entity: Entity) {
    commands.trigger(ProjectileDestroyed { entity });
    commands.entity(entity).despawn();
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Projectile>()
        .register_type::<DirectFlight>()
        .register_type::<ArcFlight>();

    app.add_systems(
        FixedUpdate,
        (
            arrow::move_arrows,
            bomb::advance_bombs,
            hits::handle_projectile_hits,
        )
            .chain()
            .in_set(GameSet::Combat),
    );
}
