//! Per-agent combat AI and ballistics simulation.
//!
//! Melee chasers, kiting archers and arc-throwing bombers share one state
//! machine ([`gameplay::agent`]) and spawn projectiles resolved by
//! [`gameplay::combat`]. Everything advances once per `FixedUpdate` step.

#[cfg(feature = "dev")]
mod dev_tools;
pub mod gameplay;
#[cfg(test)]
pub mod testing;
pub mod third_party;

use bevy::prelude::*;

/// Z layer for agents and the player.
pub const Z_AGENT: f32 = 10.0;

/// Z layer for projectiles (drawn above agents).
pub const Z_PROJECTILE: f32 = 11.0;

/// Ordered phases of one simulation step.
///
/// Every agent decides before anything moves, and projectiles resolve after
/// movement so a hit lands on the positions of the same step.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Resolve each agent's current target.
    Targeting,
    /// State evaluation, movement requests and attack dispatch.
    Ai,
    /// Facing re-evaluation on its own cadence.
    Facing,
    /// Path computation and steering.
    Movement,
    /// Projectile flight and resolution.
    Combat,
    /// Corpse cleanup.
    Death,
}

/// Registers the whole simulation: physics, navigation, agents and projectiles.
pub fn plugin(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            GameSet::Targeting,
            GameSet::Ai,
            GameSet::Facing,
            GameSet::Movement,
            GameSet::Combat,
            GameSet::Death,
        )
            .chain(),
    );

    app.add_plugins((third_party::plugin, gameplay::plugin));

    #[cfg(feature = "dev")]
    app.add_plugins(dev_tools::plugin);
}
