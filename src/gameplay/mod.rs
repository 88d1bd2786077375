//! Gameplay domain: health, agents, navigation, combat and targeting.

pub mod agent;
pub mod combat;
pub mod health;
pub mod navigation;
pub mod targeting;

use bevy::prelude::*;

pub use health::Health;

// === Shared Components ===

/// Which side an entity fights for.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    /// The team this team fights against.
    #[must_use]
    pub const fn opposing(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// Marker: this entity can be chosen as a `CurrentTarget` by the opposing team.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Target;

/// The entity an agent evaluates distance and attacks against.
/// `None` when nothing is targetable.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct CurrentTarget(pub Option<Entity>);

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Team>()
        .register_type::<Target>()
        .register_type::<CurrentTarget>();

    app.add_plugins((
        health::plugin,
        targeting::plugin,
        navigation::plugin,
        agent::plugin,
        combat::plugin,
    ));
}
