//! Agents: non-player combatants driven by one [`AgentBrain`] each.
//!
//! Three archetypes (melee chaser, kiting archer, bomber) share the same
//! state machine and differ only in their [`AgentProfile`].

pub mod brain;
pub mod profile;
mod systems;

use avian2d::prelude::*;
use bevy::prelude::*;

pub use brain::{AgentBrain, AgentState, AttackOrder, Facing, TargetView, TickInput};
pub use profile::{AgentProfile, Archetype, AttackPayload};

use super::navigation::Navigator;
use super::navigation::pathfinding::NavPath;
use super::{CurrentTarget, Health, Target, Team};
use crate::third_party::CollisionLayer;
use crate::{GameSet, Z_AGENT};

// === Constants ===

/// Body radius of an agent.
pub const AGENT_RADIUS: f32 = 0.4;

/// Seconds a dead agent lingers before it is removed.
pub const CORPSE_GRACE_SECS: f32 = 2.0;

// === Components ===

/// Marker for agent entities.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Agent;

/// Countdown to removing a dead agent, leaving time for its death animation.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Corpse(pub Timer);

impl Default for Corpse {
    fn default() -> Self {
        Self(Timer::from_seconds(CORPSE_GRACE_SECS, TimerMode::Once))
    }
}

// === Events ===

/// An agent's cooldown allowed an attack. Raised before any damage it causes.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct AgentAttacked {
    pub entity: Entity,
    pub target_position: Vec2,
}

/// A living agent took damage.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct AgentHurt {
    pub entity: Entity,
    pub amount: u32,
}

/// An agent entered its terminal `Dead` state.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct AgentDied {
    pub entity: Entity,
}

/// Spawn an agent entity with all required components.
/// Single source of truth for the agent archetype.
pub fn spawn_agent(
    commands: &mut Commands,
    archetype: Archetype,
    team: Team,
    position: Vec2,
) -> Entity {
    let profile = archetype.profile();
    commands
        .spawn((
            Name::new(format!("{team:?} {}", archetype.display_name())),
            Agent,
            archetype,
            profile,
            AgentBrain::new(AgentState::Roaming, position),
            team,
            Target,
            CurrentTarget::default(),
            Health::new(profile.max_health),
            Navigator::new(profile.move_speed),
            NavPath::default(),
            Transform::from_xyz(position.x, position.y, Z_AGENT),
        ))
        .insert((
            RigidBody::Dynamic,
            Collider::circle(AGENT_RADIUS),
            CollisionLayer::combatant(),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::ZERO,
        ))
        .id()
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Agent>()
        .register_type::<Archetype>()
        .register_type::<AgentProfile>()
        .register_type::<AgentBrain>()
        .register_type::<Corpse>();

    app.add_observer(systems::on_agent_damaged)
        .add_observer(systems::on_agent_died);

    app.add_systems(
        FixedUpdate,
        (
            (systems::warn_missing_navigator, systems::drive_agents)
                .chain()
                .in_set(GameSet::Ai),
            systems::update_facing.in_set(GameSet::Facing),
            systems::despawn_corpses.in_set(GameSet::Death),
        ),
    );
}
