//! Per-archetype configuration: thresholds, speeds, cooldowns and attack payloads.

use bevy::prelude::*;

use super::AgentState;
use crate::gameplay::combat::{ArrowTuning, BombTuning};

/// Distance a retreating agent steps away from its target each tick.
pub const RETREAT_STEP: f32 = 3.0;

/// The three agent configurations.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum Archetype {
    /// Closes to contact and swings at everything nearby.
    Melee,
    /// Holds a stand-off distance and shoots arrows, backing off when crowded.
    Ranged,
    /// Lobs fused charges that burst on landing.
    Bomber,
}

impl Archetype {
    /// All archetypes, for iteration.
    pub const ALL: &[Self] = &[Self::Melee, Self::Ranged, Self::Bomber];

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Melee => "Melee",
            Self::Ranged => "Ranged",
            Self::Bomber => "Bomber",
        }
    }

    /// Look up the default profile. All values are compile-time constants.
    #[must_use]
    pub const fn profile(self) -> AgentProfile {
        match self {
            Self::Melee => AgentProfile {
                max_health: 30,
                move_speed: 3.5,
                roam_distance_min: 3.0,
                roam_distance_max: 7.0,
                roam_interval: 2.0,
                chase_enabled: true,
                detection_radius: 4.0,
                pursuit_speed_multiplier: 2.0,
                preferred_distance: None,
                retreat_distance: None,
                attack_enabled: true,
                attack_distance: 2.0,
                attack_cooldown: 2.0,
                attack_damage: 10,
                payload: AttackPayload::MeleeArea { radius: 2.0 },
            },
            Self::Ranged => AgentProfile {
                max_health: 20,
                move_speed: 3.5,
                roam_distance_min: 3.0,
                roam_distance_max: 7.0,
                roam_interval: 2.0,
                chase_enabled: true,
                detection_radius: 10.0,
                pursuit_speed_multiplier: 1.5,
                preferred_distance: Some(6.0),
                retreat_distance: Some(4.0),
                attack_enabled: true,
                attack_distance: 8.0,
                attack_cooldown: 2.0,
                attack_damage: 15,
                payload: AttackPayload::DirectShot(ArrowTuning {
                    speed: 15.0,
                    lifetime: 5.0,
                }),
            },
            Self::Bomber => AgentProfile {
                max_health: 25,
                move_speed: 3.5,
                roam_distance_min: 2.0,
                roam_distance_max: 5.0,
                roam_interval: 3.0,
                chase_enabled: true,
                detection_radius: 8.0,
                pursuit_speed_multiplier: 1.3,
                preferred_distance: None,
                retreat_distance: None,
                attack_enabled: true,
                attack_distance: 5.0,
                attack_cooldown: 3.0,
                attack_damage: 20,
                payload: AttackPayload::ArcThrow(BombTuning {
                    speed: 8.0,
                    arc_height: 2.0,
                    explosion_radius: 2.0,
                    fuse: 3.0,
                }),
            },
        }
    }
}

/// What an attack does once the cooldown allows it.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum AttackPayload {
    /// Immediate overlap check around the attacker.
    MeleeArea { radius: f32 },
    /// Straight-flying arrow toward the target's current position.
    DirectShot(ArrowTuning),
    /// Arcing charge from attacker to target position.
    ArcThrow(BombTuning),
}

/// Tuning for one agent. Inserted as a component so it can be overridden per entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AgentProfile {
    pub max_health: u32,
    /// Roaming speed; pursuit speed is this times `pursuit_speed_multiplier`.
    pub move_speed: f32,
    pub roam_distance_min: f32,
    pub roam_distance_max: f32,
    /// Seconds between roam destinations.
    pub roam_interval: f32,
    pub chase_enabled: bool,
    pub detection_radius: f32,
    pub pursuit_speed_multiplier: f32,
    /// Stand-off distance kept while chasing. `None` chases to the target's feet.
    pub preferred_distance: Option<f32>,
    /// Closer than this the agent backs off. `None` never retreats.
    pub retreat_distance: Option<f32>,
    pub attack_enabled: bool,
    pub attack_distance: f32,
    /// Seconds between attacks. Non-positive means always ready.
    pub attack_cooldown: f32,
    pub attack_damage: u32,
    pub payload: AttackPayload,
}

impl AgentProfile {
    /// Which state a live agent should be in at distance `d` from a living target.
    ///
    /// Priority: out of detection (or chase disabled) roams, too close retreats,
    /// within attack distance attacks, otherwise chases.
    #[must_use]
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn choose_state(&self, d: f32) -> AgentState {
        // NaN roams.
        if !self.chase_enabled || !(d <= self.detection_radius) {
            return AgentState::Roaming;
        }
        if self.retreat_distance.is_some_and(|min| min > 0.0 && d < min) {
            return AgentState::Retreating;
        }
        if self.attack_enabled && self.attack_distance > 0.0 && d <= self.attack_distance {
            return AgentState::Attacking;
        }
        AgentState::Chasing
    }

    /// Movement speed while chasing or retreating.
    #[must_use]
    pub fn pursuit_speed(&self) -> f32 {
        self.move_speed * self.pursuit_speed_multiplier
    }
}
