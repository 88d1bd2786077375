//! The combat state machine: one topology for every archetype, parameterized by [`AgentProfile`].
//!
//! [`AgentBrain`] is plain data driven by [`AgentBrain::tick`]. It reads the
//! clock, its own position and a view of the target, talks to a
//! [`MovementService`], and hands back an [`AttackOrder`] when the cooldown
//! allows a strike. Resolving the order (melee sweep, arrow, bomb) is the
//! caller's job, so the machine itself never touches the world.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use super::profile::{AgentProfile, RETREAT_STEP};
use crate::gameplay::navigation::MovementService;

/// Seconds between facing re-evaluations.
pub const FACING_CHECK_INTERVAL: f32 = 0.1;

/// Behaviour an agent is executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum AgentState {
    Idle,
    #[default]
    Roaming,
    Chasing,
    Retreating,
    Attacking,
    /// Terminal.
    Dead,
}

/// Horizontal sprite orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing for looking from `from` toward `to`. Equal x faces right.
    #[must_use]
    pub fn between(from: Vec2, to: Vec2) -> Self {
        if from.x > to.x { Self::Left } else { Self::Right }
    }
}

/// What the brain sees of its target this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub position: Vec2,
    pub alive: bool,
}

/// Everything one tick reads from outside the brain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Simulation clock, seconds.
    pub now: f32,
    /// Seconds since the previous tick.
    pub dt: f32,
    pub position: Vec2,
    pub target: Option<TargetView>,
}

/// A cooldown-approved attack, aimed at where the target stood this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackOrder {
    pub target_position: Vec2,
}

/// State, timers and facing of one agent.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AgentBrain {
    state: AgentState,
    /// Seconds until the next roam destination.
    roam_timer: f32,
    /// Centre of the current roam cycle.
    roam_origin: Vec2,
    next_attack_time: f32,
    next_facing_check_time: f32,
    last_position: Vec2,
    facing: Facing,
}

impl AgentBrain {
    /// A brain starting in `start` at `position`. Agents cannot be born dead:
    /// a `Dead` start becomes `Idle`.
    #[must_use]
    pub fn new(start: AgentState, position: Vec2) -> Self {
        let state = if start == AgentState::Dead {
            AgentState::Idle
        } else {
            start
        };
        Self {
            state,
            roam_timer: 0.0,
            roam_origin: position,
            next_attack_time: 0.0,
            next_facing_check_time: 0.0,
            last_position: position,
            facing: Facing::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> AgentState {
        self.state
    }

    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    #[must_use]
    pub fn is_attacking(&self) -> bool {
        self.state == AgentState::Attacking
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.state == AgentState::Dead
    }

    #[must_use]
    pub const fn next_attack_time(&self) -> f32 {
        self.next_attack_time
    }

    #[must_use]
    pub const fn roam_origin(&self) -> Vec2 {
        self.roam_origin
    }

    /// Runs one simulation step.
    ///
    /// With a living target the state is re-chosen from the distance to it,
    /// running the entry action on a change. A dead or missing target freezes
    /// the current state: roaming keeps going, target-bound behaviour idles.
    pub fn tick<M, R>(
        &mut self,
        profile: &AgentProfile,
        input: &TickInput,
        movement: &mut M,
        rng: &mut R,
    ) -> Option<AttackOrder>
    where
        M: MovementService + ?Sized,
        R: Rng,
    {
        if self.state == AgentState::Dead {
            return None;
        }

        let target = input.target.filter(|t| t.alive);
        if let Some(target) = target {
            let next = profile.choose_state(input.position.distance(target.position));
            if next != self.state {
                self.enter(next, profile, input.position, movement);
            }
        }

        match self.state {
            AgentState::Idle | AgentState::Dead => None,
            AgentState::Roaming => {
                self.roam(profile, input, movement, rng);
                None
            }
            AgentState::Chasing => {
                let target = target?;
                movement.set_destination(chase_point(profile, input.position, target.position));
                None
            }
            AgentState::Retreating => {
                let target = target?;
                movement.set_destination(retreat_point(input.position, target.position));
                None
            }
            AgentState::Attacking => {
                let target = target?;
                movement.reset_path();
                self.facing = Facing::between(input.position, target.position);
                if input.now < self.next_attack_time {
                    return None;
                }
                self.next_attack_time = input.now + profile.attack_cooldown.max(0.0);
                Some(AttackOrder {
                    target_position: target.position,
                })
            }
        }
    }

    /// Enters `Dead`: stops and disables movement for good.
    /// Returns false if already dead.
    pub fn die<M: MovementService + ?Sized>(&mut self, movement: &mut M) -> bool {
        if self.state == AgentState::Dead {
            return false;
        }
        self.state = AgentState::Dead;
        movement.reset_path();
        movement.disable();
        true
    }

    /// Re-evaluates facing once per [`FACING_CHECK_INTERVAL`].
    ///
    /// A moving agent faces the way it travelled since the last check; a
    /// planted attacker faces its target.
    pub fn update_facing(&mut self, now: f32, position: Vec2, moving: bool, target: Option<Vec2>) {
        if self.state == AgentState::Dead || now <= self.next_facing_check_time {
            return;
        }
        self.next_facing_check_time = now + FACING_CHECK_INTERVAL;

        match (self.state, target) {
            _ if moving => {
                self.facing = Facing::between(self.last_position, position);
            }
            (AgentState::Attacking, Some(target)) => {
                self.facing = Facing::between(position, target);
            }
            _ => {}
        }
        self.last_position = position;
    }

    fn enter<M: MovementService + ?Sized>(
        &mut self,
        next: AgentState,
        profile: &AgentProfile,
        position: Vec2,
        movement: &mut M,
    ) {
        match next {
            AgentState::Chasing | AgentState::Retreating => {
                movement.set_speed(profile.pursuit_speed());
            }
            AgentState::Roaming => {
                self.roam_timer = 0.0;
                self.roam_origin = position;
                movement.set_speed(profile.move_speed);
            }
            AgentState::Attacking => movement.reset_path(),
            AgentState::Idle | AgentState::Dead => {}
        }
        self.state = next;
    }

    fn roam<M: MovementService + ?Sized, R: Rng>(
        &mut self,
        profile: &AgentProfile,
        input: &TickInput,
        movement: &mut M,
        rng: &mut R,
    ) {
        self.roam_timer -= input.dt;
        if self.roam_timer > 0.0 {
            return;
        }
        self.roam_timer = profile.roam_interval;
        self.roam_origin = input.position;

        let low = profile.roam_distance_min.min(profile.roam_distance_max).max(0.0);
        let high = profile.roam_distance_min.max(profile.roam_distance_max).max(0.0);
        let distance = rng.random_range(low..=high);
        let direction = Vec2::from_angle(rng.random_range(0.0..TAU));
        let destination = self.roam_origin + direction * distance;

        self.facing = Facing::between(input.position, destination);
        movement.set_destination(destination);
    }
}

/// Where a chasing agent heads: the target itself, or the stand-off point
/// `preferred_distance` short of it along the target-to-agent line.
#[must_use]
pub fn chase_point(profile: &AgentProfile, agent: Vec2, target: Vec2) -> Vec2 {
    match profile.preferred_distance {
        Some(preferred) if preferred > 0.0 => {
            let toward_agent = (agent - target).normalize_or(Vec2::X);
            target + toward_agent * preferred
        }
        _ => target,
    }
}

/// One retreat step straight away from the target.
#[must_use]
pub fn retreat_point(agent: Vec2, target: Vec2) -> Vec2 {
    agent + (agent - target).normalize_or(Vec2::X) * RETREAT_STEP
}
