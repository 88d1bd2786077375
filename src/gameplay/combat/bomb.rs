//! Arcing bombs: a lobbed charge that flies a single-arch curve from launch to
//! target and bursts with distance falloff on landing, on a late collision, or
//! when its fuse runs out.

use std::f32::consts::{PI, TAU};

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{Detonated, PROJECTILE_RADIUS, Projectile, destroy_projectile};
use crate::Z_PROJECTILE;
use crate::gameplay::health::deal_damage;
use crate::gameplay::{Health, Team};
use crate::third_party::CollisionLayer;

/// Below this fraction of flight, collisions are ignored so a charge cannot
/// burst while still rising from the thrower.
pub const ARC_COLLISION_GATE: f32 = 0.95;

/// Cosmetic spin while airborne, radians per second.
const SPIN_SPEED: f32 = TAU;

/// Warning pulse interval while more than [`FUSE_URGENT_WINDOW`] remains.
const WARNING_INTERVAL: f32 = 0.4;

/// Warning pulse interval in the last stretch of the fuse.
const URGENT_WARNING_INTERVAL: f32 = 0.1;

/// Seconds of fuse left at which the warning pulse speeds up.
const FUSE_URGENT_WINDOW: f32 = 1.0;

/// Launch parameters of a bomb.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct BombTuning {
    /// Ground speed, world units per second.
    pub speed: f32,
    /// Apex of the arch above the launch-target line.
    pub arc_height: f32,
    pub explosion_radius: f32,
    /// Seconds before the charge bursts regardless of flight.
    pub fuse: f32,
}

/// Arc flight state of a bomb.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ArcFlight {
    launch: Vec2,
    target: Vec2,
    /// Fraction of the flight done, `[0, 1]`.
    progress: f32,
    /// Seconds from launch to landing. Infinite for a non-positive speed.
    duration: f32,
    arc_height: f32,
    explosion_radius: f32,
    fuse_remaining: f32,
}

impl ArcFlight {
    #[must_use]
    pub fn new(launch: Vec2, target: Vec2, tuning: &BombTuning) -> Self {
        let duration = if tuning.speed > 0.0 {
            launch.distance(target) / tuning.speed
        } else {
            f32::INFINITY
        };
        Self {
            launch,
            target,
            progress: 0.0,
            duration,
            arc_height: tuning.arc_height,
            explosion_radius: tuning.explosion_radius,
            fuse_remaining: tuning.fuse,
        }
    }

    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    #[must_use]
    pub const fn flight_duration(&self) -> f32 {
        self.duration
    }

    #[must_use]
    pub const fn explosion_radius(&self) -> f32 {
        self.explosion_radius
    }

    #[must_use]
    pub const fn fuse_remaining(&self) -> f32 {
        self.fuse_remaining
    }

    #[must_use]
    pub const fn launch(&self) -> Vec2 {
        self.launch
    }

    #[must_use]
    pub const fn target(&self) -> Vec2 {
        self.target
    }

    /// Current point on the arch.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        arc_position(self.launch, self.target, self.progress, self.arc_height)
    }

    /// Whether collisions may detonate the charge yet.
    #[must_use]
    pub fn collisions_armed(&self) -> bool {
        self.progress >= ARC_COLLISION_GATE
    }

    /// Seconds between presentation warning pulses. Purely cosmetic.
    #[must_use]
    pub fn warning_interval(&self) -> f32 {
        if self.fuse_remaining > FUSE_URGENT_WINDOW {
            WARNING_INTERVAL
        } else {
            URGENT_WARNING_INTERVAL
        }
    }

    /// Advances flight and fuse by `dt`. Returns the burst point when this
    /// step lands the charge (at the target) or burns out the fuse (in the air).
    pub fn advance(&mut self, dt: f32) -> Option<Vec2> {
        self.progress = if self.duration > 0.0 {
            (self.progress + dt / self.duration).min(1.0)
        } else {
            1.0
        };
        self.fuse_remaining -= dt;

        if self.progress >= 1.0 {
            Some(self.target)
        } else if self.fuse_remaining <= 0.0 {
            Some(self.position())
        } else {
            None
        }
    }
}

/// Height of the arch at `progress`: 0 at both ends, `arc_height` halfway.
#[must_use]
pub fn arc_offset(progress: f32, arc_height: f32) -> f32 {
    if progress <= 0.0 || progress >= 1.0 {
        return 0.0;
    }
    arc_height * (progress * PI).sin()
}

/// Point on the arch: linear ground track plus the arch height along +y.
#[must_use]
pub fn arc_position(launch: Vec2, target: Vec2, progress: f32, arc_height: f32) -> Vec2 {
    let progress = progress.clamp(0.0, 1.0);
    launch.lerp(target, progress) + Vec2::Y * arc_offset(progress, arc_height)
}

/// Damage dealt `distance` from the burst centre: full at the centre, half at
/// the edge, nothing outside or for a non-positive radius.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::neg_cmp_op_on_partial_ord
)]
pub fn falloff_damage(payload: u32, distance: f32, radius: f32) -> u32 {
    if radius <= 0.0 || !(distance <= radius) {
        return 0;
    }
    let falloff = 1.0 - 0.5 * (distance / radius).clamp(0.0, 1.0);
    (payload as f32 * falloff).round() as u32
}

/// Spawns a bomb at `from` that will land on `to`.
pub fn spawn_bomb(
    commands: &mut Commands,
    owner: Entity,
    team: Team,
    from: Vec2,
    to: Vec2,
    damage: u32,
    tuning: BombTuning,
) -> Entity {
    commands
        .spawn((
            Name::new("Bomb"),
            Projectile::new(owner, damage),
            ArcFlight::new(from, to, &tuning),
            team,
            Transform::from_translation(from.extend(Z_PROJECTILE)),
        ))
        .insert((
            RigidBody::Kinematic,
            Collider::circle(PROJECTILE_RADIUS),
            Sensor,
            CollisionLayer::projectile(),
            CollisionEventsEnabled,
            CollidingEntities::default(),
        ))
        .id()
}

/// Bursts a bomb at `at`: falloff damage to every opposing combatant in the
/// radius except the thrower, then `Detonated` and removal.
/// The caller must have claimed the resolution with `Projectile::resolve`.
pub(super) fn detonate(
    commands: &mut Commands,
    entity: Entity,
    projectile: &Projectile,
    team: Team,
    flight: &ArcFlight,
    at: Vec2,
    victims: &mut Query<(Entity, &Team, &GlobalTransform, &mut Health)>,
) {
    let radius = flight.explosion_radius();
    let opposing_team = team.opposing();
    for (victim, victim_team, transform, mut health) in victims.iter_mut() {
        if victim == projectile.owner || *victim_team != opposing_team || health.is_dead() {
            continue;
        }
        let amount = falloff_damage(
            projectile.damage(),
            transform.translation().xy().distance(at),
            radius,
        );
        if amount > 0 {
            deal_damage(commands, victim, &mut health, amount);
        }
    }
    debug!("{entity} detonated at {at}");
    commands.trigger(Detonated {
        entity,
        position: at,
        radius,
    });
    destroy_projectile(commands, entity);
}

/// Moves bombs along their arch, then bursts the ones that landed or burned
/// out. Runs in `GameSet::Combat`.
pub(super) fn advance_bombs(
    time: Res<Time>,
    mut commands: Commands,
    mut bombs: Query<(
        Entity,
        &mut Projectile,
        &mut ArcFlight,
        &Team,
        &mut Transform,
    )>,
    mut victims: Query<(Entity, &Team, &GlobalTransform, &mut Health)>,
) {
    let dt = time.delta_secs();
    for (entity, mut projectile, mut flight, team, mut transform) in &mut bombs {
        if !projectile.is_active() {
            continue;
        }
        let burst = flight.advance(dt);
        let position = burst.unwrap_or_else(|| flight.position());
        transform.translation = position.extend(Z_PROJECTILE);
        transform.rotate_z(-SPIN_SPEED * dt);

        let Some(at) = burst else {
            continue;
        };
        if projectile.resolve() {
            detonate(
                &mut commands,
                entity,
                &projectile,
                *team,
                &flight,
                at,
                &mut victims,
            );
        }
    }
}
