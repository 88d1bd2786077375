//! Direct-flight arrows: straight line, fixed speed, limited lifetime.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{PROJECTILE_RADIUS, Projectile, destroy_projectile};
use crate::Z_PROJECTILE;
use crate::gameplay::Team;
use crate::third_party::CollisionLayer;

/// Launch parameters of an arrow.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ArrowTuning {
    /// World units per second.
    pub speed: f32,
    /// Seconds before an arrow that hit nothing disappears.
    pub lifetime: f32,
}

/// Straight-line flight state.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct DirectFlight {
    /// Unit vector.
    pub direction: Vec2,
    pub speed: f32,
    pub lifetime_remaining: f32,
}

/// Spawns an arrow at `from` flying toward `toward`.
/// Aiming at its own position sends the arrow along +x.
pub fn spawn_arrow(
    commands: &mut Commands,
    owner: Entity,
    team: Team,
    from: Vec2,
    toward: Vec2,
    damage: u32,
    tuning: ArrowTuning,
) -> Entity {
    let direction = (toward - from).normalize_or(Vec2::X);
    commands
        .spawn((
            Name::new("Arrow"),
            Projectile::new(owner, damage),
            DirectFlight {
                direction,
                speed: tuning.speed,
                lifetime_remaining: tuning.lifetime,
            },
            team,
            Transform::from_translation(from.extend(Z_PROJECTILE))
                .with_rotation(Quat::from_rotation_z(direction.to_angle())),
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

/// Moves arrows along their direction, then expires the ones out of lifetime.
/// Expiry applies no damage. Runs in `GameSet::Combat`.
pub(super) fn move_arrows(
    time: Res<Time>,
    mut commands: Commands,
    mut arrows: Query<(Entity, &mut Projectile, &mut DirectFlight, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut projectile, mut flight, mut transform) in &mut arrows {
        if !projectile.is_active() {
            continue;
        }
        let step = flight.direction * flight.speed * dt;
        transform.translation += step.extend(0.0);
        transform.rotation = Quat::from_rotation_z(flight.direction.to_angle());

        flight.lifetime_remaining -= dt;
        if flight.lifetime_remaining <= 0.0 && projectile.resolve() {
            debug!("{entity} expired");
            destroy_projectile(&mut commands, entity);
        }
    }
}
