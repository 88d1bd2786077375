//! Melee: an immediate overlap check around the attacker, no projectile.

use bevy::prelude::*;

use crate::gameplay::health::deal_damage;
use crate::gameplay::{Health, Team};

/// Damages every opposing combatant within `radius` of `center`, excluding `owner`.
/// Returns how many were struck. A non-positive radius strikes nothing.
pub fn strike_area(
    commands: &mut Commands,
    owner: Entity,
    team: Team,
    center: Vec2,
    radius: f32,
    damage: u32,
    victims: &mut Query<(Entity, &Team, &GlobalTransform, &mut Health)>,
) -> usize {
    if radius <= 0.0 {
        return 0;
    }
    let opposing_team = team.opposing();
    let mut struck = 0;
    for (entity, victim_team, transform, mut health) in victims.iter_mut() {
        if entity == owner || *victim_team != opposing_team || health.is_dead() {
            continue;
        }
        if transform.translation().xy().distance(center) > radius {
            continue;
        }
        deal_damage(commands, entity, &mut health, damage);
        struck += 1;
    }
    if struck > 0 {
        debug!("{owner} struck {struck} target(s) for {damage}");
    }
    struck
}
