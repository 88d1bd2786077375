//! Collision resolution for arrows and bombs.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::bomb::detonate;
use super::{ArcFlight, Projectile, ProjectileHit, destroy_projectile};
use crate::gameplay::health::deal_damage;
use crate::gameplay::{Health, Team};
use crate::third_party::NavObstacle;

/// What a projectile ran into.
enum Contact {
    /// A living opposing combatant.
    Target(Entity),
    Obstacle(Entity),
}

/// Resolves projectiles touching a target or an obstacle.
///
/// Arrows damage the first opposing combatant they touch, or stop silently on
/// an obstacle. Bombs ignore every contact until their flight is nearly done,
/// then burst where they are. Owners, allies and corpses are passed through.
/// Runs in `GameSet::Combat` after flight integration.
pub(super) fn handle_projectile_hits(
    mut commands: Commands,
    mut projectiles: Query<(
        Entity,
        &mut Projectile,
        &Team,
        &CollidingEntities,
        &GlobalTransform,
        Option<&ArcFlight>,
    )>,
    mut victims: Query<(Entity, &Team, &GlobalTransform, &mut Health)>,
    obstacles: Query<(), With<NavObstacle>>,
) {
    for (entity, mut projectile, team, colliding, transform, arc) in &mut projectiles {
        if !projectile.is_active() {
            continue;
        }
        if arc.is_some_and(|flight| !flight.collisions_armed()) {
            continue;
        }

        let opposing_team = team.opposing();
        let contact = colliding.iter().find_map(|&other| {
            if other == projectile.owner {
                return None;
            }
            if let Ok((_, victim_team, _, health)) = victims.get(other) {
                return (*victim_team == opposing_team && !health.is_dead())
                    .then_some(Contact::Target(other));
            }
            obstacles.contains(other).then_some(Contact::Obstacle(other))
        });
        let Some(contact) = contact else {
            continue;
        };
        if !projectile.resolve() {
            continue;
        }

        if let Some(flight) = arc {
            let at = transform.translation().xy();
            detonate(
                &mut commands,
                entity,
                &projectile,
                *team,
                flight,
                at,
                &mut victims,
            );
            continue;
        }

        match contact {
            Contact::Target(struck) => {
                if let Ok((_, _, _, mut health)) = victims.get_mut(struck) {
                    deal_damage(&mut commands, struck, &mut health, projectile.damage());
                }
                debug!("{entity} hit {struck}");
                commands.trigger(ProjectileHit {
                    entity,
                    struck,
                    muted: false,
                });
            }
            Contact::Obstacle(struck) => {
                commands.trigger(ProjectileHit {
                    entity,
                    struck,
                    muted: true,
                });
            }
        }
        destroy_projectile(&mut commands, entity);
    }
}

#[cfg(test)]
mod integration_tests {
    use bevy::ecs::entity::hash_set::EntityHashSet;

    use super::*;
    use crate::gameplay::combat::{
        ArrowTuning, BombTuning, Detonated, ProjectileDestroyed, spawn_arrow, spawn_bomb,
    };
    use crate::testing::{EventLog, create_test_app, record, spawn_test_combatant};
    use pretty_assertions::assert_eq;

    const ARROW: ArrowTuning = ArrowTuning {
        speed: 15.0,
        lifetime: 5.0,
    };

    const BOMB: BombTuning = BombTuning {
        speed: 8.0,
        arc_height: 2.0,
        explosion_radius: 2.0,
        fuse: 3.0,
    };

    fn create_hit_test_app() -> App {
        let mut app = create_test_app();
        app.add_systems(Update, handle_projectile_hits);
        record::<ProjectileHit>(&mut app, "hit");
        record::<ProjectileDestroyed>(&mut app, "destroyed");
        record::<Detonated>(&mut app, "detonated");
        app
    }

    fn spawn_with(app: &mut App, spawn: impl FnOnce(&mut Commands) -> Entity) -> Entity {
        let world = app.world_mut();
        let entity = {
            let mut commands = world.commands();
            spawn(&mut commands)
        };
        world.flush();
        // No transform propagation under MinimalPlugins.
        let transform = *world.get::<Transform>(entity).unwrap();
        world.entity_mut(entity).insert(GlobalTransform::from(transform));
        entity
    }

    fn touch(app: &mut App, projectile: Entity, others: &[Entity]) {
        app.world_mut()
            .entity_mut(projectile)
            .insert(CollidingEntities(EntityHashSet::from_iter(
                others.iter().copied(),
            )));
    }

    fn hp(app: &App, entity: Entity) -> u32 {
        app.world().get::<Health>(entity).unwrap().current()
    }

    fn log(app: &App) -> Vec<&'static str> {
        app.world().resource::<EventLog>().names()
    }

    #[test]
    fn arrow_damages_opponent_and_is_destroyed() {
        let mut app = create_hit_test_app();
        let owner = spawn_test_combatant(app.world_mut(), Team::Enemy, Vec2::ZERO, 20);
        let player = spawn_test_combatant(app.world_mut(), Team::Player, Vec2::new(5.0, 0.0), 100);
        let arrow = spawn_with(&mut app, |c| {
            spawn_arrow(c, owner, Team::Enemy, Vec2::ZERO, Vec2::new(5.0, 0.0), 15, ARROW)
        });
        touch(&mut app, arrow, &[player]);

        app.update();

        assert_eq!(hp(&app, player), 85);
        assert_eq!(log(&app), vec!["hit", "destroyed"]);
        assert!(app.world().get_entity(arrow).is_err());
    }

    #[test]
    fn double_contact_resolves_once() {
        let mut app = create_hit_test_app();
        let owner = spawn_test_combatant(app.world_mut(), Team::Enemy, Vec2::ZERO, 20);
        let first = spawn_test_combatant(app.world_mut(), Team::Player, Vec2::new(5.0, 0.0), 100);
        let second = spawn_test_combatant(app.world_mut(), Team::Player, Vec2::new(5.0, 0.1), 100);
        let arrow = spawn_with(&mut app, |c| {
            spawn_arrow(c, owner, Team::Enemy, Vec2::ZERO, Vec2::new(5.0, 0.0), 15, ARROW)
        });
        touch(&mut app, arrow, &[first, second]);

        app.update();

        assert_eq!(hp(&app, first) + hp(&app, second), 185);
        assert_eq!(app.world().resource::<EventLog>().count("hit"), 1);
    }

    #[test]
    fn arrow_ignores_owner_and_allies() {
        let mut app = create_hit_test_app();
        let owner = spawn_test_combatant(app.world_mut(), Team::Enemy, Vec2::ZERO, 20);
        let ally = spawn_test_combatant(app.world_mut(), Team::Enemy, Vec2::new(1.0, 0.0), 20);
        let arrow = spawn_with(&mut app, |c| {
            spawn_arrow(c, owner, Team::Enemy, Vec2::ZERO, Vec2::new(5.0, 0.0), 15, ARROW)
        });
        touch(&mut app, arrow, &[owner, ally]);

        app.update();

        assert_eq!(hp(&app, owner), 20);
        assert_eq!(hp(&app, ally), 20);
        assert!(app.world().get_entity(arrow).is_ok());
        assert!(log(&app).is_empty());
    }

    #[test]
    fn arrow_stops_on_obstacle_muted() {
        let mut app = create_hit_test_app();
        let owner = spawn_test_combatant(app.world_mut(), Team::Enemy, Vec2::ZERO, 20);
        let wall = app.world_mut().spawn(NavObstacle).id();
        let arrow = spawn_with(&mut app, |c| {
            spawn_arrow(c, owner, Team::Enemy, Vec2::ZERO, Vec2::new(5.0, 0.0), 15, ARROW)
        });
        touch(&mut app, arrow, &[wall]);

        app.update();

        assert_eq!(log(&app), vec!["hit", "destroyed"]);
        assert!(app.world().get_entity(arrow).is_err());
    }

    #[test]
    fn rising_bomb_ignores_contacts() {
        let mut app = create_hit_test_app();
        let owner = spawn_test_combatant(app.world_mut(), Team::Enemy, Vec2::ZERO, 20);
        let player = spawn_test_combatant(app.world_mut(), Team::Player, Vec2::new(0.5, 0.0), 100);
        let bomb = spawn_with(&mut app, |c| {
            spawn_bomb(c, owner, Team::Enemy, Vec2::ZERO, Vec2::new(8.0, 0.0), 20, BOMB)
        });
        touch(&mut app, bomb, &[player]);

        app.update();

        assert_eq!(hp(&app, player), 100);
        assert!(app.world().get_entity(bomb).is_ok());
    }

    #[test]
    fn landing_bomb_bursts_on_contact() {
        let mut app = create_hit_test_app();
        let owner = spawn_test_combatant(app.world_mut(), Team::Enemy, Vec2::ZERO, 20);
        let player = spawn_test_combatant(app.world_mut(), Team::Player, Vec2::new(8.0, 0.0), 100);
        let bomb = spawn_with(&mut app, |c| {
            spawn_bomb(c, owner, Team::Enemy, Vec2::ZERO, Vec2::new(8.0, 0.0), 20, BOMB)
        });
        // 97% of the way there.
        app.world_mut().get_mut::<ArcFlight>(bomb).unwrap().advance(0.97);
        crate::testing::place(app.world_mut(), bomb, Vec2::new(7.76, 0.0));
        touch(&mut app, bomb, &[player]);

        app.update();

        assert!(hp(&app, player) < 100);
        assert_eq!(log(&app).first(), Some(&"detonated"));
        assert!(app.world().get_entity(bomb).is_err());
    }
}
