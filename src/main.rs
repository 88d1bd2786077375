//! Demo arena: a stationary player, a few obstacles and one agent per archetype.

use avian2d::prelude::*;
use bevy::prelude::*;
use skirmish_ai::gameplay::agent::{AGENT_RADIUS, AgentBrain, AgentState, Archetype, spawn_agent};
use skirmish_ai::gameplay::combat::{PROJECTILE_RADIUS, Projectile};
use skirmish_ai::gameplay::{Health, Target, Team};
use skirmish_ai::third_party::{CollisionLayer, NavObstacle, spawn_navmesh};

/// Half size of the walkable arena, world units.
const ARENA_HALF_EXTENTS: Vec2 = Vec2::new(20.0, 12.0);

/// Screen pixels per world unit.
const PIXELS_PER_UNIT: f32 = 32.0;

const PLAYER_COLOR: Color = Color::srgb(0.2, 0.8, 0.2);
const OBSTACLE_COLOR: Color = Color::srgb(0.5, 0.5, 0.55);
const PROJECTILE_COLOR: Color = Color::srgb(1.0, 1.0, 0.3);

/// Drawn size of an obstacle.
#[derive(Component, Debug, Clone, Copy)]
struct Footprint(Vec2);

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Skirmish AI".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(skirmish_ai::plugin)
        .add_systems(Startup, setup_arena)
        .add_systems(Update, (draw_combatants, draw_obstacles, draw_projectiles))
        .run();
}

fn setup_arena(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        }),
    ));

    spawn_navmesh(&mut commands, ARENA_HALF_EXTENTS);

    for (position, size) in [
        (Vec2::new(-6.0, 0.0), Vec2::new(1.5, 6.0)),
        (Vec2::new(6.0, 3.0), Vec2::new(4.0, 1.5)),
        (Vec2::new(2.0, -6.0), Vec2::new(2.0, 2.0)),
    ] {
        commands.spawn((
            Name::new("Obstacle"),
            NavObstacle,
            Footprint(size),
            Transform::from_translation(position.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayer::obstacle(),
        ));
    }

    commands.spawn((
        Name::new("Player"),
        Team::Player,
        Target,
        Health::new(200),
        Transform::from_xyz(0.0, 0.0, skirmish_ai::Z_AGENT),
        RigidBody::Static,
        Collider::circle(AGENT_RADIUS),
        CollisionLayer::combatant(),
    ));

    for (archetype, position) in [
        (Archetype::Melee, Vec2::new(-12.0, 6.0)),
        (Archetype::Ranged, Vec2::new(12.0, -6.0)),
        (Archetype::Bomber, Vec2::new(10.0, 8.0)),
    ] {
        spawn_agent(&mut commands, archetype, Team::Enemy, position);
    }
}

fn state_color(state: AgentState) -> Color {
    match state {
        AgentState::Idle | AgentState::Roaming => Color::srgb(0.6, 0.6, 0.9),
        AgentState::Chasing => Color::srgb(0.9, 0.6, 0.2),
        AgentState::Retreating => Color::srgb(0.7, 0.3, 0.9),
        AgentState::Attacking => Color::srgb(0.9, 0.2, 0.2),
        AgentState::Dead => Color::srgb(0.3, 0.3, 0.3),
    }
}

fn draw_combatants(
    mut gizmos: Gizmos,
    combatants: Query<(&GlobalTransform, &Health, Option<&AgentBrain>), With<Target>>,
) {
    for (transform, health, brain) in &combatants {
        let position = transform.translation().xy();
        let color = brain.map_or(PLAYER_COLOR, |b| state_color(b.state()));
        gizmos.circle_2d(position, AGENT_RADIUS, color);
        // Health bar above the body.
        let left = position + Vec2::new(-AGENT_RADIUS, AGENT_RADIUS + 0.2);
        gizmos.line_2d(
            left,
            left + Vec2::X * 2.0 * AGENT_RADIUS * health.fraction(),
            PLAYER_COLOR,
        );
    }
}

fn draw_obstacles(mut gizmos: Gizmos, obstacles: Query<(&GlobalTransform, &Footprint)>) {
    for (transform, footprint) in &obstacles {
        gizmos.rect_2d(transform.translation().xy(), footprint.0, OBSTACLE_COLOR);
    }
}

fn draw_projectiles(mut gizmos: Gizmos, projectiles: Query<&GlobalTransform, With<Projectile>>) {
    for transform in &projectiles {
        gizmos.circle_2d(
            transform.translation().xy(),
            PROJECTILE_RADIUS,
            PROJECTILE_COLOR,
        );
    }
}
