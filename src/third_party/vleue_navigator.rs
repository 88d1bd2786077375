//! `vleue_navigator` navmesh configuration for agent pathfinding.

use avian2d::prelude::*;
use bevy::prelude::*;
use vleue_navigator::prelude::*;

/// Marker: this entity's `Collider` is a navmesh obstacle.
///
/// Also the obstacle class for projectiles: arrows stop on it and landing
/// bombs detonate on it. Do NOT add to agents or projectiles.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct NavObstacle;

/// Spawns a navmesh covering the axis-aligned rectangle `[-half_extents, half_extents]`.
/// Obstacles tagged with [`NavObstacle`] are cut out of it as they appear.
pub fn spawn_navmesh(commands: &mut Commands, half_extents: Vec2) -> Entity {
    commands
        .spawn((
            Name::new("NavMesh"),
            NavMeshSettings {
                fixed: Triangulation::from_outer_edges(&[
                    Vec2::new(-half_extents.x, -half_extents.y),
                    Vec2::new(half_extents.x, -half_extents.y),
                    Vec2::new(half_extents.x, half_extents.y),
                    Vec2::new(-half_extents.x, half_extents.y),
                ]),
                ..default()
            },
            NavMeshUpdateMode::Direct,
        ))
        .id()
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<NavObstacle>();
    app.add_plugins((
        VleueNavigatorPlugin,
        NavmeshUpdaterPlugin::<Collider, NavObstacle>::default(),
    ));
}
