//! `NavMesh` pathfinding for navigators: turns a destination into waypoints around obstacles.

use bevy::prelude::*;
use vleue_navigator::prelude::*;

use super::Navigator;

/// Seconds between periodic path recomputations for navigators that already
/// have a path. Picks up navmesh changes and obstacles moving into the way.
const PATH_REFRESH_INTERVAL_SECS: f32 = 0.5;

/// A destination closer than this to the one a path was computed for reuses it.
const GOAL_TOLERANCE: f32 = 0.5;

/// Shared cadence of periodic path recomputation.
#[derive(Resource, Debug, Reflect)]
#[reflect(Resource)]
pub struct PathRefreshTimer(pub Timer);

impl Default for PathRefreshTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(
            PATH_REFRESH_INTERVAL_SECS,
            TimerMode::Repeating,
        ))
    }
}

/// Waypoint path for a navigator, computed from the `NavMesh`.
/// Without a built navmesh the path is the destination itself.
#[derive(Component, Debug, Clone, Reflect, Default)]
#[reflect(Component)]
pub struct NavPath {
    /// World-space waypoints, ending at the goal.
    pub waypoints: Vec<Vec2>,
    /// Position in `waypoints` of the point being steered toward.
    pub current_index: usize,
    /// The destination this path was computed for.
    goal: Option<Vec2>,
}

impl NavPath {
    /// Replace the path with new waypoints toward `goal`.
    pub fn set(&mut self, waypoints: Vec<Vec2>, goal: Vec2) {
        self.waypoints = waypoints;
        self.current_index = 0;
        self.goal = Some(goal);
    }

    /// Clear the path (no waypoints, no goal).
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.current_index = 0;
        self.goal = None;
    }

    /// Waypoint being steered toward, `None` once the path is walked.
    #[must_use]
    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.waypoints.get(self.current_index).copied()
    }

    /// Moves on to the following waypoint; false once none are left.
    pub fn advance(&mut self) -> bool {
        self.current_index += 1;
        self.current_index < self.waypoints.len()
    }

    #[must_use]
    pub const fn goal(&self) -> Option<Vec2> {
        self.goal
    }

    /// Whether this path was computed for a different destination.
    #[must_use]
    pub fn needs_recompute(&self, destination: Option<Vec2>) -> bool {
        match (self.goal, destination) {
            (Some(goal), Some(destination)) => goal.distance(destination) > GOAL_TOLERANCE,
            (None, None) => false,
            _ => true,
        }
    }
}

/// Computes paths for navigators whose destination changed or whose path is due a refresh.
/// Runs in `GameSet::Movement` before `steer_agents`.
pub(crate) fn compute_paths(
    time: Res<Time>,
    mut refresh_timer: ResMut<PathRefreshTimer>,
    mut navigators: Query<(&Navigator, &GlobalTransform, &mut NavPath)>,
    navmeshes: Option<Res<Assets<NavMesh>>>,
    navmesh_query: Option<Single<(&ManagedNavMesh, &NavMeshStatus)>>,
) {
    refresh_timer.0.tick(time.delta());
    let refresh_due = refresh_timer.0.just_finished();

    let navmesh = navmeshes.as_ref().zip(navmesh_query).and_then(|(assets, inner)| {
        let (managed, status) = *inner;
        if *status == NavMeshStatus::Built {
            assets.get(managed)
        } else {
            None
        }
    });

    for (navigator, transform, mut nav_path) in &mut navigators {
        let destination = navigator.destination();
        if !nav_path.needs_recompute(destination) && !refresh_due {
            continue;
        }

        let Some(goal) = destination else {
            nav_path.clear();
            continue;
        };

        let from = transform.translation().xy();
        let waypoints = match navmesh {
            Some(navmesh) => navmesh
                .path(from, goal)
                .map_or_else(|| vec![goal], |path| path.path),
            // No navmesh yet: walk straight at the goal.
            None => vec![goal],
        };
        nav_path.set(waypoints, goal);
    }
}
