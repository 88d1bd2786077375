//! Navigator steering: follows `NavPath` waypoints by writing `LinearVelocity`.

use avian2d::prelude::LinearVelocity;
use bevy::prelude::*;

use super::Navigator;
use super::pathfinding::NavPath;

/// Within this distance of a waypoint the navigator advances to the next one.
const WAYPOINT_REACHED_DISTANCE: f32 = 0.25;

/// Within this distance of the goal the destination counts as reached.
const ARRIVAL_DISTANCE: f32 = 0.3;

/// Sets each navigator's velocity toward its current waypoint at the navigator's speed.
///
/// Stops (zero velocity) when disabled, without a destination, or once the
/// last waypoint is consumed. Reaching the goal clears the destination.
/// Runs in `GameSet::Movement` after `compute_paths`.
pub(crate) fn steer_agents(
    mut navigators: Query<(
        &mut Navigator,
        &GlobalTransform,
        &mut NavPath,
        &mut LinearVelocity,
    )>,
) {
    for (mut navigator, transform, mut nav_path, mut velocity) in &mut navigators {
        let position = transform.translation().xy();

        let Some(goal) = navigator.destination().filter(|_| navigator.is_enabled()) else {
            velocity.0 = Vec2::ZERO;
            navigator.set_moving(false);
            continue;
        };

        if position.distance(goal) <= ARRIVAL_DISTANCE {
            navigator.arrive();
            velocity.0 = Vec2::ZERO;
            navigator.set_moving(false);
            continue;
        }

        let Some(steer_toward) = nav_path.current_waypoint().and_then(|waypoint| {
            if position.distance(waypoint) < WAYPOINT_REACHED_DISTANCE {
                if nav_path.advance() {
                    nav_path.current_waypoint()
                } else {
                    None
                }
            } else {
                Some(waypoint)
            }
        }) else {
            // Waypoints consumed short of the goal: wait for the next path refresh.
            velocity.0 = Vec2::ZERO;
            navigator.set_moving(false);
            continue;
        };

        let direction = (steer_toward - position).normalize_or_zero();
        velocity.0 = direction * navigator.speed();
        navigator.set_moving(velocity.0 != Vec2::ZERO);
    }
}
