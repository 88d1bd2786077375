//! Target acquisition: every `CurrentTarget` holder tracks the nearest opposing `Target`.

use bevy::prelude::*;

use super::{CurrentTarget, Health, Target, Team};
use crate::GameSet;

/// Points each seeker at the nearest opposing [`Target`]. Runs in `GameSet::Targeting`.
///
/// Living candidates always win over dead ones. A seeker whose only candidates
/// are dead keeps pointing at the nearest corpse, which freezes its state
/// machine instead of sending it back to roaming.
pub(crate) fn acquire_targets(
    mut seekers: Query<(Entity, &Team, &GlobalTransform, &mut CurrentTarget)>,
    candidates: Query<(Entity, &Team, &GlobalTransform, Option<&Health>), With<Target>>,
) {
    for (entity, team, transform, mut current_target) in &mut seekers {
        let my_pos = transform.translation().xy();
        let opposing_team = team.opposing();

        let mut nearest: Option<(Entity, bool, f32)> = None;
        for (candidate, candidate_team, candidate_pos, health) in &candidates {
            if candidate == entity || *candidate_team != opposing_team {
                continue;
            }
            let dead = health.is_some_and(Health::is_dead);
            let dist = my_pos.distance(candidate_pos.translation().xy());
            let closer = nearest.is_none_or(|(_, best_dead, best_dist)| {
                (dead, dist) < (best_dead, best_dist)
            });
            if closer {
                nearest = Some((candidate, dead, dist));
            }
        }

        let resolved = nearest.map(|(e, _, _)| e);
        if current_target.0 != resolved {
            current_target.0 = resolved;
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        acquire_targets.in_set(GameSet::Targeting),
    );
}
