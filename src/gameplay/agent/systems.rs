//! Agent systems: brain ticks, attack dispatch, facing, death and corpse cleanup.

use bevy::prelude::*;

use super::{
    Agent, AgentAttacked, AgentBrain, AgentDied, AgentHurt, AgentProfile, AttackPayload, Corpse,
    TargetView, TickInput,
};
use crate::gameplay::combat::{spawn_arrow, spawn_bomb, strike_area};
use crate::gameplay::health::{Damaged, Died};
use crate::gameplay::navigation::{MovementService, Navigator, NullMovement};
use crate::gameplay::{CurrentTarget, Health, Team};

/// Agents without a navigator can still be ticked but never chase or attack.
pub(super) fn warn_missing_navigator(
    agents: Query<Entity, (Added<AgentBrain>, With<Agent>, Without<Navigator>)>,
) {
    for entity in &agents {
        warn!("{entity} has no Navigator, it will only roam in place");
    }
}

/// Ticks every agent's brain and resolves the attacks it orders.
///
/// Melee sweeps are applied after all brains have ticked, so every agent
/// decides on the positions and health of the previous step.
/// Runs in `GameSet::Ai`.
pub(super) fn drive_agents(
    time: Res<Time>,
    mut commands: Commands,
    mut agents: Query<
        (
            Entity,
            &Team,
            &AgentProfile,
            &CurrentTarget,
            &GlobalTransform,
            &mut AgentBrain,
            Option<&mut Navigator>,
        ),
        With<Agent>,
    >,
    mut world_view: ParamSet<(
        Query<(&GlobalTransform, Option<&Health>)>,
        Query<(Entity, &Team, &GlobalTransform, &mut Health)>,
    )>,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();
    let mut rng = rand::rng();
    let mut sweeps = Vec::new();

    for (entity, team, profile, current_target, transform, mut brain, navigator) in &mut agents {
        let position = transform.translation().xy();

        let mut null = NullMovement;
        let has_navigator = navigator.is_some();
        let movement: &mut dyn MovementService = match navigator {
            Some(navigator) => navigator.into_inner(),
            None => &mut null,
        };

        let target = current_target
            .0
            .filter(|_| has_navigator)
            .and_then(|target| {
                world_view
                    .p0()
                    .get(target)
                    .ok()
                    .map(|(target_transform, health)| TargetView {
                        position: target_transform.translation().xy(),
                        alive: !health.is_some_and(Health::is_dead),
                    })
            });

        let before = brain.state();
        let input = TickInput {
            now,
            dt,
            position,
            target,
        };
        let order = brain.tick(profile, &input, movement, &mut rng);
        if brain.state() != before {
            debug!("{entity}: {before:?} -> {:?}", brain.state());
        }

        let Some(order) = order else {
            continue;
        };
        commands.trigger(AgentAttacked {
            entity,
            target_position: order.target_position,
        });
        match profile.payload {
            AttackPayload::MeleeArea { radius } => {
                sweeps.push((entity, *team, position, radius, profile.attack_damage));
            }
            AttackPayload::DirectShot(tuning) => {
                spawn_arrow(
                    &mut commands,
                    entity,
                    *team,
                    position,
                    order.target_position,
                    profile.attack_damage,
                    tuning,
                );
            }
            AttackPayload::ArcThrow(tuning) => {
                spawn_bomb(
                    &mut commands,
                    entity,
                    *team,
                    position,
                    order.target_position,
                    profile.attack_damage,
                    tuning,
                );
            }
        }
    }

    let mut victims = world_view.p1();
    for (owner, team, center, radius, damage) in sweeps {
        strike_area(&mut commands, owner, team, center, radius, damage, &mut victims);
    }
}

/// Re-evaluates facing on its own cadence. Runs in `GameSet::Facing`.
pub(super) fn update_facing(
    time: Res<Time>,
    mut agents: Query<
        (
            &mut AgentBrain,
            &GlobalTransform,
            &CurrentTarget,
            Option<&Navigator>,
        ),
        With<Agent>,
    >,
    targets: Query<&GlobalTransform>,
) {
    let now = time.elapsed_secs();
    for (mut brain, transform, current_target, navigator) in &mut agents {
        let moving = navigator.is_some_and(|n| n.is_moving());
        let target = current_target
            .0
            .and_then(|e| targets.get(e).ok())
            .map(|t| t.translation().xy());
        brain.update_facing(now, transform.translation().xy(), moving, target);
    }
}

/// Raises `AgentHurt` for damage taken by a living agent.
pub(super) fn on_agent_damaged(
    damaged: On<Damaged>,
    mut commands: Commands,
    agents: Query<&AgentBrain, With<Agent>>,
) {
    let Ok(brain) = agents.get(damaged.entity) else {
        return;
    };
    if brain.is_dead() {
        return;
    }
    commands.trigger(AgentHurt {
        entity: damaged.entity,
        amount: damaged.amount,
    });
}

/// Moves an agent whose health ran out into `Dead` and starts its corpse countdown.
pub(super) fn on_agent_died(
    died: On<Died>,
    mut commands: Commands,
    mut agents: Query<(&mut AgentBrain, Option<&mut Navigator>), With<Agent>>,
) {
    let entity = died.entity;
    let Ok((mut brain, navigator)) = agents.get_mut(entity) else {
        return;
    };
    let entered = match navigator {
        Some(mut navigator) => brain.die(&mut *navigator),
        None => brain.die(&mut NullMovement),
    };
    if !entered {
        return;
    }
    info!("{entity} died");
    commands.trigger(AgentDied { entity });
    commands.entity(entity).insert(Corpse::default());
}

/// Removes corpses whose grace period elapsed. Runs in `GameSet::Death`.
pub(super) fn despawn_corpses(
    time: Res<Time>,
    mut commands: Commands,
    mut corpses: Query<(Entity, &mut Corpse)>,
) {
    for (entity, mut corpse) in &mut corpses {
        corpse.0.tick(time.delta());
        if corpse.0.just_finished() {
            commands.entity(entity).despawn();
        }
    }
}
