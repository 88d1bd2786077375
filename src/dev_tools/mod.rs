//! Development tools, only compiled with the `dev` feature.
//!
//! Gizmo overlays for agent decision radii and bomb flights, plus a debug
//! spawner.

use bevy::prelude::*;

use crate::gameplay::Team;
use crate::gameplay::agent::{AgentBrain, AgentProfile, Archetype, spawn_agent};
use crate::gameplay::combat::ArcFlight;

/// Detection radius outline.
const DETECTION_COLOR: Color = Color::srgba(0.9, 0.9, 0.2, 0.25);
/// Attack distance outline.
const ATTACK_COLOR: Color = Color::srgba(0.9, 0.2, 0.2, 0.5);
/// Preferred stand-off distance outline.
const PREFERRED_COLOR: Color = Color::srgba(0.2, 0.6, 0.9, 0.4);
/// Retreat threshold outline.
const RETREAT_COLOR: Color = Color::srgba(0.8, 0.4, 0.9, 0.4);
/// Bomb flight line and blast outline.
const BOMB_COLOR: Color = Color::srgb(1.0, 0.5, 0.1);

/// Distance from the origin at which debug agents appear.
const DEBUG_SPAWN_DISTANCE: f32 = 12.0;

/// Spawns one enemy of each archetype around the origin on E.
fn debug_spawn_agents(keyboard: Res<ButtonInput<KeyCode>>, mut commands: Commands) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let step = std::f32::consts::TAU / Archetype::ALL.len() as f32;
    for (i, archetype) in Archetype::ALL.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let position = Vec2::from_angle(step * i as f32) * DEBUG_SPAWN_DISTANCE;
        spawn_agent(&mut commands, *archetype, Team::Enemy, position);
    }
}

fn draw_agent_radii(
    mut gizmos: Gizmos,
    agents: Query<(&AgentProfile, &AgentBrain, &GlobalTransform)>,
) {
    for (profile, brain, transform) in &agents {
        if brain.is_dead() {
            continue;
        }
        let position = transform.translation().xy();
        gizmos.circle_2d(position, profile.detection_radius, DETECTION_COLOR);
        gizmos.circle_2d(position, profile.attack_distance, ATTACK_COLOR);
        if let Some(preferred) = profile.preferred_distance {
            gizmos.circle_2d(position, preferred, PREFERRED_COLOR);
        }
        if let Some(retreat) = profile.retreat_distance {
            gizmos.circle_2d(position, retreat, RETREAT_COLOR);
        }
    }
}

fn draw_bomb_flights(mut gizmos: Gizmos, bombs: Query<&ArcFlight>) {
    for flight in &bombs {
        gizmos.line_2d(flight.launch(), flight.target(), BOMB_COLOR);
        gizmos.circle_2d(flight.target(), flight.explosion_radius(), BOMB_COLOR);
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (debug_spawn_agents, draw_agent_radii, draw_bomb_flights),
    );
}
