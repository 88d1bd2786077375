//! Whole-lifecycle scenarios for a single agent brain.

use bevy::prelude::*;
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use skirmish_ai::gameplay::agent::brain::{chase_point, retreat_point};
use skirmish_ai::gameplay::agent::{
    AgentBrain, AgentProfile, AgentState, Archetype, Facing, TargetView, TickInput,
};
use skirmish_ai::gameplay::navigation::MovementService;

/// Records the last request of each kind.
#[derive(Default)]
struct FakeMovement {
    destination: Option<Vec2>,
    destinations: usize,
    speed: Option<f32>,
    speeds: usize,
    resets: usize,
}

impl MovementService for FakeMovement {
    fn set_destination(&mut self, point: Vec2) {
        self.destination = Some(point);
        self.destinations += 1;
    }

    fn reset_path(&mut self) {
        self.destination = None;
        self.resets += 1;
    }

    fn is_moving(&self) -> bool {
        self.destination.is_some()
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = Some(speed);
        self.speeds += 1;
    }
}

fn brawler() -> AgentProfile {
    AgentProfile {
        detection_radius: 8.0,
        attack_distance: 5.0,
        attack_cooldown: 2.0,
        attack_damage: 15,
        ..Archetype::Melee.profile()
    }
}

fn input(now: f32, target: Vec2) -> TickInput {
    TickInput {
        now,
        dt: 0.1,
        position: Vec2::ZERO,
        target: Some(TargetView {
            position: target,
            alive: true,
        }),
    }
}

#[test]
fn approach_then_attack_on_cooldown() {
    let profile = brawler();
    let mut brain = AgentBrain::new(AgentState::Roaming, Vec2::ZERO);
    let mut movement = FakeMovement::default();
    let mut rng = StdRng::seed_from_u64(7);

    brain.tick(&profile, &input(0.0, Vec2::new(10.0, 0.0)), &mut movement, &mut rng);
    assert_eq!(brain.state(), AgentState::Roaming);

    brain.tick(&profile, &input(0.0, Vec2::new(6.0, 0.0)), &mut movement, &mut rng);
    assert_eq!(brain.state(), AgentState::Chasing);
    assert_eq!(movement.speed, Some(profile.pursuit_speed()));
    assert_eq!(movement.destination, Some(Vec2::new(6.0, 0.0)));

    let close = Vec2::new(4.0, 0.0);
    let first = brain.tick(&profile, &input(0.0, close), &mut movement, &mut rng);
    assert_eq!(brain.state(), AgentState::Attacking);
    assert_eq!(first.map(|order| order.target_position), Some(close));
    assert_eq!(movement.destination, None);
    assert!(movement.resets > 0);
    assert_eq!(brain.facing(), Facing::Right);

    assert!(brain.tick(&profile, &input(1.0, close), &mut movement, &mut rng).is_none());
    assert!(brain.tick(&profile, &input(2.1, close), &mut movement, &mut rng).is_some());
    assert!((brain.next_attack_time() - 4.1).abs() < 1e-5);
}

#[test]
fn losing_the_target_keeps_the_last_state() {
    let profile = brawler();
    let mut brain = AgentBrain::new(AgentState::Roaming, Vec2::ZERO);
    let mut movement = FakeMovement::default();
    let mut rng = StdRng::seed_from_u64(7);

    brain.tick(&profile, &input(0.0, Vec2::new(6.0, 0.0)), &mut movement, &mut rng);
    assert_eq!(brain.state(), AgentState::Chasing);

    let orphaned = TickInput {
        target: None,
        ..input(0.5, Vec2::ZERO)
    };
    assert!(brain.tick(&profile, &orphaned, &mut movement, &mut rng).is_none());
    assert_eq!(brain.state(), AgentState::Chasing);
}

#[test]
fn kiter_backs_away_when_crowded() {
    let profile = Archetype::Ranged.profile();
    let mut brain = AgentBrain::new(AgentState::Roaming, Vec2::ZERO);
    let mut movement = FakeMovement::default();
    let mut rng = StdRng::seed_from_u64(3);
    let target = Vec2::new(3.0, 0.0);

    brain.tick(&profile, &input(0.0, target), &mut movement, &mut rng);

    assert_eq!(brain.state(), AgentState::Retreating);
    let destination = movement.destination.unwrap();
    assert_eq!(destination, retreat_point(Vec2::ZERO, target));
    assert!(destination.distance(target) > Vec2::ZERO.distance(target));
}

#[test]
fn kiter_chases_to_its_stand_off_point() {
    let profile = Archetype::Ranged.profile();
    let target = Vec2::new(9.0, 0.0);

    let point = chase_point(&profile, Vec2::ZERO, target);

    assert_eq!(point, Vec2::new(3.0, 0.0));
}

#[test]
fn the_dead_never_act_again() {
    let profile = brawler();
    let mut brain = AgentBrain::new(AgentState::Roaming, Vec2::ZERO);
    let mut movement = FakeMovement::default();
    let mut rng = StdRng::seed_from_u64(11);

    assert!(brain.die(&mut movement));
    assert!(!brain.die(&mut movement));
    let (destinations, speeds) = (movement.destinations, movement.speeds);

    for now in [5.0, 5.1, 9.0] {
        let order = brain.tick(&profile, &input(now, Vec2::new(1.0, 0.0)), &mut movement, &mut rng);
        assert!(order.is_none());
    }
    assert_eq!(brain.state(), AgentState::Dead);
    assert_eq!(movement.destinations, destinations);
    assert_eq!(movement.speeds, speeds);
    assert_eq!(movement.destination, None);
}

#[test]
fn roaming_stays_within_the_ring() {
    let profile = Archetype::Bomber.profile();
    let origin = Vec2::new(2.0, -1.0);
    let mut brain = AgentBrain::new(AgentState::Roaming, origin);
    let mut movement = FakeMovement::default();
    let mut rng = StdRng::seed_from_u64(42);

    for step in 0..20 {
        #[allow(clippy::cast_precision_loss)]
        let now = step as f32 * profile.roam_interval;
        let tick = TickInput {
            now,
            dt: profile.roam_interval,
            position: origin,
            target: None,
        };
        brain.tick(&profile, &tick, &mut movement, &mut rng);
        let distance = movement.destination.unwrap().distance(origin);
        assert!(distance >= profile.roam_distance_min - 1e-4);
        assert!(distance <= profile.roam_distance_max + 1e-4);
    }
}
