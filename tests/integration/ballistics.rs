//! Bomb arcs and blast falloff.

use bevy::prelude::*;
use pretty_assertions::assert_eq;
use skirmish_ai::gameplay::combat::BombTuning;
use skirmish_ai::gameplay::combat::bomb::{ArcFlight, arc_position, falloff_damage};

const TUNING: BombTuning = BombTuning {
    speed: 8.0,
    arc_height: 2.0,
    explosion_radius: 2.0,
    fuse: 3.0,
};

#[test]
fn arc_touches_both_ends_and_peaks_halfway() {
    let launch = Vec2::ZERO;
    let target = Vec2::new(10.0, 0.0);

    assert_eq!(arc_position(launch, target, 0.0, 2.0), launch);
    assert_eq!(arc_position(launch, target, 1.0, 2.0), target);

    let peak = arc_position(launch, target, 0.5, 2.0);
    assert!((peak - Vec2::new(5.0, 2.0)).length() < 1e-4);
}

#[test]
fn blast_is_full_at_centre_and_half_at_edge() {
    assert_eq!(falloff_damage(20, 0.0, 2.0), 20);
    assert_eq!(falloff_damage(20, 2.0, 2.0), 10);
    assert_eq!(falloff_damage(20, 2.5, 2.0), 0);
}

#[test]
fn flight_lands_on_target_after_distance_over_speed() {
    let mut flight = ArcFlight::new(Vec2::ZERO, Vec2::new(10.0, 0.0), &TUNING);
    assert!((flight.flight_duration() - 1.25).abs() < 1e-5);

    assert_eq!(flight.advance(0.5), None);
    assert!(flight.progress() > 0.0 && flight.progress() < 1.0);

    assert_eq!(flight.advance(1.0), Some(Vec2::new(10.0, 0.0)));
}

#[test]
fn fuse_bursts_a_stalled_bomb_in_the_air() {
    let stalled = BombTuning {
        speed: 0.0,
        ..TUNING
    };
    let mut flight = ArcFlight::new(Vec2::ZERO, Vec2::new(10.0, 0.0), &stalled);

    assert_eq!(flight.advance(2.0), None);
    assert_eq!(flight.advance(1.5), Some(Vec2::ZERO));
}
