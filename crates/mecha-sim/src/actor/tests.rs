use glam::DVec2;

use mecha_core::blueprint::{MechaBlueprint, WeaponSpec};
use mecha_core::enums::{CombatStyle, PartSlot};
use mecha_core::events::CombatEvent;
use mecha_core::stats::{Part, PartModifiers};
use mecha_core::types::ActorId;

use super::*;

const DT: f64 = 1.0 / 60.0;

fn actor() -> Actor {
    Actor::new(ActorId(1), &MechaBlueprint::default())
}

fn events(actor: &mut Actor) -> Vec<CombatEvent> {
    let mut out = Vec::new();
    actor.drain_events(&mut out);
    out
}

#[test]
fn test_three_hits_cap_stagger() {
    let mut a = actor();
    assert_eq!(a.stats().max_stagger, 1000.0);
    a.take_damage(5, 400.0);
    a.take_damage(5, 400.0);
    assert!(!a.is_staggered());
    let report = a.take_damage(5, 400.0);
    assert!(report.staggered);
    assert!(a.is_staggered());
    assert_eq!(a.stagger().current(), 1000.0);
    assert_eq!(a.stagger_progress(), 1.0);
    assert!(events(&mut a)
        .iter()
        .any(|e| matches!(e, CombatEvent::StaggerEntered { .. })));
}

#[test]
fn test_staggered_damage_multiplier() {
    let mut a = actor();
    a.take_damage(0, 1000.0);
    assert!(a.is_staggered());
    let report = a.take_damage(10, 0.0);
    assert_eq!(report.dealt, 15);
    assert_eq!(a.health(), 85);
}

#[test]
fn test_health_clamped_and_destroyed_once() {
    let mut a = actor();
    let report = a.take_damage(250, 0.0);
    assert_eq!(report.dealt, 100);
    assert!(report.destroyed);
    assert_eq!(a.health(), 0);
    assert!(!a.is_alive());
    assert_eq!(a.take_damage(10, 0.0), DamageReport::default());
    let destroyed = events(&mut a)
        .iter()
        .filter(|e| matches!(e, CombatEvent::ActorDestroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);
}

#[test]
fn test_dash_without_energy_does_not_mutate() {
    let mut a = actor();
    a.energy_mut().set_current(10.0);
    assert!(!a.try_dash(DVec2::X));
    assert_eq!(a.energy().current(), 10.0);
    assert!(!a.is_dashing());
    assert!(events(&mut a).is_empty());
}

#[test]
fn test_dash_refused_while_staggered_or_lagging() {
    let mut a = actor();
    a.take_damage(0, 1000.0);
    assert!(!a.try_dash(DVec2::X));
    assert_eq!(a.energy().current(), a.energy().max());

    let mut b = actor();
    b.apply_start_lag(0.5);
    assert!(!b.try_dash(DVec2::X));
    assert_eq!(b.energy().current(), b.energy().max());
}

#[test]
fn test_dash_travels_distance_then_cools_down() {
    let mut a = actor();
    assert!(a.try_dash(DVec2::X));
    assert!(!a.try_dash(DVec2::X));
    assert_eq!(a.energy().current(), 80.0);

    let mut ticks = 0;
    while a.is_dashing() {
        a.update(DT);
        ticks += 1;
        assert!(ticks < 600);
    }
    assert!((a.position().x - a.stats().dash_distance).abs() < 1e-6);
    // The cooldown outlasts the dash itself.
    assert!(a.dash().on_cooldown());

    let evs = events(&mut a);
    assert!(matches!(evs[0], CombatEvent::DashStarted { .. }));
    assert!(evs
        .iter()
        .any(|e| matches!(e, CombatEvent::DashThrusterTick { .. })));
}

#[test]
fn test_dash_cancels_boost() {
    let mut a = actor();
    assert!(a.try_start_assault_boost());
    assert!(a.is_boosting());
    assert!(a.try_dash(DVec2::Y));
    assert!(!a.is_boosting());
    assert!(!a.try_start_assault_boost());
}

#[test]
fn test_stagger_stops_boost_and_dash() {
    let mut a = actor();
    a.try_start_assault_boost();
    a.take_damage(0, 1000.0);
    assert!(!a.is_boosting());
    assert!(!a.is_dashing());
    assert!(!a.move_in_direction(DVec2::X, true));
    assert!(!a.face_towards(DVec2::new(0.0, 5.0)));
}

#[test]
fn test_boost_ramps_continuously() {
    let mut a = actor();
    a.try_start_assault_boost();
    let mut last = a.boost_multiplier();
    for _ in 0..60 {
        a.update(DT);
        let m = a.boost_multiplier();
        assert!(m >= last && m - last < 0.1);
        last = m;
    }
    assert!((last - a.stats().boost_max_multiplier).abs() < 1e-9);

    a.stop_assault_boost();
    a.update(DT);
    assert!(a.boost_multiplier() < last);
    assert!(a.boost_multiplier() > 1.0);
}

#[test]
fn test_boost_stops_on_exhaustion() {
    let mut a = actor();
    a.energy_mut().set_current(16.0);
    assert!(a.try_start_assault_boost());
    for _ in 0..30 {
        a.update(DT);
    }
    assert!(!a.is_boosting());
    assert!(events(&mut a)
        .iter()
        .any(|e| matches!(e, CombatEvent::BoostStopped { .. })));
}

#[test]
fn test_stagger_recovers_after_duration() {
    let mut a = actor();
    a.take_damage(0, 1000.0);
    let duration = a.stats().stagger_duration;
    let ticks = (duration / DT).ceil() as usize + 1;
    for _ in 0..ticks {
        a.update(DT);
    }
    assert!(!a.is_staggered());
    assert_eq!(a.stagger().current(), 0.0);
    assert!(events(&mut a)
        .iter()
        .any(|e| matches!(e, CombatEvent::StaggerRecovered { .. })));
}

#[test]
fn test_move_accelerates_to_speed() {
    let mut a = actor();
    for _ in 0..120 {
        a.move_in_direction(DVec2::X, true);
        a.update(DT);
    }
    assert!((a.velocity().x - a.stats().move_speed).abs() < 1e-6);
    assert!(a.velocity().y.abs() < 1e-9);
}

#[test]
fn test_start_lag_blocks_movement() {
    let mut a = actor();
    a.apply_start_lag(0.5);
    assert!(!a.move_in_direction(DVec2::X, true));
    for _ in 0..40 {
        a.update(DT);
    }
    assert!(a.move_in_direction(DVec2::X, true));
}

#[test]
fn test_turn_rate_limits_facing() {
    let mut a = actor();
    a.set_position(DVec2::ZERO);
    assert_eq!(a.facing(), DVec2::X);
    a.face_towards(DVec2::new(-5.0, 0.0));
    a.update(DT);
    let turned = mecha_core::types::angle_between_deg(DVec2::X, a.facing());
    assert!((turned - a.stats().turn_rate * DT).abs() < 1e-6);
}

#[test]
fn test_weapons_for_style_ordering() {
    let blueprint = MechaBlueprint {
        weapons: vec![
            WeaponSpec {
                name: "rifle".into(),
                range: 8.0,
                ..WeaponSpec::default()
            },
            WeaponSpec::melee("blade", 1.5),
            WeaponSpec {
                name: "sniper".into(),
                range: 15.0,
                ..WeaponSpec::default()
            },
            WeaponSpec::melee("spear", 2.5),
        ],
        ..MechaBlueprint::default()
    };
    let a = Actor::new(ActorId(1), &blueprint);
    let names = |order: Vec<usize>| -> Vec<String> {
        order
            .into_iter()
            .map(|i| a.weapons()[i].spec().name.clone())
            .collect()
    };

    assert_eq!(
        names(a.weapons_for_style(CombatStyle::Ranged, false)),
        ["sniper", "rifle"]
    );
    assert_eq!(
        names(a.weapons_for_style(CombatStyle::Melee, false)),
        ["blade", "spear", "rifle", "sniper"]
    );
    assert_eq!(
        names(a.weapons_for_style(CombatStyle::Ranged, true)),
        ["blade", "spear", "sniper", "rifle"]
    );
}

#[test]
fn test_parts_recompute_stats() {
    let mut a = actor();
    let legs = Part {
        name: "sprint legs".into(),
        slot: PartSlot::Legs,
        modifiers: PartModifiers {
            move_speed: 0.2,
            max_energy: 50.0,
            ..PartModifiers::default()
        },
    };
    a.attach_part(legs);
    assert!((a.stats().move_speed - 3.5 * 1.2).abs() < 1e-9);
    assert_eq!(a.energy().max(), 150.0);

    assert!(a.detach_part("sprint legs").is_some());
    assert!(a.detach_part("sprint legs").is_none());
    assert_eq!(a.stats().move_speed, 3.5);
    assert_eq!(a.energy().max(), 100.0);
}
