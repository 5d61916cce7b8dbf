use glam::DVec2;

use crate::blueprint::{MechaBlueprint, WeaponSpec};
use crate::enums::*;
use crate::events::CombatEvent;
use crate::stats::{MechaStats, Part, PartModifiers, SpeedCurve};
use crate::types::{self, ActorId, SimTime};

fn part(modifiers: PartModifiers) -> Part {
    Part {
        name: "test".into(),
        slot: PartSlot::Core,
        modifiers,
    }
}

#[test]
fn test_combat_style_serde() {
    for v in [CombatStyle::Melee, CombatStyle::Ranged] {
        let json = serde_json::to_string(&v).unwrap();
        let back: CombatStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}

#[test]
fn test_event_is_tagged() {
    let event = CombatEvent::DashStarted {
        actor: ActorId(3),
        direction: DVec2::X,
        duration: 0.15,
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"DashStarted\""));
    let back: CombatEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(event, back);
}

#[test]
fn test_sim_time_advance() {
    let mut t = SimTime::default();
    for _ in 0..60 {
        t.advance(t.dt());
    }
    assert_eq!(t.tick, 60);
    assert!((t.elapsed_secs - 1.0).abs() < 1e-9);
}

#[test]
fn test_rotate_towards_respects_limit() {
    let out = types::rotate_towards(DVec2::X, DVec2::Y, 45f64.to_radians());
    assert!((types::angle_between_deg(DVec2::X, out) - 45.0).abs() < 1e-9);
    assert!(out.y > 0.0);

    let snapped = types::rotate_towards(DVec2::X, DVec2::Y, 100f64.to_radians());
    assert!((snapped - DVec2::Y).length() < 1e-9);

    let clockwise = types::rotate_towards(DVec2::X, DVec2::NEG_Y, 10f64.to_radians());
    assert!(clockwise.y < 0.0);
}

#[test]
fn test_angle_between_zero_vector() {
    assert_eq!(types::angle_between_deg(DVec2::ZERO, DVec2::X), 0.0);
    assert!((types::angle_between_deg(DVec2::X, DVec2::NEG_X) - 180.0).abs() < 1e-9);
}

#[test]
fn test_speed_curve_ease() {
    let curve = SpeedCurve::ease_in_out(0.0, 0.3, 1.0, 0.1);
    assert!((curve.evaluate(0.0) - 0.3).abs() < 1e-12);
    assert!((curve.evaluate(1.0) - 0.1).abs() < 1e-12);
    assert!((curve.evaluate(0.5) - 0.2).abs() < 1e-12);
    assert!((curve.evaluate(-1.0) - 0.3).abs() < 1e-12);
    assert!((curve.evaluate(2.0) - 0.1).abs() < 1e-12);
    assert_eq!(SpeedCurve { keys: vec![] }.evaluate(0.4), 1.0);
}

#[test]
fn test_parts_additive_caps() {
    let base = MechaStats::default();
    let armor = part(PartModifiers {
        max_health: 40,
        max_energy: 20.0,
        ..Default::default()
    });
    let stats = base.with_parts([&armor, &armor]);
    assert_eq!(stats.max_health, base.max_health + 80);
    assert!((stats.max_energy - (base.max_energy + 40.0)).abs() < 1e-9);
}

#[test]
fn test_parts_multiplicative_sum_deltas() {
    let base = MechaStats::default();
    let legs = part(PartModifiers {
        move_speed: 0.2,
        ..Default::default()
    });
    let booster = part(PartModifiers {
        move_speed: 0.1,
        ..Default::default()
    });
    let stats = base.with_parts([&legs, &booster]);
    assert!((stats.move_speed - base.move_speed * 1.3).abs() < 1e-9);
}

#[test]
fn test_parts_minimum_of_wins() {
    let base = MechaStats::default();
    let slow = part(PartModifiers {
        dash_cooldown: Some(1.5),
        ..Default::default()
    });
    let fast = part(PartModifiers {
        dash_cooldown: Some(0.6),
        dash_energy_cost: Some(12.0),
        ..Default::default()
    });
    let stats = base.with_parts([&slow, &fast]);
    assert!((stats.dash_cooldown - 0.6).abs() < 1e-9);
    assert!((stats.dash_energy_cost - 12.0).abs() < 1e-9);
    // A slower part never raises the base.
    let only_slow = base.with_parts([&slow]);
    assert!((only_slow.dash_cooldown - base.dash_cooldown).abs() < 1e-9);
}

#[test]
fn test_parts_additive_distance() {
    let base = MechaStats::default();
    let thruster = part(PartModifiers {
        dash_distance: 1.0,
        stagger_duration: -0.5,
        ..Default::default()
    });
    let stats = base.with_parts([&thruster]);
    assert!((stats.dash_distance - (base.dash_distance + 1.0)).abs() < 1e-9);
    assert!((stats.stagger_duration - (base.stagger_duration - 0.5)).abs() < 1e-9);
}

#[test]
fn test_blueprint_from_json_defaults() {
    let bp = MechaBlueprint::from_json(r#"{ "name": "scout", "team": 1, "style": "Melee" }"#)
        .unwrap();
    assert_eq!(bp.name, "scout");
    assert_eq!(bp.team, 1);
    assert_eq!(bp.style, CombatStyle::Melee);
    assert_eq!(bp.stats, MechaStats::default());
    assert_eq!(bp.weapons.len(), 1);
}

#[test]
fn test_blueprint_rejects_garbage() {
    assert!(MechaBlueprint::from_json("{ \"team\": \"red\" }").is_err());
}

#[test]
fn test_melee_spec_has_no_projectile() {
    let blade = WeaponSpec::melee("blade", 1.6);
    assert_eq!(blade.kind, WeaponKind::Melee);
    assert!(blade.projectile.is_none());
    assert!(!blade.is_homing());
}
