use glam::DVec2;

use mecha_behavior::{BlackboardError, BlackboardKey, NodeError};
use mecha_core::blueprint::{MechaBlueprint, ProjectileSpec, WeaponSpec};
use mecha_core::enums::CombatStyle;
use mecha_core::events::CombatEvent;
use mecha_core::state::ArenaSnapshot;
use mecha_core::types::ActorId;

use crate::engine::{SimConfig, SimulationEngine};
use crate::error::{ConfigError, SimError};
use crate::pilot::PilotProfile;
use crate::projectile::{Launch, Projectile};

fn engine(seed: u64) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        seed,
        ..SimConfig::default()
    })
}

fn mecha(team: u8, x: f64, y: f64) -> MechaBlueprint {
    MechaBlueprint {
        name: format!("team{team}"),
        team,
        position: DVec2::new(x, y),
        ..MechaBlueprint::default()
    }
}

fn rifle(attack_power: i32) -> WeaponSpec {
    WeaponSpec {
        attack_power,
        ..WeaponSpec::default()
    }
}

fn shot_at(shooter: ActorId, team: u8, origin: DVec2, direction: DVec2, spec: &ProjectileSpec) -> Projectile {
    Projectile::launch(
        spec,
        Launch {
            shooter,
            team,
            origin,
            direction,
            damage: 10,
            impact: 100.0,
            target: None,
        },
    )
}

fn run(engine: &mut SimulationEngine, ticks: usize) -> Vec<ArenaSnapshot> {
    (0..ticks).map(|_| engine.tick().unwrap()).collect()
}

fn duel(seed: u64) -> SimulationEngine {
    let mut e = engine(seed);
    let profile = PilotProfile::default();
    e.spawn_mecha(&mecha(0, -6.0, 0.0), &profile);
    e.spawn_mecha(&mecha(1, 6.0, 0.0), &profile);
    e
}

#[test]
fn test_same_seed_same_snapshots() {
    let mut a = duel(7);
    let mut b = duel(7);
    for _ in 0..600 {
        let sa = serde_json::to_string(&a.tick().unwrap()).unwrap();
        let sb = serde_json::to_string(&b.tick().unwrap()).unwrap();
        assert_eq!(sa, sb);
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = duel(1);
    let mut b = duel(2);
    let last_a = run(&mut a, 600).pop().unwrap();
    let last_b = run(&mut b, 600).pop().unwrap();
    assert_ne!(last_a.actors, last_b.actors);
}

#[test]
fn test_time_advances_by_scaled_dt() {
    let mut e = SimulationEngine::new(SimConfig {
        seed: 1,
        time_scale: 0.5,
    });
    run(&mut e, 120);
    assert_eq!(e.time().tick, 120);
    assert!((e.time().elapsed_secs - 1.0).abs() < 1e-9);
}

#[test]
fn test_projectile_hits_stationary_drone() {
    let mut e = engine(1);
    let drone = e.spawn_drone(&mecha(1, 5.0, 0.0));
    e.spawn_projectile(shot_at(ActorId(99), 0, DVec2::ZERO, DVec2::X, &ProjectileSpec::default()));

    let hits: Vec<CombatEvent> = run(&mut e, 60)
        .into_iter()
        .flat_map(|s| s.events)
        .filter(|ev| matches!(ev, CombatEvent::Hit { .. }))
        .collect();
    assert_eq!(hits.len(), 1);
    let CombatEvent::Hit {
        target,
        damage,
        point,
        ..
    } = &hits[0]
    else {
        unreachable!()
    };
    assert_eq!(*target, drone);
    assert_eq!(*damage, 10);
    // Contact on the near side of the hull.
    assert!(point.x < 5.0 && point.x > 4.0);

    let snapshot = e.snapshot();
    assert_eq!(snapshot.actors[0].health, 90);
    assert!(snapshot.projectiles.is_empty());
}

#[test]
fn test_friendly_projectile_passes_through() {
    let mut e = engine(1);
    e.spawn_drone(&mecha(1, 5.0, 0.0));
    e.spawn_projectile(shot_at(ActorId(99), 1, DVec2::ZERO, DVec2::X, &ProjectileSpec::default()));

    let snapshots = run(&mut e, 60);
    assert!(snapshots
        .iter()
        .flat_map(|s| &s.events)
        .all(|ev| !matches!(ev, CombatEvent::Hit { .. })));
    assert_eq!(e.snapshot().actors[0].health, 100);
}

#[test]
fn test_projectile_expires() {
    let mut e = engine(1);
    e.spawn_projectile(shot_at(ActorId(99), 0, DVec2::ZERO, DVec2::X, &ProjectileSpec::default()));
    run(&mut e, 10);
    assert_eq!(e.snapshot().projectiles.len(), 1);
    // Lifetime is 3 s.
    run(&mut e, 180);
    assert!(e.snapshot().projectiles.is_empty());
}

#[test]
fn test_pilot_locks_nearest_with_hysteresis() {
    let mut e = engine(3);
    let pilot = e.spawn_mecha(&mecha(0, 0.0, 0.0), &PilotProfile::default());
    let far = e.spawn_drone(&mecha(1, 6.0, 0.0));
    e.tick().unwrap();
    assert_eq!(e.target_of(pilot), Some(far));

    // Slightly closer is not enough to switch.
    let near = e.spawn_drone(&mecha(1, -5.8, 0.0));
    e.tick().unwrap();
    assert_eq!(e.target_of(pilot), Some(far));

    e.actor_mut(near).unwrap().set_position(DVec2::new(-2.0, 0.0));
    let snapshot = e.tick().unwrap();
    assert_eq!(e.target_of(pilot), Some(near));
    let view = snapshot.actors.iter().find(|a| a.id == pilot).unwrap();
    assert_eq!(view.target, Some(near));
}

#[test]
fn test_pilot_approaches_distant_enemy() {
    let mut e = engine(3);
    let pilot = e.spawn_mecha(&mecha(0, 0.0, 0.0), &PilotProfile::default());
    e.spawn_drone(&mecha(1, 30.0, 0.0));
    let snapshots = run(&mut e, 60);
    let view = snapshots
        .last()
        .unwrap()
        .actors
        .iter()
        .find(|a| a.id == pilot)
        .unwrap()
        .clone();
    assert!(view.position.x > 1.0);
    assert!(view.position.y.abs() < 1e-6);
}

#[test]
fn test_pilot_idles_without_enemies() {
    let mut e = engine(3);
    let pilot = e.spawn_mecha(&mecha(0, 0.0, 0.0), &PilotProfile::default());
    let snapshot = run(&mut e, 30).pop().unwrap();
    assert_eq!(snapshot.actors[0].position, DVec2::ZERO);
    assert_eq!(e.target_of(pilot), None);
}

#[test]
fn test_melee_pilot_strikes_adjacent_enemy() {
    let mut e = engine(5);
    let blueprint = MechaBlueprint {
        style: CombatStyle::Melee,
        weapons: vec![WeaponSpec::melee("blade", 1.5)],
        ..mecha(0, 0.0, 0.0)
    };
    let pilot = e.spawn_mecha(&blueprint, &PilotProfile::default());
    let drone = e.spawn_drone(&mecha(1, 1.0, 0.0));

    let events: Vec<CombatEvent> = run(&mut e, 30).into_iter().flat_map(|s| s.events).collect();
    assert!(events.iter().any(|ev| matches!(
        ev,
        CombatEvent::WeaponFired { actor, .. } if *actor == pilot
    )));
    assert!(events.iter().any(|ev| matches!(
        ev,
        CombatEvent::Hit { attacker, target, damage: 25, .. } if *attacker == pilot && *target == drone
    )));
    // Melee spawns no projectile.
    assert!(e.snapshot().projectiles.is_empty());
}

#[test]
fn test_pilot_dashes_away_from_high_threat() {
    let mut e = engine(9);
    let pilot = e.spawn_mecha(&mecha(0, 0.0, 0.0), &PilotProfile::default());
    let enemy = e.spawn_drone(&mecha(1, 6.0, 0.0));
    let missile = ProjectileSpec {
        speed: 20.0,
        high_threat: true,
        ..ProjectileSpec::default()
    };
    e.spawn_projectile(shot_at(enemy, 1, DVec2::new(0.0, 4.0), -DVec2::Y, &missile));

    let dash = run(&mut e, 30)
        .into_iter()
        .flat_map(|s| s.events)
        .find_map(|ev| match ev {
            CombatEvent::DashStarted { actor, direction, .. } if actor == pilot => Some(direction),
            _ => None,
        })
        .expect("pilot should dash");
    // Sideways relative to the incoming shot.
    assert!(dash.y.abs() < 1e-9);
    assert!((dash.x.abs() - 1.0).abs() < 1e-9);
}

#[test]
fn test_ranged_duel_ends_with_one_team() {
    let mut e = engine(11);
    let profile = PilotProfile::default();
    for (team, x) in [(0, -7.0), (1, 7.0)] {
        let blueprint = MechaBlueprint {
            weapons: vec![rifle(25)],
            ..mecha(team, x, 0.0)
        };
        e.spawn_mecha(&blueprint, &profile);
    }

    let mut fired = 0;
    let mut hits = 0;
    let mut destroyed = 0;
    for _ in 0..60 * 120 {
        let snapshot = e.tick().unwrap();
        for ev in &snapshot.events {
            match ev {
                CombatEvent::WeaponFired { .. } => fired += 1,
                CombatEvent::Hit { .. } => hits += 1,
                CombatEvent::ActorDestroyed { .. } => destroyed += 1,
                _ => {}
            }
        }
        if snapshot.teams_alive().len() <= 1 {
            break;
        }
    }
    assert!(e.snapshot().teams_alive().len() <= 1);
    assert!(destroyed >= 1);
    assert!(hits >= 4);
    assert!(fired >= hits);
}

#[test]
fn test_destroyed_actor_stays_and_stops_acting() {
    let mut e = engine(1);
    let drone = e.spawn_drone(&mecha(1, 5.0, 0.0));
    e.actor_mut(drone).unwrap().take_damage(1000, 0.0);
    let snapshot = e.tick().unwrap();
    assert_eq!(snapshot.actors.len(), 1);
    assert_eq!(snapshot.actors[0].health, 0);
    assert!(snapshot
        .events
        .iter()
        .any(|ev| matches!(ev, CombatEvent::ActorDestroyed { actor } if *actor == drone)));
    assert!(snapshot.teams_alive().is_empty());
}

#[test]
fn test_corrupt_blackboard_surfaces_pilot_error() {
    let mut e = engine(1);
    let pilot = e.spawn_mecha(&mecha(0, 0.0, 0.0), &PilotProfile::default());
    e.spawn_drone(&mecha(1, 6.0, 0.0));
    e.blackboard_mut(pilot)
        .unwrap()
        .set(BlackboardKey::<bool>::new("target"), true);

    let err = e.tick().unwrap_err();
    let SimError::Pilot { actor, source } = err else {
        panic!("expected a pilot error, got {err:?}");
    };
    assert_eq!(actor, pilot);
    assert!(matches!(
        source,
        NodeError::Blackboard(BlackboardError::TypeMismatch { key: "target", .. })
    ));
}

#[test]
fn test_sim_config_json() {
    let config = SimConfig::from_json(r#"{"seed": 9}"#).unwrap();
    assert_eq!(config.seed, 9);
    assert_eq!(config.time_scale, 1.0);

    assert!(matches!(
        SimConfig::from_json(r#"{"time_scale": -1.0}"#),
        Err(ConfigError::TimeScale(_))
    ));
    assert!(matches!(
        SimConfig::from_json("{"),
        Err(ConfigError::Json { what: "sim config", .. })
    ));
}

#[test]
fn test_pilot_profile_json_fills_defaults() {
    let profile = PilotProfile::from_json(r#"{"boost_gap": 6.0, "sensor": {"sense_radius": 20.0}}"#).unwrap();
    let defaults = PilotProfile::default();
    assert_eq!(profile.boost_gap, 6.0);
    assert_eq!(profile.sensor.sense_radius, 20.0);
    assert_eq!(profile.sensor.scan_interval, defaults.sensor.scan_interval);
    assert_eq!(profile.target_hysteresis, defaults.target_hysteresis);
}

#[test]
fn test_spawn_from_json() {
    let mut e = engine(1);
    let id = e
        .spawn_from_json(r#"{"team": 2, "position": [3.0, 4.0]}"#, "{}")
        .unwrap();
    let view = e.snapshot().actors.into_iter().find(|a| a.id == id).unwrap();
    assert_eq!(view.team, 2);
    assert_eq!(view.position, DVec2::new(3.0, 4.0));

    let err = e.spawn_from_json("[]", "{}").unwrap_err();
    assert!(matches!(
        err,
        SimError::Config(ConfigError::Json { what: "blueprint", .. })
    ));
}
