//! Threat sensor scans.

use hecs::{Entity, World};

use crate::actor::Actor;
use crate::projectile::Projectile;
use crate::sensor::{Observer, ThreatSensor};

/// Count every sensor down and scan the ones that are due.
pub fn run(world: &mut World, dt: f64) {
    let mut due: Vec<(Entity, Observer)> = Vec::new();
    for (entity, (actor, sensor)) in world.query_mut::<(&Actor, &mut ThreatSensor)>() {
        if sensor.tick(dt) && actor.is_alive() {
            due.push((
                entity,
                Observer {
                    team: actor.team(),
                    position: actor.position(),
                    velocity: actor.velocity(),
                    radius: actor.stats().collision_radius,
                },
            ));
        }
    }
    if due.is_empty() {
        return;
    }

    let mut query = world.query::<&Projectile>();
    let projectiles: Vec<(Entity, &Projectile)> = query.iter().collect();
    for (entity, observer) in due {
        if let Ok(mut sensor) = world.get::<&mut ThreatSensor>(entity) {
            sensor.scan(&observer, projectiles.iter().copied());
        }
    }
}
