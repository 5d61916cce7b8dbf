//! Projectile flight, swept hit detection and expiry.

use hecs::{Entity, World};

use mecha_core::events::CombatEvent;

use crate::index::ActorIndex;
use crate::projectile::{swept_hit, Projectile};
use crate::systems::damage::{self, Strike};

/// Move every projectile, apply hits and queue spent projectiles for
/// despawn.
pub fn run(
    world: &mut World,
    actors: &ActorIndex,
    dt: f64,
    despawn: &mut Vec<Entity>,
    events: &mut Vec<CombatEvent>,
) {
    let mut strikes = Vec::new();

    for (entity, projectile) in world.query_mut::<&mut Projectile>() {
        let target = projectile
            .target
            .and_then(|id| actors.alive(id))
            .map(|t| t.position);
        let from = projectile.advance(dt, target);
        let to = projectile.position;

        let struck = first_contact(actors, projectile, from, to);
        if let Some((t, victim)) = struck {
            strikes.push(Strike {
                attacker: projectile.shooter,
                target: victim,
                damage: projectile.damage,
                impact: projectile.impact,
                point: from.lerp(to, t),
            });
            despawn.push(entity);
        } else if projectile.is_expired() {
            despawn.push(entity);
        }
    }

    for strike in strikes {
        damage::apply(world, strike, events);
    }
}

/// Earliest living enemy the segment `from → to` touches.
fn first_contact(
    actors: &ActorIndex,
    projectile: &Projectile,
    from: glam::DVec2,
    to: glam::DVec2,
) -> Option<(f64, Entity)> {
    actors
        .entries()
        .iter()
        .filter(|e| e.alive && e.team != projectile.team)
        .filter_map(|e| swept_hit(from, to, e.position, e.radius + projectile.radius).map(|t| (t, e.entity)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
}
