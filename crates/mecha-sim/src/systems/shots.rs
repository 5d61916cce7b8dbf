//! Turn buffered discharges into projectiles or melee hits.

use hecs::World;

use mecha_core::constants::MELEE_REACH_TOLERANCE;
use mecha_core::events::CombatEvent;
use mecha_core::types::ActorId;

use crate::index::ActorIndex;
use crate::systems::damage::{self, Strike};
use crate::weapon::{Payload, Shot};

pub fn run(
    world: &mut World,
    actors: &ActorIndex,
    shots: &mut Vec<Shot>,
    events: &mut Vec<CombatEvent>,
) {
    for shot in shots.drain(..) {
        events.push(CombatEvent::WeaponFired {
            actor: shot.shooter,
            weapon: shot.weapon,
            muzzle: shot.muzzle,
            direction: shot.direction,
        });
        match shot.payload {
            Payload::Projectile(projectile) => {
                world.spawn((projectile,));
            }
            Payload::Melee {
                target,
                damage,
                impact,
                reach,
            } => resolve_melee(world, actors, shot.shooter, target, damage, impact, reach, events),
        }
    }
}

/// Melee lands instantly if the target is still alive and within reach.
#[allow(clippy::too_many_arguments)]
fn resolve_melee(
    world: &mut World,
    actors: &ActorIndex,
    attacker: ActorId,
    target: ActorId,
    damage: i32,
    impact: f64,
    reach: f64,
    events: &mut Vec<CombatEvent>,
) {
    let (Some(from), Some(victim)) = (actors.get(attacker), actors.alive(target)) else {
        return;
    };
    if from.position.distance(victim.position) > reach + MELEE_REACH_TOLERANCE {
        return;
    }
    damage::apply(
        world,
        Strike {
            attacker,
            target: victim.entity,
            damage,
            impact,
            point: victim.position,
        },
        events,
    );
}
