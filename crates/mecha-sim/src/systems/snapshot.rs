//! Build the externally visible arena state.

use hecs::{Entity, World};

use mecha_core::state::{ActorView, ArenaSnapshot, ProjectileView};
use mecha_core::types::{ActorId, SimTime};

use crate::actor::Actor;
use crate::projectile::Projectile;

/// Snapshot of every actor (sorted by id) and projectile. `target_of`
/// reports each actor's locked target.
pub fn build_snapshot(
    world: &World,
    time: SimTime,
    events: Vec<mecha_core::events::CombatEvent>,
    target_of: impl Fn(Entity) -> Option<ActorId>,
) -> ArenaSnapshot {
    let mut actors: Vec<ActorView> = world
        .query::<&Actor>()
        .iter()
        .map(|(entity, actor)| ActorView {
            id: actor.id(),
            team: actor.team(),
            style: actor.style(),
            position: actor.position(),
            facing: actor.facing(),
            velocity: actor.velocity(),
            health: actor.health(),
            max_health: actor.stats().max_health,
            energy: actor.energy().current(),
            stagger: actor.stagger().current(),
            staggered: actor.is_staggered(),
            dashing: actor.is_dashing(),
            boosting: actor.is_boosting(),
            target: target_of(entity),
        })
        .collect();
    actors.sort_by_key(|a| a.id);

    let projectiles = world
        .query::<&Projectile>()
        .iter()
        .map(|(_entity, p)| ProjectileView {
            position: p.position,
            direction: p.direction,
            speed: p.speed,
            shooter: p.shooter,
            homing: p.is_homing(),
        })
        .collect();

    ArenaSnapshot {
        time,
        actors,
        projectiles,
        events,
    }
}
