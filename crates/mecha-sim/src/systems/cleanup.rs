//! End-of-tick cleanup: collect actor notifications, despawn spent
//! projectiles.

use hecs::{Entity, World};

use mecha_core::events::CombatEvent;

use crate::actor::Actor;

pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<CombatEvent>) {
    for (_entity, actor) in world.query_mut::<&mut Actor>() {
        actor.drain_events(events);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
