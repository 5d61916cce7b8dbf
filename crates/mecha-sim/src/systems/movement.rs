//! Actor state machines: timers, dash, boost and intent movement.

use hecs::World;

use crate::actor::Actor;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, actor) in world.query_mut::<&mut Actor>() {
        actor.update(dt);
    }
}
