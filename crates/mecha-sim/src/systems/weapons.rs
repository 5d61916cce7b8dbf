//! Weapon timers: cooldown, reload, pre-delayed shots and bursts.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use crate::actor::Actor;
use crate::index::ActorIndex;
use crate::weapon::Shot;

pub fn run(
    world: &mut World,
    actors: &ActorIndex,
    rng: &mut ChaCha8Rng,
    shots: &mut Vec<Shot>,
    dt: f64,
) {
    for (_entity, actor) in world.query_mut::<&mut Actor>() {
        if actor.is_alive() {
            actor.update_weapons(dt, actors, rng, shots);
        }
    }
}
