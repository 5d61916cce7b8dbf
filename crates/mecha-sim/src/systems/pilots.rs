//! Pilot brains: one behavior-tree tick per living actor.

use hecs::Entity;

use mecha_behavior::TreeExecutor;
use mecha_core::types::ActorId;

use crate::actor::Actor;
use crate::battlefield::Battlefield;
use crate::error::SimError;

/// A spawned actor's decision tree.
pub struct Brain {
    pub entity: Entity,
    pub id: ActorId,
    pub executor: TreeExecutor<Battlefield>,
}

/// Tick every living actor's brain in spawn order. The first node error
/// aborts the pass.
pub fn run(field: &mut Battlefield, brains: &mut [Brain]) -> Result<(), SimError> {
    for brain in brains.iter_mut() {
        let alive = field
            .world
            .get::<&Actor>(brain.entity)
            .map(|a| a.is_alive())
            .unwrap_or(false);
        if !alive {
            continue;
        }

        field.set_focus(Some(brain.entity));
        let result = brain.executor.tick(field);
        field.set_focus(None);

        if let Err(source) = result {
            tracing::debug!(actor = %brain.id, error = %source, "pilot fault");
            return Err(SimError::Pilot {
                actor: brain.id,
                source,
            });
        }
    }
    Ok(())
}
