//! Blackboard keys shared by the pilot actions.

use glam::DVec2;

use mecha_behavior::{Blackboard, BlackboardError, BlackboardKey};
use mecha_core::types::ActorId;

/// Locked enemy, stored as its raw [`ActorId`].
pub const TARGET: BlackboardKey<u64> = BlackboardKey::new("target");
/// Movement direction the strafe chose this tick.
pub const DESIRED_DIRECTION: BlackboardKey<DVec2> = BlackboardKey::new("desired_direction");
/// Set by the evade toggle; consumed by the strafe as an orbit flip.
pub const EVADE_REQUEST: BlackboardKey<bool> = BlackboardKey::new("evade_request");
/// Direction of the last evasive dash; consumed by the strafe.
pub const LAST_EVADE_DASH: BlackboardKey<DVec2> = BlackboardKey::new("last_evade_dash");

pub fn target(bb: &Blackboard) -> Result<Option<ActorId>, BlackboardError> {
    Ok(bb.try_get(TARGET)?.map(|raw| ActorId(raw as u32)))
}

pub fn set_target(bb: &mut Blackboard, target: Option<ActorId>) {
    match target {
        Some(id) => bb.set(TARGET, u64::from(id.0)),
        None => {
            bb.remove(TARGET);
        }
    }
}
