//! Target selection with hysteresis.

use mecha_behavior::{Behavior, Blackboard, NodeError, Status};

use crate::battlefield::Battlefield;
use crate::pilot::keys;

/// Locks the nearest living enemy. A locked target is only replaced when
/// a candidate is clearly closer; dead targets are dropped at once.
///
/// Always succeeds: having no enemy left is not a fault.
pub struct UpdateTarget {
    hysteresis: f64,
}

impl UpdateTarget {
    pub fn new(hysteresis: f64) -> Self {
        Self {
            hysteresis: hysteresis.max(0.0),
        }
    }
}

impl Behavior<Battlefield> for UpdateTarget {
    fn tick(&mut self, ctx: &mut Battlefield, bb: &mut Blackboard) -> Result<Status, NodeError> {
        let pilot = ctx.pilot()?;
        let position = pilot.position();

        let current = match keys::target(bb)? {
            Some(id) => {
                let entry = pilot.enemy(id);
                if entry.is_none() {
                    keys::set_target(bb, None);
                }
                entry
            }
            None => None,
        };

        let Some((best, best_d2)) = pilot.actors.nearest_enemy(pilot.actor.team(), position) else {
            keys::set_target(bb, None);
            return Ok(Status::Success);
        };

        if let Some(current) = current {
            let current_d2 = current.position.distance_squared(position);
            if best_d2 + self.hysteresis * self.hysteresis >= current_d2 {
                return Ok(Status::Success);
            }
        }

        if current.map(|c| c.id) != Some(best.id) {
            tracing::debug!(actor = %pilot.actor.id(), target = %best.id, "target locked");
        }
        keys::set_target(bb, Some(best.id));
        Ok(Status::Success)
    }

    fn name(&self) -> &'static str {
        "update_target"
    }
}
