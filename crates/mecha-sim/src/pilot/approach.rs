//! Close the distance to the target.

use mecha_behavior::{Behavior, Blackboard, NodeError, Status};

use crate::battlefield::Battlefield;
use crate::pilot::keys;

/// Walks toward the target until inside the longest weapon range, minus a
/// small hysteresis margin.
pub struct MoveToTarget {
    stop_distance: f64,
}

impl MoveToTarget {
    pub fn new(stop_distance: f64) -> Self {
        Self {
            stop_distance: stop_distance.max(0.0),
        }
    }
}

impl Behavior<Battlefield> for MoveToTarget {
    fn tick(&mut self, ctx: &mut Battlefield, bb: &mut Blackboard) -> Result<Status, NodeError> {
        let pilot = ctx.pilot()?;
        let Some(target) = keys::target(bb)?.and_then(|id| pilot.enemy(id)) else {
            return Ok(Status::Failure);
        };

        let stop = pilot
            .actor
            .longest_range()
            .map_or(self.stop_distance, |r| r.max(self.stop_distance));
        let eps = (stop * 0.05).max(0.1);
        if pilot.position().distance(target.position) <= stop - eps {
            return Ok(Status::Success);
        }

        pilot.actor.move_towards(target.position);
        Ok(Status::Running)
    }

    fn name(&self) -> &'static str {
        "move_to_target"
    }
}
