//! Fire every weapon at the locked target.

use mecha_behavior::{Behavior, Blackboard, NodeError, Status};
use mecha_core::constants::ATTACK_RANGE_TOLERANCE;

use crate::battlefield::Battlefield;
use crate::pilot::keys;
use crate::prediction::first_order_intercept;

/// Faces the target and tries each weapon in turn. Straight-flying
/// weapons aim at the first-order intercept point; homing and melee
/// weapons aim at the target directly.
///
/// Running while the target is within range (cooldowns included), so a
/// parallel parent keeps it alive between shots.
pub struct Attack {
    max_range: f64,
}

impl Attack {
    /// `max_range <= 0` uses the longest weapon range.
    pub fn new(max_range: f64) -> Self {
        Self {
            max_range: max_range.max(0.0),
        }
    }
}

impl Behavior<Battlefield> for Attack {
    fn tick(&mut self, ctx: &mut Battlefield, bb: &mut Blackboard) -> Result<Status, NodeError> {
        let pilot = ctx.pilot()?;
        let Some(target) = keys::target(bb)?.and_then(|id| pilot.enemy(id)) else {
            return Ok(Status::Failure);
        };

        let position = pilot.position();
        let distance = position.distance(target.position);
        let max_range = if self.max_range > 0.0 {
            self.max_range
        } else {
            pilot.actor.longest_range().unwrap_or(0.0)
        };
        if max_range > 0.0 && distance > max_range + ATTACK_RANGE_TOLERANCE {
            return Ok(Status::Failure);
        }

        let direct = (target.position - position).try_normalize();
        if let Some(aim) = direct {
            pilot.actor.face_towards(position + aim * 2.0);
        }

        for i in 0..pilot.actor.weapons().len() {
            let lead = pilot.actor.weapons()[i]
                .lead_speed()
                .and_then(|speed| {
                    first_order_intercept(position, speed, target.position, target.velocity)
                })
                .map(|solution| solution.direction);
            let aim = lead.or(direct).unwrap_or(pilot.actor.facing());
            pilot
                .actor
                .try_attack_with(i, Some(target), aim, &mut *pilot.rng, &mut *pilot.shots);
        }

        Ok(Status::Running)
    }

    fn name(&self) -> &'static str {
        "attack"
    }
}
