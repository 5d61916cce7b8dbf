//! Orbit flip when the strafe path would cross a tracked projectile.

use mecha_behavior::{Behavior, Blackboard, NodeError, Status};

use crate::battlefield::Battlefield;
use crate::pilot::keys;
use crate::pilot::profile::PilotProfile;

/// Watches the strafe's desired direction against the tracked threat.
///
/// Enters the threatened state when the paths cross sooner than the enter
/// time, leaves it once the crossing moves past the exit time or
/// disappears. Each entry requests one orbit flip, subject to a re-trigger
/// cooldown. Always Running.
pub struct EvadeToggle {
    enter: f64,
    exit: f64,
    retrigger: f64,
    clearance: f64,
    cooldown: f64,
    threatened: bool,
}

impl EvadeToggle {
    pub fn new(profile: &PilotProfile) -> Self {
        let enter = profile.evade_toggle_enter_tti.max(0.05);
        Self {
            enter,
            exit: profile.evade_toggle_exit_tti.max(enter + 0.05),
            retrigger: profile.evade_toggle_cooldown.max(0.0),
            clearance: profile.evade_clearance,
            cooldown: 0.0,
            threatened: false,
        }
    }

    pub fn is_threatened(&self) -> bool {
        self.threatened
    }
}

impl Behavior<Battlefield> for EvadeToggle {
    fn tick(&mut self, ctx: &mut Battlefield, bb: &mut Blackboard) -> Result<Status, NodeError> {
        let pilot = ctx.pilot()?;
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - pilot.dt).max(0.0);
        }

        let crossing = bb.try_get(keys::DESIRED_DIRECTION)?.and_then(|direction| {
            pilot.sensor.will_path_cross(
                pilot.position(),
                direction,
                pilot.actor.move_speed(),
                self.exit.max(0.1),
                self.clearance,
            )
        });

        if !self.threatened {
            if let Some(crossing) = crossing.filter(|c| c.time < self.enter) {
                if self.cooldown <= 0.0 {
                    bb.set(keys::EVADE_REQUEST, true);
                    self.cooldown = self.retrigger;
                    tracing::trace!(actor = %pilot.actor.id(), time = crossing.time, "path crossing, requesting flip");
                }
                self.threatened = true;
            }
        } else {
            let cleared = match crossing {
                Some(c) => c.time > self.exit,
                None => true,
            };
            if cleared {
                self.threatened = false;
            }
        }

        Ok(Status::Running)
    }

    fn name(&self) -> &'static str {
        "evade_toggle"
    }
}
