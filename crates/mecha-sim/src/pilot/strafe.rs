//! Range-keeping strafe.
//!
//! Orbits the target while holding the range of the preferred
//! range-keeping weapon. The movement blends a tangential (orbit) and a
//! radial (close or open distance) component; the radial share grows with
//! the range error. Inside the desired range a dead-zone keeps the pilot
//! from backing off over small errors.
//!
//! The orbit direction flips on a random timer, immediately on an evade
//! request (rate limited), and realigns with the last evasive dash so the
//! pilot keeps moving the way it just dodged.

use glam::DVec2;
use rand::Rng;

use mecha_behavior::{Behavior, Blackboard, NodeError, Status};
use mecha_core::constants::{DASH_REACH_MAX_FACTOR, DASH_REACH_MIN_FACTOR, DEFAULT_DESIRED_RANGE};

use crate::actor::Actor;
use crate::battlefield::Battlefield;
use crate::pilot::keys;
use crate::pilot::profile::PilotProfile;

pub struct MaintainRangeStrafe {
    orbit_weight: f64,
    margin: f64,
    min_toggle: f64,
    max_toggle: f64,
    evade_min_interval: f64,
    boost_gap: f64,
    sign: f64,
    toggle_timer: f64,
    toggle_wait: Option<f64>,
    since_evade: f64,
}

impl MaintainRangeStrafe {
    pub fn new(profile: &PilotProfile) -> Self {
        Self {
            orbit_weight: profile.orbit_weight.clamp(0.0, 1.0),
            margin: profile.range_margin.max(0.0),
            min_toggle: profile.min_toggle_time,
            max_toggle: profile.max_toggle_time,
            evade_min_interval: profile.evade_min_interval,
            boost_gap: profile.boost_gap,
            sign: 1.0,
            toggle_timer: 0.0,
            toggle_wait: None,
            since_evade: f64::INFINITY,
        }
    }

    /// Current orbit direction: `1` counter-clockwise, `-1` clockwise.
    pub fn orbit_sign(&self) -> f64 {
        self.sign
    }

    fn draw_wait(&self, rng: &mut impl Rng) -> f64 {
        if self.max_toggle > self.min_toggle {
            rng.gen_range(self.min_toggle..self.max_toggle)
        } else {
            self.min_toggle
        }
    }

    fn flip(&mut self, rng: &mut impl Rng) {
        self.sign = -self.sign;
        self.toggle_timer = 0.0;
        self.toggle_wait = Some(self.draw_wait(rng));
    }

    /// Blend of orbit and radial motion for the given geometry.
    pub fn desired_direction(&self, to_target: DVec2, desired_range: f64) -> Option<DVec2> {
        let dist = to_target.length();
        if dist <= f64::EPSILON {
            return None;
        }
        let toward = to_target / dist;
        let tangent = toward.perp() * self.sign;

        let inside = (desired_range - dist).max(0.0);
        let dead_zone = self.margin.max(desired_range * 0.1);
        let (radial, error) = if dist >= desired_range {
            (toward, dist - desired_range)
        } else if inside > dead_zone {
            (-toward, inside - dead_zone)
        } else {
            (-toward, 0.0)
        };

        let w_radial = (error / self.margin.max(1e-3)).clamp(0.0, 1.0);
        let w_tangent = 1.0 - self.orbit_weight * w_radial;
        let blended = tangent * w_tangent + radial * w_radial;
        if blended.length_squared() <= 1e-6 {
            return Some(tangent);
        }
        Some(blended.normalize())
    }
}

/// Range of the first range-keeping weapon in firing order, else the first
/// weapon, else the default.
pub fn desired_range(actor: &Actor, target_staggered: bool) -> f64 {
    let order = actor.weapons_for_style(actor.style(), target_staggered);
    let weapons = actor.weapons();
    order
        .iter()
        .map(|&i| &weapons[i])
        .find(|w| w.spec().range_keeping)
        .or_else(|| order.first().map(|&i| &weapons[i]))
        .map(|w| w.range())
        .filter(|r| *r > 0.0)
        .unwrap_or(DEFAULT_DESIRED_RANGE)
}

impl Behavior<Battlefield> for MaintainRangeStrafe {
    fn tick(&mut self, ctx: &mut Battlefield, bb: &mut Blackboard) -> Result<Status, NodeError> {
        let pilot = ctx.pilot()?;
        let Some(target) = keys::target(bb)?.and_then(|id| pilot.enemy(id)) else {
            return Ok(Status::Failure);
        };
        if self.toggle_wait.is_none() {
            self.toggle_wait = Some(self.draw_wait(&mut *pilot.rng));
        }

        if bb.get_or_default(keys::EVADE_REQUEST) {
            bb.set(keys::EVADE_REQUEST, false);
            if self.since_evade >= self.evade_min_interval {
                self.flip(&mut *pilot.rng);
                self.since_evade = 0.0;
                tracing::trace!(actor = %pilot.actor.id(), "orbit flipped to evade");
            }
        }

        let position = pilot.position();
        let to_target = target.position - position;

        if let Some(dash) = bb.try_get(keys::LAST_EVADE_DASH)? {
            bb.remove(keys::LAST_EVADE_DASH);
            let tangent = to_target.perp();
            if tangent.dot(dash).abs() > 1e-9 {
                self.sign = tangent.dot(dash).signum();
                self.toggle_timer = 0.0;
            }
        }

        let range = desired_range(pilot.actor, target.staggered);
        let Some(direction) = self.desired_direction(to_target, range) else {
            return Ok(Status::Running);
        };
        bb.set(keys::DESIRED_DIRECTION, direction);

        pilot.actor.move_in_direction(direction, false);
        pilot.actor.face_towards(target.position);

        let dt = pilot.dt;
        self.toggle_timer += dt;
        self.since_evade += dt;
        if self.toggle_wait.is_some_and(|wait| self.toggle_timer > wait) {
            self.flip(&mut *pilot.rng);
        }

        // Gap closing: boost for long gaps, a dash for short ones when the
        // boost is not available.
        let gap = to_target.length() - range;
        let actor = &mut *pilot.actor;
        if actor.is_boosting() {
            if gap <= self.margin {
                actor.stop_assault_boost();
            }
        } else if gap > self.boost_gap && actor.try_start_assault_boost() {
            tracing::trace!(actor = %actor.id(), gap, "boosting to close range");
        } else if !actor.can_start_assault_boost() && gap > self.margin {
            let reach = actor.stats().dash_distance;
            let reachable = gap > reach * DASH_REACH_MIN_FACTOR && gap <= reach * DASH_REACH_MAX_FACTOR;
            if let Some(dir) = to_target.try_normalize().filter(|_| reachable) {
                actor.try_dash(dir);
            }
        }

        Ok(Status::Running)
    }

    fn name(&self) -> &'static str {
        "maintain_range_strafe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strafe() -> MaintainRangeStrafe {
        MaintainRangeStrafe::new(&PilotProfile::default())
    }

    #[test]
    fn test_far_outside_range_mostly_closes() {
        let s = strafe();
        let dir = s.desired_direction(DVec2::new(20.0, 0.0), 8.0).unwrap();
        // Full radial weight: orbit share drops to 1 - 0.8.
        assert!(dir.x > 0.9);
        assert!(dir.y > 0.0);
    }

    #[test]
    fn test_dead_zone_pure_orbit() {
        let s = strafe();
        // 0.6 inside an 8.0 range is within the 0.8 dead-zone.
        let dir = s.desired_direction(DVec2::new(7.4, 0.0), 8.0).unwrap();
        assert!(dir.x.abs() < 1e-9);
        assert!((dir.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_deep_inside_backs_off() {
        let s = strafe();
        let dir = s.desired_direction(DVec2::new(3.0, 0.0), 8.0).unwrap();
        assert!(dir.x < 0.0);
    }

    #[test]
    fn test_orbit_sign_mirrors_tangent() {
        let mut s = strafe();
        let ccw = s.desired_direction(DVec2::new(8.0, 0.0), 8.0).unwrap();
        s.sign = -1.0;
        let cw = s.desired_direction(DVec2::new(8.0, 0.0), 8.0).unwrap();
        assert!((ccw + cw).length() < 1e-9);
    }

    #[test]
    fn test_coincident_target_has_no_direction() {
        assert!(strafe().desired_direction(DVec2::ZERO, 8.0).is_none());
    }
}
