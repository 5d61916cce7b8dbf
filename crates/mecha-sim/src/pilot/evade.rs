//! Evasive dash against high-threat projectiles.
//!
//! The dash goes perpendicular to the threat's travel direction. Which side
//! is decided by the first tier that shows a clear preference:
//!
//! 1. predicted safety at the end of the dash
//! 2. moving away from the threat
//! 3. ending the dash near the optimal weapon range (straight shots only)
//! 4. consistency with the current strafe direction
//! 5. fallback: away from the threat

use glam::DVec2;

use mecha_behavior::{Behavior, Blackboard, NodeError, Status};
use mecha_core::constants::{DEFAULT_OPTIMAL_RANGE, HOMING_TTI_FACTOR};

use crate::battlefield::Battlefield;
use crate::pilot::keys;
use crate::sensor::ThreatReading;

/// Which tier picked the dash side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvadeTier {
    Safety,
    Escape,
    Range,
    Strafe,
    Fallback,
}

/// Everything the side choice looks at.
#[derive(Debug, Clone, Copy)]
pub struct EvadeInput<'a> {
    pub position: DVec2,
    pub threat: &'a ThreatReading,
    pub dash_distance: f64,
    pub dash_speed: f64,
    /// Target position, if locked.
    pub target: Option<DVec2>,
    /// Longest weapon range.
    pub optimal_range: Option<f64>,
    /// The strafe's current desired direction.
    pub strafe: Option<DVec2>,
}

/// Pick the dash direction for the threat in `input`.
pub fn evade_direction(input: &EvadeInput<'_>) -> (DVec2, EvadeTier) {
    let threat = input.threat;
    let right = threat.direction.perp();
    let left = -right;
    let pick = |prefer_right: bool| if prefer_right { right } else { left };

    let duration = input.dash_distance / input.dash_speed.max(1e-3);
    let right_safety = future_safety(input, right, duration);
    let left_safety = future_safety(input, left, duration);
    let safety_threshold = if threat.homing { 0.8 } else { 1.5 };
    if (right_safety - left_safety).abs() > safety_threshold {
        return (pick(right_safety > left_safety), EvadeTier::Safety);
    }

    // Homing threats: get away from where the projectile is now. Straight
    // shots: get away from the firing point.
    let (reference, escape_threshold) = if threat.homing {
        ((input.position - threat.position).normalize_or_zero(), 0.2)
    } else {
        ((input.position - threat.origin).normalize_or_zero(), 0.3)
    };
    let right_escape = right.dot(reference);
    let left_escape = left.dot(reference);
    if (right_escape - left_escape).abs() > escape_threshold {
        return (pick(right_escape > left_escape), EvadeTier::Escape);
    }

    if let (false, Some(target)) = (threat.homing, input.target) {
        let optimal = input.optimal_range.unwrap_or(DEFAULT_OPTIMAL_RANGE);
        let error = |dir: DVec2| {
            ((input.position + dir * input.dash_distance).distance(target) - optimal).abs()
        };
        let (right_error, left_error) = (error(right), error(left));
        if (right_error - left_error).abs() > 1.0 {
            return (pick(right_error < left_error), EvadeTier::Range);
        }
    }

    if let Some(strafe) = input.strafe {
        let right_follow = right.dot(strafe);
        let left_follow = left.dot(strafe);
        if (right_follow - left_follow).abs() > 0.2 {
            return (pick(right_follow > left_follow), EvadeTier::Strafe);
        }
    }

    (pick(right_escape > left_escape), EvadeTier::Fallback)
}

/// Distance-like safety score for ending a dash along `dir`.
fn future_safety(input: &EvadeInput<'_>, dir: DVec2, duration: f64) -> f64 {
    let threat = input.threat;
    let end = input.position + dir * input.dash_distance;
    let speed = threat.velocity.length();
    if speed < 0.1 {
        return end.distance(threat.position);
    }

    if threat.homing {
        // The projectile keeps tracking during the dash: score the worst of
        // the midpoint and the end, then discount.
        let mid = input.position.lerp(end, 0.5);
        let mut safety = end.distance(threat.position).min(mid.distance(threat.position)) * 0.7;
        if input.dash_speed > speed {
            let advantage = (input.dash_speed - speed) / input.dash_speed;
            safety *= 1.0 + advantage * 0.5;
        }
        if input.position.distance(threat.position) < 2.0 {
            safety *= 0.5;
        }
        safety
    } else {
        let heading = threat.velocity / speed;
        let projectile_end = threat.position + threat.velocity * duration;
        let relative = end - projectile_end;
        let mut safety = relative.length();
        let behind = relative.dot(-heading);
        if behind > 0.0 {
            safety += behind * 2.0;
        }
        safety += relative.dot(heading.perp()).abs() * 0.5;
        safety * (2.0 - (speed / 30.0).clamp(0.0, 1.0))
    }
}

/// Dashes out of the way of a high-threat projectile that is about to hit.
/// Running while a threat is being dodged, Failure otherwise.
pub struct EvadeDash {
    tti_threshold: f64,
}

impl EvadeDash {
    pub fn new(tti_threshold: f64) -> Self {
        Self {
            tti_threshold: tti_threshold.max(0.05),
        }
    }
}

impl Behavior<Battlefield> for EvadeDash {
    fn tick(&mut self, ctx: &mut Battlefield, bb: &mut Blackboard) -> Result<Status, NodeError> {
        let pilot = ctx.pilot()?;
        let Some(threat) = pilot.sensor.reading().copied() else {
            return Ok(Status::Failure);
        };
        let threshold = if threat.homing {
            self.tti_threshold * HOMING_TTI_FACTOR
        } else {
            self.tti_threshold
        };
        if !threat.high_threat || threat.time_to_impact >= threshold || !pilot.actor.can_dash() {
            return Ok(Status::Failure);
        }
        if threat.direction.length_squared() <= 0.0 {
            return Ok(Status::Running);
        }

        let target = keys::target(bb)?
            .and_then(|id| pilot.enemy(id))
            .map(|t| t.position);
        let stats = pilot.actor.stats();
        let input = EvadeInput {
            position: pilot.position(),
            threat: &threat,
            dash_distance: stats.dash_distance,
            dash_speed: stats.dash_speed,
            target,
            optimal_range: pilot.actor.longest_range(),
            strafe: bb.try_get(keys::DESIRED_DIRECTION)?,
        };
        let (direction, tier) = evade_direction(&input);
        tracing::trace!(actor = %pilot.actor.id(), ?tier, tti = threat.time_to_impact, "evade side chosen");

        if pilot.actor.try_dash(direction) {
            bb.set(keys::LAST_EVADE_DASH, direction);
        }
        Ok(Status::Running)
    }

    fn name(&self) -> &'static str {
        "evade_dash"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(position: DVec2, velocity: DVec2, homing: bool) -> ThreatReading {
        ThreatReading {
            projectile: hecs::Entity::DANGLING,
            direction: velocity.normalize_or_zero(),
            position,
            origin: position,
            velocity,
            time_to_impact: 0.1,
            min_distance: 0.0,
            homing,
            high_threat: true,
        }
    }

    fn input(threat: &ThreatReading) -> EvadeInput<'_> {
        EvadeInput {
            position: DVec2::ZERO,
            threat,
            dash_distance: 3.0,
            dash_speed: 20.0,
            target: None,
            optimal_range: None,
            strafe: None,
        }
    }

    #[test]
    fn test_direction_is_perpendicular() {
        let threat = reading(DVec2::new(5.0, 0.3), DVec2::new(-20.0, 0.0), false);
        let (dir, _) = evade_direction(&input(&threat));
        assert!(dir.dot(threat.direction).abs() < 1e-9);
        assert!((dir.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_threat_dodged_away() {
        // Shot passes slightly above: dodge downward.
        let threat = reading(DVec2::new(5.0, 0.4), DVec2::new(-20.0, 0.0), false);
        let (dir, _) = evade_direction(&input(&threat));
        assert!(dir.y < 0.0);
    }

    #[test]
    fn test_strafe_breaks_symmetric_tie() {
        // Dead-on threat from +x: both sides look the same until the strafe
        // direction is considered.
        let threat = reading(DVec2::new(5.0, 0.0), DVec2::new(-20.0, 0.0), false);
        let strafe = DVec2::new(0.2, 1.0).normalize();
        let (dir, tier) = evade_direction(&EvadeInput {
            strafe: Some(strafe),
            ..input(&threat)
        });
        assert_eq!(tier, EvadeTier::Strafe);
        assert!(dir.y > 0.0);
    }

    #[test]
    fn test_range_tier_prefers_optimal_distance() {
        let threat = reading(DVec2::new(5.0, 0.0), DVec2::new(-20.0, 0.0), false);
        // Target 8 below: dashing down ends at distance 5, up at 11.
        let (dir, tier) = evade_direction(&EvadeInput {
            target: Some(DVec2::new(0.0, -8.0)),
            optimal_range: Some(5.0),
            ..input(&threat)
        });
        assert_eq!(tier, EvadeTier::Range);
        assert!(dir.y < 0.0);
    }

    #[test]
    fn test_range_tier_skipped_for_homing() {
        let threat = reading(DVec2::new(5.0, 0.0), DVec2::new(-20.0, 0.0), true);
        let (_, tier) = evade_direction(&EvadeInput {
            target: Some(DVec2::new(0.0, -8.0)),
            optimal_range: Some(5.0),
            ..input(&threat)
        });
        assert_ne!(tier, EvadeTier::Range);
    }
}
