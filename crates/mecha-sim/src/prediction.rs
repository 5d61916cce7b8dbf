//! Closed-form prediction geometry.
//!
//! Pure functions over relative kinematics. Degenerate inputs (zero
//! relative velocity, no positive root) yield a neutral value or `None`
//! and callers fall back to direct aim or straight flight.

use glam::DVec2;

/// Relative speeds below this (squared) are treated as stationary.
const MIN_REL_SPEED_SQ: f64 = 1e-8;

/// Time of closest approach for relative position `r` and relative
/// velocity `v`, clamped to `t >= 0`. Stationary relative motion gives 0.
pub fn closest_approach_time(r: DVec2, v: DVec2) -> f64 {
    let vv = v.length_squared();
    if vv <= MIN_REL_SPEED_SQ {
        return 0.0;
    }
    (-r.dot(v) / vv).max(0.0)
}

/// Separation at time `t` along the relative motion.
pub fn distance_at_time(r: DVec2, v: DVec2, t: f64) -> f64 {
    (r + v * t).length()
}

/// Result of a successful path-crossing test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCrossing {
    /// Seconds until the closest approach (within the horizon).
    pub time: f64,
    /// Separation at that moment.
    pub min_distance: f64,
}

/// Whether two straight-line movers come within `clearance` of each other
/// during `[0, horizon]`.
pub fn will_paths_cross(
    self_pos: DVec2,
    self_vel: DVec2,
    other_pos: DVec2,
    other_vel: DVec2,
    horizon: f64,
    clearance: f64,
) -> Option<PathCrossing> {
    let r = other_pos - self_pos;
    let v = other_vel - self_vel;
    let time = closest_approach_time(r, v).min(horizon.max(0.0));
    let min_distance = distance_at_time(r, v, time);
    (min_distance <= clearance).then_some(PathCrossing { time, min_distance })
}

/// A first-order firing solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intercept {
    /// Unit aim direction from the shooter.
    pub direction: DVec2,
    /// Seconds until the projectile meets the target.
    pub time: f64,
    /// Predicted meeting point.
    pub point: DVec2,
}

/// Aim solution for a constant-speed projectile against a constant-velocity
/// target. Solves `(|v|² − s²)t² + 2(r·v)t + |r|² = 0` for the smallest
/// positive root, with a linear fallback when the quadratic term vanishes.
pub fn first_order_intercept(
    shooter: DVec2,
    projectile_speed: f64,
    target_pos: DVec2,
    target_vel: DVec2,
) -> Option<Intercept> {
    let speed = projectile_speed.max(1e-3);
    let r = target_pos - shooter;
    let a = target_vel.length_squared() - speed * speed;
    let b = 2.0 * r.dot(target_vel);
    let c = r.length_squared();
    if c <= 1e-12 {
        return None;
    }

    let time = if a.abs() < 1e-6 {
        if b.abs() < 1e-9 {
            return None;
        }
        -c / b
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        let t1 = (-b - sq) / (2.0 * a);
        let t2 = (-b + sq) / (2.0 * a);
        match (t1 > 0.0, t2 > 0.0) {
            (true, true) => t1.min(t2),
            (true, false) => t1,
            (false, true) => t2,
            (false, false) => return None,
        }
    };
    if !time.is_finite() || time <= 0.0 {
        return None;
    }

    let point = target_pos + target_vel * time;
    let direction = (point - shooter).try_normalize()?;
    Some(Intercept {
        direction,
        time,
        point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stationary_target_intercept() {
        let hit = first_order_intercept(DVec2::ZERO, 10.0, DVec2::new(30.0, 40.0), DVec2::ZERO)
            .unwrap();
        assert!((hit.direction - DVec2::new(0.6, 0.8)).length() < 1e-9);
        assert!((hit.time - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_crossing_target_needs_lead() {
        let target = DVec2::new(10.0, 0.0);
        let vel = DVec2::new(0.0, 3.0);
        let hit = first_order_intercept(DVec2::ZERO, 12.0, target, vel).unwrap();
        assert!(hit.direction.y > 0.0);
        // Projectile and target arrive together.
        let shot_end = hit.direction * 12.0 * hit.time;
        assert!((shot_end - (target + vel * hit.time)).length() < 1e-6);
    }

    #[test]
    fn test_linear_case_equal_speeds() {
        // Target approaching at projectile speed: quadratic term vanishes.
        let hit = first_order_intercept(
            DVec2::ZERO,
            5.0,
            DVec2::new(10.0, 0.0),
            DVec2::new(-5.0, 0.0),
        )
        .unwrap();
        assert!((hit.time - 1.0).abs() < 1e-9);
        assert!((hit.direction - DVec2::X).length() < 1e-9);
    }

    #[test]
    fn test_unreachable_target() {
        // Fleeing faster than the projectile.
        let none = first_order_intercept(
            DVec2::ZERO,
            2.0,
            DVec2::new(10.0, 0.0),
            DVec2::new(5.0, 0.0),
        );
        assert!(none.is_none());
    }

    #[test]
    fn test_closest_approach_stationary_is_zero() {
        assert_eq!(closest_approach_time(DVec2::new(3.0, 0.0), DVec2::ZERO), 0.0);
    }

    #[test]
    fn test_closest_approach_receding_clamps() {
        let t = closest_approach_time(DVec2::new(3.0, 0.0), DVec2::new(1.0, 0.0));
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_closest_approach_head_on() {
        let r = DVec2::new(6.0, 1.0);
        let v = DVec2::new(-3.0, 0.0);
        let t = closest_approach_time(r, v);
        assert!((t - 2.0).abs() < 1e-12);
        assert!((distance_at_time(r, v, t) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_will_paths_cross_horizon() {
        let crossing = will_paths_cross(
            DVec2::ZERO,
            DVec2::new(0.0, 1.0),
            DVec2::new(4.0, 1.0),
            DVec2::new(-4.0, 0.0),
            2.0,
            0.6,
        )
        .unwrap();
        assert!((crossing.time - 1.0).abs() < 1e-9);
        assert!(crossing.min_distance < 1e-9);

        // Closest approach beyond the horizon is evaluated at the horizon.
        let late = will_paths_cross(
            DVec2::ZERO,
            DVec2::ZERO,
            DVec2::new(40.0, 0.0),
            DVec2::new(-4.0, 0.0),
            2.0,
            0.6,
        );
        assert!(late.is_none());
    }
}
