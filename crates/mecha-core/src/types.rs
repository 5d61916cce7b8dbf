//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Stable identifier of an actor, assigned at spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mecha#{}", self.0)
    }
}

/// Team membership. Actors on the same team never damage each other.
pub type TeamId = u8;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Unit vector for a heading given in degrees (0 = +X, counter-clockwise).
pub fn heading_vector(degrees: f64) -> DVec2 {
    DVec2::from_angle(degrees.to_radians())
}

/// Signed angle in radians from `from` to `to`, in (-PI, PI].
pub fn signed_angle(from: DVec2, to: DVec2) -> f64 {
    from.perp_dot(to).atan2(from.dot(to))
}

/// Unsigned angle between two vectors in degrees. Zero vectors give 0.
pub fn angle_between_deg(a: DVec2, b: DVec2) -> f64 {
    if a.length_squared() < 1e-12 || b.length_squared() < 1e-12 {
        return 0.0;
    }
    signed_angle(a, b).abs().to_degrees()
}

/// Rotate `current` toward `target` by at most `max_radians`.
///
/// Both inputs are treated as directions; the result keeps the length of
/// `current` normalized to one. A zero `target` leaves `current` unchanged.
pub fn rotate_towards(current: DVec2, target: DVec2, max_radians: f64) -> DVec2 {
    let Some(from) = current.try_normalize() else {
        return target.normalize_or_zero();
    };
    let Some(to) = target.try_normalize() else {
        return from;
    };
    let angle = signed_angle(from, to);
    if angle.abs() <= max_radians {
        return to;
    }
    DVec2::from_angle(max_radians.copysign(angle)).rotate(from)
}
