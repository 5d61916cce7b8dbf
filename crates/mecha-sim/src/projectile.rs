//! Projectile flight: straight or homing, with a finite lifetime.

use glam::DVec2;

use mecha_core::blueprint::{HomingSpec, ProjectileSpec};
use mecha_core::types::{angle_between_deg, rotate_towards, ActorId, TeamId};

/// Projectile component.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: DVec2,
    /// Where it was fired from.
    pub origin: DVec2,
    /// Unit heading.
    pub direction: DVec2,
    pub base_speed: f64,
    pub speed: f64,
    pub radius: f64,
    /// Seconds of flight left.
    pub lifetime: f64,
    /// Seconds flown so far.
    pub age: f64,
    pub damage: i32,
    pub impact: f64,
    pub shooter: ActorId,
    pub team: TeamId,
    pub target: Option<ActorId>,
    pub homing: Option<HomingSpec>,
    pub high_threat: bool,
    /// Set once the active homing window has passed.
    pub homing_expired: bool,
}

/// Launch parameters gathered by the weapon.
#[derive(Debug, Clone, Copy)]
pub struct Launch {
    pub shooter: ActorId,
    pub team: TeamId,
    pub origin: DVec2,
    pub direction: DVec2,
    pub damage: i32,
    pub impact: f64,
    pub target: Option<ActorId>,
}

impl Projectile {
    pub fn launch(spec: &ProjectileSpec, launch: Launch) -> Self {
        let direction = launch.direction.try_normalize().unwrap_or(DVec2::X);
        Self {
            position: launch.origin,
            origin: launch.origin,
            direction,
            base_speed: spec.speed,
            speed: spec.speed,
            radius: spec.radius,
            lifetime: spec.lifetime,
            age: 0.0,
            damage: launch.damage,
            impact: launch.impact,
            shooter: launch.shooter,
            team: launch.team,
            target: launch.target,
            homing: spec.homing.clone(),
            high_threat: spec.high_threat,
            homing_expired: false,
        }
    }

    pub fn velocity(&self) -> DVec2 {
        self.direction * self.speed
    }

    pub fn is_homing(&self) -> bool {
        self.homing.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime <= 0.0
    }

    /// Whether steering is currently allowed by the homing timeline.
    fn homing_window(&mut self) -> Option<&HomingSpec> {
        let homing = self.homing.as_ref()?;
        if self.homing_expired {
            return None;
        }
        if self.age > homing.delay + homing.duration {
            self.homing_expired = true;
            return None;
        }
        (self.age >= homing.delay).then_some(homing)
    }

    /// Advance one tick. `target` is the live target position, if any.
    /// Returns the position before the move, for swept hit tests.
    pub fn advance(&mut self, dt: f64, target: Option<DVec2>) -> DVec2 {
        let previous = self.position;
        self.age += dt;
        self.lifetime -= dt;

        let direction = self.direction;
        let base_speed = self.base_speed;
        let mut steering = false;
        let mut next_dir = direction;
        let mut speed = base_speed;
        if let (Some(homing), Some(target)) = (self.homing_window(), target) {
            let to_target = target - previous;
            if to_target.length_squared() > 1e-12
                && angle_between_deg(direction, to_target) <= homing.max_tracking_angle
            {
                let turned =
                    rotate_towards(direction, to_target, homing.max_turn_rate.to_radians() * dt);
                let strength = homing.strength.clamp(0.0, 1.0);
                next_dir = direction.lerp(turned, strength).try_normalize().unwrap_or(direction);
                speed = homing.speed.unwrap_or(base_speed);
                steering = true;
            }
        }
        if !steering {
            speed = base_speed;
        }

        self.direction = next_dir;
        self.speed = speed;
        self.position += self.direction * self.speed * dt;
        previous
    }
}

/// Fraction `t ∈ [0, 1]` along `from → to` where the segment first comes
/// within `radius` of `center`, if it does.
pub fn swept_hit(from: DVec2, to: DVec2, center: DVec2, radius: f64) -> Option<f64> {
    let d = to - from;
    let f = from - center;
    let c = f.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let a = d.length_squared();
    if a <= 1e-12 {
        return None;
    }
    let b = 2.0 * f.dot(d);
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let t = (-b - disc.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch(direction: DVec2, homing: Option<HomingSpec>) -> Projectile {
        let spec = ProjectileSpec {
            homing,
            ..ProjectileSpec::default()
        };
        Projectile::launch(
            &spec,
            Launch {
                shooter: ActorId(1),
                team: 1,
                origin: DVec2::ZERO,
                direction,
                damage: 10,
                impact: 50.0,
                target: Some(ActorId(2)),
            },
        )
    }

    #[test]
    fn test_straight_flight() {
        let mut p = launch(DVec2::X, None);
        for _ in 0..60 {
            p.advance(1.0 / 60.0, Some(DVec2::new(0.0, 10.0)));
        }
        assert!((p.position - DVec2::new(12.0, 0.0)).length() < 1e-9);
        assert!((p.lifetime - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_homing_waits_for_delay() {
        let mut p = launch(DVec2::X, Some(HomingSpec::default()));
        p.advance(0.1, Some(DVec2::new(0.0, 10.0)));
        assert_eq!(p.direction, DVec2::X);
        for _ in 0..10 {
            p.advance(0.05, Some(DVec2::new(5.0, 10.0)));
        }
        assert!(p.direction.y > 0.0);
    }

    #[test]
    fn test_homing_turn_rate_bounded() {
        let homing = HomingSpec {
            delay: 0.0,
            max_turn_rate: 90.0,
            ..HomingSpec::default()
        };
        let mut p = launch(DVec2::X, Some(homing));
        p.advance(0.5, Some(DVec2::new(0.0, 10.0)));
        assert!((angle_between_deg(DVec2::X, p.direction) - 45.0).abs() < 1e-6);
    }

    #[test]
    fn test_homing_outside_cone_flies_straight() {
        let homing = HomingSpec {
            delay: 0.0,
            max_tracking_angle: 30.0,
            ..HomingSpec::default()
        };
        let mut p = launch(DVec2::X, Some(homing));
        p.advance(0.1, Some(DVec2::new(-5.0, 1.0)));
        assert_eq!(p.direction, DVec2::X);
    }

    #[test]
    fn test_homing_disengages_after_duration() {
        let homing = HomingSpec {
            delay: 0.0,
            duration: 0.2,
            ..HomingSpec::default()
        };
        let mut p = launch(DVec2::X, Some(homing));
        p.advance(0.3, Some(DVec2::new(5.0, 0.0)));
        assert!(p.homing_expired);
        p.advance(0.1, Some(DVec2::new(0.0, 10.0)));
        assert_eq!(p.direction, DVec2::X);
    }

    #[test]
    fn test_homing_speed_only_while_steering() {
        let homing = HomingSpec {
            delay: 0.0,
            speed: Some(20.0),
            ..HomingSpec::default()
        };
        let mut p = launch(DVec2::X, Some(homing));
        p.advance(0.1, Some(DVec2::new(10.0, 1.0)));
        assert_eq!(p.speed, 20.0);
        p.advance(0.1, None);
        assert_eq!(p.speed, p.base_speed);
    }

    #[test]
    fn test_swept_hit() {
        let t = swept_hit(DVec2::ZERO, DVec2::new(10.0, 0.0), DVec2::new(5.0, 0.3), 0.5).unwrap();
        assert!(t > 0.4 && t < 0.5);
        assert!(swept_hit(DVec2::ZERO, DVec2::new(10.0, 0.0), DVec2::new(5.0, 2.0), 0.5).is_none());
        assert!(swept_hit(DVec2::ZERO, DVec2::new(1.0, 0.0), DVec2::new(5.0, 0.0), 0.5).is_none());
    }
}
