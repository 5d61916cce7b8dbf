//! Dash sub-state: a fixed-distance burst of movement on a speed curve.

use glam::DVec2;

use mecha_core::constants::DASH_MIN_SPEED_FRACTION;
use mecha_core::stats::MechaStats;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashState {
    active: bool,
    direction: DVec2,
    remaining: f64,
    total: f64,
    cooldown_timer: f64,
}

impl DashState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn on_cooldown(&self) -> bool {
        self.cooldown_timer > 0.0
    }

    pub fn cooldown_remaining(&self) -> f64 {
        self.cooldown_timer
    }

    pub fn direction(&self) -> DVec2 {
        self.direction
    }

    /// `0` at dash start, `1` when the distance is used up.
    pub fn progress(&self) -> f64 {
        if self.total <= 0.0 {
            return 1.0;
        }
        1.0 - self.remaining / self.total
    }

    pub fn start(&mut self, direction: DVec2, distance: f64, cooldown: f64) {
        self.active = true;
        self.direction = direction;
        self.remaining = distance;
        self.total = distance;
        self.cooldown_timer = cooldown;
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.remaining = 0.0;
    }

    /// Runs the cooldown independently of the dash itself.
    pub fn tick_cooldown(&mut self, dt: f64) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);
        }
    }

    /// Consume distance for one tick and return the displacement. Completion
    /// clears the active flag. Speed never drops below
    /// `dash_speed × DASH_MIN_SPEED_FRACTION`, so a curve that reaches zero
    /// still finishes.
    pub fn step(&mut self, dt: f64, stats: &MechaStats) -> DVec2 {
        if !self.active {
            return DVec2::ZERO;
        }
        let curve = stats.dash_curve.evaluate(self.progress());
        let speed = (stats.dash_speed * stats.dash_peak_multiplier * curve)
            .max(stats.dash_speed * DASH_MIN_SPEED_FRACTION);
        let travel = (speed * dt).min(self.remaining);
        self.remaining -= travel;
        if self.remaining <= 1e-9 {
            self.active = false;
            self.remaining = 0.0;
        }
        self.direction * travel
    }
}
