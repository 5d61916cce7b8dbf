//! Assault boost: an energy-draining speed multiplier with smooth ramps.

#[derive(Debug, Clone, PartialEq)]
pub struct AssaultBoost {
    active: bool,
    multiplier: f64,
}

impl Default for AssaultBoost {
    fn default() -> Self {
        Self {
            active: false,
            multiplier: 1.0,
        }
    }
}

impl AssaultBoost {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current speed multiplier, `>= 1`.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    /// Returns true if the boost was running.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    /// Ramp the multiplier linearly toward `max` while active and back to
    /// 1.0 otherwise, each over its time constant.
    pub fn ramp(&mut self, dt: f64, max: f64, accel_time: f64, decel_time: f64) {
        let span = max - 1.0;
        if span <= 0.0 {
            self.multiplier = 1.0;
            return;
        }
        if self.active {
            let step = if accel_time > 0.0 { span * dt / accel_time } else { span };
            self.multiplier = (self.multiplier + step).min(max);
        } else {
            let step = if decel_time > 0.0 { span * dt / decel_time } else { span };
            self.multiplier = (self.multiplier - step).max(1.0);
        }
    }
}
