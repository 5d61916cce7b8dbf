//! Energy pool with delayed regeneration.

/// Spendable energy. Any spend re-arms the regen delay; regeneration only
/// runs once the delay has elapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyPool {
    current: f64,
    max: f64,
    regen_rate: f64,
    regen_delay: f64,
    delay_timer: f64,
}

impl EnergyPool {
    pub fn new(max: f64, regen_rate: f64, regen_delay: f64) -> Self {
        Self {
            current: max,
            max,
            regen_rate,
            regen_delay,
            delay_timer: 0.0,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn ratio(&self) -> f64 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    pub fn has(&self, amount: f64) -> bool {
        self.current >= amount
    }

    /// All-or-nothing spend.
    pub fn spend(&mut self, amount: f64) -> bool {
        if amount < 0.0 || self.current < amount {
            return false;
        }
        self.current -= amount;
        self.delay_timer = self.regen_delay;
        true
    }

    /// Continuous drain; takes what is there. Returns true once empty.
    pub fn drain(&mut self, amount: f64) -> bool {
        self.current = (self.current - amount.max(0.0)).max(0.0);
        self.delay_timer = self.regen_delay;
        self.current <= 0.0
    }

    pub fn update(&mut self, dt: f64) {
        if self.delay_timer > 0.0 {
            self.delay_timer = (self.delay_timer - dt).max(0.0);
            return;
        }
        self.current = (self.current + self.regen_rate * dt).min(self.max);
    }

    /// Apply new limits, clamping the current value.
    pub fn reconfigure(&mut self, max: f64, regen_rate: f64, regen_delay: f64) {
        self.max = max;
        self.regen_rate = regen_rate;
        self.regen_delay = regen_delay;
        self.current = self.current.min(max);
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, value: f64) {
        self.current = value.clamp(0.0, self.max);
    }
}
