//! Stagger gauge: accumulated impact that trips a timed vulnerable state.

/// What a single impact did to the gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaggerOutcome {
    Accumulated,
    Entered,
    /// Already staggered; impact ignored.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaggerGauge {
    current: f64,
    max: f64,
    decay_rate: f64,
    duration: f64,
    damage_multiplier: f64,
    recovery_delay: f64,
    recovery_timer: f64,
    stagger_timer: f64,
    staggered: bool,
}

impl StaggerGauge {
    pub fn new(
        max: f64,
        decay_rate: f64,
        duration: f64,
        damage_multiplier: f64,
        recovery_delay: f64,
    ) -> Self {
        Self {
            current: 0.0,
            max,
            decay_rate,
            duration,
            damage_multiplier,
            recovery_delay,
            recovery_timer: 0.0,
            stagger_timer: 0.0,
            staggered: false,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_staggered(&self) -> bool {
        self.staggered
    }

    /// Fill ratio in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }

    /// Seconds of stagger left.
    pub fn remaining(&self) -> f64 {
        self.stagger_timer
    }

    /// Multiplier for incoming damage right now.
    pub fn damage_multiplier(&self) -> f64 {
        if self.staggered {
            self.damage_multiplier
        } else {
            1.0
        }
    }

    pub fn add_impact(&mut self, impact: f64) -> StaggerOutcome {
        if self.staggered {
            return StaggerOutcome::Ignored;
        }
        self.current = (self.current + impact.max(0.0)).min(self.max);
        self.recovery_timer = self.recovery_delay;
        if self.current >= self.max {
            self.staggered = true;
            self.stagger_timer = self.duration;
            StaggerOutcome::Entered
        } else {
            StaggerOutcome::Accumulated
        }
    }

    /// Advance timers. Returns true on the tick stagger ends.
    pub fn update(&mut self, dt: f64) -> bool {
        if self.staggered {
            self.stagger_timer -= dt;
            if self.stagger_timer <= 0.0 {
                self.staggered = false;
                self.stagger_timer = 0.0;
                self.current = 0.0;
                self.recovery_timer = self.recovery_delay;
                return true;
            }
            return false;
        }

        if self.recovery_timer > 0.0 {
            self.recovery_timer = (self.recovery_timer - dt).max(0.0);
        } else if self.current > 0.0 {
            self.current = (self.current - self.decay_rate * dt).max(0.0);
        }
        false
    }

    pub fn reconfigure(
        &mut self,
        max: f64,
        decay_rate: f64,
        duration: f64,
        damage_multiplier: f64,
        recovery_delay: f64,
    ) {
        self.max = max;
        self.decay_rate = decay_rate;
        self.duration = duration;
        self.damage_multiplier = damage_multiplier;
        self.recovery_delay = recovery_delay;
        self.current = self.current.min(max);
    }
}
