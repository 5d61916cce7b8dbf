//! Mecha stat bundle and the parts that modify it.
//!
//! A mecha's effective stats are its base stats composed with every
//! attached part. Each field follows one composition rule:
//!
//! | rule                | fields                                                          |
//! |---------------------|-----------------------------------------------------------------|
//! | additive cap        | max health, max energy, max stagger                             |
//! | `× (1 + Σdelta)`    | move speed, acceleration, deceleration, turn rate, regen rate,  |
//! |                     | stagger decay rate, dash speed, boost max multiplier, drain     |
//! | minimum-of          | regen delay, recovery delay, dash cooldown, dash cost, boost cost|
//! | additive            | dash distance, stagger duration                                 |

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::PartSlot;

/// Keyframed scalar curve over normalized time `[0, 1]`.
///
/// Segments are eased with zero tangents at each key (smoothstep), so a
/// two-key curve ramps gently out of the first value and into the second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedCurve {
    /// `(time, value)` pairs sorted by time.
    pub keys: Vec<(f64, f64)>,
}

impl SpeedCurve {
    /// Two-key ease-in-out curve.
    pub fn ease_in_out(t0: f64, v0: f64, t1: f64, v1: f64) -> Self {
        Self {
            keys: vec![(t0, v0), (t1, v1)],
        }
    }

    /// Constant curve.
    pub fn flat(value: f64) -> Self {
        Self {
            keys: vec![(0.0, value)],
        }
    }

    /// Sample the curve. Times outside the keyed range clamp to the end keys.
    /// An empty curve evaluates to 1.
    pub fn evaluate(&self, t: f64) -> f64 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 1.0;
        };
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.0 {
                let span = b.0 - a.0;
                if span <= f64::EPSILON {
                    return b.1;
                }
                let u = (t - a.0) / span;
                let eased = u * u * (3.0 - 2.0 * u);
                return a.1 + (b.1 - a.1) * eased;
            }
        }
        last.1
    }
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self::ease_in_out(0.0, DEFAULT_DASH_CURVE_START, 1.0, DEFAULT_DASH_CURVE_END)
    }
}

/// Effective combat stats of a mecha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MechaStats {
    pub max_health: i32,
    pub move_speed: f64,
    pub acceleration: f64,
    pub deceleration: f64,
    /// Degrees per second.
    pub turn_rate: f64,
    pub collision_radius: f64,

    pub max_energy: f64,
    pub energy_regen_rate: f64,
    pub energy_regen_delay: f64,

    pub max_stagger: f64,
    pub stagger_decay_rate: f64,
    pub stagger_duration: f64,
    pub stagger_damage_multiplier: f64,
    pub stagger_recovery_delay: f64,

    pub dash_distance: f64,
    pub dash_speed: f64,
    pub dash_cooldown: f64,
    pub dash_energy_cost: f64,
    pub dash_peak_multiplier: f64,
    pub dash_curve: SpeedCurve,

    pub boost_max_multiplier: f64,
    pub boost_activation_cost: f64,
    pub boost_drain_rate: f64,
    pub boost_accel_time: f64,
    pub boost_decel_time: f64,
}

impl Default for MechaStats {
    fn default() -> Self {
        Self {
            max_health: DEFAULT_MAX_HEALTH,
            move_speed: DEFAULT_MOVE_SPEED,
            acceleration: DEFAULT_ACCELERATION,
            deceleration: DEFAULT_DECELERATION,
            turn_rate: DEFAULT_TURN_RATE,
            collision_radius: DEFAULT_COLLISION_RADIUS,
            max_energy: DEFAULT_MAX_ENERGY,
            energy_regen_rate: DEFAULT_ENERGY_REGEN_RATE,
            energy_regen_delay: DEFAULT_ENERGY_REGEN_DELAY,
            max_stagger: DEFAULT_MAX_STAGGER,
            stagger_decay_rate: DEFAULT_STAGGER_DECAY_RATE,
            stagger_duration: DEFAULT_STAGGER_DURATION,
            stagger_damage_multiplier: DEFAULT_STAGGER_DAMAGE_MULTIPLIER,
            stagger_recovery_delay: DEFAULT_STAGGER_RECOVERY_DELAY,
            dash_distance: DEFAULT_DASH_DISTANCE,
            dash_speed: DEFAULT_DASH_SPEED,
            dash_cooldown: DEFAULT_DASH_COOLDOWN,
            dash_energy_cost: DEFAULT_DASH_ENERGY_COST,
            dash_peak_multiplier: DEFAULT_DASH_PEAK_MULTIPLIER,
            dash_curve: SpeedCurve::default(),
            boost_max_multiplier: DEFAULT_BOOST_MAX_MULTIPLIER,
            boost_activation_cost: DEFAULT_BOOST_ACTIVATION_COST,
            boost_drain_rate: DEFAULT_BOOST_DRAIN_RATE,
            boost_accel_time: DEFAULT_BOOST_ACCEL_TIME,
            boost_decel_time: DEFAULT_BOOST_DECEL_TIME,
        }
    }
}

/// Per-field deltas a part contributes.
///
/// Multiplicative fields are fractional deltas (`0.2` = +20%). Minimum-of
/// fields are `None` when the part does not offer a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartModifiers {
    pub max_health: i32,
    pub max_energy: f64,
    pub max_stagger: f64,

    pub move_speed: f64,
    pub acceleration: f64,
    pub deceleration: f64,
    pub turn_rate: f64,
    pub energy_regen_rate: f64,
    pub stagger_decay_rate: f64,
    pub dash_speed: f64,
    pub boost_max_multiplier: f64,
    pub boost_drain_rate: f64,

    pub energy_regen_delay: Option<f64>,
    pub stagger_recovery_delay: Option<f64>,
    pub dash_cooldown: Option<f64>,
    pub dash_energy_cost: Option<f64>,
    pub boost_activation_cost: Option<f64>,

    pub dash_distance: f64,
    pub stagger_duration: f64,
}

/// An attachable component that modifies stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Part {
    pub name: String,
    pub slot: PartSlot,
    pub modifiers: PartModifiers,
}

impl MechaStats {
    /// Compose base stats with a set of parts.
    pub fn with_parts<'a>(&self, parts: impl IntoIterator<Item = &'a Part>) -> MechaStats {
        let mut sum = PartModifiers::default();
        let mut out = self.clone();

        for part in parts {
            let m = &part.modifiers;
            sum.max_health += m.max_health;
            sum.max_energy += m.max_energy;
            sum.max_stagger += m.max_stagger;
            sum.move_speed += m.move_speed;
            sum.acceleration += m.acceleration;
            sum.deceleration += m.deceleration;
            sum.turn_rate += m.turn_rate;
            sum.energy_regen_rate += m.energy_regen_rate;
            sum.stagger_decay_rate += m.stagger_decay_rate;
            sum.dash_speed += m.dash_speed;
            sum.boost_max_multiplier += m.boost_max_multiplier;
            sum.boost_drain_rate += m.boost_drain_rate;
            sum.dash_distance += m.dash_distance;
            sum.stagger_duration += m.stagger_duration;

            min_into(&mut out.energy_regen_delay, m.energy_regen_delay);
            min_into(&mut out.stagger_recovery_delay, m.stagger_recovery_delay);
            min_into(&mut out.dash_cooldown, m.dash_cooldown);
            min_into(&mut out.dash_energy_cost, m.dash_energy_cost);
            min_into(&mut out.boost_activation_cost, m.boost_activation_cost);
        }

        out.max_health = (self.max_health + sum.max_health).max(1);
        out.max_energy = (self.max_energy + sum.max_energy).max(0.0);
        out.max_stagger = (self.max_stagger + sum.max_stagger).max(1.0);

        out.move_speed = scaled(self.move_speed, sum.move_speed);
        out.acceleration = scaled(self.acceleration, sum.acceleration);
        out.deceleration = scaled(self.deceleration, sum.deceleration);
        out.turn_rate = scaled(self.turn_rate, sum.turn_rate);
        out.energy_regen_rate = scaled(self.energy_regen_rate, sum.energy_regen_rate);
        out.stagger_decay_rate = scaled(self.stagger_decay_rate, sum.stagger_decay_rate);
        out.dash_speed = scaled(self.dash_speed, sum.dash_speed);
        out.boost_max_multiplier = scaled(self.boost_max_multiplier, sum.boost_max_multiplier);
        out.boost_drain_rate = scaled(self.boost_drain_rate, sum.boost_drain_rate);

        out.dash_distance = (self.dash_distance + sum.dash_distance).max(0.0);
        out.stagger_duration = (self.stagger_duration + sum.stagger_duration).max(0.0);

        out
    }
}

fn scaled(base: f64, delta: f64) -> f64 {
    (base * (1.0 + delta)).max(0.0)
}

fn min_into(slot: &mut f64, offer: Option<f64>) {
    if let Some(v) = offer {
        *slot = slot.min(v.max(0.0));
    }
}
