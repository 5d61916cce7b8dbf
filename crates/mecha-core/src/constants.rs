//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Mecha base stats ---

pub const DEFAULT_MAX_HEALTH: i32 = 100;
/// Top speed on foot (units/s).
pub const DEFAULT_MOVE_SPEED: f64 = 3.5;
pub const DEFAULT_ACCELERATION: f64 = 12.0;
pub const DEFAULT_DECELERATION: f64 = 16.0;
/// Turn rate (degrees/s).
pub const DEFAULT_TURN_RATE: f64 = 360.0;
pub const DEFAULT_COLLISION_RADIUS: f64 = 0.5;

// --- Energy ---

pub const DEFAULT_MAX_ENERGY: f64 = 100.0;
/// Energy regained per second once the regen delay has elapsed.
pub const DEFAULT_ENERGY_REGEN_RATE: f64 = 10.0;
/// Seconds after any spend before regeneration resumes.
pub const DEFAULT_ENERGY_REGEN_DELAY: f64 = 1.0;

// --- Stagger ---

pub const DEFAULT_MAX_STAGGER: f64 = 1000.0;
/// Gauge drained per second once the recovery delay has elapsed.
pub const DEFAULT_STAGGER_DECAY_RATE: f64 = 200.0;
/// Seconds an actor stays staggered.
pub const DEFAULT_STAGGER_DURATION: f64 = 2.5;
/// Damage multiplier applied while staggered.
pub const DEFAULT_STAGGER_DAMAGE_MULTIPLIER: f64 = 1.5;
/// Seconds without a hit before the gauge starts to decay.
pub const DEFAULT_STAGGER_RECOVERY_DELAY: f64 = 0.6;

// --- Dash ---

pub const DEFAULT_DASH_DISTANCE: f64 = 3.0;
pub const DEFAULT_DASH_SPEED: f64 = 20.0;
pub const DEFAULT_DASH_COOLDOWN: f64 = 1.0;
pub const DEFAULT_DASH_ENERGY_COST: f64 = 20.0;
pub const DEFAULT_DASH_PEAK_MULTIPLIER: f64 = 2.5;
/// Curve value at the start of a dash.
pub const DEFAULT_DASH_CURVE_START: f64 = 0.3;
/// Curve value at the end of a dash.
pub const DEFAULT_DASH_CURVE_END: f64 = 0.1;
/// Lower bound on dash speed as a fraction of `dash_speed`, keeps dashes finite.
pub const DASH_MIN_SPEED_FRACTION: f64 = 0.05;

// --- Assault boost ---

pub const DEFAULT_BOOST_MAX_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_BOOST_ACTIVATION_COST: f64 = 15.0;
/// Energy drained per second while boosting.
pub const DEFAULT_BOOST_DRAIN_RATE: f64 = 35.0;
/// Seconds to ramp from 1.0 to the max multiplier.
pub const DEFAULT_BOOST_ACCEL_TIME: f64 = 0.4;
/// Seconds to ramp from the max multiplier back to 1.0.
pub const DEFAULT_BOOST_DECEL_TIME: f64 = 0.2;

// --- Weapons & projectiles ---

pub const DEFAULT_PROJECTILE_SPEED: f64 = 12.0;
pub const DEFAULT_PROJECTILE_LIFETIME: f64 = 3.0;
pub const DEFAULT_PROJECTILE_RADIUS: f64 = 0.1;
pub const DEFAULT_HOMING_DELAY: f64 = 0.2;
pub const DEFAULT_HOMING_STRENGTH: f64 = 1.0;
/// Max homing turn rate (degrees/s).
pub const DEFAULT_HOMING_TURN_RATE: f64 = 180.0;
pub const DEFAULT_HOMING_DURATION: f64 = 5.0;
/// Half-angle of the homing tracking cone (degrees).
pub const DEFAULT_HOMING_TRACKING_ANGLE: f64 = 150.0;
/// Extra reach granted to melee hits beyond the weapon range.
pub const MELEE_REACH_TOLERANCE: f64 = 0.25;
/// Fine yaw jitter (degrees) layered on top of a non-zero spread.
pub const SPREAD_JITTER_DEG: f64 = 0.5;

// --- Threat sensor ---

pub const DEFAULT_SENSE_RADIUS: f64 = 6.0;
/// Seconds between threat scans.
pub const DEFAULT_SCAN_INTERVAL: f64 = 0.05;

// --- Pilot ---

/// Desired range used when no weapon defines one.
pub const DEFAULT_DESIRED_RANGE: f64 = 1.5;
/// Slack added to weapon range before an attack is refused.
pub const ATTACK_RANGE_TOLERANCE: f64 = 0.25;
/// Squared-distance margin a new target must beat to replace the current one.
pub const TARGET_HYSTERESIS: f64 = 2.0;
/// Optimal range assumed by evasion when no weapon is equipped.
pub const DEFAULT_OPTIMAL_RANGE: f64 = 8.0;
/// Dash tiers accept a residual gap in (MIN, MAX] × dash distance.
pub const DASH_REACH_MIN_FACTOR: f64 = 0.3;
pub const DASH_REACH_MAX_FACTOR: f64 = 1.5;
/// Gap beyond the desired range that triggers an assault boost.
pub const DEFAULT_BOOST_GAP: f64 = 4.0;
/// Share of strafe motion spent orbiting when the range error is large.
pub const DEFAULT_ORBIT_WEIGHT: f64 = 0.8;
pub const DEFAULT_RANGE_MARGIN: f64 = 0.5;
/// Random orbit flip interval bounds (seconds).
pub const DEFAULT_MIN_TOGGLE_TIME: f64 = 1.0;
pub const DEFAULT_MAX_TOGGLE_TIME: f64 = 2.5;
/// Minimum seconds between evasion-triggered orbit flips.
pub const DEFAULT_EVADE_MIN_INTERVAL: f64 = 0.4;
/// Time-to-impact below which a high-threat projectile triggers a dash.
pub const DEFAULT_EVADE_DASH_TTI: f64 = 0.25;
/// Homing threats are dodged earlier by this factor.
pub const HOMING_TTI_FACTOR: f64 = 1.5;
pub const DEFAULT_EVADE_TOGGLE_ENTER_TTI: f64 = 0.35;
pub const DEFAULT_EVADE_TOGGLE_EXIT_TTI: f64 = 0.55;
pub const DEFAULT_EVADE_TOGGLE_COOLDOWN: f64 = 0.6;
/// Rough mecha + projectile clearance for path-crossing tests.
pub const DEFAULT_EVADE_CLEARANCE: f64 = 0.6;
