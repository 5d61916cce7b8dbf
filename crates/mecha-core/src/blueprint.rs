//! Data-driven descriptions of weapons, projectiles and whole mechas.
//!
//! Everything here is plain serde data so tooling can author it as JSON.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{CombatStyle, WeaponKind};
use crate::stats::{MechaStats, Part};
use crate::types::TeamId;

/// Homing behavior of a projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomingSpec {
    /// Seconds of straight flight before steering engages.
    pub delay: f64,
    /// Blend factor in `[0, 1]` between current heading and the turn-limited heading.
    pub strength: f64,
    /// Degrees per second.
    pub max_turn_rate: f64,
    /// Seconds of active steering; afterwards homing disengages for good.
    pub duration: f64,
    /// Half-angle (degrees) of the cone in which the target can be tracked.
    pub max_tracking_angle: f64,
    /// Replaces the base speed while steering is active.
    pub speed: Option<f64>,
}

impl Default for HomingSpec {
    fn default() -> Self {
        Self {
            delay: DEFAULT_HOMING_DELAY,
            strength: DEFAULT_HOMING_STRENGTH,
            max_turn_rate: DEFAULT_HOMING_TURN_RATE,
            duration: DEFAULT_HOMING_DURATION,
            max_tracking_angle: DEFAULT_HOMING_TRACKING_ANGLE,
            speed: None,
        }
    }
}

/// Projectile emitted by a ranged weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileSpec {
    pub speed: f64,
    pub lifetime: f64,
    pub radius: f64,
    pub homing: Option<HomingSpec>,
    /// High-threat shots are the only ones pilots dash away from.
    pub high_threat: bool,
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self {
            speed: DEFAULT_PROJECTILE_SPEED,
            lifetime: DEFAULT_PROJECTILE_LIFETIME,
            radius: DEFAULT_PROJECTILE_RADIUS,
            homing: None,
            high_threat: false,
        }
    }
}

/// Burst configuration. A count of 1 is a single shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstSpec {
    pub count: u32,
    /// Seconds between rounds of one burst.
    pub interval: f64,
    /// Extra cooldown added after a completed burst.
    pub cooldown: f64,
}

impl Default for BurstSpec {
    fn default() -> Self {
        Self {
            count: 1,
            interval: 0.1,
            cooldown: 0.0,
        }
    }
}

/// Static description of a weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponSpec {
    pub name: String,
    pub kind: WeaponKind,
    pub attack_power: i32,
    /// Shots per second; cooldown is its reciprocal.
    pub attack_speed: f64,
    pub range: f64,
    pub magazine_size: u32,
    pub reload_time: f64,
    pub burst: BurstSpec,
    /// Seconds between trigger pull and discharge.
    pub pre_delay: f64,
    /// Full spread cone in degrees.
    pub spread: f64,
    /// Stagger impact per hit.
    pub impact: f64,
    /// Pilots hold distance around this weapon's range.
    pub range_keeping: bool,
    /// Fire along the supplied aim direction instead of the actor's facing.
    pub rotate_to_target: bool,
    /// Apply spread to homing shots as well.
    pub spread_homing: bool,
    pub projectile: Option<ProjectileSpec>,
}

impl Default for WeaponSpec {
    fn default() -> Self {
        Self {
            name: "rifle".into(),
            kind: WeaponKind::Ranged,
            attack_power: 10,
            attack_speed: 1.0,
            range: 8.0,
            magazine_size: 10,
            reload_time: 2.0,
            burst: BurstSpec::default(),
            pre_delay: 0.0,
            spread: 0.0,
            impact: 100.0,
            range_keeping: true,
            rotate_to_target: true,
            spread_homing: false,
            projectile: Some(ProjectileSpec::default()),
        }
    }
}

impl WeaponSpec {
    /// A melee weapon with the given reach.
    pub fn melee(name: &str, range: f64) -> Self {
        Self {
            name: name.into(),
            kind: WeaponKind::Melee,
            attack_power: 25,
            range,
            magazine_size: 1,
            reload_time: 0.8,
            impact: 350.0,
            range_keeping: true,
            projectile: None,
            ..Self::default()
        }
    }

    /// Is this weapon a homing launcher?
    pub fn is_homing(&self) -> bool {
        self.projectile.as_ref().is_some_and(|p| p.homing.is_some())
    }
}

/// Everything needed to spawn one mecha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MechaBlueprint {
    pub name: String,
    pub team: TeamId,
    pub style: CombatStyle,
    pub stats: MechaStats,
    pub parts: Vec<Part>,
    pub weapons: Vec<WeaponSpec>,
    pub position: DVec2,
    /// Initial heading in degrees (0 = +X, counter-clockwise).
    pub facing: f64,
    /// Seconds of start-lag applied at spawn.
    pub start_lag: f64,
}

impl Default for MechaBlueprint {
    fn default() -> Self {
        Self {
            name: "mecha".into(),
            team: 0,
            style: CombatStyle::default(),
            stats: MechaStats::default(),
            parts: Vec::new(),
            weapons: vec![WeaponSpec::default()],
            position: DVec2::ZERO,
            facing: 0.0,
            start_lag: 0.0,
        }
    }
}

impl MechaBlueprint {
    /// Parse a blueprint from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
