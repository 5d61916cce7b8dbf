//! Incoming-projectile threat sensor.
//!
//! Scans run on a fixed interval rather than every tick; consumers read the
//! latest reading and must tolerate it being up to one interval old.

use glam::DVec2;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use mecha_core::constants::{DEFAULT_SCAN_INTERVAL, DEFAULT_SENSE_RADIUS};
use mecha_core::types::TeamId;

use crate::prediction::{self, PathCrossing};
use crate::projectile::Projectile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub sense_radius: f64,
    /// Seconds between scans.
    pub scan_interval: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sense_radius: DEFAULT_SENSE_RADIUS,
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }
}

/// The most dangerous incoming projectile at scan time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreatReading {
    pub projectile: Entity,
    /// Unit travel direction.
    pub direction: DVec2,
    /// Projectile position at scan time.
    pub position: DVec2,
    /// Where the projectile was fired from.
    pub origin: DVec2,
    pub velocity: DVec2,
    /// Seconds until closest approach, measured at scan time.
    pub time_to_impact: f64,
    pub min_distance: f64,
    pub homing: bool,
    pub high_threat: bool,
}

/// Observer state used by a scan.
#[derive(Debug, Clone, Copy)]
pub struct Observer {
    pub team: TeamId,
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ThreatSensor {
    config: SensorConfig,
    timer: f64,
    reading: Option<ThreatReading>,
}

impl ThreatSensor {
    pub fn new(config: SensorConfig) -> Self {
        Self {
            config,
            timer: 0.0,
            reading: None,
        }
    }

    pub fn reading(&self) -> Option<&ThreatReading> {
        self.reading.as_ref()
    }

    /// Count down to the next scan. Returns true when one is due.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.timer -= dt;
        if self.timer > 0.0 {
            return false;
        }
        self.timer += self.config.scan_interval.max(dt);
        if self.timer <= 0.0 {
            self.timer = self.config.scan_interval;
        }
        true
    }

    /// Replace the reading with the most dangerous candidate. High-threat
    /// projectiles beat normal ones; within a tier the earliest impact wins.
    pub fn scan<'a>(
        &mut self,
        observer: &Observer,
        candidates: impl IntoIterator<Item = (Entity, &'a Projectile)>,
    ) {
        let radius_sq = self.config.sense_radius * self.config.sense_radius;
        let mut best: Option<ThreatReading> = None;

        for (entity, projectile) in candidates {
            if projectile.team == observer.team {
                continue;
            }
            let r = projectile.position - observer.position;
            if r.length_squared() > radius_sq {
                continue;
            }
            let velocity = projectile.velocity();
            let v = velocity - observer.velocity;
            if r.dot(v) >= 0.0 {
                continue;
            }
            let t = prediction::closest_approach_time(r, v);
            let min_distance = prediction::distance_at_time(r, v, t);
            if min_distance > observer.radius + projectile.radius {
                continue;
            }

            let candidate = ThreatReading {
                projectile: entity,
                direction: velocity.normalize_or_zero(),
                position: projectile.position,
                origin: projectile.origin,
                velocity,
                time_to_impact: t,
                min_distance,
                homing: projectile.is_homing(),
                high_threat: projectile.high_threat,
            };
            let better = match &best {
                None => true,
                Some(b) if candidate.high_threat != b.high_threat => candidate.high_threat,
                Some(b) => candidate.time_to_impact < b.time_to_impact,
            };
            if better {
                best = Some(candidate);
            }
        }

        self.reading = best;
    }

    /// Would moving along `direction` at `speed` cross the tracked threat's
    /// path within `horizon` seconds, closer than `clearance`?
    pub fn will_path_cross(
        &self,
        position: DVec2,
        direction: DVec2,
        speed: f64,
        horizon: f64,
        clearance: f64,
    ) -> Option<PathCrossing> {
        let reading = self.reading.as_ref()?;
        if reading.velocity.length_squared() <= 0.0 {
            return None;
        }
        prediction::will_paths_cross(
            position,
            direction.normalize_or_zero() * speed,
            reading.position,
            reading.velocity,
            horizon,
            clearance,
        )
    }
}
