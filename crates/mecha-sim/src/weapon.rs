//! Weapon firing state machine.
//!
//! Ready → (pre-delay) → firing → (burst | single) → cooldown/reload → ready.
//! A weapon never touches the world: discharges become [`Shot`]s that the
//! shot system applies after all pilots and weapons have run.

use glam::DVec2;
use rand::Rng;

use mecha_core::blueprint::WeaponSpec;
use mecha_core::constants::SPREAD_JITTER_DEG;
use mecha_core::enums::WeaponKind;
use mecha_core::types::{ActorId, TeamId};

use crate::index::{ActorEntry, ActorIndex};
use crate::prediction::first_order_intercept;
use crate::projectile::{Launch, Projectile};

/// The firing actor, as seen by its weapons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shooter {
    pub id: ActorId,
    pub team: TeamId,
    pub position: DVec2,
    pub facing: DVec2,
    pub radius: f64,
    pub staggered: bool,
}

/// What a discharge delivers.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Projectile(Projectile),
    /// Resolved instantly against the target if still in reach.
    Melee {
        target: ActorId,
        damage: i32,
        impact: f64,
        reach: f64,
    },
}

/// One discharge waiting to be applied to the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub shooter: ActorId,
    pub weapon: usize,
    pub muzzle: DVec2,
    pub direction: DVec2,
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq)]
struct Burst {
    target: ActorId,
    remaining: u32,
    timer: f64,
    /// Aim of the opening round; fallback when no fresh lead exists.
    aim: DVec2,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingShot {
    target: ActorId,
    timer: f64,
    aim: DVec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    spec: WeaponSpec,
    ammo: u32,
    cooldown: f64,
    reload_timer: f64,
    burst: Option<Burst>,
    pending: Option<PendingShot>,
    reload_notice: bool,
}

impl Weapon {
    pub fn new(spec: WeaponSpec) -> Self {
        let ammo = spec.magazine_size.max(1);
        Self {
            spec,
            ammo,
            cooldown: 0.0,
            reload_timer: 0.0,
            burst: None,
            pending: None,
            reload_notice: false,
        }
    }

    pub fn spec(&self) -> &WeaponSpec {
        &self.spec
    }

    pub fn kind(&self) -> WeaponKind {
        self.spec.kind
    }

    pub fn range(&self) -> f64 {
        self.spec.range
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_timer > 0.0
    }

    pub fn is_bursting(&self) -> bool {
        self.burst.is_some()
    }

    pub fn has_pending_shot(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cooldown_remaining(&self) -> f64 {
        self.cooldown
    }

    /// Projectile speed for lead computation; `None` for melee and homing.
    pub fn lead_speed(&self) -> Option<f64> {
        self.spec
            .projectile
            .as_ref()
            .filter(|p| p.homing.is_none() && self.spec.kind == WeaponKind::Ranged)
            .map(|p| p.speed)
            .filter(|&s| s > 0.01)
    }

    pub fn can_fire(&self) -> bool {
        !self.is_reloading()
            && self.ammo > 0
            && self.cooldown <= 0.0
            && self.burst.is_none()
            && self.pending.is_none()
    }

    /// Seconds between shots (or bursts).
    fn cycle_time(&self) -> f64 {
        1.0 / self.spec.attack_speed.max(1e-3)
    }

    /// Try to start an attack. `aim` is used by rotate-to-target weapons;
    /// others fire along the shooter's facing. A pre-delayed shot keeps this
    /// aim; burst follow-ups re-lead against the target's motion.
    pub fn try_attack(
        &mut self,
        shooter: &Shooter,
        target: Option<&ActorEntry>,
        aim: DVec2,
        rng: &mut impl Rng,
        shots: &mut Vec<Shot>,
        index: usize,
    ) -> bool {
        let Some(target) = target.filter(|t| t.alive) else {
            return false;
        };
        if shooter.staggered || !self.can_fire() || shooter.team == target.team {
            return false;
        }
        if shooter.position.distance(target.position) > self.spec.range {
            return false;
        }

        if self.spec.pre_delay > 0.0 {
            self.pending = Some(PendingShot {
                target: target.id,
                timer: self.spec.pre_delay,
                aim,
            });
        } else {
            self.discharge(shooter, target, aim, rng, shots, index);
        }
        true
    }

    /// Advance timers, resolve pre-delayed shots and continue bursts. A
    /// pre-delayed shot whose target is gone is dropped and the weapon still
    /// cycles, as with an aborted burst.
    pub fn update(
        &mut self,
        dt: f64,
        shooter: &Shooter,
        actors: &ActorIndex,
        rng: &mut impl Rng,
        shots: &mut Vec<Shot>,
        index: usize,
    ) {
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }
        if self.reload_timer > 0.0 {
            self.reload_timer -= dt;
            if self.reload_timer <= 0.0 {
                self.reload_timer = 0.0;
                self.ammo = self.spec.magazine_size.max(1);
            }
        }

        if let Some(mut pending) = self.pending.take() {
            pending.timer -= dt;
            if pending.timer > 0.0 {
                self.pending = Some(pending);
            } else if let Some(target) = valid_target(actors, pending.target, shooter.team) {
                // Locked in: range is not re-checked and the aim is the one
                // supplied at the trigger.
                self.discharge(shooter, target, pending.aim, rng, shots, index);
            } else {
                self.cooldown = self.cycle_time();
            }
        }

        if let Some(mut burst) = self.burst.take() {
            burst.timer -= dt;
            if burst.timer > 0.0 {
                self.burst = Some(burst);
                return;
            }
            let Some(target) = valid_target(actors, burst.target, shooter.team) else {
                self.end_burst();
                return;
            };
            if self.ammo == 0 {
                self.end_burst();
                return;
            }
            let aim = self.follow_up_aim(shooter, target).unwrap_or(burst.aim);
            self.fire_round(shooter, target, aim, rng, shots, index);
            burst.remaining = burst.remaining.saturating_sub(1);
            if burst.remaining == 0 || self.ammo == 0 {
                self.end_burst();
            } else {
                burst.timer += self.spec.burst.interval;
                self.burst = Some(burst);
            }
        }
    }

    /// Consume the reload notice raised when the magazine ran dry.
    pub fn take_reload_notice(&mut self) -> bool {
        std::mem::take(&mut self.reload_notice)
    }

    fn discharge(
        &mut self,
        shooter: &Shooter,
        target: &ActorEntry,
        aim: DVec2,
        rng: &mut impl Rng,
        shots: &mut Vec<Shot>,
        index: usize,
    ) {
        self.fire_round(shooter, target, aim, rng, shots, index);
        let count = self.spec.burst.count.max(1);
        if count > 1 && self.ammo > 0 {
            self.burst = Some(Burst {
                target: target.id,
                remaining: count - 1,
                timer: self.spec.burst.interval,
                aim,
            });
        } else if count > 1 {
            self.end_burst();
        } else {
            self.cooldown = self.cycle_time();
        }
    }

    fn end_burst(&mut self) {
        self.burst = None;
        self.cooldown = self.cycle_time() + self.spec.burst.cooldown;
    }

    fn fire_round(
        &mut self,
        shooter: &Shooter,
        target: &ActorEntry,
        aim: DVec2,
        rng: &mut impl Rng,
        shots: &mut Vec<Shot>,
        index: usize,
    ) {
        self.ammo = self.ammo.saturating_sub(1);
        if self.ammo == 0 {
            self.reload_timer = self.spec.reload_time.max(f64::EPSILON);
            self.reload_notice = true;
        }

        let base = if self.spec.rotate_to_target {
            aim.try_normalize().unwrap_or(shooter.facing)
        } else {
            shooter.facing
        };
        let direction = self.apply_spread(base, rng);
        let muzzle = shooter.position + direction * shooter.radius;

        let payload = match (&self.spec.kind, &self.spec.projectile) {
            (WeaponKind::Ranged, Some(projectile)) => Payload::Projectile(Projectile::launch(
                projectile,
                Launch {
                    shooter: shooter.id,
                    team: shooter.team,
                    origin: muzzle,
                    direction,
                    damage: self.spec.attack_power,
                    impact: self.spec.impact,
                    target: Some(target.id),
                },
            )),
            _ => Payload::Melee {
                target: target.id,
                damage: self.spec.attack_power,
                impact: self.spec.impact,
                reach: self.spec.range,
            },
        };

        shots.push(Shot {
            shooter: shooter.id,
            weapon: index,
            muzzle,
            direction,
            payload,
        });
    }

    /// Aim for a burst follow-up round: a fresh intercept lead against the
    /// target's current motion, or straight at it when the weapon does not
    /// lead.
    fn follow_up_aim(&self, shooter: &Shooter, target: &ActorEntry) -> Option<DVec2> {
        match self.lead_speed() {
            Some(speed) => {
                first_order_intercept(shooter.position, speed, target.position, target.velocity)
                    .map(|hit| hit.direction)
                    .or_else(|| aim_at(shooter, target.position))
            }
            None => aim_at(shooter, target.position),
        }
    }

    fn apply_spread(&self, direction: DVec2, rng: &mut impl Rng) -> DVec2 {
        let spread = self.spec.spread;
        let exempt = self.spec.is_homing() && !self.spec.spread_homing;
        if spread <= 0.0 || exempt || self.spec.kind == WeaponKind::Melee {
            return direction;
        }
        let half = spread * 0.5;
        let yaw = rng.gen_range(-half..=half) + rng.gen_range(-SPREAD_JITTER_DEG..=SPREAD_JITTER_DEG);
        DVec2::from_angle(yaw.to_radians()).rotate(direction)
    }
}

fn valid_target(actors: &ActorIndex, id: ActorId, team: TeamId) -> Option<&ActorEntry> {
    actors.alive(id).filter(|t| t.team != team)
}

fn aim_at(shooter: &Shooter, point: DVec2) -> Option<DVec2> {
    (point - shooter.position).try_normalize()
}
