//! Actor combat state machine.
//!
//! An [`Actor`] is the ECS component for one mecha. Pilots issue intents
//! (move, face, dash, boost, attack) during their tick; [`Actor::update`]
//! then advances every timer and applies movement once per tick.
//!
//! Gates:
//! - `can_move_or_rotate = !staggered && !start_lag`
//! - a running dash owns movement; move intents are accepted but ignored
//! - dash and assault boost are mutually exclusive; stagger cancels both

pub mod boost;
pub mod dash;
pub mod energy;
pub mod stagger;

use glam::DVec2;
use rand::Rng;

use mecha_core::blueprint::MechaBlueprint;
use mecha_core::enums::{CombatStyle, WeaponKind};
use mecha_core::events::CombatEvent;
use mecha_core::stats::{MechaStats, Part};
use mecha_core::types::{heading_vector, rotate_towards, ActorId, TeamId};

use crate::index::{ActorEntry, ActorIndex};
use crate::weapon::{Shooter, Shot, Weapon};

pub use boost::AssaultBoost;
pub use dash::DashState;
pub use energy::EnergyPool;
pub use stagger::{StaggerGauge, StaggerOutcome};

/// Below this distance `move_towards` treats the point as reached.
const ARRIVE_EPSILON: f64 = 1e-3;

/// Result of [`Actor::take_damage`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageReport {
    /// Health actually removed.
    pub dealt: i32,
    pub staggered: bool,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MoveIntent {
    direction: DVec2,
    rotate_to_movement: bool,
}

#[derive(Debug, Clone)]
pub struct Actor {
    id: ActorId,
    name: String,
    team: TeamId,
    style: CombatStyle,

    base_stats: MechaStats,
    parts: Vec<Part>,
    stats: MechaStats,

    position: DVec2,
    last_position: DVec2,
    facing: DVec2,
    velocity: DVec2,
    move_direction: DVec2,
    speed: f64,

    health: i32,
    energy: EnergyPool,
    stagger: StaggerGauge,
    dash: DashState,
    boost: AssaultBoost,
    start_lag: f64,

    weapons: Vec<Weapon>,

    move_intent: Option<MoveIntent>,
    face_intent: Option<DVec2>,
    events: Vec<CombatEvent>,
}

impl Actor {
    pub fn new(id: ActorId, blueprint: &MechaBlueprint) -> Self {
        let stats = blueprint.stats.with_parts(&blueprint.parts);
        let mut actor = Self {
            id,
            name: blueprint.name.clone(),
            team: blueprint.team,
            style: blueprint.style,
            base_stats: blueprint.stats.clone(),
            parts: blueprint.parts.clone(),
            health: stats.max_health,
            energy: EnergyPool::new(
                stats.max_energy,
                stats.energy_regen_rate,
                stats.energy_regen_delay,
            ),
            stagger: StaggerGauge::new(
                stats.max_stagger,
                stats.stagger_decay_rate,
                stats.stagger_duration,
                stats.stagger_damage_multiplier,
                stats.stagger_recovery_delay,
            ),
            stats,
            position: blueprint.position,
            last_position: blueprint.position,
            facing: heading_vector(blueprint.facing),
            velocity: DVec2::ZERO,
            move_direction: DVec2::ZERO,
            speed: 0.0,
            dash: DashState::default(),
            boost: AssaultBoost::default(),
            start_lag: 0.0,
            weapons: blueprint.weapons.iter().cloned().map(Weapon::new).collect(),
            move_intent: None,
            face_intent: None,
            events: Vec::new(),
        };
        actor.apply_start_lag(blueprint.start_lag);
        actor
    }

    // --- Queries ---

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    pub fn style(&self) -> CombatStyle {
        self.style
    }

    pub fn stats(&self) -> &MechaStats {
        &self.stats
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn facing(&self) -> DVec2 {
        self.facing
    }

    /// Velocity measured from the last tick's displacement.
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn energy(&self) -> &EnergyPool {
        &self.energy
    }

    pub fn stagger(&self) -> &StaggerGauge {
        &self.stagger
    }

    pub fn is_staggered(&self) -> bool {
        self.stagger.is_staggered()
    }

    pub fn stagger_progress(&self) -> f64 {
        self.stagger.progress()
    }

    pub fn is_dashing(&self) -> bool {
        self.dash.is_active()
    }

    pub fn dash(&self) -> &DashState {
        &self.dash
    }

    pub fn is_boosting(&self) -> bool {
        self.boost.is_active()
    }

    pub fn boost_multiplier(&self) -> f64 {
        self.boost.multiplier()
    }

    pub fn in_start_lag(&self) -> bool {
        self.start_lag > 0.0
    }

    pub fn can_move_or_rotate(&self) -> bool {
        !self.is_staggered() && !self.in_start_lag()
    }

    /// Effective top speed on foot, boost included.
    pub fn move_speed(&self) -> f64 {
        self.stats.move_speed * self.boost.multiplier()
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn longest_range(&self) -> Option<f64> {
        self.weapons
            .iter()
            .map(Weapon::range)
            .filter(|r| *r > 0.0)
            .max_by(f64::total_cmp)
    }

    pub fn shooter(&self) -> Shooter {
        Shooter {
            id: self.id,
            team: self.team,
            position: self.position,
            facing: self.facing,
            radius: self.stats.collision_radius,
            staggered: self.is_staggered(),
        }
    }

    /// Weapon indices in firing preference order.
    ///
    /// 1. target staggered and a ready melee weapon exists: melee first
    ///    (ascending range), then the rest (descending range)
    /// 2. melee style: everything, ascending range
    /// 3. ranged style: melee excluded, descending range
    pub fn weapons_for_style(&self, style: CombatStyle, target_staggered: bool) -> Vec<usize> {
        let is_melee = |i: &usize| self.weapons[*i].kind() == WeaponKind::Melee;
        let range = |i: &usize| self.weapons[*i].range();
        let mut all: Vec<usize> = (0..self.weapons.len()).collect();

        let melee_ready = self
            .weapons
            .iter()
            .any(|w| w.kind() == WeaponKind::Melee && w.can_fire());
        if target_staggered && melee_ready {
            let (mut melee, mut ranged): (Vec<usize>, Vec<usize>) =
                all.into_iter().partition(|i| is_melee(i));
            melee.sort_by(|a, b| range(a).total_cmp(&range(b)));
            ranged.sort_by(|a, b| range(b).total_cmp(&range(a)));
            melee.extend(ranged);
            return melee;
        }

        match style {
            CombatStyle::Melee => {
                all.sort_by(|a, b| range(a).total_cmp(&range(b)));
                all
            }
            CombatStyle::Ranged => {
                all.retain(|i| !is_melee(i));
                all.sort_by(|a, b| range(b).total_cmp(&range(a)));
                all
            }
        }
    }

    // --- Intents ---

    /// Queue movement along `direction` for this tick. Refused while
    /// staggered or in start-lag.
    pub fn move_in_direction(&mut self, direction: DVec2, rotate_to_movement: bool) -> bool {
        if !self.can_move_or_rotate() {
            return false;
        }
        self.move_intent = direction.try_normalize().map(|direction| MoveIntent {
            direction,
            rotate_to_movement,
        });
        true
    }

    pub fn move_towards(&mut self, point: DVec2) -> bool {
        let offset = point - self.position;
        if offset.length() <= ARRIVE_EPSILON {
            return self.can_move_or_rotate();
        }
        self.move_in_direction(offset, true)
    }

    /// Queue a turn toward `point`, limited by turn rate in [`Actor::update`].
    pub fn face_towards(&mut self, point: DVec2) -> bool {
        if !self.can_move_or_rotate() {
            return false;
        }
        if let Some(direction) = (point - self.position).try_normalize() {
            self.face_intent = Some(direction);
        }
        true
    }

    pub fn can_dash(&self) -> bool {
        !self.is_staggered()
            && !self.in_start_lag()
            && !self.dash.is_active()
            && !self.dash.on_cooldown()
            && self.energy.has(self.stats.dash_energy_cost)
    }

    pub fn try_dash(&mut self, direction: DVec2) -> bool {
        let Some(direction) = direction.try_normalize() else {
            return false;
        };
        if !self.can_dash() || !self.energy.spend(self.stats.dash_energy_cost) {
            return false;
        }
        self.stop_assault_boost();
        self.dash
            .start(direction, self.stats.dash_distance, self.stats.dash_cooldown);
        let duration = self.stats.dash_distance / self.stats.dash_speed.max(1e-3);
        tracing::debug!(actor = %self.id, ?direction, "dash started");
        self.events.push(CombatEvent::DashStarted {
            actor: self.id,
            direction,
            duration,
        });
        true
    }

    pub fn can_start_assault_boost(&self) -> bool {
        !self.is_staggered()
            && !self.in_start_lag()
            && !self.dash.is_active()
            && !self.boost.is_active()
            && self.energy.has(self.stats.boost_activation_cost)
    }

    pub fn try_start_assault_boost(&mut self) -> bool {
        if !self.can_start_assault_boost()
            || !self.energy.spend(self.stats.boost_activation_cost)
        {
            return false;
        }
        self.boost.start();
        tracing::debug!(actor = %self.id, "assault boost started");
        self.events.push(CombatEvent::BoostStarted { actor: self.id });
        true
    }

    /// Stop boosting; the multiplier ramps back down over the decel time.
    pub fn stop_assault_boost(&mut self) {
        if self.boost.stop() {
            tracing::debug!(actor = %self.id, "assault boost stopped");
            self.events.push(CombatEvent::BoostStopped { actor: self.id });
        }
    }

    pub fn spend_energy(&mut self, amount: f64) -> bool {
        self.energy.spend(amount)
    }

    pub fn apply_start_lag(&mut self, seconds: f64) {
        self.start_lag = self.start_lag.max(seconds.max(0.0));
    }

    /// Attack with one weapon. See [`Weapon::try_attack`].
    pub fn try_attack_with(
        &mut self,
        weapon: usize,
        target: Option<&ActorEntry>,
        aim: DVec2,
        rng: &mut impl Rng,
        shots: &mut Vec<Shot>,
    ) -> bool {
        let shooter = self.shooter();
        match self.weapons.get_mut(weapon) {
            Some(w) => w.try_attack(&shooter, target, aim, rng, shots, weapon),
            None => false,
        }
    }

    // --- Damage ---

    /// Apply a hit. The stagger multiplier uses the state before the hit.
    pub fn take_damage(&mut self, damage: i32, impact: f64) -> DamageReport {
        if !self.is_alive() {
            return DamageReport::default();
        }
        let scaled = (damage.max(0) as f64 * self.stagger.damage_multiplier()).round() as i32;
        let dealt = scaled.min(self.health);
        self.health -= dealt;

        let mut report = DamageReport {
            dealt,
            ..DamageReport::default()
        };
        if self.stagger.add_impact(impact) == StaggerOutcome::Entered {
            report.staggered = true;
            self.stop_assault_boost();
            self.dash.cancel();
            self.start_lag = 0.0;
            self.move_intent = None;
            tracing::debug!(actor = %self.id, "stagger entered");
            self.events.push(CombatEvent::StaggerEntered { actor: self.id });
        }
        if self.health == 0 {
            report.destroyed = true;
            tracing::debug!(actor = %self.id, "destroyed");
            self.events.push(CombatEvent::ActorDestroyed { actor: self.id });
        }
        report
    }

    // --- Parts ---

    pub fn attach_part(&mut self, part: Part) {
        self.parts.push(part);
        self.recompute_stats();
    }

    /// Detach the first part with this name.
    pub fn detach_part(&mut self, name: &str) -> Option<Part> {
        let pos = self.parts.iter().position(|p| p.name == name)?;
        let part = self.parts.remove(pos);
        self.recompute_stats();
        Some(part)
    }

    fn recompute_stats(&mut self) {
        self.stats = self.base_stats.with_parts(&self.parts);
        let s = &self.stats;
        self.health = self.health.min(s.max_health);
        self.energy
            .reconfigure(s.max_energy, s.energy_regen_rate, s.energy_regen_delay);
        self.stagger.reconfigure(
            s.max_stagger,
            s.stagger_decay_rate,
            s.stagger_duration,
            s.stagger_damage_multiplier,
            s.stagger_recovery_delay,
        );
    }

    // --- Per-tick ---

    /// Advance weapon timers, pending shots and bursts.
    pub fn update_weapons(
        &mut self,
        dt: f64,
        actors: &ActorIndex,
        rng: &mut impl Rng,
        shots: &mut Vec<Shot>,
    ) {
        let shooter = self.shooter();
        for (i, weapon) in self.weapons.iter_mut().enumerate() {
            weapon.update(dt, &shooter, actors, rng, shots, i);
            if weapon.take_reload_notice() {
                tracing::debug!(actor = %self.id, weapon = i, "reload started");
                self.events.push(CombatEvent::ReloadStarted {
                    actor: self.id,
                    weapon: i,
                });
            }
        }
    }

    /// Advance every timer and apply this tick's movement.
    pub fn update(&mut self, dt: f64) {
        if !self.is_alive() {
            self.move_intent = None;
            self.face_intent = None;
            return;
        }

        if self.start_lag > 0.0 {
            self.start_lag = (self.start_lag - dt).max(0.0);
        }
        if self.stagger.update(dt) {
            tracing::debug!(actor = %self.id, "stagger recovered");
            self.events.push(CombatEvent::StaggerRecovered { actor: self.id });
        }
        self.energy.update(dt);

        if self.boost.is_active() {
            let exhausted = self.energy.drain(self.stats.boost_drain_rate * dt);
            if exhausted {
                self.stop_assault_boost();
            }
        }
        self.boost.ramp(
            dt,
            self.stats.boost_max_multiplier,
            self.stats.boost_accel_time,
            self.stats.boost_decel_time,
        );

        self.dash.tick_cooldown(dt);
        self.last_position = self.position;
        self.apply_movement(dt);
        self.apply_rotation(dt);

        self.velocity = if dt > 0.0 {
            (self.position - self.last_position) / dt
        } else {
            DVec2::ZERO
        };
        self.move_intent = None;
        self.face_intent = None;
    }

    fn apply_movement(&mut self, dt: f64) {
        if self.dash.is_active() {
            let displacement = self.dash.step(dt, &self.stats);
            self.position += displacement;
            self.speed = 0.0;
            self.events.push(CombatEvent::DashThrusterTick { actor: self.id });
            return;
        }

        let intent = if self.can_move_or_rotate() {
            self.move_intent
        } else {
            None
        };
        match intent {
            Some(intent) => {
                let top = self.move_speed();
                self.speed = if self.speed < top {
                    (self.speed + self.stats.acceleration * dt).min(top)
                } else {
                    (self.speed - self.stats.deceleration * dt).max(top)
                };
                self.move_direction = intent.direction;
                if intent.rotate_to_movement && self.face_intent.is_none() {
                    self.face_intent = Some(intent.direction);
                }
            }
            None => {
                self.speed = (self.speed - self.stats.deceleration * dt).max(0.0);
            }
        }

        if self.speed > 0.0 {
            let step = self.move_direction * self.speed * dt;
            self.position += step;
            self.events.push(CombatEvent::MoveThrusterTick {
                actor: self.id,
                velocity: self.move_direction * self.speed,
            });
        }
    }

    fn apply_rotation(&mut self, dt: f64) {
        let Some(target) = self.face_intent else {
            return;
        };
        if !self.can_move_or_rotate() {
            return;
        }
        let max = self.stats.turn_rate.to_radians() * dt;
        self.facing = rotate_towards(self.facing, target, max);
    }

    /// Move pending notifications into `out`.
    pub fn drain_events(&mut self, out: &mut Vec<CombatEvent>) {
        out.append(&mut self.events);
    }

    #[cfg(test)]
    pub(crate) fn energy_mut(&mut self) -> &mut EnergyPool {
        &mut self.energy
    }

    #[cfg(test)]
    pub(crate) fn set_position(&mut self, position: DVec2) {
        self.position = position;
        self.last_position = position;
    }
}

#[cfg(test)]
mod tests;
