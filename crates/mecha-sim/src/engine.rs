//! Simulation engine: the arena step.
//!
//! `SimulationEngine` owns the hecs world (inside the [`Battlefield`]), the
//! pilot brains and the clock. It runs every system in a fixed order and
//! produces `ArenaSnapshot`s. Headless and deterministic: the same seed and
//! spawns give the same snapshots.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use mecha_behavior::{Blackboard, TreeExecutor};
use mecha_core::blueprint::MechaBlueprint;
use mecha_core::constants::DT;
use mecha_core::events::CombatEvent;
use mecha_core::state::ArenaSnapshot;
use mecha_core::types::{ActorId, SimTime};

use crate::actor::Actor;
use crate::battlefield::Battlefield;
use crate::error::{ConfigError, SimError};
use crate::pilot::{self, keys, PilotProfile};
use crate::projectile::Projectile;
use crate::sensor::ThreatSensor;
use crate::systems;
use crate::systems::pilots::Brain;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Simulated seconds per real tick, as a multiple of the tick length.
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::json("sim config"))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(ConfigError::TimeScale(self.time_scale));
        }
        Ok(())
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    field: Battlefield,
    brains: Vec<Brain>,
    time: SimTime,
    time_scale: f64,
    next_actor_id: u32,
    despawn_buffer: Vec<Entity>,
    events: Vec<CombatEvent>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        let time_scale = if config.time_scale.is_finite() {
            config.time_scale.max(0.0)
        } else {
            1.0
        };
        Self {
            field: Battlefield::new(
                World::new(),
                ChaCha8Rng::seed_from_u64(config.seed),
                DT * time_scale,
            ),
            brains: Vec::new(),
            time: SimTime::default(),
            time_scale,
            next_actor_id: 1,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Spawn a mecha with the default pilot tree.
    pub fn spawn_mecha(&mut self, blueprint: &MechaBlueprint, profile: &PilotProfile) -> ActorId {
        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;

        let actor = Actor::new(id, blueprint);
        let sensor = ThreatSensor::new(profile.sensor.clone());
        let entity = self.field.world.spawn((actor, sensor));
        self.brains.push(Brain {
            entity,
            id,
            executor: TreeExecutor::new(pilot::default_tree(profile)),
        });
        tracing::debug!(actor = %id, name = %blueprint.name, team = blueprint.team, "mecha spawned");
        id
    }

    /// Spawn from tooling-authored JSON.
    pub fn spawn_from_json(&mut self, blueprint: &str, profile: &str) -> Result<ActorId, SimError> {
        let blueprint = MechaBlueprint::from_json(blueprint).map_err(ConfigError::json("blueprint"))?;
        let profile = PilotProfile::from_json(profile)?;
        Ok(self.spawn_mecha(&blueprint, &profile))
    }

    /// Spawn a mecha without a brain, driven only by direct calls.
    pub fn spawn_drone(&mut self, blueprint: &MechaBlueprint) -> ActorId {
        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;
        let sensor = ThreatSensor::default();
        self.field.world.spawn((Actor::new(id, blueprint), sensor));
        id
    }

    /// Put a scripted projectile in flight.
    pub fn spawn_projectile(&mut self, projectile: Projectile) -> Entity {
        self.field.world.spawn((projectile,))
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> Result<ArenaSnapshot, SimError> {
        self.run_systems()?;
        self.time.advance(self.field.dt);
        let events = std::mem::take(&mut self.events);
        Ok(self.snapshot_with(events))
    }

    /// Current state without advancing. Carries no events.
    pub fn snapshot(&self) -> ArenaSnapshot {
        self.snapshot_with(Vec::new())
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.field.world
    }

    /// Mutable access to one actor, for scripted control.
    pub fn actor_mut(&mut self, id: ActorId) -> Option<hecs::RefMut<'_, Actor>> {
        let entity = self.entity_of(id)?;
        self.field.world.get::<&mut Actor>(entity).ok()
    }

    /// Locked target of the actor's brain, if any.
    pub fn target_of(&self, id: ActorId) -> Option<ActorId> {
        self.brains
            .iter()
            .find(|b| b.id == id)
            .and_then(|b| keys::target(b.executor.blackboard()).ok().flatten())
    }

    /// Blackboard of the actor's brain, for hosts that seed pilot memory.
    pub fn blackboard_mut(&mut self, id: ActorId) -> Option<&mut Blackboard> {
        self.brains
            .iter_mut()
            .find(|b| b.id == id)
            .map(|b| b.executor.blackboard_mut())
    }

    fn entity_of(&self, id: ActorId) -> Option<Entity> {
        self.field
            .world
            .query::<&Actor>()
            .iter()
            .find(|(_, a)| a.id() == id)
            .map(|(e, _)| e)
    }

    fn snapshot_with(&self, events: Vec<CombatEvent>) -> ArenaSnapshot {
        systems::snapshot::build_snapshot(&self.field.world, self.time, events, |entity| {
            self.brains
                .iter()
                .find(|b| b.entity == entity)
                .and_then(|b| keys::target(b.executor.blackboard()).ok().flatten())
        })
    }

    /// Run all systems in order.
    fn run_systems(&mut self) -> Result<(), SimError> {
        let dt = self.field.dt;
        // 1. Actor index for this tick
        self.field.refresh_index();
        // 2. Threat scans
        systems::sensors::run(&mut self.field.world, dt);
        // 3. Pilot brains (intents, attacks)
        systems::pilots::run(&mut self.field, &mut self.brains)?;
        // 4. Weapon timers, pre-delays, bursts
        let field = &mut self.field;
        systems::weapons::run(
            &mut field.world,
            &field.actors,
            &mut field.rng,
            &mut field.shots,
            dt,
        );
        // 5. Actor state machines and movement
        systems::movement::run(&mut field.world, dt);
        // 6. Refresh positions for hit tests
        field.refresh_index();
        // 7. Discharges → projectiles / melee hits
        systems::shots::run(&mut field.world, &field.actors, &mut field.shots, &mut self.events);
        // 8. Projectile flight and hits
        systems::projectiles::run(
            &mut field.world,
            &field.actors,
            dt,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 9. Cleanup
        systems::cleanup::run(&mut field.world, &mut self.despawn_buffer, &mut self.events);
        Ok(())
    }
}
