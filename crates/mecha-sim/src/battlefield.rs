//! Behavior-tree context shared by every pilot brain.
//!
//! The engine points `focus` at one actor, ticks that actor's tree, then
//! moves on. Actions reach their own actor through [`Battlefield::pilot`],
//! which splits the borrow so the actor, its sensor, the read-only actor
//! index and the shot buffer can be used together.

use glam::DVec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use mecha_behavior::NodeError;
use mecha_core::types::ActorId;

use crate::actor::Actor;
use crate::index::{ActorEntry, ActorIndex};
use crate::sensor::ThreatSensor;
use crate::weapon::Shot;

#[derive(Debug, Error)]
pub enum PilotError {
    #[error("no actor in focus")]
    NoFocus,
    #[error("focus entity {0:?} has no actor or sensor")]
    MissingActor(Entity),
}

pub struct Battlefield {
    pub world: World,
    pub actors: ActorIndex,
    pub rng: ChaCha8Rng,
    /// Discharges waiting for the shot system.
    pub shots: Vec<Shot>,
    /// Seconds per tick for the current step.
    pub dt: f64,
    focus: Option<Entity>,
}

/// Mutable view of the focused actor plus the shared state it may touch.
pub struct Pilot<'a> {
    pub entity: Entity,
    pub actor: &'a mut Actor,
    pub sensor: &'a mut ThreatSensor,
    pub actors: &'a ActorIndex,
    pub rng: &'a mut ChaCha8Rng,
    pub shots: &'a mut Vec<Shot>,
    pub dt: f64,
}

impl<'a> Pilot<'a> {
    /// Index entry for `id` if it is a living enemy.
    pub fn enemy(&self, id: ActorId) -> Option<&'a ActorEntry> {
        let entry = self.actors.alive(id)?;
        (entry.team != self.actor.team()).then_some(entry)
    }

    pub fn position(&self) -> DVec2 {
        self.actor.position()
    }
}

impl Battlefield {
    pub fn new(world: World, rng: ChaCha8Rng, dt: f64) -> Self {
        Self {
            world,
            actors: ActorIndex::default(),
            rng,
            shots: Vec::new(),
            dt,
            focus: None,
        }
    }

    pub fn focus(&self) -> Option<Entity> {
        self.focus
    }

    pub fn set_focus(&mut self, entity: Option<Entity>) {
        self.focus = entity;
    }

    pub fn refresh_index(&mut self) {
        self.actors.rebuild(&self.world);
    }

    /// Index entry of the focused actor.
    pub fn focus_entry(&self) -> Option<&ActorEntry> {
        let entity = self.focus?;
        self.actors.entries().iter().find(|e| e.entity == entity)
    }

    /// Read the focused actor.
    pub fn with_focus<R>(&self, f: impl FnOnce(&Actor) -> R) -> Option<R> {
        let entity = self.focus?;
        let actor = self.world.get::<&Actor>(entity).ok()?;
        Some(f(&actor))
    }

    /// Split borrow of the focused actor for one action.
    pub fn pilot(&mut self) -> Result<Pilot<'_>, NodeError> {
        let entity = self
            .focus
            .ok_or_else(|| NodeError::action("pilot", PilotError::NoFocus))?;
        let (actor, sensor) = self
            .world
            .query_one_mut::<(&mut Actor, &mut ThreatSensor)>(entity)
            .map_err(|_| NodeError::action("pilot", PilotError::MissingActor(entity)))?;
        Ok(Pilot {
            entity,
            actor,
            sensor,
            actors: &self.actors,
            rng: &mut self.rng,
            shots: &mut self.shots,
            dt: self.dt,
        })
    }
}
