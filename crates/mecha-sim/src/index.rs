//! Per-tick snapshot of every actor, queried by team and liveness.
//!
//! Rebuilt from the world at fixed points in the tick so pilots and
//! weapons can look at other actors while holding a mutable borrow of
//! their own.

use std::collections::HashMap;

use glam::DVec2;
use hecs::{Entity, World};

use mecha_core::enums::CombatStyle;
use mecha_core::types::{ActorId, TeamId};

use crate::actor::Actor;

/// Read-only view of one actor at index time.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorEntry {
    pub entity: Entity,
    pub id: ActorId,
    pub team: TeamId,
    pub style: CombatStyle,
    pub position: DVec2,
    pub velocity: DVec2,
    pub facing: DVec2,
    pub radius: f64,
    pub health: i32,
    pub alive: bool,
    pub staggered: bool,
}

impl ActorEntry {
    pub fn from_actor(entity: Entity, actor: &Actor) -> Self {
        Self {
            entity,
            id: actor.id(),
            team: actor.team(),
            style: actor.style(),
            position: actor.position(),
            velocity: actor.velocity(),
            facing: actor.facing(),
            radius: actor.stats().collision_radius,
            health: actor.health(),
            alive: actor.is_alive(),
            staggered: actor.is_staggered(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ActorIndex {
    entries: Vec<ActorEntry>,
    by_id: HashMap<ActorId, usize>,
}

impl ActorIndex {
    pub fn rebuild(&mut self, world: &World) {
        self.entries.clear();
        self.by_id.clear();
        for (entity, actor) in world.query::<&Actor>().iter() {
            self.entries.push(ActorEntry::from_actor(entity, actor));
        }
        // Query order follows archetype storage; sort for stable iteration.
        self.entries.sort_by_key(|e| e.id);
        for (i, entry) in self.entries.iter().enumerate() {
            self.by_id.insert(entry.id, i);
        }
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, entry: ActorEntry) {
        self.by_id.insert(entry.id, self.entries.len());
        self.entries.push(entry);
    }

    pub fn get(&self, id: ActorId) -> Option<&ActorEntry> {
        self.by_id.get(&id).map(|&i| &self.entries[i])
    }

    /// Living actor with the given id.
    pub fn alive(&self, id: ActorId) -> Option<&ActorEntry> {
        self.get(id).filter(|e| e.alive)
    }

    pub fn entries(&self) -> &[ActorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nearest living actor not on `team`, with its squared distance.
    pub fn nearest_enemy(&self, team: TeamId, from: DVec2) -> Option<(&ActorEntry, f64)> {
        self.entries
            .iter()
            .filter(|e| e.alive && e.team != team)
            .map(|e| (e, e.position.distance_squared(from)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Teams with at least one living actor.
    pub fn teams_alive(&self) -> Vec<TeamId> {
        let mut teams: Vec<TeamId> = self
            .entries
            .iter()
            .filter(|e| e.alive)
            .map(|e| e.team)
            .collect();
        teams.sort_unstable();
        teams.dedup();
        teams
    }
}
