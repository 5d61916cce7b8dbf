//! Arena snapshot: the complete externally visible state after a tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::CombatStyle;
use crate::events::CombatEvent;
use crate::types::{ActorId, SimTime, TeamId};

/// Complete arena state published after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub actors: Vec<ActorView>,
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<CombatEvent>,
}

impl ArenaSnapshot {
    /// Teams that still have a living actor.
    pub fn teams_alive(&self) -> Vec<TeamId> {
        let mut teams: Vec<TeamId> = self
            .actors
            .iter()
            .filter(|a| a.health > 0)
            .map(|a| a.team)
            .collect();
        teams.sort_unstable();
        teams.dedup();
        teams
    }
}

/// One mecha as seen from outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub id: ActorId,
    pub team: TeamId,
    pub style: CombatStyle,
    pub position: DVec2,
    pub facing: DVec2,
    pub velocity: DVec2,
    pub health: i32,
    pub max_health: i32,
    pub energy: f64,
    pub stagger: f64,
    pub staggered: bool,
    pub dashing: bool,
    pub boosting: bool,
    pub target: Option<ActorId>,
}

/// One projectile in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: DVec2,
    pub direction: DVec2,
    pub speed: f64,
    pub shooter: ActorId,
    pub homing: bool,
}
