//! Events emitted by the simulation for presentation layers.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::types::ActorId;

/// Discrete combat notifications. Renderers and audio subscribe to these;
/// the simulation never reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A dash began.
    DashStarted {
        actor: ActorId,
        direction: DVec2,
        duration: f64,
    },
    /// Emitted every tick a dash is moving the actor.
    DashThrusterTick { actor: ActorId },
    /// Emitted every tick the actor moves under its own power.
    MoveThrusterTick { actor: ActorId, velocity: DVec2 },
    /// Stagger gauge filled.
    StaggerEntered { actor: ActorId },
    /// Stagger duration elapsed.
    StaggerRecovered { actor: ActorId },
    /// Assault boost engaged.
    BoostStarted { actor: ActorId },
    /// Assault boost released or exhausted.
    BoostStopped { actor: ActorId },
    /// A weapon discharged.
    WeaponFired {
        actor: ActorId,
        weapon: usize,
        muzzle: DVec2,
        direction: DVec2,
    },
    /// A weapon emptied its magazine.
    ReloadStarted { actor: ActorId, weapon: usize },
    /// A projectile or melee strike landed.
    Hit {
        attacker: ActorId,
        target: ActorId,
        damage: i32,
        /// Stagger contribution.
        impact: f64,
        point: DVec2,
    },
    /// Health reached zero.
    ActorDestroyed { actor: ActorId },
}
