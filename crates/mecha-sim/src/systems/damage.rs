//! Applying a landed hit to an actor.

use glam::DVec2;
use hecs::{Entity, World};

use mecha_core::events::CombatEvent;
use mecha_core::types::ActorId;

use crate::actor::{Actor, DamageReport};

/// A hit about to be applied.
#[derive(Debug, Clone, Copy)]
pub struct Strike {
    pub attacker: ActorId,
    pub target: Entity,
    pub damage: i32,
    pub impact: f64,
    pub point: DVec2,
}

/// Damage the target if it is still alive and record the hit.
pub fn apply(world: &mut World, strike: Strike, events: &mut Vec<CombatEvent>) -> Option<DamageReport> {
    let mut actor = world.get::<&mut Actor>(strike.target).ok()?;
    if !actor.is_alive() {
        return None;
    }
    let report = actor.take_damage(strike.damage, strike.impact);
    events.push(CombatEvent::Hit {
        attacker: strike.attacker,
        target: actor.id(),
        damage: report.dealt,
        impact: strike.impact,
        point: strike.point,
    });
    Some(report)
}
