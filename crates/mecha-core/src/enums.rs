//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// How a pilot prefers to fight. Read once at spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatStyle {
    /// Closes in and favors melee weapons.
    Melee,
    /// Keeps distance and excludes melee weapons.
    #[default]
    Ranged,
}

/// Delivery mechanism of a weapon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Resolves instantly against a target within reach.
    Melee,
    /// Spawns projectiles.
    #[default]
    Ranged,
}

/// Attachment point of a mecha part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartSlot {
    Head,
    #[default]
    Core,
    Arms,
    Legs,
    Booster,
    Generator,
}
