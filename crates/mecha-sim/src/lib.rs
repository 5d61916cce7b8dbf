//! Headless arena simulation.
//!
//! Owns the hecs ECS world, the pilot brains and every per-tick system:
//! threat sensing, decision making, weapons, actor state machines,
//! projectile flight and damage. Driven one fixed tick at a time through
//! [`engine::SimulationEngine`].

pub mod actor;
pub mod battlefield;
pub mod engine;
pub mod error;
pub mod index;
pub mod pilot;
pub mod prediction;
pub mod projectile;
pub mod sensor;
pub mod systems;
pub mod weapon;

pub use engine::{SimConfig, SimulationEngine};
pub use error::{ConfigError, SimError};

#[cfg(test)]
mod tests;
