//! Core types and definitions for the mecha arena.
//!
//! This crate defines the vocabulary shared across the other crates:
//! geometry helpers, identifiers, stat bundles, blueprints, events and
//! snapshots. It has no dependency on the ECS or the decision engine.

pub mod blueprint;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod stats;
pub mod types;

#[cfg(test)]
mod tests;
