//! ECS systems that operate on the arena world each tick.
//!
//! Systems are plain functions over `&mut World` plus whatever shared
//! buffers they need. They keep no state of their own; everything lives in
//! components, the actor index, or the engine.

pub mod cleanup;
pub mod damage;
pub mod movement;
pub mod pilots;
pub mod projectiles;
pub mod sensors;
pub mod shots;
pub mod snapshot;
pub mod weapons;
