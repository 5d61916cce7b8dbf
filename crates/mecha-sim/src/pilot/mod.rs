//! Pilot brains: the actions of the default tree and the tree itself.
//!
//! Every action ticks against the [`Battlefield`](crate::battlefield::Battlefield)
//! with the pilot's own actor in focus. Actions talk to each other only
//! through the blackboard keys in [`keys`].

pub mod approach;
pub mod attack;
pub mod builder;
pub mod evade;
pub mod evade_toggle;
pub mod idle;
pub mod keys;
pub mod profile;
pub mod strafe;
pub mod target;

pub use builder::default_tree;
pub use profile::PilotProfile;
