//! Real-time behavior tree library.
//!
//! Trees are generic over a context type `C` and share a typed
//! [`Blackboard`] between all nodes of one tree. Every node returns a
//! tri-state [`Status`]: `Running` lets leaves spread work across ticks
//! while each tick still executes synchronously from root to leaves.
//!
//! # Architecture
//!
//! - [`Node`]: closed set of control-flow variants plus open leaves
//! - [`Behavior`]: trait for leaf actions; closures join via [`ActionFn`]
//! - Composites: sequence, selector, parallel ([`ParallelPolicy`]), utility selector
//! - Decorators ([`Decorator`]): inverter, always-succeed, [`UtilityScorer`]
//! - [`BehaviorTree`] + [`TreeExecutor`]: ownership and per-tick entry point
//! - [`builder`]: free functions for terse tree construction

pub mod behavior;
pub mod blackboard;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod error;
pub mod node;
pub mod status;
pub mod tree;
pub mod utility;

pub use behavior::{ActionFn, Behavior};
pub use blackboard::{Blackboard, BlackboardKey, BlackboardValue, Value, ValueKind};
pub use composite::ParallelPolicy;
pub use decorator::Decorator;
pub use error::{BlackboardError, NodeError};
pub use node::Node;
pub use status::Status;
pub use tree::{BehaviorTree, TreeExecutor};
pub use utility::{Aggregation, Consideration, ResponseCurve, UtilityScorer};
