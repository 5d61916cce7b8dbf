//! Fallback when there is nothing to fight.

use mecha_behavior::builder::action_fn;
use mecha_behavior::{Blackboard, Node, Status};

use crate::battlefield::Battlefield;

/// Leaf that does nothing and succeeds.
pub fn idle() -> Node<Battlefield> {
    action_fn("idle", |_: &mut Battlefield, _: &mut Blackboard| {
        Ok(Status::Success)
    })
}
