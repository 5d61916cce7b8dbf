//! Decorator nodes that modify a single child's result.

use crate::utility::UtilityScorer;
use crate::{Blackboard, Node, NodeError, Status};

/// Single-child wrappers.
pub enum Decorator<C> {
    /// Swaps Success and Failure; Running passes through.
    Invert(Node<C>),
    /// Reports Success whatever the child did, unless it is still running.
    Succeed(Node<C>),
    /// Carries a utility score; executing it executes the child.
    Utility(UtilityScorer<C>),
}

impl<C> Decorator<C> {
    pub fn tick(&mut self, ctx: &mut C, bb: &mut Blackboard) -> Result<Status, NodeError> {
        match self {
            Decorator::Invert(child) => Ok(child.tick(ctx, bb)?.invert()),
            Decorator::Succeed(child) => Ok(match child.tick(ctx, bb)? {
                Status::Running => Status::Running,
                _ => Status::Success,
            }),
            Decorator::Utility(scorer) => scorer.tick(ctx, bb),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Decorator::Invert(_) => "inverter",
            Decorator::Succeed(_) => "always_succeed",
            Decorator::Utility(scorer) => scorer.name(),
        }
    }
}
