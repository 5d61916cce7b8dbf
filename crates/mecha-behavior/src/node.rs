//! The tree node type.

use crate::composite::{self, ParallelPolicy};
use crate::decorator::Decorator;
use crate::utility::UtilityScorer;
use crate::{Behavior, Blackboard, NodeError, Status};

/// One node of a behavior tree.
///
/// Control-flow nodes form a closed set dispatched by [`Node::tick`];
/// leaves are open through [`Node::Action`].
pub enum Node<C> {
    Sequence(Vec<Node<C>>),
    Selector(Vec<Node<C>>),
    Parallel {
        policy: ParallelPolicy,
        children: Vec<Node<C>>,
    },
    UtilitySelector(Vec<UtilityScorer<C>>),
    Decorator(Box<Decorator<C>>),
    Action(Box<dyn Behavior<C>>),
}

impl<C> Node<C> {
    /// Execute this node for one tick. Children run synchronously within
    /// the same call.
    pub fn tick(&mut self, ctx: &mut C, bb: &mut Blackboard) -> Result<Status, NodeError> {
        match self {
            Node::Sequence(children) => composite::tick_sequence(children, ctx, bb),
            Node::Selector(children) => composite::tick_selector(children, ctx, bb),
            Node::Parallel { policy, children } => {
                composite::tick_parallel(*policy, children, ctx, bb)
            }
            Node::UtilitySelector(options) => composite::tick_utility(options, ctx, bb),
            Node::Decorator(decorator) => decorator.tick(ctx, bb),
            Node::Action(action) => action.tick(ctx, bb),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Node::Sequence(_) => "sequence",
            Node::Selector(_) => "selector",
            Node::Parallel { .. } => "parallel",
            Node::UtilitySelector(_) => "utility_selector",
            Node::Decorator(decorator) => decorator.name(),
            Node::Action(action) => action.name(),
        }
    }
}
