//! Builder utilities for terse tree construction.
//!
//! `sequence(vec![...])` instead of `Node::Sequence(vec![...])`, and leaves
//! without spelling out the boxing.

use crate::decorator::Decorator;
use crate::{
    ActionFn, Behavior, Blackboard, Consideration, Node, NodeError, ParallelPolicy, Status,
    UtilityScorer,
};

#[inline]
pub fn sequence<C>(children: Vec<Node<C>>) -> Node<C> {
    Node::Sequence(children)
}

#[inline]
pub fn selector<C>(children: Vec<Node<C>>) -> Node<C> {
    Node::Selector(children)
}

#[inline]
pub fn parallel<C>(policy: ParallelPolicy, children: Vec<Node<C>>) -> Node<C> {
    Node::Parallel { policy, children }
}

#[inline]
pub fn utility_selector<C>(options: Vec<UtilityScorer<C>>) -> Node<C> {
    Node::UtilitySelector(options)
}

/// A scored option, averaging its considerations.
#[inline]
pub fn scored<C>(
    name: &'static str,
    considerations: Vec<Consideration<C>>,
    child: Node<C>,
) -> UtilityScorer<C> {
    UtilityScorer::new(name, considerations, child)
}

/// A scorer used as a standalone decorator.
#[inline]
pub fn utility<C>(scorer: UtilityScorer<C>) -> Node<C> {
    Node::Decorator(Box::new(Decorator::Utility(scorer)))
}

#[inline]
pub fn inverter<C>(child: Node<C>) -> Node<C> {
    Node::Decorator(Box::new(Decorator::Invert(child)))
}

#[inline]
pub fn always_succeed<C>(child: Node<C>) -> Node<C> {
    Node::Decorator(Box::new(Decorator::Succeed(child)))
}

/// Box a leaf behavior.
#[inline]
pub fn action<C, B: Behavior<C> + 'static>(behavior: B) -> Node<C> {
    Node::Action(Box::new(behavior))
}

/// Register a closure as a leaf.
#[inline]
pub fn action_fn<C, F>(name: &'static str, f: F) -> Node<C>
where
    F: FnMut(&mut C, &mut Blackboard) -> Result<Status, NodeError> + 'static,
{
    Node::Action(Box::new(ActionFn::new(name, f)))
}
