//! Control-flow semantics of the composite nodes.
//!
//! Composites own an ordered child list fixed at construction and decide
//! which children run each tick: sequence (AND), selector (OR), parallel
//! (all children, policy-resolved) and utility selector (highest score).

use crate::utility::UtilityScorer;
use crate::{Blackboard, Node, NodeError, Status};

/// Children in order until one does not succeed.
///
/// - `Failure` or `Running` from a child stops the sequence and is returned
/// - `Success` moves on to the next child
/// - all children succeeding (or no children) gives `Success`
pub(crate) fn tick_sequence<C>(
    children: &mut [Node<C>],
    ctx: &mut C,
    bb: &mut Blackboard,
) -> Result<Status, NodeError> {
    for child in children {
        match child.tick(ctx, bb)? {
            Status::Success => continue,
            other => return Ok(other),
        }
    }
    Ok(Status::Success)
}

/// Children in order until one does not fail.
///
/// - `Success` or `Running` from a child stops the selector and is returned
/// - `Failure` moves on to the next child
/// - all children failing (or no children) gives `Failure`
pub(crate) fn tick_selector<C>(
    children: &mut [Node<C>],
    ctx: &mut C,
    bb: &mut Blackboard,
) -> Result<Status, NodeError> {
    for child in children {
        match child.tick(ctx, bb)? {
            Status::Failure => continue,
            other => return Ok(other),
        }
    }
    Ok(Status::Failure)
}

/// How a parallel node folds its children's statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParallelPolicy {
    /// Success when at least one child succeeded.
    #[default]
    RequireOne,
    /// Success only when every child succeeded.
    RequireAll,
}

/// Every child each tick, in list order. When the policy is not met the
/// node is `Running` if any child is still running, otherwise `Failure`.
pub(crate) fn tick_parallel<C>(
    policy: ParallelPolicy,
    children: &mut [Node<C>],
    ctx: &mut C,
    bb: &mut Blackboard,
) -> Result<Status, NodeError> {
    let mut successes = 0usize;
    let mut running = false;
    for child in children.iter_mut() {
        match child.tick(ctx, bb)? {
            Status::Success => successes += 1,
            Status::Running => running = true,
            Status::Failure => {}
        }
    }

    let met = match policy {
        ParallelPolicy::RequireOne => successes >= 1,
        ParallelPolicy::RequireAll => successes == children.len(),
    };
    Ok(if met {
        Status::Success
    } else if running {
        Status::Running
    } else {
        Status::Failure
    })
}

/// Scores every option and executes only the best one. The strictly
/// highest score wins; ties go to the earliest option. No options gives
/// `Failure`.
pub(crate) fn tick_utility<C>(
    options: &mut [UtilityScorer<C>],
    ctx: &mut C,
    bb: &mut Blackboard,
) -> Result<Status, NodeError> {
    let mut best: Option<(usize, f64)> = None;
    for (i, option) in options.iter().enumerate() {
        let score = option.score(ctx, bb);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }

    let Some((index, score)) = best else {
        return Ok(Status::Failure);
    };
    let option = &mut options[index];
    tracing::trace!(choice = option.name(), index, score, "utility selection");
    option.tick(ctx, bb)
}
