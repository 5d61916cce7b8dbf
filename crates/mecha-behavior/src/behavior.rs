//! Leaf behavior trait.
//!
//! Composites and decorators are closed variants of [`Node`](crate::Node);
//! leaves are open. Anything implementing [`Behavior`] can be dropped into
//! a tree as an action, and closures join through [`ActionFn`].

use crate::{Blackboard, NodeError, Status};

/// A leaf action evaluated against a context `C`.
///
/// Leaves may keep private per-instance state (timers, hysteresis flags)
/// between ticks, hence `&mut self`.
pub trait Behavior<C> {
    /// Do one bounded unit of work.
    ///
    /// Returns `Err` only for genuine faults; a leaf that cannot act returns
    /// `Ok(Status::Failure)`.
    fn tick(&mut self, ctx: &mut C, bb: &mut Blackboard) -> Result<Status, NodeError>;

    /// Name used in logs and error reports.
    fn name(&self) -> &'static str {
        "action"
    }
}

/// Leaf wrapping a closure.
pub struct ActionFn<F> {
    name: &'static str,
    f: F,
}

impl<F> ActionFn<F> {
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<C, F> Behavior<C> for ActionFn<F>
where
    F: FnMut(&mut C, &mut Blackboard) -> Result<Status, NodeError>,
{
    fn tick(&mut self, ctx: &mut C, bb: &mut Blackboard) -> Result<Status, NodeError> {
        (self.f)(ctx, bb)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
