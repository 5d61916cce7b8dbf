//! Tree ownership and the per-tick entry point.

use crate::{Blackboard, Node, NodeError, Status};

/// A root node plus the blackboard its nodes share.
pub struct BehaviorTree<C> {
    root: Option<Node<C>>,
    blackboard: Blackboard,
}

impl<C> BehaviorTree<C> {
    pub fn new(root: Node<C>) -> Self {
        Self {
            root: Some(root),
            blackboard: Blackboard::new(),
        }
    }

    /// A tree with no root. Ticking it yields `Failure`.
    pub fn empty() -> Self {
        Self {
            root: None,
            blackboard: Blackboard::new(),
        }
    }

    pub fn with_blackboard(mut self, blackboard: Blackboard) -> Self {
        self.blackboard = blackboard;
        self
    }

    pub fn set_root(&mut self, root: Node<C>) {
        self.root = Some(root);
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    /// Execute the root once.
    pub fn tick(&mut self, ctx: &mut C) -> Result<Status, NodeError> {
        match self.root.as_mut() {
            Some(root) => root.tick(ctx, &mut self.blackboard),
            None => Ok(Status::Failure),
        }
    }
}

/// Drives a tree once per host tick and tracks whether a root execution is
/// in progress.
pub struct TreeExecutor<C> {
    tree: BehaviorTree<C>,
    running: bool,
    last_status: Option<Status>,
}

impl<C> TreeExecutor<C> {
    pub fn new(tree: BehaviorTree<C>) -> Self {
        Self {
            tree,
            running: false,
            last_status: None,
        }
    }

    /// Tick the tree. The running flag is cleared on every exit path,
    /// including errors, which propagate to the caller.
    pub fn tick(&mut self, ctx: &mut C) -> Result<Status, NodeError> {
        self.running = true;
        let result = self.tree.tick(ctx);
        self.running = false;
        self.last_status = result.as_ref().ok().copied();
        result
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Status of the most recent successful tick.
    pub fn last_status(&self) -> Option<Status> {
        self.last_status
    }

    pub fn tree(&self) -> &BehaviorTree<C> {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut BehaviorTree<C> {
        &mut self.tree
    }

    pub fn blackboard(&self) -> &Blackboard {
        self.tree.blackboard()
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        self.tree.blackboard_mut()
    }
}
