//! Errors raised while ticking a tree.

use crate::blackboard::ValueKind;

/// Typed blackboard lookup failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlackboardError {
    #[error("blackboard key `{0}` is not set")]
    Missing(&'static str),
    #[error("blackboard key `{key}` holds {found:?}, expected {expected:?}")]
    TypeMismatch {
        key: &'static str,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// A genuine fault inside a node. Ordinary "cannot do that now" outcomes are
/// `Status::Failure`, never errors.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error(transparent)]
    Blackboard(#[from] BlackboardError),
    #[error("action `{name}` failed")]
    Action {
        name: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl NodeError {
    /// Wrap an arbitrary error raised by the named action.
    pub fn action(
        name: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        NodeError::Action {
            name,
            source: source.into(),
        }
    }
}
