//! Simulation-level errors.

use mecha_behavior::NodeError;
use mecha_core::types::ActorId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("pilot of {actor} failed")]
    Pilot {
        actor: ActorId,
        #[source]
        source: NodeError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Tooling-supplied data that could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {what} JSON")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("time scale must be finite and non-negative, got {0}")]
    TimeScale(f64),
}

impl ConfigError {
    pub fn json(what: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| ConfigError::Json { what, source }
    }
}
