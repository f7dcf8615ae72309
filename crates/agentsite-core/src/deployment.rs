//! Deployment lifecycle types.

use serde::{Deserialize, Serialize};

use crate::DeploymentId;

/// Remote lifecycle status of a deployment.
///
/// Only `Ready` and `Error` are terminal. Any state the platform introduces
/// later deserializes as `Other` and is treated as still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadyState {
    Queued,
    Initializing,
    Building,
    Ready,
    Error,
    Canceled,
    #[serde(other)]
    Other,
}

impl ReadyState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReadyState::Ready | ReadyState::Error)
    }
}

/// Final outcome reported to the caller: the best public URL that could be
/// discovered, and the platform-assigned deployment id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDeployment {
    pub url: String,
    pub deployment_id: DeploymentId,
}
