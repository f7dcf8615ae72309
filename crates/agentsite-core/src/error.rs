//! Error types for agentsite.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("deployment token is not configured")]
    MissingCredential,

    #[error("deployment creation failed: {0}")]
    CreationFailed(String),

    #[error("deployment failed: {0}")]
    DeploymentFailed(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("content generation failed: {0}")]
    Generation(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
