//! HTTP boundary for agentsite.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
