//! Deployment of generated site bundles to the remote platform.
//!
//! One deployment runs through four stages, strictly in order:
//! 1. encode the file bundle into the platform's wire format
//! 2. create the remote deployment (exactly one create call per invocation)
//! 3. poll the deployment status until READY/ERROR or the attempt budget
//!    runs out
//! 4. resolve the best public URL to report back to the caller

pub mod encode;
pub mod name;
pub mod orchestrator;
pub mod platform;
mod resolve;
pub mod submit;

pub use encode::{EncodedFile, encode_bundle};
pub use name::sanitize_project_name;
pub use orchestrator::{PollPolicy, SiteDeployer};
pub use platform::{DeploymentStatus, HttpPlatform, NewDeployment, Platform};
pub use submit::{InlineSubmitter, Submitter, UploadSubmitter};
