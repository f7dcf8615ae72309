//! Submission strategies for creating a deployment.

use agentsite_core::{FileBundle, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::encode::encode_bundle;
use crate::platform::{NewDeployment, Platform, UploadedFile};

/// How a bundle becomes a remote deployment.
///
/// The platform does not deduplicate creates, so each submission issues
/// exactly one create call; retrying would mint a second deployment.
#[async_trait]
pub trait Submitter: Send + Sync {
    fn name(&self) -> &'static str;

    async fn submit(
        &self,
        platform: &dyn Platform,
        project: &str,
        bundle: &FileBundle,
    ) -> Result<NewDeployment>;
}

/// Inline submission: file contents ride along base64-encoded inside the
/// create call itself. The default strategy.
pub struct InlineSubmitter;

#[async_trait]
impl Submitter for InlineSubmitter {
    fn name(&self) -> &'static str {
        "inline"
    }

    async fn submit(
        &self,
        platform: &dyn Platform,
        project: &str,
        bundle: &FileBundle,
    ) -> Result<NewDeployment> {
        let files = encode_bundle(bundle);
        debug!(project, files = files.len(), "creating deployment with inline files");
        platform.create_deployment(project, &files).await
    }
}

/// Two-phase submission: upload every file first, then create a deployment
/// referencing the uploads by digest.
pub struct UploadSubmitter;

#[async_trait]
impl Submitter for UploadSubmitter {
    fn name(&self) -> &'static str {
        "upload"
    }

    async fn submit(
        &self,
        platform: &dyn Platform,
        project: &str,
        bundle: &FileBundle,
    ) -> Result<NewDeployment> {
        let mut uploaded = Vec::with_capacity(bundle.len());
        for (file, content) in bundle.iter() {
            let receipt = platform.upload_file(file, content).await?;
            uploaded.push(UploadedFile {
                file: file.to_string(),
                sha: receipt.sha,
                size: receipt.size,
            });
        }
        debug!(project, files = uploaded.len(), "creating deployment from uploads");
        platform
            .create_deployment_from_uploads(project, &uploaded)
            .await
    }
}
