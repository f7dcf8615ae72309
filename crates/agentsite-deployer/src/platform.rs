//! Client for the remote deployment platform.

use agentsite_config::PlatformConfig;
use agentsite_core::{DeploymentId, Error, ReadyState, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::encode::EncodedFile;

/// Deployment as returned by a create call. The generated host and the id
/// are fixed at creation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDeployment {
    pub id: DeploymentId,
    /// Per-deployment host, without scheme.
    pub url: String,
}

/// Status snapshot from polling a deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentStatus {
    #[serde(rename = "readyState")]
    pub ready_state: ReadyState,
    /// Deployment-level alias hosts; assigned asynchronously, may stay empty.
    #[serde(default)]
    pub alias: Vec<String>,
}

/// Project metadata, used to discover the public alias.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub alias: Vec<ProjectAlias>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectAlias {
    pub domain: String,
}

/// Digest receipt for one uploaded file.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    pub sha: String,
    pub size: u64,
}

/// Reference to a previously uploaded file, as the create call expects it.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedFile {
    pub file: String,
    pub sha: String,
    pub size: u64,
}

/// Seam over the remote deployment platform.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Create a deployment from inline-encoded files.
    async fn create_deployment(
        &self,
        name: &str,
        files: &[EncodedFile],
    ) -> Result<NewDeployment>;

    /// Upload one file, returning the platform-computed digest.
    async fn upload_file(&self, filename: &str, content: &str) -> Result<UploadReceipt>;

    /// Create a deployment referencing previously uploaded files.
    async fn create_deployment_from_uploads(
        &self,
        name: &str,
        files: &[UploadedFile],
    ) -> Result<NewDeployment>;

    /// Fetch the current status of a deployment.
    async fn deployment_status(&self, id: &DeploymentId) -> Result<DeploymentStatus>;

    /// Fetch project metadata by sanitized name.
    async fn project(&self, name: &str) -> Result<Project>;
}

/// Production implementation over HTTP.
pub struct HttpPlatform {
    http: reqwest::Client,
    config: PlatformConfig,
}

impl HttpPlatform {
    pub fn new(config: PlatformConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn bearer(&self) -> Result<&str> {
        self.config.token.as_deref().ok_or(Error::MissingCredential)
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.config.api_base.as_str().trim_end_matches('/'),
            path
        )
    }
}

#[async_trait]
impl Platform for HttpPlatform {
    async fn create_deployment(
        &self,
        name: &str,
        files: &[EncodedFile],
    ) -> Result<NewDeployment> {
        let token = self.bearer()?;

        let payload = json!({
            "name": name,
            "files": files,
            "projectSettings": {
                "framework": null,
                "buildCommand": null,
                "outputDirectory": null,
                "installCommand": null,
                "devCommand": null,
            },
            "target": "production",
        });

        let response = self
            .http
            .post(self.endpoint("/v13/deployments"))
            .header("Authorization", format!("Bearer {}", token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::CreationFailed(remote_message(response).await));
        }

        response
            .json()
            .await
            .map_err(|e| Error::UnexpectedResponse(e.to_string()))
    }

    async fn upload_file(&self, filename: &str, content: &str) -> Result<UploadReceipt> {
        let token = self.bearer()?;

        let response = self
            .http
            .post(self.endpoint("/v2/files"))
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/octet-stream")
            .header("x-vercel-filename", filename)
            .body(content.to_string())
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::CreationFailed(format!(
                "upload of {} failed: {}",
                filename,
                remote_message(response).await
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::UnexpectedResponse(e.to_string()))
    }

    async fn create_deployment_from_uploads(
        &self,
        name: &str,
        files: &[UploadedFile],
    ) -> Result<NewDeployment> {
        let token = self.bearer()?;

        let payload = json!({
            "name": name,
            "files": files,
            "target": "production",
        });

        let response = self
            .http
            .post(self.endpoint("/v13/deployments"))
            .header("Authorization", format!("Bearer {}", token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::CreationFailed(remote_message(response).await));
        }

        response
            .json()
            .await
            .map_err(|e| Error::UnexpectedResponse(e.to_string()))
    }

    async fn deployment_status(&self, id: &DeploymentId) -> Result<DeploymentStatus> {
        let token = self.bearer()?;

        let response = self
            .http
            .get(self.endpoint(&format!("/v13/deployments/{}", id)))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Request(format!(
                "status check failed: {}",
                remote_message(response).await
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::UnexpectedResponse(e.to_string()))
    }

    async fn project(&self, name: &str) -> Result<Project> {
        let token = self.bearer()?;

        let response = self
            .http
            .get(self.endpoint(&format!("/v9/projects/{}", name)))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Request(format!(
                "project lookup failed: {}",
                remote_message(response).await
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::UnexpectedResponse(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Pull the remote error message out of a failed response, falling back to
/// the HTTP status line when the body is not the expected JSON shape.
async fn remote_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(ErrorBody {
            error: Some(detail),
        }) => detail.message,
        _ => status.to_string(),
    }
}
