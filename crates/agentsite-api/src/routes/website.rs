//! Site generation endpoint.
//!
//! Builds the site bundle and deploys it. Every deployment failure is
//! absorbed into a demo-mode response; the end user never sees a hard
//! failure from the deployment platform.

use std::collections::BTreeMap;

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use agentsite_content::site::{self, AgentProfile};
use agentsite_core::FileBundle;
use agentsite_deployer::sanitize_project_name;

use crate::{ApiError, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(generate_website))
}

/// Uploaded image, base64-encoded by the client.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpload {
    /// Filename the site will reference, e.g. `logo.png`.
    pub file_name: String,
    /// Base64 content.
    pub data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateWebsiteRequest {
    pub agent_name: String,
    pub business_name: String,
    pub address: String,
    pub contact_number: String,
    pub email: String,
    #[serde(default)]
    pub logo: Option<ImageUpload>,
    #[serde(default)]
    pub office_photos: Vec<ImageUpload>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateWebsiteResponse {
    pub success: bool,
    pub website_url: String,
    pub deployment_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_files: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SiteStats>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub html_size: usize,
    pub css_size: usize,
    pub js_size: usize,
    pub total_size: usize,
}

async fn generate_website(
    State(state): State<AppState>,
    Json(req): Json<GenerateWebsiteRequest>,
) -> Result<Json<GenerateWebsiteResponse>, ApiError> {
    for (field, value) in [
        ("agentName", &req.agent_name),
        ("businessName", &req.business_name),
        ("address", &req.address),
        ("contactNumber", &req.contact_number),
        ("email", &req.email),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!(
                "missing required field: {field}"
            )));
        }
    }

    let profile = AgentProfile {
        agent_name: req.agent_name.clone(),
        business_name: req.business_name.clone(),
        address: req.address.clone(),
        contact_number: req.contact_number.clone(),
        email: req.email.clone(),
        logo_file_name: req.logo.as_ref().map(|logo| logo.file_name.clone()),
        office_photo_file_names: req
            .office_photos
            .iter()
            .map(|photo| photo.file_name.clone())
            .collect(),
    };

    let mut bundle = match &state.generator {
        Some(generator) => site::generate_site(generator.as_ref(), &profile).await?,
        None => site::template_site(&profile)?,
    };

    // Uploaded images arrive base64-encoded and go into the bundle as-is.
    if let Some(logo) = req.logo {
        bundle.insert(logo.file_name, logo.data);
    }
    for photo in req.office_photos {
        bundle.insert(photo.file_name, photo.data);
    }

    if let Some(deployer) = &state.deployer {
        match deployer.deploy(&bundle, &req.business_name).await {
            Ok(resolved) => {
                info!(
                    deployment = %resolved.deployment_id,
                    url = %resolved.url,
                    "site deployed"
                );
                return Ok(Json(GenerateWebsiteResponse {
                    success: true,
                    website_url: resolved.url,
                    deployment_id: resolved.deployment_id.to_string(),
                    message: "Website generated and deployed successfully.".to_string(),
                    generated_files: None,
                    stats: None,
                }));
            }
            Err(err) => {
                error!(error = %err, "deployment failed, answering in demo mode");
            }
        }
    }

    Ok(Json(demo_response(&req.business_name, &bundle)))
}

/// Demo-mode response: the files exist, nothing was deployed.
fn demo_response(business_name: &str, bundle: &FileBundle) -> GenerateWebsiteResponse {
    let slug = sanitize_project_name(business_name);
    let html = bundle.get(site::INDEX_FILE).unwrap_or_default();
    let css = bundle.get(site::STYLE_FILE).unwrap_or_default();
    let js = bundle.get(site::SCRIPT_FILE).unwrap_or_default();

    let generated_files = BTreeMap::from([
        (site::INDEX_FILE.to_string(), html.to_string()),
        (site::STYLE_FILE.to_string(), css.to_string()),
        (site::SCRIPT_FILE.to_string(), js.to_string()),
    ]);

    GenerateWebsiteResponse {
        success: true,
        website_url: format!("https://{slug}-insurance.demo.example.com"),
        deployment_id: format!("demo-{}", Uuid::new_v4()),
        message: "Website generated successfully. Files are ready for deployment.".to_string(),
        stats: Some(SiteStats {
            html_size: html.len(),
            css_size: css.len(),
            js_size: js.len(),
            total_size: html.len() + css.len() + js.len(),
        }),
        generated_files: Some(generated_files),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentsite_core::{DeploymentId, Error, Result};
    use agentsite_deployer::platform::{
        DeploymentStatus, NewDeployment, Platform, Project, UploadReceipt, UploadedFile,
    };
    use agentsite_deployer::{EncodedFile, SiteDeployer};
    use async_trait::async_trait;
    use std::sync::Arc;

    fn request() -> GenerateWebsiteRequest {
        GenerateWebsiteRequest {
            agent_name: "Jordan Lee".to_string(),
            business_name: "Lee Family Insurance".to_string(),
            address: "12 Main St".to_string(),
            contact_number: "555-0100".to_string(),
            email: "jordan@example.com".to_string(),
            logo: None,
            office_photos: Vec::new(),
        }
    }

    fn demo_state() -> AppState {
        AppState {
            deployer: None,
            generator: None,
        }
    }

    #[tokio::test]
    async fn unconfigured_platform_answers_in_demo_mode() {
        let Json(response) = generate_website(State(demo_state()), Json(request()))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(
            response.website_url,
            "https://lee-family-insurance-insurance.demo.example.com"
        );
        assert!(response.deployment_id.starts_with("demo-"));
        let files = response.generated_files.unwrap();
        assert!(files.contains_key("index.html"));
        let stats = response.stats.unwrap();
        assert!(stats.html_size > 0);
        assert_eq!(
            stats.total_size,
            stats.html_size + stats.css_size + stats.js_size
        );
    }

    #[tokio::test]
    async fn missing_required_fields_are_rejected() {
        let mut req = request();
        req.email = "  ".to_string();

        let err = generate_website(State(demo_state()), Json(req))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    struct RejectingPlatform;

    #[async_trait]
    impl Platform for RejectingPlatform {
        async fn create_deployment(
            &self,
            _name: &str,
            _files: &[EncodedFile],
        ) -> Result<NewDeployment> {
            Err(Error::CreationFailed("quota exceeded".to_string()))
        }

        async fn upload_file(&self, _filename: &str, _content: &str) -> Result<UploadReceipt> {
            unimplemented!()
        }

        async fn create_deployment_from_uploads(
            &self,
            _name: &str,
            _files: &[UploadedFile],
        ) -> Result<NewDeployment> {
            unimplemented!()
        }

        async fn deployment_status(&self, _id: &DeploymentId) -> Result<DeploymentStatus> {
            unimplemented!()
        }

        async fn project(&self, _name: &str) -> Result<Project> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn deployment_failure_degrades_to_demo_mode() {
        let state = AppState {
            deployer: Some(Arc::new(SiteDeployer::new(Arc::new(RejectingPlatform)))),
            generator: None,
        };

        let Json(response) = generate_website(State(state), Json(request()))
            .await
            .unwrap();

        assert!(response.success);
        assert!(response.deployment_id.starts_with("demo-"));
        assert!(response.generated_files.is_some());
    }

    #[tokio::test]
    async fn uploaded_images_join_the_bundle_under_their_filenames() {
        let mut req = request();
        req.logo = Some(ImageUpload {
            file_name: "logo.png".to_string(),
            data: "aWNvbg==".to_string(),
        });

        let Json(response) = generate_website(State(demo_state()), Json(req))
            .await
            .unwrap();

        // Demo mode echoes only the text files, but the template must
        // reference the uploaded logo by name.
        let files = response.generated_files.unwrap();
        assert!(files["index.html"].contains("logo.png"));
    }
}
