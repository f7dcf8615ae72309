//! Social content endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use agentsite_content::postprocess::{extract_hashtags, parse_json_array};
use agentsite_content::prompts::{self, Channel};

use crate::{ApiError, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{channel}/post", post(generate_post))
        .route("/{channel}/ideas", post(generate_ideas))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub topic: String,
    #[serde(default)]
    pub post_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub content: String,
    pub hashtags: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeasRequest {
    pub topic: String,
    #[serde(default = "default_idea_count")]
    pub count: usize,
}

fn default_idea_count() -> usize {
    5
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeasResponse {
    pub ideas: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

async fn generate_post(
    State(state): State<AppState>,
    Path(channel): Path<String>,
    Json(req): Json<PostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let channel: Channel = channel.parse()?;
    if req.topic.trim().is_empty() {
        return Err(ApiError::BadRequest("topic is required".to_string()));
    }
    let generator = state
        .generator
        .as_ref()
        .ok_or_else(|| ApiError::Internal("content generator is not configured".to_string()))?;

    let post_type = req
        .post_type
        .as_deref()
        .unwrap_or_else(|| channel.default_post_type());
    let prompt = prompts::post_prompt(channel, &req.topic, post_type);
    let content = generator.generate(&prompt).await?;
    let hashtags = extract_hashtags(&content);
    info!(%channel, post_type, hashtags = hashtags.len(), "generated post");

    Ok(Json(PostResponse {
        content,
        hashtags,
        generated_at: Utc::now(),
    }))
}

async fn generate_ideas(
    State(state): State<AppState>,
    Path(channel): Path<String>,
    Json(req): Json<IdeasRequest>,
) -> Result<Json<IdeasResponse>, ApiError> {
    let channel: Channel = channel.parse()?;
    if req.topic.trim().is_empty() {
        return Err(ApiError::BadRequest("topic is required".to_string()));
    }
    let generator = state
        .generator
        .as_ref()
        .ok_or_else(|| ApiError::Internal("content generator is not configured".to_string()))?;

    let prompt = prompts::ideas_prompt(channel, &req.topic, req.count);
    let text = generator.generate(&prompt).await?;
    let ideas = parse_json_array(&text)?;
    info!(%channel, ideas = ideas.len(), "generated content ideas");

    Ok(Json(IdeasResponse {
        ideas,
        generated_at: Utc::now(),
    }))
}
