//! Seam over the text-generation backend.

use agentsite_config::GeneratorConfig;
use agentsite_core::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Opaque content backend: prompt in, text out. May fail or return
/// malformed output; callers post-process and fall back accordingly.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// HTTP client for a generateContent-style REST endpoint.
pub struct HttpContentGenerator {
    http: reqwest::Client,
    config: GeneratorConfig,
}

impl HttpContentGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[async_trait]
impl ContentGenerator for HttpContentGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.api_base.as_str().trim_end_matches('/'),
            self.config.model,
            urlencoding::encode(&self.config.api_key),
        );

        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "content backend returned {}: {}",
                status, text
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::UnexpectedResponse(e.to_string()))?;

        // A response without any text is not an error here; callers decide
        // whether empty output is acceptable.
        Ok(body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_is_extracted_from_the_first_candidate() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"hello"},{"text":"ignored"}]}}]}"#,
        )
        .unwrap();
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default();
        assert_eq!(text, "hello");
    }

    #[test]
    fn empty_response_yields_an_empty_string() {
        let body: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.candidates.is_empty());
    }
}
