//! Content generator connection settings.

use url::Url;

/// Default API base of the text-generation backend.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Default model to request content from.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Connection settings for the text-generation backend.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub api_base: Url,
    pub model: String,
}

impl GeneratorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: default_api_base(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Read `AGENTSITE_GENERATOR_API_KEY` (required),
    /// `AGENTSITE_GENERATOR_API_BASE` and `AGENTSITE_GENERATOR_MODEL`.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("AGENTSITE_GENERATOR_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())?;
        let api_base = std::env::var("AGENTSITE_GENERATOR_API_BASE")
            .ok()
            .and_then(|s| Url::parse(&s).ok())
            .unwrap_or_else(default_api_base);
        let model =
            std::env::var("AGENTSITE_GENERATOR_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Some(Self {
            api_key,
            api_base,
            model,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL")
}
