//! Deployment platform connection settings.

use url::Url;

/// Default API base of the deployment platform.
pub const DEFAULT_API_BASE: &str = "https://api.vercel.com";

/// Connection settings for the remote deployment platform.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Bearer credential. `None` means the platform is not configured and
    /// callers must fall back to demo mode instead of deploying.
    pub token: Option<String>,
    /// API base, e.g. `https://api.vercel.com`.
    pub api_base: Url,
}

impl PlatformConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            api_base: default_api_base(),
        }
    }

    /// Read `AGENTSITE_DEPLOY_TOKEN` and `AGENTSITE_DEPLOY_API_BASE`.
    /// A missing or empty token yields an unconfigured instance.
    pub fn from_env() -> Self {
        let token = std::env::var("AGENTSITE_DEPLOY_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        let api_base = std::env::var("AGENTSITE_DEPLOY_API_BASE")
            .ok()
            .and_then(|s| Url::parse(&s).ok())
            .unwrap_or_else(default_api_base);

        Self { token, api_base }
    }

    pub fn unconfigured() -> Self {
        Self {
            token: None,
            api_base: default_api_base(),
        }
    }

    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }
}

fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_token_is_configured() {
        let config = PlatformConfig::new("tok_123");
        assert!(config.is_configured());
        assert_eq!(config.api_base.as_str(), "https://api.vercel.com/");
    }

    #[test]
    fn unconfigured_has_no_token() {
        assert!(!PlatformConfig::unconfigured().is_configured());
    }
}
