//! Application state.

use std::sync::Arc;

use agentsite_config::{GeneratorConfig, PlatformConfig};
use agentsite_content::generator::{ContentGenerator, HttpContentGenerator};
use agentsite_deployer::{HttpPlatform, SiteDeployer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Deployer towards the remote platform. `None` when no credential is
    /// configured; site generation then answers in demo mode.
    pub deployer: Option<Arc<SiteDeployer>>,
    /// Content backend. `None` when unconfigured; social endpoints refuse
    /// and site generation uses the built-in template.
    pub generator: Option<Arc<dyn ContentGenerator>>,
}

impl AppState {
    pub fn new(platform: PlatformConfig, generator: Option<GeneratorConfig>) -> Self {
        let deployer = platform.is_configured().then(|| {
            Arc::new(SiteDeployer::new(Arc::new(HttpPlatform::new(
                platform.clone(),
            ))))
        });
        let generator = generator
            .map(|config| Arc::new(HttpContentGenerator::new(config)) as Arc<dyn ContentGenerator>);

        Self {
            deployer,
            generator,
        }
    }
}
