//! Public URL resolution for a ready deployment.

use tracing::debug;

use crate::platform::{DeploymentStatus, Platform};

/// Pick the best user-facing URL for a deployment that reached READY.
///
/// Preference order: shortest project-level alias, then shortest
/// deployment-level alias, then the raw deployment host. Shorter domains are
/// generally the canonical public ones; long generated subdomains lose.
/// Each source is consulted once and any failure falls through to the next.
pub(crate) async fn resolve_public_url(
    platform: &dyn Platform,
    project_name: &str,
    status: &DeploymentStatus,
    raw_url: &str,
) -> String {
    match platform.project(project_name).await {
        Ok(project) => {
            if let Some(domain) = shortest(project.alias.iter().map(|a| a.domain.as_str())) {
                debug!(domain, "using project alias");
                return format!("https://{}", domain);
            }
            debug!(project = project_name, "project has no aliases yet");
        }
        Err(err) => {
            debug!(project = project_name, error = %err, "project lookup failed");
        }
    }

    if let Some(domain) = shortest(status.alias.iter().map(String::as_str)) {
        debug!(domain, "using deployment alias");
        return format!("https://{}", domain);
    }

    format!("https://{}", raw_url)
}

/// Shortest entry; on equal length the earlier one wins.
fn shortest<'a>(items: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    items.reduce(|best, current| if current.len() < best.len() { current } else { best })
}
