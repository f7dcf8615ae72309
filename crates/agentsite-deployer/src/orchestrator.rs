//! Deployment orchestration: submit, poll, resolve.

use std::sync::Arc;
use std::time::Duration;

use agentsite_core::{Error, FileBundle, ReadyState, ResolvedDeployment, Result};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::name::sanitize_project_name;
use crate::platform::Platform;
use crate::resolve::resolve_public_url;
use crate::submit::{InlineSubmitter, Submitter};

/// Timing and budget for the status poll loop: a flat interval with a
/// bounded attempt count. Readiness for small static sites lands well
/// inside the default budget of roughly two minutes.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Delay between status checks.
    pub interval: Duration,
    /// Status checks allowed before giving up.
    pub max_attempts: u32,
    /// Grace period after READY for alias assignment to catch up.
    pub alias_settle: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(6),
            max_attempts: 20,
            alias_settle: Duration::from_secs(3),
        }
    }
}

/// Deploys a generated site bundle and reports the resulting public URL.
///
/// One instance may serve any number of concurrent deployments; every
/// deployment is addressed solely by its own remote id and nothing is
/// shared between requests.
pub struct SiteDeployer {
    platform: Arc<dyn Platform>,
    submitter: Arc<dyn Submitter>,
    policy: PollPolicy,
}

impl SiteDeployer {
    /// Deployer using the default inline submission strategy.
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self::with_submitter(platform, Arc::new(InlineSubmitter))
    }

    pub fn with_submitter(platform: Arc<dyn Platform>, submitter: Arc<dyn Submitter>) -> Self {
        Self {
            platform,
            submitter,
            policy: PollPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Deploy `bundle` under `project_name` and wait for it to come up.
    ///
    /// Returns the shortest public alias that could be discovered, falling
    /// back to the raw deployment URL when no alias is available or the
    /// attempt budget runs out before a terminal state is observed. A
    /// deployment that reports ERROR fails immediately; transient status
    /// check failures only consume attempts.
    pub async fn deploy(
        &self,
        bundle: &FileBundle,
        project_name: &str,
    ) -> Result<ResolvedDeployment> {
        let project = sanitize_project_name(project_name);

        let created = self
            .submitter
            .submit(self.platform.as_ref(), &project, bundle)
            .await?;
        info!(
            deployment = %created.id,
            strategy = self.submitter.name(),
            url = %created.url,
            "deployment created"
        );

        let mut attempts = 0;
        while attempts < self.policy.max_attempts {
            match self.platform.deployment_status(&created.id).await {
                Ok(status) => match status.ready_state {
                    ReadyState::Ready => {
                        info!(deployment = %created.id, "deployment ready");
                        // Alias assignment lags readiness; give it a moment
                        // before asking for the public domain.
                        sleep(self.policy.alias_settle).await;
                        let url = resolve_public_url(
                            self.platform.as_ref(),
                            &project,
                            &status,
                            &created.url,
                        )
                        .await;
                        return Ok(ResolvedDeployment {
                            url,
                            deployment_id: created.id,
                        });
                    }
                    ReadyState::Error => {
                        return Err(Error::DeploymentFailed(format!(
                            "deployment {} entered ERROR state",
                            created.id
                        )));
                    }
                    state => {
                        info!(
                            deployment = %created.id,
                            ?state,
                            attempt = attempts + 1,
                            max_attempts = self.policy.max_attempts,
                            "deployment still in progress"
                        );
                    }
                },
                Err(err) => {
                    warn!(
                        deployment = %created.id,
                        attempt = attempts + 1,
                        error = %err,
                        "status check failed"
                    );
                }
            }

            attempts += 1;
            if attempts < self.policy.max_attempts {
                sleep(self.policy.interval).await;
            }
        }

        // The deployment may still finish in the background; report the raw
        // host instead of failing.
        warn!(
            deployment = %created.id,
            "no terminal state within the attempt budget, using the deployment URL"
        );
        Ok(ResolvedDeployment {
            url: format!("https://{}", created.url),
            deployment_id: created.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::EncodedFile;
    use crate::platform::{
        DeploymentStatus, NewDeployment, Project, ProjectAlias, UploadReceipt, UploadedFile,
    };
    use agentsite_core::DeploymentId;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const RAW_URL: &str = "site-abc123.vercel.app";

    struct ScriptedPlatform {
        statuses: Mutex<VecDeque<Result<DeploymentStatus>>>,
        // None means the project lookup fails.
        project_aliases: Option<Vec<&'static str>>,
        create_calls: AtomicUsize,
        status_calls: AtomicUsize,
        project_calls: AtomicUsize,
    }

    impl ScriptedPlatform {
        fn new(statuses: Vec<Result<DeploymentStatus>>) -> Self {
            Self {
                statuses: Mutex::new(statuses.into()),
                project_aliases: None,
                create_calls: AtomicUsize::new(0),
                status_calls: AtomicUsize::new(0),
                project_calls: AtomicUsize::new(0),
            }
        }

        fn with_project_aliases(mut self, aliases: Vec<&'static str>) -> Self {
            self.project_aliases = Some(aliases);
            self
        }
    }

    fn building() -> Result<DeploymentStatus> {
        Ok(DeploymentStatus {
            ready_state: ReadyState::Building,
            alias: Vec::new(),
        })
    }

    fn ready_with(alias: Vec<&str>) -> Result<DeploymentStatus> {
        Ok(DeploymentStatus {
            ready_state: ReadyState::Ready,
            alias: alias.into_iter().map(String::from).collect(),
        })
    }

    #[async_trait]
    impl Platform for ScriptedPlatform {
        async fn create_deployment(
            &self,
            _name: &str,
            _files: &[EncodedFile],
        ) -> Result<NewDeployment> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            Ok(NewDeployment {
                id: DeploymentId::new("dpl_1"),
                url: RAW_URL.to_string(),
            })
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
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            self.statuses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::Request("no scripted status left".to_string())))
        }

        async fn project(&self, name: &str) -> Result<Project> {
            self.project_calls.fetch_add(1, Ordering::SeqCst);
            match &self.project_aliases {
                Some(aliases) => Ok(Project {
                    name: name.to_string(),
                    alias: aliases
                        .iter()
                        .map(|domain| ProjectAlias {
                            domain: domain.to_string(),
                        })
                        .collect(),
                }),
                None => Err(Error::Request("project lookup failed".to_string())),
            }
        }
    }

    fn sample_bundle() -> FileBundle {
        let mut bundle = FileBundle::new();
        bundle.insert("index.html", "<html></html>");
        bundle
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_shortest_project_alias_after_ready() {
        let platform = Arc::new(
            ScriptedPlatform::new(vec![building(), building(), ready_with(vec![])])
                .with_project_aliases(vec!["a.example.com", "short.x"]),
        );
        let deployer = SiteDeployer::new(platform.clone());

        let resolved = deployer
            .deploy(&sample_bundle(), "Acme Insurance")
            .await
            .unwrap();

        assert_eq!(resolved.url, "https://short.x");
        assert_eq!(resolved.deployment_id.as_str(), "dpl_1");
        assert_eq!(platform.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(platform.status_calls.load(Ordering::SeqCst), 3);
        // The resolver runs exactly once, after the READY observation.
        assert_eq!(platform.project_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn falls_back_to_deployment_alias_when_project_has_none() {
        let platform = Arc::new(ScriptedPlatform::new(vec![ready_with(vec![
            "foo-bar-123.vercel.app",
        ])]));
        let deployer = SiteDeployer::new(platform.clone());

        let resolved = deployer.deploy(&sample_bundle(), "acme").await.unwrap();
        assert_eq!(resolved.url, "https://foo-bar-123.vercel.app");
    }

    #[tokio::test(start_paused = true)]
    async fn falls_back_to_raw_url_when_no_alias_exists() {
        let platform = Arc::new(ScriptedPlatform::new(vec![ready_with(vec![])]));
        let deployer = SiteDeployer::new(platform.clone());

        let resolved = deployer.deploy(&sample_bundle(), "acme").await.unwrap();
        assert_eq!(resolved.url, format!("https://{RAW_URL}"));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_attempts_degrade_to_the_raw_url() {
        let statuses = (0..20).map(|_| building()).collect();
        let platform = Arc::new(
            ScriptedPlatform::new(statuses).with_project_aliases(vec!["never-asked.example"]),
        );
        let deployer = SiteDeployer::new(platform.clone());

        let resolved = deployer.deploy(&sample_bundle(), "acme").await.unwrap();

        assert_eq!(resolved.url, format!("https://{RAW_URL}"));
        assert_eq!(resolved.deployment_id.as_str(), "dpl_1");
        assert_eq!(platform.status_calls.load(Ordering::SeqCst), 20);
        // Degraded success skips alias resolution entirely.
        assert_eq!(platform.project_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn error_state_fails_immediately() {
        let platform = Arc::new(ScriptedPlatform::new(vec![
            Ok(DeploymentStatus {
                ready_state: ReadyState::Error,
                alias: Vec::new(),
            }),
            building(),
        ]));
        let deployer = SiteDeployer::new(platform.clone());

        let err = deployer.deploy(&sample_bundle(), "acme").await.unwrap_err();

        assert!(matches!(err, Error::DeploymentFailed(_)));
        assert_eq!(platform.status_calls.load(Ordering::SeqCst), 1);
        assert_eq!(platform.project_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_status_failures_consume_attempts_and_continue() {
        let platform = Arc::new(ScriptedPlatform::new(vec![
            Err(Error::Request("connection reset".to_string())),
            Err(Error::UnexpectedResponse("truncated body".to_string())),
            ready_with(vec![]),
        ]));
        let deployer = SiteDeployer::new(platform.clone());

        let resolved = deployer.deploy(&sample_bundle(), "acme").await.unwrap();

        assert_eq!(resolved.url, format!("https://{RAW_URL}"));
        assert_eq!(platform.status_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_states_are_treated_as_in_progress() {
        let platform = Arc::new(ScriptedPlatform::new(vec![
            Ok(DeploymentStatus {
                ready_state: ReadyState::Other,
                alias: Vec::new(),
            }),
            Ok(DeploymentStatus {
                ready_state: ReadyState::Queued,
                alias: Vec::new(),
            }),
            ready_with(vec![]),
        ]));
        let deployer = SiteDeployer::new(platform.clone());

        let resolved = deployer.deploy(&sample_bundle(), "acme").await.unwrap();
        assert_eq!(resolved.deployment_id.as_str(), "dpl_1");
        assert_eq!(platform.status_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn submission_failure_aborts_before_any_polling() {
        struct RejectingPlatform;

        #[async_trait]
        impl Platform for RejectingPlatform {
            async fn create_deployment(
                &self,
                _name: &str,
                _files: &[EncodedFile],
            ) -> Result<NewDeployment> {
                Err(Error::CreationFailed("name already taken".to_string()))
            }

            async fn upload_file(
                &self,
                _filename: &str,
                _content: &str,
            ) -> Result<UploadReceipt> {
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
                panic!("polling must not start after a failed create");
            }

            async fn project(&self, _name: &str) -> Result<Project> {
                unimplemented!()
            }
        }

        let deployer = SiteDeployer::new(Arc::new(RejectingPlatform));
        let err = deployer.deploy(&sample_bundle(), "acme").await.unwrap_err();
        assert!(matches!(err, Error::CreationFailed(_)));
    }

    #[test]
    fn default_policy_is_six_seconds_twenty_attempts() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(6));
        assert_eq!(policy.max_attempts, 20);
        assert_eq!(policy.alias_settle, Duration::from_secs(3));
    }
}
