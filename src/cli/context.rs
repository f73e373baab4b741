//! Shared run context
//!
//! Extracts the setup every run needs before an event can be dispatched.

use anyhow::Context;
use gitflow_action::auth::get_github_auth;
use gitflow_action::config::{Config, Inputs};
use gitflow_action::platform::{GitHubService, PlatformService, parse_repository};
use tracing::debug;

/// Everything needed to dispatch an event
///
/// This struct encapsulates:
/// - The immutable configuration built from the action inputs
/// - The platform service, authenticated and bound to the repository
pub struct RunContext {
    /// Run configuration
    pub config: Config,
    /// Platform service (GitHub)
    pub platform: Box<dyn PlatformService>,
}

impl RunContext {
    /// Build the configuration, resolve credentials and create the service
    pub fn new(
        inputs: &Inputs,
        github_token: Option<&str>,
        repository: &str,
        api_url: Option<String>,
    ) -> anyhow::Result<Self> {
        let config = Config::from_inputs(inputs)?;
        debug!(?config, "configuration");

        let auth = get_github_auth(github_token)?;
        debug!(source = ?auth.source, "resolved GitHub token");

        let (owner, repo) = parse_repository(repository)?;
        let platform = GitHubService::new(&auth.token, owner, repo, api_url)
            .context("failed to create GitHub client")?;

        Ok(Self {
            config,
            platform: Box::new(platform),
        })
    }
}
