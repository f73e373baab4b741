//! Platform services for GitHub
//!
//! The promotion engine only talks to the hosting platform through
//! [`PlatformService`], so tests can substitute an in-memory double.

mod github;

pub use github::GitHubService;

use crate::error::{Error, Result};
use crate::types::{MergeMethod, MergeResult, PullRequest};
use async_trait::async_trait;

/// Platform service trait for the PR operations the engine needs
///
/// Every method may fail with a transport or authorization error. Only
/// [`merge_pr`](Self::merge_pr) failures are treated as business outcomes by
/// the caller; everything else ends the run.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List open PRs from `head` into `base`
    async fn list_open_prs(&self, head: &str, base: &str) -> Result<Vec<PullRequest>>;

    /// Create a new PR
    async fn create_pr(&self, head: &str, base: &str, title: &str) -> Result<PullRequest>;

    /// Attach labels to a PR, returning the PR's full label set afterwards
    async fn add_labels(&self, pr_number: u64, labels: &[String]) -> Result<Vec<String>>;

    /// Fetch the current state of a PR
    async fn get_pr(&self, pr_number: u64) -> Result<PullRequest>;

    /// Merge a PR with the specified method
    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult>;
}

/// Split an `owner/repo` slug into its parts
pub fn parse_repository(slug: &str) -> Result<(String, String)> {
    match slug.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Config(format!(
            "invalid repository '{slug}', expected owner/repo"
        ))),
    }
}
