//! GitHub platform service implementation

use crate::diagnostics::debug_json;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{MergeMethod, MergeResult, PlatformConfig, PrState, PullRequest};
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// Page size for PR listings; a head/base pair normally has at most one open PR
const LIST_PAGE_SIZE: u8 = 100;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `api_url` is the REST base URL (e.g. `GITHUB_API_URL` on GitHub
    /// Enterprise); `None` targets api.github.com.
    pub fn new(token: &str, owner: String, repo: String, api_url: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(ref url) = api_url {
            builder = builder
                .base_uri(url.trim_end_matches('/'))
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            config: PlatformConfig {
                owner,
                repo,
                api_url,
            },
        })
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    let state = match pr.state {
        Some(octocrab::models::IssueState::Open) => PrState::Open,
        Some(octocrab::models::IssueState::Closed) if pr.merged_at.is_some() => PrState::Merged,
        // IssueState is non-exhaustive, so use wildcard for Closed and any future variants
        Some(_) | None => PrState::Closed,
    };

    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        state,
        labels: pr
            .labels
            .as_ref()
            .map(|labels| labels.iter().map(|l| l.name.clone()).collect())
            .unwrap_or_default(),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_open_prs(&self, head: &str, base: &str) -> Result<Vec<PullRequest>> {
        debug!(head, base, "listing open PRs");
        // GitHub only filters by head when it is qualified with the owner
        let qualified_head = format!("{}:{}", &self.config.owner, head);

        let page = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(octocrab::params::State::Open)
            .head(qualified_head)
            .base(base)
            .per_page(LIST_PAGE_SIZE)
            .send()
            .await?;

        debug_json("open pull requests", &page.items);
        let result: Vec<PullRequest> = page.items.iter().map(pr_from_octocrab).collect();
        debug!(head, base, count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn create_pr(&self, head: &str, base: &str, title: &str) -> Result<PullRequest> {
        debug!(head, base, "creating PR");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .create(title, head, base)
            .send()
            .await?;

        debug_json("created pull request", &pr);
        let result = pr_from_octocrab(&pr);
        debug!(pr_number = result.number, "created PR");
        Ok(result)
    }

    async fn add_labels(&self, pr_number: u64, labels: &[String]) -> Result<Vec<String>> {
        debug!(pr_number, ?labels, "adding labels");
        let applied = self
            .client
            .issues(&self.config.owner, &self.config.repo)
            .add_labels(pr_number, labels)
            .await?;

        debug_json("labels", &applied);
        Ok(applied.into_iter().map(|l| l.name).collect())
    }

    async fn get_pr(&self, pr_number: u64) -> Result<PullRequest> {
        debug!(pr_number, "getting PR");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr_number)
            .await?;

        debug_json("pull request", &pr);
        let result = pr_from_octocrab(&pr);
        debug!(pr_number, state = %result.state, "got PR");
        Ok(result)
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        debug!(pr_number, %method, "merging PR");

        let octocrab_method = match method {
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .merge(pr_number)
            .method(octocrab_method)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        debug_json("merge response", &result);
        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }
}
