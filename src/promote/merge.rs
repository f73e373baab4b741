//! Merge attempt - merge a PR and classify the result
//!
//! A rejected merge (conflicts, failing checks, branch protection, a PR that
//! was closed mid-run) is a business outcome, not an error. It is reported as
//! [`MergeOutcome::Failed`] and never retried within the same run; the next
//! triggering event gets another chance.

use crate::platform::PlatformService;
use crate::types::MergeMethod;
use tracing::{debug, error, info};

/// How a failed merge affects the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeFailureSeverity {
    /// Log the failure; the run still succeeds
    #[default]
    Logged,
    /// The run fails
    Fatal,
}

impl MergeFailureSeverity {
    /// Severity selected by the `require-merge` input
    pub const fn from_require_merge(require_merge: bool) -> Self {
        if require_merge { Self::Fatal } else { Self::Logged }
    }

    /// Whether a failed merge fails the run
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Result of a single merge attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The PR was merged
    Merged {
        /// SHA of the merge commit, when GitHub reports one
        sha: Option<String>,
    },
    /// The platform refused or failed the merge
    Failed {
        /// Platform-provided reason, kept for diagnostics only
        reason: String,
    },
}

impl MergeOutcome {
    /// Whether the merge went through
    pub const fn is_merged(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }
}

/// Merge `pr_number`, converting every platform failure into
/// [`MergeOutcome::Failed`].
pub async fn attempt_merge(
    platform: &dyn PlatformService,
    pr_number: u64,
    method: MergeMethod,
    severity: MergeFailureSeverity,
) -> MergeOutcome {
    let outcome = match platform.merge_pr(pr_number, method).await {
        Ok(result) if result.merged => MergeOutcome::Merged { sha: result.sha },
        Ok(result) => MergeOutcome::Failed {
            reason: result
                .message
                .unwrap_or_else(|| "merge was not performed".to_string()),
        },
        Err(e) => MergeOutcome::Failed {
            reason: e.to_string(),
        },
    };

    match &outcome {
        MergeOutcome::Merged { sha } => {
            info!(
                pr_number,
                sha = sha.as_deref().unwrap_or("(no sha)"),
                "Pull request #{pr_number} merged."
            );
        }
        MergeOutcome::Failed { reason } => {
            debug!(pr_number, reason = %reason, "merge rejected");
            if severity.is_fatal() {
                error!(pr_number, "Merge failed.");
            } else {
                info!(pr_number, "Merge failed.");
            }
        }
    }

    outcome
}
