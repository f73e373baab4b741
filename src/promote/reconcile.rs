//! PR reconciliation - find or create the single promotion PR for a branch pair

use crate::error::Result;
use crate::platform::PlatformService;
use crate::promote::gate::GateLabel;
use crate::types::PullRequest;
use tracing::{error, info};

/// What reconciliation found or did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// No open PR existed; one was created and labelled
    Created(PullRequest),
    /// An open PR carrying the gate label already existed
    Reused(PullRequest),
    /// An open PR exists but lacks the gate label.
    ///
    /// The label is never added to a PR this action did not create: someone
    /// may have removed it on purpose.
    NotEligible(PullRequest),
    /// More than one open PR matched; nothing was created or selected
    Ambiguous(Vec<u64>),
}

/// Title used for PRs created by this action
pub fn promotion_title(head: &str, base: &str) -> String {
    format!("{head} -> {base}")
}

/// Find the open PR from `head` into `base`, or create and label one.
///
/// Idempotent: a second call with unchanged platform state finds the PR
/// created by the first.
pub async fn reconcile(
    platform: &dyn PlatformService,
    head: &str,
    base: &str,
    gate: &GateLabel,
) -> Result<Reconciliation> {
    let mut open = platform.list_open_prs(head, base).await?;

    match open.len() {
        0 => {}
        1 => {
            let pr = open.remove(0);
            info!(
                pr_number = pr.number,
                url = %pr.html_url,
                "Pull request already exists: #{}.",
                pr.number
            );
            return Ok(if gate.is_present(&pr.labels) {
                Reconciliation::Reused(pr)
            } else {
                Reconciliation::NotEligible(pr)
            });
        }
        _ => {
            let numbers: Vec<u64> = open.iter().map(|pr| pr.number).collect();
            error!(
                head,
                base,
                ?numbers,
                "Multiple open pull requests match this branch pair; refusing to choose one"
            );
            return Ok(Reconciliation::Ambiguous(numbers));
        }
    }

    let mut pr = platform
        .create_pr(head, base, &promotion_title(head, base))
        .await?;
    info!(
        pr_number = pr.number,
        url = %pr.html_url,
        "Pull request #{} created: {}.",
        pr.number,
        pr.title
    );

    pr.labels = platform
        .add_labels(pr.number, &[gate.name().to_string()])
        .await?;
    info!(pr_number = pr.number, "Label {gate} added to #{}.", pr.number);

    Ok(Reconciliation::Created(pr))
}
