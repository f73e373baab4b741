//! Event dispatch - route an event to its reconciliation flow
//!
//! - push: resolve target → reconcile PR → merge if pushes may merge
//! - review: check trigger set and gate label → merge
//! - check run: for each associated PR, re-fetch it, check the gate label → merge
//!
//! Platform errors outside the merge call abort the run. Merge failures are
//! recorded and, in the check-run flow, never stop the remaining PRs.

use crate::config::Config;
use crate::error::Result;
use crate::event::{Event, EventKind, EventPullRequest, branch_from_ref};
use crate::platform::PlatformService;
use crate::promote::merge::attempt_merge;
use crate::promote::reconcile::{Reconciliation, reconcile};
use crate::promote::report::{Action, RunReport, SkipReason};
use tracing::{debug, info};

/// Routes events to the push, review and check-run flows
pub struct Dispatcher<'a> {
    platform: &'a dyn PlatformService,
    config: &'a Config,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher over a platform and an immutable configuration
    pub const fn new(platform: &'a dyn PlatformService, config: &'a Config) -> Self {
        Self { platform, config }
    }

    /// Handle one event.
    ///
    /// The returned report still has to go through
    /// [`RunReport::into_result`] to apply the merge failure severity.
    pub async fn dispatch(&self, event: &Event) -> Result<RunReport> {
        let mut report = RunReport::new(self.config.severity);
        debug!(kind = %event.kind(), "dispatching event");

        match event {
            Event::Push { ref_name } => self.push_flow(ref_name, &mut report).await?,
            Event::Review { pull_request } => self.review_flow(pull_request, &mut report).await,
            Event::CheckRun { pull_requests } => {
                self.check_run_flow(pull_requests, &mut report).await?;
            }
        }

        Ok(report)
    }

    async fn push_flow(&self, ref_name: &str, report: &mut RunReport) -> Result<()> {
        let Some(head) = branch_from_ref(ref_name) else {
            report.skip(SkipReason::NotABranch {
                ref_name: ref_name.to_string(),
            });
            return Ok(());
        };

        let Some(base) = self.config.mapping.resolve_target(head) else {
            report.skip(SkipReason::NoTarget {
                branch: head.to_string(),
                sources: self.config.mapping.sources().map(String::from).collect(),
            });
            return Ok(());
        };

        let pr_number = match reconcile(self.platform, head, base, &self.config.gate).await? {
            Reconciliation::Created(pr) => {
                report.record(Action::Created {
                    pr_number: pr.number,
                    head: head.to_string(),
                    base: base.to_string(),
                });
                pr.number
            }
            Reconciliation::Reused(pr) => {
                report.record(Action::Reused {
                    pr_number: pr.number,
                });
                pr.number
            }
            Reconciliation::NotEligible(pr) => {
                report.skip(SkipReason::MissingGateLabel {
                    pr_number: pr.number,
                    label: self.config.gate.name().to_string(),
                });
                return Ok(());
            }
            Reconciliation::Ambiguous(numbers) => {
                report.skip(SkipReason::Ambiguous {
                    head: head.to_string(),
                    base: base.to_string(),
                    numbers,
                });
                return Ok(());
            }
        };

        // Created or reused PRs carry the gate label by construction
        if !self.trigger_enabled(EventKind::Push, report) {
            return Ok(());
        }
        self.merge(pr_number, report).await;
        Ok(())
    }

    async fn review_flow(&self, pull_request: &EventPullRequest, report: &mut RunReport) {
        if !self.trigger_enabled(EventKind::PullRequestReview, report) {
            return;
        }

        if !self.config.gate.is_present(&pull_request.labels) {
            report.skip(self.missing_label(pull_request.number));
            return;
        }

        self.merge(pull_request.number, report).await;
    }

    async fn check_run_flow(
        &self,
        pull_requests: &[EventPullRequest],
        report: &mut RunReport,
    ) -> Result<()> {
        if !self.trigger_enabled(EventKind::CheckRun, report) {
            return Ok(());
        }

        if pull_requests.is_empty() {
            report.skip(SkipReason::NoPullRequests);
            return Ok(());
        }

        // PR state is not checked; a closed PR fails in the merge attempt
        for summary in pull_requests {
            // Labels embedded in the check run payload may be stale
            let pr = self.platform.get_pr(summary.number).await?;

            if !self.config.gate.is_present(&pr.labels) {
                report.skip(self.missing_label(pr.number));
                continue;
            }

            self.merge(pr.number, report).await;
        }

        Ok(())
    }

    fn trigger_enabled(&self, kind: EventKind, report: &mut RunReport) -> bool {
        let enabled = self.config.auto_merge.is_trigger_enabled(kind);
        if !enabled {
            report.skip(SkipReason::TriggerDisabled(kind));
        }
        enabled
    }

    fn missing_label(&self, pr_number: u64) -> SkipReason {
        SkipReason::MissingGateLabel {
            pr_number,
            label: self.config.gate.name().to_string(),
        }
    }

    async fn merge(&self, pr_number: u64, report: &mut RunReport) {
        info!(
            pr_number,
            method = %self.config.merge_method,
            "Merging pull request #{pr_number}..."
        );
        let outcome = attempt_merge(
            self.platform,
            pr_number,
            self.config.merge_method,
            self.config.severity,
        )
        .await;
        report.record(Action::Merge { pr_number, outcome });
    }
}
