//! Run report - everything a dispatch did, and how the run ends

use crate::error::{Error, Result};
use crate::event::EventKind;
use crate::promote::merge::{MergeFailureSeverity, MergeOutcome};
use std::fmt;
use tracing::{error, info};

/// Why a flow stopped without merging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The pushed ref is not a branch (e.g. a tag)
    NotABranch {
        /// Full ref name
        ref_name: String,
    },
    /// The pushed branch is not a promotion source
    NoTarget {
        /// Pushed branch
        branch: String,
        /// Configured promotion sources
        sources: Vec<String>,
    },
    /// The event kind is not in the auto-merge trigger set
    TriggerDisabled(EventKind),
    /// The PR does not carry the gate label
    MissingGateLabel {
        /// PR number
        pr_number: u64,
        /// Gate label name
        label: String,
    },
    /// The check run is not associated with any PR
    NoPullRequests,
    /// Several open PRs match one head/base pair
    Ambiguous {
        /// Head branch
        head: String,
        /// Base branch
        base: String,
        /// Matching PR numbers
        numbers: Vec<u64>,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotABranch { ref_name } => write!(f, "Ref {ref_name} is not a branch"),
            Self::NoTarget { branch, sources } => {
                write!(f, "Branch {branch} is not one of {}", sources.join(", "))
            }
            Self::TriggerDisabled(EventKind::Push) => {
                write!(f, "Auto merge is disabled for pushes")
            }
            Self::TriggerDisabled(kind) => write!(
                f,
                "Auto merge is disabled for {kind} events. You should remove the `{kind}` \
                 event from the workflow triggers"
            ),
            Self::MissingGateLabel { pr_number, label } => {
                write!(f, "Pull request #{pr_number} does not have the label {label}")
            }
            Self::NoPullRequests => write!(f, "Empty pull request list"),
            Self::Ambiguous {
                head,
                base,
                numbers,
            } => {
                let list: Vec<String> = numbers.iter().map(|n| format!("#{n}")).collect();
                write!(
                    f,
                    "Found {} open pull requests for {head} -> {base} ({}); refusing to choose one",
                    numbers.len(),
                    list.join(", ")
                )
            }
        }
    }
}

/// One thing that happened during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A flow stopped early
    Skipped(SkipReason),
    /// A promotion PR was created and labelled
    Created {
        /// PR number
        pr_number: u64,
        /// Head branch
        head: String,
        /// Base branch
        base: String,
    },
    /// An existing promotion PR was found
    Reused {
        /// PR number
        pr_number: u64,
    },
    /// A merge was attempted
    Merge {
        /// PR number
        pr_number: u64,
        /// What happened
        outcome: MergeOutcome,
    },
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    /// Nothing to do
    NoOp,
    /// Work was done (e.g. a PR created) but nothing was merged
    Handled,
    /// A PR created in this run was merged
    CreatedAndMerged,
    /// An already existing PR was merged
    ReusedAndMerged,
    /// A merge failed and merges are required
    MergeFailedFatal,
    /// A merge failed and the failure was only logged
    MergeFailedLogged,
}

/// Ordered record of a single dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    severity: MergeFailureSeverity,
    actions: Vec<Action>,
}

impl RunReport {
    /// Empty report for a run with the given merge failure severity
    pub const fn new(severity: MergeFailureSeverity) -> Self {
        Self {
            severity,
            actions: Vec::new(),
        }
    }

    /// Record and log a skip
    pub fn skip(&mut self, reason: SkipReason) {
        if matches!(reason, SkipReason::Ambiguous { .. }) {
            error!("{reason}.");
        } else {
            info!("{reason}. Skipping...");
        }
        self.actions.push(Action::Skipped(reason));
    }

    /// Record an action
    pub fn record(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// All recorded actions, in order
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Skip reasons, in order
    pub fn skips(&self) -> impl Iterator<Item = &SkipReason> {
        self.actions.iter().filter_map(|a| match a {
            Action::Skipped(reason) => Some(reason),
            _ => None,
        })
    }

    /// Numbers of PRs that were merged
    pub fn merged(&self) -> Vec<u64> {
        self.merge_numbers(true)
    }

    /// Numbers of PRs whose merge failed
    pub fn failed_merges(&self) -> Vec<u64> {
        self.merge_numbers(false)
    }

    fn merge_numbers(&self, merged: bool) -> Vec<u64> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                Action::Merge { pr_number, outcome } if outcome.is_merged() == merged => {
                    Some(*pr_number)
                }
                _ => None,
            })
            .collect()
    }

    /// Classify how the run ended
    pub fn terminal_state(&self) -> TerminalState {
        if !self.failed_merges().is_empty() {
            return if self.severity.is_fatal() {
                TerminalState::MergeFailedFatal
            } else {
                TerminalState::MergeFailedLogged
            };
        }

        let created = self
            .actions
            .iter()
            .any(|a| matches!(a, Action::Created { .. }));
        if !self.merged().is_empty() {
            return if created {
                TerminalState::CreatedAndMerged
            } else {
                TerminalState::ReusedAndMerged
            };
        }

        if self
            .actions
            .iter()
            .any(|a| !matches!(a, Action::Skipped(_)))
        {
            TerminalState::Handled
        } else {
            TerminalState::NoOp
        }
    }

    /// Fail with [`Error::MergeFailed`] if a merge failed and merges are required
    pub fn into_result(self) -> Result<Self> {
        if self.terminal_state() == TerminalState::MergeFailedFatal {
            return Err(Error::MergeFailed);
        }
        Ok(self)
    }
}
