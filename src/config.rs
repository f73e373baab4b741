//! Action inputs and the immutable run configuration
//!
//! Inputs arrive as strings, either as command-line flags or through the
//! `INPUT_*` environment variables GitHub Actions sets for `with:` values.
//! An empty input behaves like a missing one.

use crate::error::{Error, Result};
use crate::promote::{AutoMergePolicy, BranchMapping, GateLabel, MergeFailureSeverity};
use crate::types::MergeMethod;
use clap::Args;

/// Raw action inputs
#[derive(Debug, Clone, Default, Args)]
pub struct Inputs {
    /// Name of the release branch
    #[arg(long = "release", env = "INPUT_RELEASE")]
    pub release: Option<String>,

    /// Name of the development branch
    #[arg(long = "dev", env = "INPUT_DEV")]
    pub dev: Option<String>,

    /// Name of the master branch
    #[arg(long = "master", env = "INPUT_MASTER")]
    pub master: Option<String>,

    /// Branch the master branch is promoted into [default: the dev branch]
    #[arg(long = "master-target", env = "INPUT_MASTER-TARGET")]
    pub master_target: Option<String>,

    /// Branch the release branch is promoted into [default: the master branch]
    #[arg(long = "release-target", env = "INPUT_RELEASE-TARGET")]
    pub release_target: Option<String>,

    /// Label that makes a pull request eligible for auto-merge [default: gitflow]
    #[arg(long = "label", env = "INPUT_LABEL")]
    pub label: Option<String>,

    /// `true`, or a comma-separated list of push, pull_request_review, check_run
    #[arg(long = "auto-merge", env = "INPUT_AUTO-MERGE")]
    pub auto_merge: Option<String>,

    /// Fail the run when a merge fails [default: false]
    #[arg(long = "require-merge", env = "INPUT_REQUIRE-MERGE")]
    pub require_merge: Option<String>,

    /// Merge method: merge, squash or rebase [default: merge]
    #[arg(long = "merge-method", env = "INPUT_MERGE-METHOD")]
    pub merge_method: Option<String>,
}

/// Value of an input, or `fallback` when it is missing or empty
fn input_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(fallback)
}

/// Immutable configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Promotion rules
    pub mapping: BranchMapping,
    /// Auto-merge gate label
    pub gate: GateLabel,
    /// Events allowed to trigger merges
    pub auto_merge: AutoMergePolicy,
    /// Effect of a failed merge on the run
    pub severity: MergeFailureSeverity,
    /// How PRs are merged
    pub merge_method: MergeMethod,
}

impl Config {
    /// Build the configuration from raw inputs, applying defaults
    pub fn from_inputs(inputs: &Inputs) -> Result<Self> {
        let release = input_or(inputs.release.as_deref(), "release");
        let dev = input_or(inputs.dev.as_deref(), "dev");
        let master = input_or(inputs.master.as_deref(), "master");
        let master_target = input_or(inputs.master_target.as_deref(), dev);
        let release_target = input_or(inputs.release_target.as_deref(), master);

        let merge_method = input_or(inputs.merge_method.as_deref(), "merge")
            .parse::<MergeMethod>()
            .map_err(Error::Config)?;

        let require_merge =
            input_or(inputs.require_merge.as_deref(), "false").eq_ignore_ascii_case("true");

        Ok(Self {
            mapping: BranchMapping::gitflow(release, release_target, master, master_target),
            gate: GateLabel::new(input_or(inputs.label.as_deref(), "gitflow")),
            auto_merge: AutoMergePolicy::parse(input_or(inputs.auto_merge.as_deref(), "true")),
            severity: MergeFailureSeverity::from_require_merge(require_merge),
            merge_method,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mapping: BranchMapping::gitflow("release", "master", "master", "dev"),
            gate: GateLabel::default(),
            auto_merge: AutoMergePolicy::Always,
            severity: MergeFailureSeverity::Logged,
            merge_method: MergeMethod::Merge,
        }
    }
}
