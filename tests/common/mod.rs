//! Shared test helpers

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::*;

use gitflow_action::config::{Config, Inputs};
use gitflow_action::event::{Event, EventPullRequest};
use gitflow_action::types::{PrState, PullRequest};

/// A fresh mock platform with an empty PR store
pub fn mock_platform() -> MockPlatformService {
    MockPlatformService::new()
}

/// Configuration from the given inputs, with defaults for everything else
pub fn config_with(inputs: Inputs) -> Config {
    Config::from_inputs(&inputs).expect("valid test inputs")
}

/// Configuration with the given `auto-merge` policy
pub fn config_with_auto_merge(policy: &str) -> Config {
    config_with(Inputs {
        auto_merge: Some(policy.to_string()),
        ..Inputs::default()
    })
}

/// Build an open PR with the given labels
pub fn make_pr(number: u64, head: &str, base: &str, labels: &[&str]) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/test/repo/pull/{number}"),
        base_ref: base.to_string(),
        head_ref: head.to_string(),
        title: format!("{head} -> {base}"),
        state: PrState::Open,
        labels: labels.iter().map(ToString::to_string).collect(),
    }
}

/// Push event for a branch
pub fn push_event(branch: &str) -> Event {
    Event::Push {
        ref_name: format!("refs/heads/{branch}"),
    }
}

/// Review event for a PR with the given labels
pub fn review_event(number: u64, labels: &[&str]) -> Event {
    Event::Review {
        pull_request: EventPullRequest {
            number,
            labels: labels.iter().map(ToString::to_string).collect(),
        },
    }
}

/// Check run event for the given PR numbers (payload labels left empty)
pub fn check_run_event(numbers: &[u64]) -> Event {
    Event::CheckRun {
        pull_requests: numbers
            .iter()
            .map(|&number| EventPullRequest {
                number,
                labels: vec![],
            })
            .collect(),
    }
}
