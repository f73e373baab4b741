//! Inbound GitHub event decoding
//!
//! A run is triggered by exactly one event. Only `push`, `pull_request_review`
//! and `check_run` are acted upon; any other event name decodes to `None`.

use crate::diagnostics::debug_json;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Prefix of branch refs in push events
const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// The kinds of event that can trigger a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// A branch was pushed
    Push,
    /// A pull request review was submitted
    PullRequestReview,
    /// A check run completed
    CheckRun,
}

impl EventKind {
    /// All supported kinds
    pub const ALL: [Self; 3] = [Self::Push, Self::PullRequestReview, Self::CheckRun];

    /// The event name GitHub uses for this kind
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::PullRequestReview => "pull_request_review",
            Self::CheckRun => "check_run",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unsupported event '{s}'"))
    }
}

/// Pull request summary carried by review and check-run payloads
///
/// Labels embedded in a check-run payload may be stale; the dispatcher
/// re-fetches the PR before trusting them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPullRequest {
    /// PR number
    pub number: u64,
    /// Label names as delivered with the event
    pub labels: Vec<String>,
}

/// A decoded event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A ref was pushed
    Push {
        /// Full ref name (e.g. `refs/heads/release`)
        ref_name: String,
    },
    /// A review was submitted on a pull request
    Review {
        /// The reviewed pull request
        pull_request: EventPullRequest,
    },
    /// A check run completed
    CheckRun {
        /// Pull requests associated with the check run (possibly empty)
        pull_requests: Vec<EventPullRequest>,
    },
}

impl Event {
    /// The kind of this event
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Push { .. } => EventKind::Push,
            Self::Review { .. } => EventKind::PullRequestReview,
            Self::CheckRun { .. } => EventKind::CheckRun,
        }
    }

    /// Decode an event from its name, ref and JSON payload.
    ///
    /// Returns `Ok(None)` for event names this action does not handle.
    pub fn from_payload(
        event_name: &str,
        git_ref: Option<&str>,
        payload: &serde_json::Value,
    ) -> Result<Option<Self>> {
        let Ok(kind) = event_name.parse::<EventKind>() else {
            return Ok(None);
        };

        let event = match kind {
            EventKind::Push => {
                let ref_name = git_ref
                    .filter(|r| !r.is_empty())
                    .map(ToString::to_string)
                    .or_else(|| {
                        payload
                            .get("ref")
                            .and_then(serde_json::Value::as_str)
                            .map(ToString::to_string)
                    })
                    .ok_or_else(|| Error::Event("push event has no ref".to_string()))?;
                Self::Push { ref_name }
            }
            EventKind::PullRequestReview => {
                let raw: ReviewPayload = serde_json::from_value(payload.clone()).map_err(|e| {
                    Error::Event(format!("invalid pull_request_review payload: {e}"))
                })?;
                Self::Review {
                    pull_request: raw.pull_request.into(),
                }
            }
            EventKind::CheckRun => {
                let raw: CheckRunPayload = serde_json::from_value(payload.clone())
                    .map_err(|e| Error::Event(format!("invalid check_run payload: {e}")))?;
                Self::CheckRun {
                    pull_requests: raw
                        .check_run
                        .pull_requests
                        .unwrap_or_default()
                        .into_iter()
                        .map(Into::into)
                        .collect(),
                }
            }
        };

        Ok(Some(event))
    }
}

/// Branch name of a pushed ref, if it is a branch ref
pub fn branch_from_ref(ref_name: &str) -> Option<&str> {
    ref_name
        .strip_prefix(BRANCH_REF_PREFIX)
        .filter(|branch| !branch.is_empty())
}

/// Read and decode the event payload file.
///
/// The file is not touched for event names this action does not handle.
pub fn load_event(
    event_name: &str,
    event_path: &Path,
    git_ref: Option<&str>,
) -> Result<Option<Event>> {
    if event_name.parse::<EventKind>().is_err() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(event_path).map_err(|e| {
        Error::Event(format!(
            "failed to read event payload {}: {e}",
            event_path.display()
        ))
    })?;
    let payload: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
        Error::Event(format!(
            "failed to parse event payload {}: {e}",
            event_path.display()
        ))
    })?;
    debug_json("event payload", &payload);
    Event::from_payload(event_name, git_ref, &payload)
}

// Wire shapes of the payload fragments we read

#[derive(Deserialize)]
struct ReviewPayload {
    pull_request: RawPullRequest,
}

#[derive(Deserialize)]
struct CheckRunPayload {
    check_run: RawCheckRun,
}

#[derive(Deserialize)]
struct RawCheckRun {
    pull_requests: Option<Vec<RawPullRequest>>,
}

#[derive(Deserialize)]
struct RawPullRequest {
    number: u64,
    #[serde(default)]
    labels: Vec<RawLabel>,
}

#[derive(Deserialize)]
struct RawLabel {
    name: String,
}

impl From<RawPullRequest> for EventPullRequest {
    fn from(pr: RawPullRequest) -> Self {
        Self {
            number: pr.number,
            labels: pr.labels.into_iter().map(|l| l.name).collect(),
        }
    }
}
