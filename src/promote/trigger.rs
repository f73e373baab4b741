//! Auto-merge trigger set - which event kinds may merge

use crate::event::EventKind;
use std::collections::BTreeSet;
use tracing::warn;

/// Which events are allowed to trigger an automatic merge
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AutoMergePolicy {
    /// Every supported event may merge
    #[default]
    Always,
    /// Only the listed event kinds may merge
    Only(BTreeSet<EventKind>),
}

impl AutoMergePolicy {
    /// Parse the `auto-merge` input.
    ///
    /// `true` (any case) means [`Always`](Self::Always). Anything else is read
    /// as a comma-separated list of event names; unknown names are reported
    /// and ignored, so `false` disables every trigger.
    pub fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("true") {
            return Self::Always;
        }

        let mut kinds = BTreeSet::new();
        for entry in input.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.parse::<EventKind>() {
                Ok(kind) => {
                    kinds.insert(kind);
                }
                Err(_) if entry.eq_ignore_ascii_case("false") => {}
                Err(_) => warn!(entry, "Unknown auto-merge event, ignoring"),
            }
        }
        Self::Only(kinds)
    }

    /// Whether `kind` may trigger a merge
    pub fn is_trigger_enabled(&self, kind: EventKind) -> bool {
        match self {
            Self::Always => true,
            Self::Only(kinds) => kinds.contains(&kind),
        }
    }
}
