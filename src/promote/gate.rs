//! Label gate - only labelled PRs are eligible for auto-merge

/// Label used when none is configured
pub const DEFAULT_GATE_LABEL: &str = "gitflow";

/// The label a PR must carry to be merged automatically.
///
/// PRs created by this action get the label straight away; PRs opened by
/// people only become eligible when someone adds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateLabel(String);

impl GateLabel {
    /// Create a gate for the given label name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The label name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether `labels` contains the gate label (exact match)
    pub fn is_present<I, S>(&self, labels: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels.into_iter().any(|label| label.as_ref() == self.0)
    }
}

impl Default for GateLabel {
    fn default() -> Self {
        Self::new(DEFAULT_GATE_LABEL)
    }
}

impl std::fmt::Display for GateLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
