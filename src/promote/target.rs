//! Branch target resolution - which branch a pushed branch promotes into

use tracing::warn;

/// A single promotion rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRule {
    /// Branch that is promoted
    pub source: String,
    /// Branch it is promoted into
    pub target: String,
}

/// Static source → target mapping, fixed at startup
///
/// Each source has at most one target. Branches outside the mapping have no
/// target, which is the normal case for most pushes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchMapping {
    rules: Vec<BranchRule>,
}

impl BranchMapping {
    /// Build a mapping from `(source, target)` pairs.
    ///
    /// The first rule for a source wins. Rules whose target equals their
    /// source are dropped, since a branch cannot be promoted into itself.
    pub fn new<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut rules: Vec<BranchRule> = Vec::new();
        for (source, target) in pairs {
            let (source, target) = (source.into(), target.into());
            if source == target {
                warn!(branch = %source, "Branch is configured as its own target, ignoring");
                continue;
            }
            if rules.iter().any(|r| r.source == source) {
                warn!(branch = %source, target = %target, "Duplicate promotion rule, ignoring");
                continue;
            }
            rules.push(BranchRule { source, target });
        }
        Self { rules }
    }

    /// The two-tier gitflow mapping: release → release target, master → master target
    pub fn gitflow(
        release: &str,
        release_target: &str,
        master: &str,
        master_target: &str,
    ) -> Self {
        Self::new([(release, release_target), (master, master_target)])
    }

    /// Resolve the promotion target for `source`, if any
    pub fn resolve_target(&self, source: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.source == source)
            .map(|r| r.target.as_str())
    }

    /// Names of all promotion sources, in rule order
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.source.as_str())
    }

    /// All rules, in order
    pub fn rules(&self) -> &[BranchRule] {
        &self.rules
    }
}
