use serde::{Deserialize, Serialize};

use super::bone::BoneSelection;

/// Node-name equivalence rule
///
/// Rules form an ordered list. Pattern rules rewrite the source name in
/// sequence; bone-equivalence rules pair nodes through their semantic bone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplacementRule {
    /// Regular-expression search with a `$n` replacement template
    Pattern {
        search: String,
        replace: String,
        #[serde(default = "default_enabled")]
        enabled: bool,
    },
    /// Nodes are equivalent when both resolve to the same selected bone
    BoneEquivalence {
        selection: BoneSelection,
        #[serde(default = "default_enabled")]
        enabled: bool,
    },
}

fn default_enabled() -> bool {
    true
}

impl ReplacementRule {
    /// Enabled pattern rule
    pub fn pattern(search: impl Into<String>, replace: impl Into<String>) -> Self {
        ReplacementRule::Pattern {
            search: search.into(),
            replace: replace.into(),
            enabled: true,
        }
    }

    /// Enabled bone-equivalence rule
    pub fn bone_equivalence(selection: BoneSelection) -> Self {
        ReplacementRule::BoneEquivalence {
            selection,
            enabled: true,
        }
    }

    /// Same rule with the enabled flag set to `enabled`
    pub fn with_enabled(mut self, value: bool) -> Self {
        match &mut self {
            ReplacementRule::Pattern { enabled, .. }
            | ReplacementRule::BoneEquivalence { enabled, .. } => *enabled = value,
        }
        self
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            ReplacementRule::Pattern { enabled, .. }
            | ReplacementRule::BoneEquivalence { enabled, .. } => *enabled,
        }
    }
}
