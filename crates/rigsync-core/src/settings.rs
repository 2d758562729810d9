//! Sync settings
//!
//! Settings are plain serde documents so they can come from a TOML or JSON
//! file. Every field has a default; an empty document is valid.
//!
//! ```toml
//! component_types = ["^Physics\\."]
//! remove_before_merge = true
//!
//! [[rules]]
//! kind = "pattern"
//! search = "^hips$"
//! replace = "pelvis"
//!
//! [[rules]]
//! kind = "bone_equivalence"
//! selection = { group = "all" }
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SyncError};
use crate::matcher::compile_pattern;
use crate::model::ReplacementRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Regex patterns selecting which component types a capture takes
    pub component_types: Vec<String>,
    /// Ordered node-name equivalence rules
    pub rules: Vec<ReplacementRule>,
    /// Destroy destination components of captured types before merging
    pub remove_before_merge: bool,
    /// Duplicate source subtrees that have no destination counterpart
    pub create_missing_objects: bool,
    /// Only consider captured nodes that carry components when creating objects
    pub object_copy_matched_only: bool,
    /// Remap cloth coefficients by nearest point instead of by position
    pub use_nearest_neighbor_coefficients: bool,
    /// Merge captured transform values onto existing destination transforms
    pub copy_transform_values: bool,
    /// Append entries to the modification logs during paste
    pub record_log: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            component_types: Vec::new(),
            rules: Vec::new(),
            remove_before_merge: false,
            create_missing_objects: false,
            object_copy_matched_only: true,
            use_nearest_neighbor_coefficients: true,
            copy_transform_values: false,
            record_log: true,
        }
    }
}

impl SyncSettings {
    /// Parse settings from a TOML document
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettings` if the document does not parse or names an
    /// unknown rule kind.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| SyncError::InvalidSettings {
            message: e.to_string(),
        })
    }

    /// Parse settings from a JSON document
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettings` if the document does not parse or names an
    /// unknown rule kind.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SyncError::InvalidSettings {
            message: e.to_string(),
        })
    }

    /// Errors for every pattern that will be ignored because it does not compile
    ///
    /// Both capture type patterns and enabled pattern rules are checked.
    pub fn invalid_patterns(&self) -> Vec<SyncError> {
        let rule_patterns = self.rules.iter().filter_map(|rule| match rule {
            ReplacementRule::Pattern {
                search,
                enabled: true,
                ..
            } => Some(search.as_str()),
            _ => None,
        });
        self.component_types
            .iter()
            .map(String::as_str)
            .chain(rule_patterns)
            .filter_map(|p| compile_pattern(p).err())
            .collect()
    }

    /// Compiled capture type patterns; invalid ones are skipped
    pub(crate) fn type_patterns(&self) -> Vec<Regex> {
        self.component_types
            .iter()
            .filter_map(|p| match compile_pattern(p) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    tracing::debug!(error = %err, "type pattern ignored");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoneGroup, BoneSelection};

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(SyncSettings::from_toml_str("").unwrap(), SyncSettings::default());
        assert_eq!(SyncSettings::from_json_str("{}").unwrap(), SyncSettings::default());
    }

    #[test]
    fn test_toml_with_rules() {
        let text = r#"
component_types = ["^Physics\\."]
remove_before_merge = true

[[rules]]
kind = "pattern"
search = "^hips$"
replace = "pelvis"

[[rules]]
kind = "bone_equivalence"
selection = { group = "left_arm" }
enabled = false
"#;
        let settings = SyncSettings::from_toml_str(text).unwrap();

        assert!(settings.remove_before_merge);
        assert!(settings.record_log);
        assert_eq!(settings.component_types, vec![r"^Physics\.".to_string()]);
        assert_eq!(
            settings.rules,
            vec![
                ReplacementRule::pattern("^hips$", "pelvis"),
                ReplacementRule::bone_equivalence(BoneSelection::Group(BoneGroup::LeftArm))
                    .with_enabled(false),
            ]
        );
    }

    #[test]
    fn test_json_flags() {
        let settings = SyncSettings::from_json_str(
            r#"{"create_missing_objects": true, "object_copy_matched_only": false}"#,
        )
        .unwrap();
        assert!(settings.create_missing_objects);
        assert!(!settings.object_copy_matched_only);
    }

    #[test]
    fn test_unknown_rule_kind_rejected() {
        let err = SyncSettings::from_json_str(r#"{"rules": [{"kind": "fuzzy"}]}"#).unwrap_err();
        assert!(matches!(err, SyncError::InvalidSettings { .. }));
    }

    #[test]
    fn test_invalid_patterns_reported() {
        let settings = SyncSettings {
            component_types: vec!["Collider".into(), "[".into()],
            rules: vec![
                ReplacementRule::pattern("(", "x"),
                ReplacementRule::pattern("(", "x").with_enabled(false),
            ],
            ..SyncSettings::default()
        };
        assert_eq!(settings.invalid_patterns().len(), 2);
        assert_eq!(settings.type_patterns().len(), 1);
    }
}
