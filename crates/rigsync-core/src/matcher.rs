//! Node-name equivalence
//!
//! Two names match when they are equal, when the enabled pattern rules
//! rewrite the source name into the destination name, or when a bone
//! equivalence rule finds the same semantic bone behind both names.

use regex::Regex;

use crate::errors::{Result, SyncError};
use crate::model::{BoneMapping, BoneSelection, ReplacementRule};

#[derive(Debug, Clone)]
enum CompiledRule {
    /// `None` when the search expression does not compile; applying it is a no-op
    Pattern {
        search: Option<Regex>,
        replace: String,
    },
    Bone(BoneSelection),
}

/// Compile a pattern rule's search expression
///
/// # Errors
///
/// Returns `InvalidPattern` if the expression is not a valid regex.
pub fn compile_pattern(search: &str) -> Result<Regex> {
    Regex::new(search).map_err(|e| SyncError::InvalidPattern {
        pattern: search.to_string(),
        reason: e.to_string(),
    })
}

/// Rule set compiled once, plus the bone mappings of both roots
#[derive(Debug, Clone, Default)]
pub struct NameMatcher {
    rules: Vec<CompiledRule>,
    src_bones: BoneMapping,
    dst_bones: BoneMapping,
}

impl NameMatcher {
    /// Compile the enabled rules; disabled rules are dropped entirely
    pub fn new(rules: &[ReplacementRule]) -> Self {
        let rules = rules
            .iter()
            .filter(|r| r.is_enabled())
            .map(|rule| match rule {
                ReplacementRule::Pattern {
                    search, replace, ..
                } => {
                    let search = match compile_pattern(search) {
                        Ok(regex) => Some(regex),
                        Err(err) => {
                            tracing::debug!(error = %err, "pattern rule ignored");
                            None
                        }
                    };
                    CompiledRule::Pattern {
                        search,
                        replace: replace.clone(),
                    }
                }
                ReplacementRule::BoneEquivalence { selection, .. } => {
                    CompiledRule::Bone(*selection)
                }
            })
            .collect();

        Self {
            rules,
            src_bones: BoneMapping::new(),
            dst_bones: BoneMapping::new(),
        }
    }

    /// Attach the bone mappings of the source and destination roots
    pub fn with_bone_maps(mut self, src: BoneMapping, dst: BoneMapping) -> Self {
        self.src_bones = src;
        self.dst_bones = dst;
        self
    }

    pub fn has_rules(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Apply the pattern chain to a name; bone rules never rewrite
    pub fn transform_name(&self, name: &str) -> String {
        let mut current = name.to_string();
        for rule in &self.rules {
            if let CompiledRule::Pattern {
                search: Some(regex),
                replace,
            } = rule
            {
                current = regex.replace_all(&current, replace.as_str()).into_owned();
            }
        }
        current
    }

    pub fn names_match(&self, src: &str, dst: &str) -> bool {
        if src == dst {
            return true;
        }
        if self.rules.is_empty() {
            return false;
        }
        self.transform_name(src) == dst || self.bones_match(src, dst)
    }

    fn bones_match(&self, src: &str, dst: &str) -> bool {
        if self.src_bones.is_empty() || self.dst_bones.is_empty() {
            return false;
        }
        self.rules.iter().any(|rule| {
            let CompiledRule::Bone(selection) = rule else {
                return false;
            };
            let Some(src_bone) = self.src_bones.get(src) else {
                return false;
            };
            selection.selects(src_bone) && self.dst_bones.get(dst) == Some(src_bone)
        })
    }

    /// Index of the candidate matching `src`: an exact name wins, otherwise
    /// the first candidate in order that matches under the rules
    pub fn find_matching_index(&self, candidates: &[&str], src: &str) -> Option<usize> {
        candidates
            .iter()
            .position(|c| *c == src)
            .or_else(|| candidates.iter().position(|c| self.names_match(src, c)))
    }

    pub fn find_matching_name<'c>(&self, candidates: &[&'c str], src: &str) -> Option<&'c str> {
        self.find_matching_index(candidates, src)
            .map(|i| candidates[i])
    }
}

/// One-shot form of [`NameMatcher::names_match`]
pub fn names_match(
    src: &str,
    dst: &str,
    rules: &[ReplacementRule],
    src_bones: Option<&BoneMapping>,
    dst_bones: Option<&BoneMapping>,
) -> bool {
    NameMatcher::new(rules)
        .with_bone_maps(
            src_bones.cloned().unwrap_or_default(),
            dst_bones.cloned().unwrap_or_default(),
        )
        .names_match(src, dst)
}

/// One-shot form of [`NameMatcher::transform_name`]
pub fn transform_name(name: &str, rules: &[ReplacementRule]) -> String {
    NameMatcher::new(rules).transform_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoneGroup, HumanBone};
    use proptest::prelude::*;

    fn bones(pairs: &[(&str, HumanBone)]) -> BoneMapping {
        pairs.iter().map(|(n, b)| (n.to_string(), *b)).collect()
    }

    #[test]
    fn test_exact_match_without_rules() {
        assert!(names_match("hips", "hips", &[], None, None));
        assert!(!names_match("hips", "pelvis", &[], None, None));
    }

    #[test]
    fn test_pattern_chain_applies_in_order() {
        let rules = vec![
            ReplacementRule::pattern("^root$", "root2"),
            ReplacementRule::pattern("root2", "avatar"),
        ];
        assert_eq!(transform_name("root", &rules), "avatar");
        assert!(names_match("root", "avatar", &rules, None, None));
        assert!(!names_match("root", "root2", &rules, None, None));
    }

    #[test]
    fn test_pattern_capture_groups() {
        let rules = vec![ReplacementRule::pattern(r"^(\w+)_L$", "Left$1")];
        assert_eq!(transform_name("Arm_L", &rules), "LeftArm");
        assert_eq!(transform_name("Arm_R", &rules), "Arm_R");
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let rules = vec![ReplacementRule::pattern("a", "o")];
        assert_eq!(transform_name("banana", &rules), "bonono");
    }

    #[test]
    fn test_invalid_pattern_is_noop() {
        let rules = vec![
            ReplacementRule::pattern("([", "x"),
            ReplacementRule::pattern("hips", "pelvis"),
        ];
        assert_eq!(transform_name("hips", &rules), "pelvis");
        assert!(compile_pattern("([").is_err());
    }

    #[test]
    fn test_disabled_rule_is_absent() {
        let rules = vec![ReplacementRule::pattern("hips", "pelvis").with_enabled(false)];
        assert!(!names_match("hips", "pelvis", &rules, None, None));
        assert_eq!(transform_name("hips", &rules), "hips");
    }

    #[test]
    fn test_bone_equivalence_needs_both_maps() {
        let rules = vec![ReplacementRule::bone_equivalence(BoneSelection::Group(
            BoneGroup::All,
        ))];
        let src = bones(&[("J_Hips", HumanBone::Hips)]);
        let dst = bones(&[("pelvis", HumanBone::Hips)]);

        assert!(names_match("J_Hips", "pelvis", &rules, Some(&src), Some(&dst)));
        assert!(!names_match("J_Hips", "pelvis", &rules, Some(&src), None));
        assert!(!names_match(
            "J_Hips",
            "pelvis",
            &rules,
            Some(&src),
            Some(&BoneMapping::new())
        ));
    }

    #[test]
    fn test_bone_selection_filters_source_bone() {
        let src = bones(&[("upper_L", HumanBone::LeftUpperArm), ("spine0", HumanBone::Spine)]);
        let dst = bones(&[("arm.L", HumanBone::LeftUpperArm), ("spine", HumanBone::Spine)]);
        let rules = vec![ReplacementRule::bone_equivalence(BoneSelection::Group(
            BoneGroup::LeftArm,
        ))];

        assert!(names_match("upper_L", "arm.L", &rules, Some(&src), Some(&dst)));
        assert!(!names_match("spine0", "spine", &rules, Some(&src), Some(&dst)));

        let single = vec![ReplacementRule::bone_equivalence(BoneSelection::Single(
            HumanBone::Spine,
        ))];
        assert!(names_match("spine0", "spine", &single, Some(&src), Some(&dst)));
        assert!(!names_match("upper_L", "arm.L", &single, Some(&src), Some(&dst)));
    }

    #[test]
    fn test_find_matching_prefers_exact_then_first() {
        let matcher = NameMatcher::new(&[ReplacementRule::pattern("hips", "pelvis")]);
        let candidates = ["pelvis", "hips", "pelvis"];
        assert_eq!(matcher.find_matching_index(&candidates, "hips"), Some(1));

        let candidates = ["spine", "pelvis", "pelvis"];
        assert_eq!(matcher.find_matching_index(&candidates, "hips"), Some(1));
        assert_eq!(matcher.find_matching_name(&candidates, "head"), None);
    }

    proptest! {
        #[test]
        fn prop_no_rules_is_equality(a in "[a-z]{0,6}", b in "[a-z]{0,6}") {
            prop_assert_eq!(names_match(&a, &b, &[], None, None), a == b);
        }
    }
}
