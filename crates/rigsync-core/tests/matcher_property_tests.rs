// Property tests for node-name matching.

use proptest::prelude::*;
use rigsync_core::matcher::{names_match, transform_name};
use rigsync_core::model::{BoneGroup, BoneMapping, BoneSelection, HumanBone, ReplacementRule};

fn rule() -> impl Strategy<Value = ReplacementRule> {
    prop_oneof![
        ("[a-c]{1,2}", "[a-c]{0,2}").prop_map(|(s, r)| ReplacementRule::pattern(s, r)),
        Just(ReplacementRule::bone_equivalence(BoneSelection::Group(BoneGroup::All))),
    ]
}

fn bones() -> BoneMapping {
    [("ab", HumanBone::Hips), ("ba", HumanBone::Hips), ("cc", HumanBone::Head)]
        .into_iter()
        .collect()
}

proptest! {
    #[test]
    fn prop_disabled_rule_behaves_as_absent(
        rules in prop::collection::vec(rule(), 0..4),
        extra in rule(),
        src in "[a-c]{1,3}",
        dst in "[a-c]{1,3}",
    ) {
        let map = bones();
        let mut with_disabled = rules.clone();
        with_disabled.push(extra.with_enabled(false));

        prop_assert_eq!(
            names_match(&src, &dst, &rules, Some(&map), Some(&map)),
            names_match(&src, &dst, &with_disabled, Some(&map), Some(&map))
        );
        prop_assert_eq!(transform_name(&src, &rules), transform_name(&src, &with_disabled));
    }

    #[test]
    fn prop_equal_names_always_match(
        rules in prop::collection::vec(rule(), 0..4),
        name in "[a-c]{0,4}",
    ) {
        prop_assert!(names_match(&name, &name, &rules, None, None));
    }

    #[test]
    fn prop_bone_rules_need_both_maps(src in "[a-c]{2}", dst in "[a-c]{2}") {
        prop_assume!(src != dst);
        let rules = vec![ReplacementRule::bone_equivalence(BoneSelection::Group(BoneGroup::All))];
        let map = bones();
        prop_assert!(!names_match(&src, &dst, &rules, Some(&map), None));
        prop_assert!(!names_match(&src, &dst, &rules, None, Some(&map)));
    }
}

#[test]
fn test_shared_bone_pairs_names() {
    let rules = vec![ReplacementRule::bone_equivalence(BoneSelection::Group(BoneGroup::All))];
    let map = bones();
    assert!(names_match("ab", "ba", &rules, Some(&map), Some(&map)));
    assert!(!names_match("ab", "cc", &rules, Some(&map), Some(&map)));
}
