// Dry run and paste must plan the same entries on identical destinations.

mod common;

use common::*;
use rigsync_core::model::{BoneGroup, BoneSelection, HumanBone, ModificationKind, ReplacementRule};
use rigsync_core::scene::{ComponentKind, FieldValue, Scene, TRANSFORM_TYPE};
use rigsync_core::settings::SyncSettings;
use rigsync_engine::SyncSession;

/// A richer rig: bone-tagged source and destination with different naming
fn rig_fixture() -> Fixture {
    let mut fx = skirt_fixture();
    let src_hips = fx.src_at("hips");
    let src_skirt = fx.src_at("hips/skirt");
    fx.scene.set_bone(src_hips, HumanBone::Hips).unwrap();
    let arm = fx.scene.create_child(src_hips, "J_UpperArm_L", "Bone").unwrap();
    fx.scene.set_bone(arm, HumanBone::LeftUpperArm).unwrap();
    add_collider(&mut fx.scene, arm, 0.1);
    line_points(&mut fx.scene, src_skirt, 3);
    fx.scene
        .attach(
            src_skirt,
            CLOTH,
            ComponentKind::Cloth,
            vec![("damping", FieldValue::Float(0.2))],
        )
        .unwrap();

    let dst_pelvis = fx.dst_at("pelvis");
    let dst_skirt = fx.dst_at("pelvis/skirt");
    fx.scene.set_bone(dst_pelvis, HumanBone::Hips).unwrap();
    let dst_arm = fx.scene.create_child(dst_pelvis, "upper_arm.L", "Bone").unwrap();
    fx.scene.set_bone(dst_arm, HumanBone::LeftUpperArm).unwrap();
    add_collider(&mut fx.scene, dst_arm, 5.0);
    add_collider(&mut fx.scene, dst_skirt, 5.0);
    line_points(&mut fx.scene, dst_skirt, 5);
    fx
}

fn rig_settings() -> SyncSettings {
    let mut rules = skirt_rules();
    rules.push(ReplacementRule::bone_equivalence(BoneSelection::Group(
        BoneGroup::All,
    )));
    SyncSettings {
        component_types: vec!["^Physics\\.".to_string()],
        rules,
        remove_before_merge: true,
        ..SyncSettings::default()
    }
}

fn assert_symmetric(settings: &SyncSettings) {
    let planned = rig_fixture();
    let mut applied = rig_fixture();
    let mut session = SyncSession::new();

    session.copy(&planned.scene, planned.src, settings);
    session.dry_run(&planned.scene, planned.dst, settings);
    let dry_components = session.log().component_signatures();
    let dry_objects = session.log().object_signatures();

    session.copy(&applied.scene, applied.src, settings);
    session.paste(&mut applied.scene, applied.dst, settings);

    assert!(!dry_components.is_empty());
    assert_eq!(dry_components, session.log().component_signatures());
    assert_eq!(dry_objects, session.log().object_signatures());
    for entry in session.component_log() {
        if entry.kind != ModificationKind::Remove {
            assert!(entry.created.is_some(), "unattached entry: {}", entry.message);
        }
    }
}

#[test]
fn test_symmetry_with_cleanup_and_bone_rules() {
    assert_symmetric(&rig_settings());
}

#[test]
fn test_symmetry_without_cleanup() {
    assert_symmetric(&SyncSettings {
        remove_before_merge: false,
        ..rig_settings()
    });
}

#[test]
fn test_symmetry_with_transforms() {
    let mut settings = rig_settings();
    settings.component_types.push(TRANSFORM_TYPE.to_string());
    settings.copy_transform_values = true;
    assert_symmetric(&settings);
}

#[test]
fn test_bone_equivalence_pairs_differently_named_nodes() {
    let fx = rig_fixture();
    let settings = rig_settings();
    let mut session = SyncSession::new();

    session.copy(&fx.scene, fx.src, &settings);
    session.dry_run(&fx.scene, fx.dst, &settings);

    let paths: Vec<(&str, &str)> = session
        .component_log()
        .iter()
        .map(|e| (e.kind.verb(), e.relative_path.as_str()))
        .collect();
    assert_eq!(
        paths,
        vec![
            ("Remove", "pelvis/skirt"),
            ("Remove", "pelvis/upper_arm.L"),
            ("Add", "pelvis/skirt"),
            ("Add", "pelvis/skirt"),
            ("Add", "pelvis/upper_arm.L"),
        ]
    );
}

#[test]
fn test_dry_run_leaves_destination_untouched() {
    let fx = rig_fixture();
    let before = fx.scene.outline(fx.dst);
    let count = fx.scene.component_count();
    let settings = SyncSettings {
        create_missing_objects: true,
        ..rig_settings()
    };
    let mut session = SyncSession::new();

    session.copy(&fx.scene, fx.src, &settings);
    session.dry_run(&fx.scene, fx.dst, &settings);

    assert_eq!(fx.scene.outline(fx.dst), before);
    assert_eq!(fx.scene.component_count(), count);
    assert!(session.created_components().is_empty());
}

/// `root/{a,b}` each carrying cloth, onto a destination with only `a`;
/// `b` is renamed onto `a`, so both cloths land on the same node
fn twin_cloth_fixture() -> Fixture {
    let mut scene = Scene::new();
    let src = scene.create_root("root", "Object");
    for name in ["a", "b"] {
        let node = scene.create_child(src, name, "Bone").unwrap();
        line_points(&mut scene, node, 3);
        scene
            .attach(node, CLOTH, ComponentKind::Cloth, vec![("damping", FieldValue::Float(0.1))])
            .unwrap();
    }

    let dst = scene.create_root("root", "Object");
    let a = scene.create_child(dst, "a", "Bone").unwrap();
    line_points(&mut scene, a, 3);

    Fixture { scene, src, dst }
}

#[test]
fn test_second_cloth_on_same_node_is_planned_as_update() {
    let settings = SyncSettings {
        component_types: vec![CLOTH.to_string()],
        rules: vec![ReplacementRule::pattern("^b$", "a")],
        ..SyncSettings::default()
    };
    let planned = twin_cloth_fixture();
    let mut applied = twin_cloth_fixture();
    let mut session = SyncSession::new();

    session.copy(&planned.scene, planned.src, &settings);
    session.dry_run(&planned.scene, planned.dst, &settings);
    let dry = session.log().component_signatures();
    let kinds: Vec<ModificationKind> = session.component_log().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ModificationKind::Add, ModificationKind::Update]);

    session.copy(&applied.scene, applied.src, &settings);
    session.paste(&mut applied.scene, applied.dst, &settings);
    assert_eq!(dry, session.log().component_signatures());
    assert_eq!(applied.dst_components("a", CLOTH).len(), 1);
}
