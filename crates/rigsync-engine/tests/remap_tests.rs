// Reference remap after paste: in-capture references follow to the destination.

mod common;

use common::*;
use rigsync_core::scene::{ComponentId, ComponentKind, FieldValue, NodeId, Scene};
use rigsync_core::settings::SyncSettings;
use rigsync_engine::SyncSession;

struct ChainRig {
    fx: Fixture,
    outside: NodeId,
    src_tip_collider: ComponentId,
}

/// `root/spine/chain/tip` on both sides; the source chain carries a
/// `Physics.Chain` referencing its tip, the tip's collider and a node
/// outside the captured subtree. The destination tip is tagged `dst_tip_tag`.
fn chain_rig(dst_tip_tag: &str) -> ChainRig {
    let mut scene = Scene::new();
    let outside = scene.create_root("world_anchor", "Object");

    let src = scene.create_root("root", "Object");
    let spine = scene.create_child(src, "spine", "Bone").unwrap();
    let chain = scene.create_child(spine, "chain", "Bone").unwrap();
    let tip = scene.create_child(chain, "tip", "Bone").unwrap();
    let src_tip_collider = add_collider(&mut scene, tip, 0.1);
    scene
        .attach(
            chain,
            CHAIN,
            ComponentKind::Generic,
            vec![
                ("end", FieldValue::NodeRef(Some(tip))),
                ("end_collider", FieldValue::ComponentRef(Some(src_tip_collider))),
                ("anchor", FieldValue::NodeRef(Some(outside))),
                (
                    "joints",
                    FieldValue::List(vec![
                        FieldValue::NodeRef(Some(chain)),
                        FieldValue::NodeRef(Some(tip)),
                    ]),
                ),
                ("unset", FieldValue::NodeRef(None)),
            ],
        )
        .unwrap();

    let dst = scene.create_root("root", "Object");
    let dst_spine = scene.create_child(dst, "spine", "Bone").unwrap();
    let dst_chain = scene.create_child(dst_spine, "chain", "Bone").unwrap();
    scene.create_child(dst_chain, "tip", dst_tip_tag).unwrap();

    ChainRig {
        fx: Fixture { scene, src, dst },
        outside,
        src_tip_collider,
    }
}

fn chain_settings() -> SyncSettings {
    SyncSettings {
        component_types: vec![CHAIN.to_string(), COLLIDER.to_string()],
        ..SyncSettings::default()
    }
}

#[test]
fn test_paste_remaps_references_into_destination() {
    let ChainRig {
        mut fx, outside, ..
    } = chain_rig("Bone");
    let settings = chain_settings();
    let mut session = SyncSession::new();

    session.copy(&fx.scene, fx.src, &settings);
    let outcome = session.paste(&mut fx.scene, fx.dst, &settings);

    let dst_chain = fx.dst_at("spine/chain");
    let dst_tip = fx.dst_at("spine/chain/tip");
    let dst_tip_collider = fx.dst_components("spine/chain/tip", COLLIDER)[0];
    let component = fx.dst_components("spine/chain", CHAIN)[0];

    assert_eq!(fx.scene.field(component, "end"), Some(&FieldValue::NodeRef(Some(dst_tip))));
    assert_eq!(
        fx.scene.field(component, "end_collider"),
        Some(&FieldValue::ComponentRef(Some(dst_tip_collider)))
    );
    assert_eq!(
        fx.scene.field(component, "joints"),
        Some(&FieldValue::List(vec![
            FieldValue::NodeRef(Some(dst_chain)),
            FieldValue::NodeRef(Some(dst_tip)),
        ]))
    );
    assert_eq!(outcome.remapped, 3);

    // Outside the capture: untouched
    assert_eq!(fx.scene.field(component, "anchor"), Some(&FieldValue::NodeRef(Some(outside))));
    assert_eq!(fx.scene.field(component, "unset"), Some(&FieldValue::NodeRef(None)));
}

#[test]
fn test_uncaptured_component_reference_is_kept() {
    let ChainRig {
        mut fx,
        src_tip_collider,
        ..
    } = chain_rig("Bone");
    let settings = SyncSettings {
        component_types: vec![CHAIN.to_string()],
        ..SyncSettings::default()
    };
    let mut session = SyncSession::new();

    session.copy(&fx.scene, fx.src, &settings);
    session.paste(&mut fx.scene, fx.dst, &settings);

    let component = fx.dst_components("spine/chain", CHAIN)[0];
    assert_eq!(
        fx.scene.field(component, "end_collider"),
        Some(&FieldValue::ComponentRef(Some(src_tip_collider)))
    );
}

#[test]
fn test_unresolvable_route_is_kept() {
    // Merge pairs nodes by name only, remap also requires the tag
    let ChainRig { mut fx, .. } = chain_rig("Mesh");
    let src_tip = fx.src_at("spine/chain/tip");
    let settings = chain_settings();
    let mut session = SyncSession::new();

    session.copy(&fx.scene, fx.src, &settings);
    session.paste(&mut fx.scene, fx.dst, &settings);

    let component = fx.dst_components("spine/chain", CHAIN)[0];
    assert_eq!(fx.scene.field(component, "end"), Some(&FieldValue::NodeRef(Some(src_tip))));
    assert_eq!(fx.dst_components("spine/chain/tip", COLLIDER).len(), 1);
}

#[test]
fn test_dry_run_does_not_remap() {
    let ChainRig { fx, .. } = chain_rig("Bone");
    let settings = chain_settings();
    let mut session = SyncSession::new();

    session.copy(&fx.scene, fx.src, &settings);
    let outcome = session.dry_run(&fx.scene, fx.dst, &settings);

    assert_eq!(outcome.remapped, 0);
    assert!(fx.dst_components("spine/chain", CHAIN).is_empty());
}
