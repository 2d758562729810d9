use rigsync_core::scene::{ComponentId, ComponentKind, FieldValue, NodeId, Scene};

pub const COLLIDER: &str = "Physics.Collider";

/// Build a chain of nodes below `parent`, one per path segment
#[allow(dead_code)]
pub fn build_path(scene: &mut Scene, parent: NodeId, path: &str) -> NodeId {
    path.split('/').fold(parent, |node, segment| match scene.find_child(node, segment) {
        Some(existing) => existing,
        None => scene.create_child(node, segment, "Bone").unwrap(),
    })
}

#[allow(dead_code)]
pub fn add_collider(scene: &mut Scene, node: NodeId) -> ComponentId {
    scene
        .attach(
            node,
            COLLIDER,
            ComponentKind::Generic,
            vec![("radius", FieldValue::Float(0.5))],
        )
        .unwrap()
}
