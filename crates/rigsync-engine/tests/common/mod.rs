use glam::Vec3;
use rigsync_core::model::ReplacementRule;
use rigsync_core::scene::{ComponentId, ComponentKind, FieldValue, NodeId, Scene, SceneHost};
use rigsync_core::settings::SyncSettings;

pub const COLLIDER: &str = "Physics.Collider";
pub const CLOTH: &str = "Physics.Cloth";
pub const CHAIN: &str = "Physics.Chain";

/// Source and destination roots living in the same scene
#[allow(dead_code)]
pub struct Fixture {
    pub scene: Scene,
    pub src: NodeId,
    pub dst: NodeId,
}

#[allow(dead_code)]
impl Fixture {
    /// Follow a slash path below the source root
    pub fn src_at(&self, path: &str) -> NodeId {
        self.scene
            .resolve_path(self.src, path)
            .unwrap_or_else(|| panic!("no source node at '{}'", path))
    }

    /// Follow a slash path below the destination root
    pub fn dst_at(&self, path: &str) -> NodeId {
        self.scene
            .resolve_path(self.dst, path)
            .unwrap_or_else(|| panic!("no destination node at '{}'", path))
    }

    pub fn dst_components(&self, path: &str, type_name: &str) -> Vec<ComponentId> {
        self.scene.components_of_type(self.dst_at(path), type_name)
    }
}

/// Attach a collider with a couple of plain fields
#[allow(dead_code)]
pub fn add_collider(scene: &mut Scene, node: NodeId, radius: f64) -> ComponentId {
    scene
        .attach(
            node,
            COLLIDER,
            ComponentKind::Generic,
            vec![
                ("radius", FieldValue::Float(radius)),
                ("is_trigger", FieldValue::Bool(false)),
            ],
        )
        .unwrap()
}

/// `root/hips/skirt` carrying a collider, and `root2/pelvis/skirt` without one
#[allow(dead_code)]
pub fn skirt_fixture() -> Fixture {
    let mut scene = Scene::new();
    let src = scene.create_root("root", "Object");
    let hips = scene.create_child(src, "hips", "Bone").unwrap();
    let skirt = scene.create_child(hips, "skirt", "Bone").unwrap();
    add_collider(&mut scene, skirt, 0.25);

    let dst = scene.create_root("root2", "Object");
    let pelvis = scene.create_child(dst, "pelvis", "Bone").unwrap();
    scene.create_child(pelvis, "skirt", "Bone").unwrap();

    Fixture { scene, src, dst }
}

/// The rename rules pairing the skirt fixture's roots and hips
#[allow(dead_code)]
pub fn skirt_rules() -> Vec<ReplacementRule> {
    vec![
        ReplacementRule::pattern("^root$", "root2"),
        ReplacementRule::pattern("^hips$", "pelvis"),
    ]
}

/// Settings capturing `types` with the skirt rules
#[allow(dead_code)]
pub fn settings_for(types: &[&str]) -> SyncSettings {
    SyncSettings {
        component_types: types.iter().map(|t| t.to_string()).collect(),
        rules: skirt_rules(),
        ..SyncSettings::default()
    }
}

/// Give `node` a line of points along X, one unit apart
#[allow(dead_code)]
pub fn line_points(scene: &mut Scene, node: NodeId, count: usize) {
    let points = (0..count).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
    scene.set_points(node, points).unwrap();
}
