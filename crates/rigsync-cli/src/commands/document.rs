//! Scene documents
//!
//! JSON description of a scene forest. References between components are
//! written as slash-separated paths from a root (`"root/hips/skirt"`) and
//! resolved once every node exists.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use glam::Vec3;
use rigsync_core::errors::{Result, SyncError};
use rigsync_core::model::HumanBone;
use rigsync_core::scene::{
    ClothCoefficient, ComponentId, ComponentKind, FieldAccess, FieldValue, NodeId, Scene,
    SceneHost,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SceneDocument {
    pub roots: Vec<NodeDoc>,
}

#[derive(Debug, Deserialize)]
pub struct NodeDoc {
    pub name: String,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub bone: Option<HumanBone>,
    #[serde(default)]
    pub points: Vec<Vec3>,
    #[serde(default)]
    pub components: Vec<ComponentDoc>,
    #[serde(default)]
    pub children: Vec<NodeDoc>,
}

#[derive(Debug, Deserialize)]
pub struct ComponentDoc {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "default_kind")]
    pub kind: ComponentKind,
    #[serde(default)]
    pub fields: BTreeMap<String, DocValue>,
    #[serde(default)]
    pub coefficients: Vec<ClothCoefficient>,
}

/// Field value with references spelled as paths
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DocValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Vector(Vec3),
    NodeRef(Option<String>),
    ComponentRef(Option<ComponentPath>),
    List(Vec<DocValue>),
}

/// The `index`-th component of type `type` on the node at `node`
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentPath {
    pub node: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub index: usize,
}

fn default_tag() -> String {
    "Object".to_string()
}

fn default_kind() -> ComponentKind {
    ComponentKind::Generic
}

/// A scene built from a document, with its roots addressable by name
pub struct LoadedScene {
    pub scene: Scene,
    roots: HashMap<String, NodeId>,
}

impl LoadedScene {
    /// Resolve `root/child/...` to a node
    pub fn resolve(&self, path: &str) -> Option<NodeId> {
        let (root_name, rest) = match path.split_once('/') {
            Some((root, rest)) => (root, rest),
            None => (path, ""),
        };
        let root = *self.roots.get(root_name)?;
        self.scene.resolve_path(root, rest)
    }

    fn resolve_component(&self, path: &ComponentPath) -> Option<ComponentId> {
        let node = self.resolve(&path.node)?;
        self.scene
            .components(node)
            .into_iter()
            .filter(|c| self.scene.component_type(*c) == Some(path.type_name.as_str()))
            .nth(path.index)
    }

    fn resolve_value(&self, value: &DocValue) -> Result<FieldValue> {
        Ok(match value {
            DocValue::Bool(v) => FieldValue::Bool(*v),
            DocValue::Int(v) => FieldValue::Int(*v),
            DocValue::Float(v) => FieldValue::Float(*v),
            DocValue::Text(v) => FieldValue::Text(v.clone()),
            DocValue::Vector(v) => FieldValue::Vector(*v),
            DocValue::NodeRef(None) => FieldValue::NodeRef(None),
            DocValue::NodeRef(Some(path)) => {
                let node = self.resolve(path).ok_or_else(|| unresolved(path))?;
                FieldValue::NodeRef(Some(node))
            }
            DocValue::ComponentRef(None) => FieldValue::ComponentRef(None),
            DocValue::ComponentRef(Some(path)) => {
                let component = self
                    .resolve_component(path)
                    .ok_or_else(|| unresolved(&format!("{}#{}", path.node, path.type_name)))?;
                FieldValue::ComponentRef(Some(component))
            }
            DocValue::List(items) => FieldValue::List(
                items
                    .iter()
                    .map(|item| self.resolve_value(item))
                    .collect::<Result<Vec<_>>>()?,
            ),
        })
    }
}

fn unresolved(path: &str) -> SyncError {
    SyncError::Serialization {
        message: format!("reference '{}' does not resolve", path),
    }
}

/// Fields waiting for every node to exist
struct PendingFields<'a> {
    component: ComponentId,
    fields: &'a BTreeMap<String, DocValue>,
}

impl SceneDocument {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SyncError::Serialization {
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SyncError::Serialization {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_json_str(&text)
    }

    /// Build the scene in two passes: structure first, then field values
    pub fn into_scene(self) -> Result<LoadedScene> {
        let mut loaded = LoadedScene {
            scene: Scene::new(),
            roots: HashMap::new(),
        };
        let mut pending = Vec::new();

        for root in &self.roots {
            let id = loaded.scene.create_root(root.name.as_str(), root.tag.as_str());
            loaded.roots.insert(root.name.clone(), id);
            build_node(&mut loaded.scene, id, root, &mut pending)?;
        }

        for PendingFields { component, fields } in pending {
            for (name, value) in fields {
                let value = loaded.resolve_value(value)?;
                loaded.scene.set_field(component, name, value)?;
            }
        }

        Ok(loaded)
    }
}

fn build_node<'a>(
    scene: &mut Scene,
    id: NodeId,
    doc: &'a NodeDoc,
    pending: &mut Vec<PendingFields<'a>>,
) -> Result<()> {
    if let Some(bone) = doc.bone {
        scene.set_bone(id, bone)?;
    }
    if !doc.points.is_empty() {
        scene.set_points(id, doc.points.clone())?;
    }

    for component in &doc.components {
        let handle = match component.kind {
            ComponentKind::Transform => scene
                .transform(id)
                .ok_or(SyncError::NodeNotFound { node: id })?,
            kind => scene.attach(id, &component.type_name, kind, Vec::new())?,
        };
        if !component.coefficients.is_empty() {
            scene.set_cloth_coefficients(handle, component.coefficients.clone())?;
        }
        pending.push(PendingFields {
            component: handle,
            fields: &component.fields,
        });
    }

    for child in &doc.children {
        let child_id = scene.create_child(id, child.name.as_str(), child.tag.as_str())?;
        build_node(scene, child_id, child, pending)?;
    }
    Ok(())
}
