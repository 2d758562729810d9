use std::collections::{HashMap, HashSet};

use glam::Vec3;

use super::host::{FieldAccess, SceneHost};
use super::value::{ClothCoefficient, ComponentId, ComponentKind, FieldValue, NodeId};
use super::TRANSFORM_TYPE;
use crate::errors::{Result, SyncError};
use crate::model::HumanBone;

const TRANSFORM_FIELDS: [&str; 3] = ["position", "rotation", "scale"];

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    components: Vec<ComponentId>,
    bone: Option<HumanBone>,
    points: Vec<Vec3>,
}

#[derive(Debug, Clone)]
struct ComponentData {
    type_name: String,
    kind: ComponentKind,
    owner: NodeId,
    fields: Vec<(String, FieldValue)>,
    coefficients: Vec<ClothCoefficient>,
}

impl ComponentData {
    fn field_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

/// In-memory scene arena
///
/// Nodes and components live in slot vectors addressed by [`NodeId`] and
/// [`ComponentId`]; destroyed components leave an empty slot so stale handles
/// resolve to nothing. Every node owns an intrinsic transform component.
///
/// Not thread-safe; designed for single-threaded use like the engine itself.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Option<NodeData>>,
    components: Vec<Option<ComponentData>>,
    locked_types: HashSet<String>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parentless node
    pub fn create_root(&mut self, name: impl Into<String>, tag: impl Into<String>) -> NodeId {
        self.insert_node(name.into(), tag.into(), None)
    }

    /// Create a node as the last child of `parent`
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if `parent` does not resolve.
    pub fn create_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        tag: impl Into<String>,
    ) -> Result<NodeId> {
        self.node(parent)?;
        let child = self.insert_node(name.into(), tag.into(), Some(parent));
        self.node_mut(parent)?.children.push(child);
        Ok(child)
    }

    fn insert_node(&mut self, name: String, tag: String, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(Some(NodeData {
            name,
            tag,
            parent,
            children: Vec::new(),
            components: Vec::new(),
            bone: None,
            points: Vec::new(),
        }));
        let transform = self.insert_component(
            id,
            TRANSFORM_TYPE.to_string(),
            ComponentKind::Transform,
            TRANSFORM_FIELDS
                .iter()
                .map(|f| {
                    let default = if *f == "scale" { Vec3::ONE } else { Vec3::ZERO };
                    (f.to_string(), FieldValue::Vector(default))
                })
                .collect(),
        );
        if let Some(Some(node)) = self.nodes.get_mut(id.raw() as usize) {
            node.components.push(transform);
        }
        id
    }

    fn insert_component(
        &mut self,
        owner: NodeId,
        type_name: String,
        kind: ComponentKind,
        fields: Vec<(String, FieldValue)>,
    ) -> ComponentId {
        let id = ComponentId::from_raw(self.components.len() as u32);
        self.components.push(Some(ComponentData {
            type_name,
            kind,
            owner,
            fields,
            coefficients: Vec::new(),
        }));
        id
    }

    fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes
            .get(id.raw() as usize)
            .and_then(Option::as_ref)
            .ok_or(SyncError::NodeNotFound { node: id })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes
            .get_mut(id.raw() as usize)
            .and_then(Option::as_mut)
            .ok_or(SyncError::NodeNotFound { node: id })
    }

    fn component(&self, id: ComponentId) -> Result<&ComponentData> {
        self.components
            .get(id.raw() as usize)
            .and_then(Option::as_ref)
            .ok_or(SyncError::ComponentNotFound { component: id })
    }

    fn component_mut(&mut self, id: ComponentId) -> Result<&mut ComponentData> {
        self.components
            .get_mut(id.raw() as usize)
            .and_then(Option::as_mut)
            .ok_or(SyncError::ComponentNotFound { component: id })
    }

    /// Declare the semantic bone of a node
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if `node` does not resolve.
    pub fn set_bone(&mut self, node: NodeId, bone: HumanBone) -> Result<()> {
        self.node_mut(node)?.bone = Some(bone);
        Ok(())
    }

    /// Replace the mesh points of a node; cloth on the node simulates these
    ///
    /// Coefficients of cloth already on the node are resized to match.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if `node` does not resolve.
    pub fn set_points(&mut self, node: NodeId, points: Vec<Vec3>) -> Result<()> {
        let count = points.len();
        let data = self.node_mut(node)?;
        data.points = points;
        let attached = data.components.clone();
        for id in attached {
            let component = self.component_mut(id)?;
            if component.kind == ComponentKind::Cloth {
                component
                    .coefficients
                    .resize(count, ClothCoefficient::default());
            }
        }
        Ok(())
    }

    /// Attach a component with initial field values
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if `node` does not resolve.
    pub fn attach(
        &mut self,
        node: NodeId,
        type_name: &str,
        kind: ComponentKind,
        fields: Vec<(&str, FieldValue)>,
    ) -> Result<ComponentId> {
        let id = self.add_component(node, type_name, kind)?;
        let component = self.component_mut(id)?;
        component.fields = fields
            .into_iter()
            .map(|(n, v)| (n.to_string(), v))
            .collect();
        Ok(id)
    }

    /// Make every field write on components of `type_name` fail
    pub fn lock_type(&mut self, type_name: impl Into<String>) {
        self.locked_types.insert(type_name.into());
    }

    /// Read one field of a component
    pub fn field(&self, component: ComponentId, name: &str) -> Option<&FieldValue> {
        self.component(component)
            .ok()?
            .fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// The intrinsic transform of a node
    pub fn transform(&self, node: NodeId) -> Option<ComponentId> {
        self.components_of_type(node, TRANSFORM_TYPE).first().copied()
    }

    /// First child of `node` with the given name
    pub fn find_child(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.node(node)
            .ok()?
            .children
            .iter()
            .copied()
            .find(|c| self.node_name(*c) == Some(name))
    }

    /// Resolve a slash-separated path below `root`; the empty path is `root`
    pub fn resolve_path(&self, root: NodeId, path: &str) -> Option<NodeId> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(root, |node, segment| self.find_child(node, segment))
    }

    /// Number of live components in the scene
    pub fn component_count(&self) -> usize {
        self.components.iter().flatten().count()
    }

    /// Indented outline of a subtree: one line per node with its component types
    pub fn outline(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.outline_into(root, 0, &mut out);
        out
    }

    fn outline_into(&self, node: NodeId, depth: usize, out: &mut String) {
        let Ok(data) = self.node(node) else {
            return;
        };
        let types: Vec<&str> = data
            .components
            .iter()
            .filter_map(|c| self.component_type(*c))
            .filter(|t| *t != TRANSFORM_TYPE)
            .collect();
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{} [{}]", data.name, data.tag));
        if !types.is_empty() {
            out.push_str(&format!(" ({})", types.join(", ")));
        }
        out.push('\n');
        for child in &data.children {
            self.outline_into(*child, depth + 1, out);
        }
    }

    fn clone_subtree(
        &mut self,
        source: NodeId,
        parent: NodeId,
        name: Option<&str>,
        node_map: &mut HashMap<NodeId, NodeId>,
        component_map: &mut HashMap<ComponentId, ComponentId>,
    ) -> Result<NodeId> {
        let data = self.node(source)?.clone();
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(Some(NodeData {
            name: name.map(str::to_string).unwrap_or(data.name),
            tag: data.tag,
            parent: Some(parent),
            children: Vec::new(),
            components: Vec::new(),
            bone: data.bone,
            points: data.points,
        }));
        node_map.insert(source, id);
        self.node_mut(parent)?.children.push(id);

        for old in data.components {
            let component = self.component(old)?.clone();
            let new = ComponentId::from_raw(self.components.len() as u32);
            self.components.push(Some(ComponentData {
                owner: id,
                ..component
            }));
            component_map.insert(old, new);
            self.node_mut(id)?.components.push(new);
        }

        for child in data.children {
            self.clone_subtree(child, id, None, node_map, component_map)?;
        }
        Ok(id)
    }
}

/// Point references at clones when their target was part of the duplicated subtree
fn rewrite_cloned_refs(
    value: &mut FieldValue,
    node_map: &HashMap<NodeId, NodeId>,
    component_map: &HashMap<ComponentId, ComponentId>,
) {
    match value {
        FieldValue::NodeRef(Some(target)) => {
            if let Some(clone) = node_map.get(target) {
                *target = *clone;
            }
        }
        FieldValue::ComponentRef(Some(target)) => {
            if let Some(clone) = component_map.get(target) {
                *target = *clone;
            }
        }
        FieldValue::List(items) => {
            for item in items {
                rewrite_cloned_refs(item, node_map, component_map);
            }
        }
        _ => {}
    }
}

fn same_shape(current: &FieldValue, incoming: &FieldValue) -> bool {
    std::mem::discriminant(current) == std::mem::discriminant(incoming)
}

impl FieldAccess for Scene {
    fn list_fields(&self, component: ComponentId) -> Result<Vec<(String, FieldValue)>> {
        Ok(self.component(component)?.fields.clone())
    }

    fn set_field(&mut self, component: ComponentId, field: &str, value: FieldValue) -> Result<()> {
        let locked = self.locked_types.contains(&self.component(component)?.type_name);
        if locked {
            return Err(SyncError::HostRejected {
                reason: format!("{} is locked", component),
            });
        }

        let data = self.component_mut(component)?;
        let is_transform = data.kind == ComponentKind::Transform;
        match data.field_mut(field) {
            Some(current) => {
                if !same_shape(current, &value) {
                    return Err(SyncError::FieldTypeMismatch {
                        field: field.to_string(),
                        expected: current.shape(),
                        actual: value.shape(),
                    });
                }
                *current = value;
            }
            None if is_transform => {
                return Err(SyncError::UnknownField {
                    component,
                    field: field.to_string(),
                });
            }
            None => data.fields.push((field.to_string(), value)),
        }
        Ok(())
    }
}

impl SceneHost for Scene {
    fn contains_node(&self, node: NodeId) -> bool {
        self.node(node).is_ok()
    }

    fn node_name(&self, node: NodeId) -> Option<&str> {
        self.node(node).ok().map(|n| n.name.as_str())
    }

    fn node_tag(&self, node: NodeId) -> Option<&str> {
        self.node(node).ok().map(|n| n.tag.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).ok()?.parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn bone(&self, node: NodeId) -> Option<HumanBone> {
        self.node(node).ok()?.bone
    }

    fn components(&self, node: NodeId) -> Vec<ComponentId> {
        self.node(node)
            .map(|n| n.components.clone())
            .unwrap_or_default()
    }

    fn component_type(&self, component: ComponentId) -> Option<&str> {
        self.component(component)
            .ok()
            .map(|c| c.type_name.as_str())
    }

    fn component_kind(&self, component: ComponentId) -> Option<ComponentKind> {
        self.component(component).ok().map(|c| c.kind)
    }

    fn component_owner(&self, component: ComponentId) -> Option<NodeId> {
        self.component(component).ok().map(|c| c.owner)
    }

    fn add_component(
        &mut self,
        node: NodeId,
        type_name: &str,
        kind: ComponentKind,
    ) -> Result<ComponentId> {
        let point_count = self.node(node)?.points.len();
        if kind == ComponentKind::Transform {
            return Err(SyncError::HostRejected {
                reason: format!("{} already has an intrinsic transform", node),
            });
        }
        let id = self.insert_component(node, type_name.to_string(), kind, Vec::new());
        if kind == ComponentKind::Cloth {
            self.component_mut(id)?.coefficients =
                vec![ClothCoefficient::default(); point_count];
        }
        self.node_mut(node)?.components.push(id);
        Ok(id)
    }

    fn destroy_component(&mut self, component: ComponentId) -> Result<()> {
        let data = self.component(component)?;
        if data.kind == ComponentKind::Transform {
            return Err(SyncError::HostRejected {
                reason: format!("{} is an intrinsic transform", component),
            });
        }
        let owner = data.owner;
        if let Ok(node) = self.node_mut(owner) {
            node.components.retain(|c| *c != component);
        }
        self.components[component.raw() as usize] = None;
        Ok(())
    }

    fn duplicate_subtree(&mut self, source: NodeId, parent: NodeId, name: &str) -> Result<NodeId> {
        self.node(parent)?;
        let mut node_map = HashMap::new();
        let mut component_map = HashMap::new();
        let root = self.clone_subtree(
            source,
            parent,
            Some(name),
            &mut node_map,
            &mut component_map,
        )?;

        for clone in component_map.values() {
            let data = self.component_mut(*clone)?;
            for (_, value) in data.fields.iter_mut() {
                rewrite_cloned_refs(value, &node_map, &component_map);
            }
        }
        Ok(root)
    }

    fn cloth_points(&self, component: ComponentId) -> Vec<Vec3> {
        self.component(component)
            .and_then(|c| self.node(c.owner))
            .map(|n| n.points.clone())
            .unwrap_or_default()
    }

    fn cloth_coefficients(&self, component: ComponentId) -> Vec<ClothCoefficient> {
        self.component(component)
            .map(|c| c.coefficients.clone())
            .unwrap_or_default()
    }

    fn set_cloth_coefficients(
        &mut self,
        component: ComponentId,
        coefficients: Vec<ClothCoefficient>,
    ) -> Result<()> {
        let point_count = self.cloth_points(component).len();
        let data = self.component_mut(component)?;
        if coefficients.len() != point_count {
            return Err(SyncError::HostRejected {
                reason: format!(
                    "{} expects {} coefficients, got {}",
                    component,
                    point_count,
                    coefficients.len()
                ),
            });
        }
        data.coefficients = coefficients;
        Ok(())
    }
}
