use glam::Vec3;

use super::value::{ClothCoefficient, ComponentId, ComponentKind, FieldValue, NodeId};
use crate::errors::Result;
use crate::log_walk_error;
use crate::model::HumanBone;

/// Field-level access to component data
///
/// This is the capability the engine uses instead of reflection: list every
/// field of a component and write one field back.
pub trait FieldAccess {
    /// List every field of a component, in declaration order
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` for a stale handle.
    fn list_fields(&self, component: ComponentId) -> Result<Vec<(String, FieldValue)>>;

    /// Write a single field
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound`, `UnknownField` or `FieldTypeMismatch`
    /// depending on what the host rejects.
    fn set_field(&mut self, component: ComponentId, field: &str, value: FieldValue) -> Result<()>;
}

/// Scene-graph host consumed by the sync engine
///
/// Read accessors return `None`/empty for handles that no longer resolve, so
/// walks treat a vanished node like a missing branch.
pub trait SceneHost: FieldAccess {
    /// Whether the handle resolves to a live node
    fn contains_node(&self, node: NodeId) -> bool;

    /// Display name of a node
    fn node_name(&self, node: NodeId) -> Option<&str>;

    /// Type tag of a node (e.g. "Object", "Bone", "Mesh")
    fn node_tag(&self, node: NodeId) -> Option<&str>;

    /// Parent of a node, `None` for roots
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Ordered children of a node
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Semantic bone declared for a node, if it is part of a humanoid rig
    fn bone(&self, node: NodeId) -> Option<HumanBone>;

    /// Ordered components attached to a node
    fn components(&self, node: NodeId) -> Vec<ComponentId>;

    /// Fully-qualified type name of a component
    fn component_type(&self, component: ComponentId) -> Option<&str>;

    /// Merge category of a component
    fn component_kind(&self, component: ComponentId) -> Option<ComponentKind>;

    /// Node a component is attached to
    fn component_owner(&self, component: ComponentId) -> Option<NodeId>;

    /// Attach a new, default-initialized component
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` or `HostRejected`.
    fn add_component(
        &mut self,
        node: NodeId,
        type_name: &str,
        kind: ComponentKind,
    ) -> Result<ComponentId>;

    /// Detach and destroy a component
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` or `HostRejected`.
    fn destroy_component(&mut self, component: ComponentId) -> Result<()>;

    /// Clone `source` and its whole subtree under `parent`, naming the clone `name`
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` or `HostRejected`.
    fn duplicate_subtree(&mut self, source: NodeId, parent: NodeId, name: &str)
        -> Result<NodeId>;

    /// Simulation points a cloth component works on
    fn cloth_points(&self, component: ComponentId) -> Vec<Vec3>;

    /// Per-point coefficients of a cloth component
    fn cloth_coefficients(&self, component: ComponentId) -> Vec<ClothCoefficient>;

    /// Replace the per-point coefficients of a cloth component
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` or `HostRejected`.
    fn set_cloth_coefficients(
        &mut self,
        component: ComponentId,
        coefficients: Vec<ClothCoefficient>,
    ) -> Result<()>;

    /// Components of one type attached to a node, in attachment order
    fn components_of_type(&self, node: NodeId, type_name: &str) -> Vec<ComponentId> {
        self.components(node)
            .into_iter()
            .filter(|c| self.component_type(*c) == Some(type_name))
            .collect()
    }

    /// Slash-separated path of `node` below `root`, `None` if not a descendant
    ///
    /// The root itself has the empty path.
    fn relative_path(&self, root: NodeId, node: NodeId) -> Option<String> {
        let mut segments = Vec::new();
        let mut current = node;
        while current != root {
            segments.push(self.node_name(current)?.to_string());
            current = self.parent(current)?;
        }
        segments.reverse();
        Some(segments.join("/"))
    }
}

/// Copy every field of `src` onto `dst`
///
/// Both components are expected to share a declared type. Returns the number
/// of fields written; any failure is logged and reported as zero fields
/// copied, leaving whatever was already written in place.
pub fn copy_fields<H: FieldAccess + ?Sized>(host: &mut H, src: ComponentId, dst: ComponentId) -> usize {
    let fields = match host.list_fields(src) {
        Ok(fields) => fields,
        Err(err) => {
            log_walk_error!("copy_fields", err, component_id = %src);
            return 0;
        }
    };

    let mut copied = 0;
    for (field, value) in fields {
        if let Err(err) = host.set_field(dst, &field, value) {
            log_walk_error!("copy_fields", err, component_id = %dst, field = %field);
            return 0;
        }
        copied += 1;
    }
    copied
}
