use glam::Vec3;

use super::host::{FieldAccess, SceneHost};
use super::value::{ClothCoefficient, ComponentId, ComponentKind, FieldValue, NodeId};
use crate::errors::{Result, SyncError};
use crate::model::HumanBone;

/// A [`SceneHost`] over a shared borrow
///
/// Reads go to the wrapped host; every mutation fails with `HostRejected`.
/// Dry runs walk through this view so the caller's scene stays untouched.
pub struct ReadOnlyHost<'a> {
    inner: &'a dyn SceneHost,
}

impl<'a> ReadOnlyHost<'a> {
    pub fn new(inner: &'a dyn SceneHost) -> Self {
        Self { inner }
    }
}

fn rejected<T>(what: &str) -> Result<T> {
    Err(SyncError::HostRejected {
        reason: format!("{} on a read-only scene", what),
    })
}

impl FieldAccess for ReadOnlyHost<'_> {
    fn list_fields(&self, component: ComponentId) -> Result<Vec<(String, FieldValue)>> {
        self.inner.list_fields(component)
    }

    fn set_field(&mut self, _component: ComponentId, _field: &str, _value: FieldValue) -> Result<()> {
        rejected("set_field")
    }
}

impl SceneHost for ReadOnlyHost<'_> {
    fn contains_node(&self, node: NodeId) -> bool {
        self.inner.contains_node(node)
    }

    fn node_name(&self, node: NodeId) -> Option<&str> {
        self.inner.node_name(node)
    }

    fn node_tag(&self, node: NodeId) -> Option<&str> {
        self.inner.node_tag(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.parent(node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.inner.children(node)
    }

    fn bone(&self, node: NodeId) -> Option<HumanBone> {
        self.inner.bone(node)
    }

    fn components(&self, node: NodeId) -> Vec<ComponentId> {
        self.inner.components(node)
    }

    fn component_type(&self, component: ComponentId) -> Option<&str> {
        self.inner.component_type(component)
    }

    fn component_kind(&self, component: ComponentId) -> Option<ComponentKind> {
        self.inner.component_kind(component)
    }

    fn component_owner(&self, component: ComponentId) -> Option<NodeId> {
        self.inner.component_owner(component)
    }

    fn add_component(
        &mut self,
        _node: NodeId,
        _type_name: &str,
        _kind: ComponentKind,
    ) -> Result<ComponentId> {
        rejected("add_component")
    }

    fn destroy_component(&mut self, _component: ComponentId) -> Result<()> {
        rejected("destroy_component")
    }

    fn duplicate_subtree(
        &mut self,
        _source: NodeId,
        _parent: NodeId,
        _name: &str,
    ) -> Result<NodeId> {
        rejected("duplicate_subtree")
    }

    fn cloth_points(&self, component: ComponentId) -> Vec<Vec3> {
        self.inner.cloth_points(component)
    }

    fn cloth_coefficients(&self, component: ComponentId) -> Vec<ClothCoefficient> {
        self.inner.cloth_coefficients(component)
    }

    fn set_cloth_coefficients(
        &mut self,
        _component: ComponentId,
        _coefficients: Vec<ClothCoefficient>,
    ) -> Result<()> {
        rejected("set_cloth_coefficients")
    }

    fn components_of_type(&self, node: NodeId, type_name: &str) -> Vec<ComponentId> {
        self.inner.components_of_type(node, type_name)
    }

    fn relative_path(&self, root: NodeId, node: NodeId) -> Option<String> {
        self.inner.relative_path(root, node)
    }
}
