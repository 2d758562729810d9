use std::collections::HashSet;

use crate::log_walk_error;
use crate::model::TreeNode;
use crate::scene::{ComponentId, FieldAccess, FieldValue, NodeId, SceneHost};

struct Remapper<'a> {
    host: &'a dyn SceneHost,
    snapshot: &'a TreeNode,
    members: HashSet<NodeId>,
    dest_root: NodeId,
}

impl Remapper<'_> {
    /// Destination node reached by following the captured route to `source`
    /// with exact names and tags
    fn resolve_node(&self, source: NodeId) -> Option<NodeId> {
        let route = self.snapshot.route_to(source)?;
        route.iter().try_fold(self.dest_root, |node, hop| {
            self.host.children(node).into_iter().find(|child| {
                self.host.node_name(*child) == Some(hop.name.as_str())
                    && self.host.node_tag(*child) == Some(hop.tag.as_str())
            })
        })
    }

    fn resolve_component(&self, source: ComponentId) -> Option<ComponentId> {
        let owner = self.host.component_owner(source)?;
        if !self.members.contains(&owner) || !self.snapshot.contains_component(source) {
            return None;
        }
        let type_name = self.host.component_type(source)?;
        let ordinal = self
            .host
            .components_of_type(owner, type_name)
            .iter()
            .position(|c| *c == source)?;
        let dest = self.resolve_node(owner)?;
        self.host
            .components_of_type(dest, type_name)
            .get(ordinal)
            .copied()
    }

    /// Rewrite references in place; returns whether anything changed
    fn remap_value(&self, value: &mut FieldValue) -> bool {
        match value {
            FieldValue::NodeRef(Some(target)) if self.members.contains(&*target) => {
                match self.resolve_node(*target) {
                    Some(dest) => {
                        *target = dest;
                        true
                    }
                    None => false,
                }
            }
            FieldValue::ComponentRef(Some(target)) => match self.resolve_component(*target) {
                Some(dest) => {
                    *target = dest;
                    true
                }
                None => false,
            },
            FieldValue::List(items) => items
                .iter_mut()
                .fold(false, |changed, item| self.remap_value(item) || changed),
            _ => false,
        }
    }
}

/// Point references in freshly merged components at the destination
///
/// Only references whose target was visited by the capture are touched.
/// Those whose route cannot be followed under the destination keep their
/// original target. Returns the number of fields rewritten.
pub fn remap_references(
    host: &mut dyn SceneHost,
    snapshot: &TreeNode,
    membership: &[NodeId],
    dest_root: NodeId,
    created: &[ComponentId],
) -> usize {
    let mut updates: Vec<(ComponentId, String, FieldValue)> = Vec::new();
    {
        let remapper = Remapper {
            host: &*host,
            snapshot,
            members: membership.iter().copied().collect(),
            dest_root,
        };

        for component in created {
            let fields = match remapper.host.list_fields(*component) {
                Ok(fields) => fields,
                Err(err) => {
                    log_walk_error!("remap", err, component_id = %component);
                    continue;
                }
            };
            for (field, mut value) in fields {
                if value.has_references() && remapper.remap_value(&mut value) {
                    updates.push((*component, field, value));
                }
            }
        }
    }

    let mut rewritten = 0;
    for (component, field, value) in updates {
        match host.set_field(component, &field, value) {
            Ok(()) => rewritten += 1,
            Err(err) => log_walk_error!("remap", err, component_id = %component, field = %field),
        }
    }
    rewritten
}
