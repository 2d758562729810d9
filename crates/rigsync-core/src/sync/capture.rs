use regex::Regex;

use crate::model::{BoneMapping, CapturedComponent, TreeNode};
use crate::scene::{ComponentKind, NodeId, SceneHost};
use crate::settings::SyncSettings;

/// Snapshot of a source subtree plus everything later walks need about it
#[derive(Debug, Clone)]
pub struct Capture {
    pub source_root: NodeId,
    pub tree: TreeNode,
    /// Every live source node visited, in pre-order
    pub membership: Vec<NodeId>,
    pub source_bones: BoneMapping,
}

/// Snapshot `root` and its whole subtree
///
/// Every node is recorded; a node's components are kept when their type
/// matches one of the settings' type patterns. Transform components are only
/// kept when a pattern spells out the transform type exactly. Returns `None`
/// when `root` does not resolve.
pub fn capture(host: &dyn SceneHost, root: NodeId, settings: &SyncSettings) -> Option<Capture> {
    if !host.contains_node(root) {
        return None;
    }
    let patterns = settings.type_patterns();
    let mut membership = Vec::new();
    let tree = capture_node(host, root, &patterns, &settings.component_types, &mut membership)?;

    tracing::debug!(
        root = %root,
        nodes = membership.len(),
        components = tree.component_count(),
        "captured subtree"
    );

    Some(Capture {
        source_root: root,
        tree,
        membership,
        source_bones: BoneMapping::from_host(host, root),
    })
}

fn capture_node(
    host: &dyn SceneHost,
    node: NodeId,
    patterns: &[Regex],
    literals: &[String],
    membership: &mut Vec<NodeId>,
) -> Option<TreeNode> {
    let mut snapshot = TreeNode::new(host.node_name(node)?, host.node_tag(node)?, node);
    membership.push(node);

    for id in host.components(node) {
        let (Some(type_name), Some(kind)) = (host.component_type(id), host.component_kind(id))
        else {
            continue;
        };
        let selected = match kind {
            ComponentKind::Transform => literals.iter().any(|l| l == type_name),
            _ => patterns.iter().any(|p| p.is_match(type_name)),
        };
        if selected {
            snapshot.components.push(CapturedComponent {
                id,
                type_name: type_name.to_string(),
                kind,
            });
        }
    }

    for child in host.children(node) {
        if let Some(child) = capture_node(host, child, patterns, literals, membership) {
            snapshot.children.push(child);
        }
    }
    Some(snapshot)
}
