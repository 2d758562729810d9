use serde::Serialize;

use crate::scene::{ComponentId, ComponentKind, NodeId};

/// A component selected during capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedComponent {
    pub id: ComponentId,
    pub type_name: String,
    pub kind: ComponentKind,
}

/// One hop of a route: the (name, type tag) pair identifying a child
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteHop {
    pub name: String,
    pub tag: String,
}

/// Captured snapshot of a source node
///
/// Built once per capture, then only read by the walks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub tag: String,
    /// Live source node this snapshot was taken from
    pub source: NodeId,
    pub components: Vec<CapturedComponent>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, tag: impl Into<String>, source: NodeId) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            source,
            components: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn has_components(&self) -> bool {
        !self.components.is_empty()
    }

    /// Number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Number of captured components in this subtree
    pub fn component_count(&self) -> usize {
        self.components.len()
            + self
                .children
                .iter()
                .map(TreeNode::component_count)
                .sum::<usize>()
    }

    /// Distinct component types captured in this subtree, in first-seen order
    pub fn subtree_component_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        self.collect_types(&mut types);
        types
    }

    fn collect_types<'a>(&'a self, types: &mut Vec<&'a str>) {
        for component in &self.components {
            if !types.contains(&component.type_name.as_str()) {
                types.push(&component.type_name);
            }
        }
        for child in &self.children {
            child.collect_types(types);
        }
    }

    /// Whether a component was captured anywhere in this subtree
    pub fn contains_component(&self, id: ComponentId) -> bool {
        self.components.iter().any(|c| c.id == id)
            || self.children.iter().any(|child| child.contains_component(id))
    }

    /// Chain of snapshot nodes from this node down to the one captured from `source`
    ///
    /// The chain starts with `self`; `None` when `source` was not captured here.
    pub fn chain_to(&self, source: NodeId) -> Option<Vec<&TreeNode>> {
        if self.source == source {
            return Some(vec![self]);
        }
        self.children.iter().find_map(|child| {
            child.chain_to(source).map(|mut chain| {
                chain.insert(0, self);
                chain
            })
        })
    }

    /// Route from this node to the one captured from `source`, excluding self
    pub fn route_to(&self, source: NodeId) -> Option<Vec<RouteHop>> {
        let chain = self.chain_to(source)?;
        Some(
            chain
                .iter()
                .skip(1)
                .map(|node| RouteHop {
                    name: node.name.clone(),
                    tag: node.tag.clone(),
                })
                .collect(),
        )
    }

    /// Visit every node in depth-first pre-order together with its chain from self
    pub fn visit_chains<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&[&'a TreeNode]),
    {
        let mut chain = Vec::new();
        self.visit_chains_inner(&mut chain, visit);
    }

    fn visit_chains_inner<'a, F>(&'a self, chain: &mut Vec<&'a TreeNode>, visit: &mut F)
    where
        F: FnMut(&[&'a TreeNode]),
    {
        chain.push(self);
        visit(chain);
        for child in &self.children {
            child.visit_chains_inner(chain, visit);
        }
        chain.pop();
    }
}
