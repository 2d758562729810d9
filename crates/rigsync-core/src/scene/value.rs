use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Handle to a node in a scene host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Wrap a raw arena index
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw arena index
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Handle to a component attached to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(u32);

impl ComponentId {
    /// Wrap a raw arena index
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw arena index
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

/// Merge category of a component type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Intrinsic per-node placement; updated in place, never created
    Transform,
    /// Point + coefficient simulation; coefficients follow the point layout
    Cloth,
    /// Everything else; always instantiated fresh
    Generic,
}

/// Per-point cloth simulation coefficient
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClothCoefficient {
    pub max_distance: f32,
    pub collision_sphere_distance: f32,
}

impl ClothCoefficient {
    pub const fn new(max_distance: f32, collision_sphere_distance: f32) -> Self {
        Self {
            max_distance,
            collision_sphere_distance,
        }
    }
}

/// Value stored in a component field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Vector(Vec3),
    NodeRef(Option<NodeId>),
    ComponentRef(Option<ComponentId>),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Short shape name used in type mismatch errors
    pub fn shape(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
            FieldValue::Vector(_) => "vector",
            FieldValue::NodeRef(_) => "node_ref",
            FieldValue::ComponentRef(_) => "component_ref",
            FieldValue::List(_) => "list",
        }
    }

    /// Whether this value holds a reference, directly or inside a list
    pub fn has_references(&self) -> bool {
        match self {
            FieldValue::NodeRef(Some(_)) | FieldValue::ComponentRef(Some(_)) => true,
            FieldValue::List(items) => items.iter().any(FieldValue::has_references),
            _ => false,
        }
    }
}
