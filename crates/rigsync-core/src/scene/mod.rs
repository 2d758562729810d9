//! Scene host contract and the in-memory scene arena
//!
//! The sync engine never touches a concrete scene graph. It talks to a
//! [`SceneHost`], which exposes node structure, component attachment and the
//! [`FieldAccess`] capability used to copy component data. [`Scene`] is the
//! arena-backed host used by tests, the CLI and embedders without their own.

pub mod graph;
pub mod host;
pub mod read_only;
pub mod value;

pub use graph::Scene;
pub use host::{copy_fields, FieldAccess, SceneHost};
pub use read_only::ReadOnlyHost;
pub use value::{ClothCoefficient, ComponentId, ComponentKind, FieldValue, NodeId};

/// Fully-qualified type name of the intrinsic per-node transform
pub const TRANSFORM_TYPE: &str = "Engine.Transform";
