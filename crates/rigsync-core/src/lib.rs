//! rigsync Core - snapshot capture and reconciliation kernel
//!
//! This crate provides the domain model and the walks of the sync engine,
//! including:
//! - The scene host contract and an in-memory scene arena
//! - Node-name matching via pattern and bone-equivalence rules
//! - The captured snapshot (`TreeNode`) and modification logs
//! - A k-d tree for remapping per-point cloth coefficients
//! - Cleanup, object copy, merge and reference remap walks
//!
//! Lifecycle logging belongs to the engine crate; the walks here only emit
//! `debug` detail and warnings for host failures they step over.

pub mod errors;
pub mod logging_facility;
pub mod matcher;
pub mod model;
pub mod scene;
pub mod settings;
pub mod spatial;
pub mod sync;

#[doc(hidden)]
pub use rigsync_core_types::schema as __schema;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, SyncError};
pub use matcher::{names_match, transform_name, NameMatcher};
pub use model::{ModificationEntry, ModificationKind, ModificationLog, ReplacementRule, TreeNode};
pub use scene::{NodeId, Scene, SceneHost};
pub use settings::SyncSettings;
pub use sync::{capture, reconcile, Capture, Reconciliation, WalkMode};
