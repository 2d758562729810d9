//! Snapshot-vs-live reconciliation
//!
//! A paste runs, in order: cleanup (when `remove_before_merge`), object copy
//! (when `create_missing_objects`), merge, then reference remap. A dry run
//! runs the same walks without mutating and without the remap. Every walk
//! pairs the captured root with the destination root unconditionally, then
//! matches names level by level; an unmatched child ends that branch.
//!
//! A dry run cannot see nodes an object copy would create, so merge entries
//! below such nodes only show up in an executed paste.

pub mod capture;
pub mod cleanup;
pub mod context;
pub mod merge;
pub mod object_copy;
pub mod remap;

pub use capture::{capture, Capture};
pub use context::{SyncContext, WalkMode};

use crate::matcher::NameMatcher;
use crate::model::{BoneMapping, ModificationLog};
use crate::scene::{ComponentId, NodeId, SceneHost};
use crate::settings::SyncSettings;

/// What one reconcile pass did or would do
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    pub log: ModificationLog,
    /// Components added or updated by merge (execute only)
    pub created: Vec<ComponentId>,
    /// Reference fields rewritten by the remap pass
    pub remapped: usize,
}

/// Reconcile a capture against the subtree under `dest_root`
///
/// Returns an empty reconciliation when `dest_root` does not resolve.
pub fn reconcile(
    host: &mut dyn SceneHost,
    capture: &Capture,
    dest_root: NodeId,
    settings: &SyncSettings,
    mode: WalkMode,
) -> Reconciliation {
    if !host.contains_node(dest_root) {
        tracing::debug!(dest_root = %dest_root, "destination root not found");
        return Reconciliation::default();
    }

    let matcher = NameMatcher::new(&settings.rules).with_bone_maps(
        capture.source_bones.clone(),
        BoneMapping::from_host(&*host, dest_root),
    );

    let mut ctx = SyncContext::new(&mut *host, &matcher, settings, mode, dest_root);
    if settings.remove_before_merge {
        cleanup::cleanup(&mut ctx, &capture.tree, dest_root);
    }
    if settings.create_missing_objects {
        object_copy::copy_missing_objects(&mut ctx, &capture.tree);
    }
    merge::merge(&mut ctx, &capture.tree, dest_root);
    let (log, created) = ctx.finish();

    let remapped = match mode {
        WalkMode::Execute => remap::remap_references(
            host,
            &capture.tree,
            &capture.membership,
            dest_root,
            &created,
        ),
        WalkMode::DryRun => 0,
    };

    Reconciliation {
        log,
        created,
        remapped,
    }
}
