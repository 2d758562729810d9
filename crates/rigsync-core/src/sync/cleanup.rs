use super::context::SyncContext;
use crate::log_walk_error;
use crate::model::{ModificationEntry, ModificationKind, TreeNode};
use crate::scene::{ComponentKind, NodeId};

/// Remove destination components of every type captured below `snapshot`
///
/// Transforms are never removed. One Remove entry is logged per instance;
/// a dry run only remembers the instance as gone.
pub fn cleanup(ctx: &mut SyncContext<'_>, snapshot: &TreeNode, dest: NodeId) {
    strip(ctx, snapshot, dest, true);
}

/// Unlogged strip of a freshly duplicated subtree
pub(crate) fn prune(ctx: &mut SyncContext<'_>, snapshot: &TreeNode, dest: NodeId) {
    strip(ctx, snapshot, dest, false);
}

fn strip(ctx: &mut SyncContext<'_>, snapshot: &TreeNode, dest: NodeId, logged: bool) {
    for type_name in snapshot.subtree_component_types() {
        for component in ctx.live_components_of_type(dest, type_name) {
            if ctx.host.component_kind(component) == Some(ComponentKind::Transform) {
                continue;
            }

            if logged {
                let path = ctx.path_of(dest);
                ctx.record_component(ModificationEntry::component(
                    ModificationKind::Remove,
                    dest,
                    path,
                    type_name,
                ));
            }

            if ctx.is_dry_run() {
                ctx.mark_removed(component);
                continue;
            }
            if let Err(err) = ctx.host.destroy_component(component) {
                log_walk_error!("cleanup", err, node = %dest, component_type = %type_name);
            }
        }
    }

    for child in &snapshot.children {
        if let Some(dest_child) = ctx.find_matching_child_tagged(dest, &child.name, &child.tag) {
            strip(ctx, child, dest_child, logged);
        }
    }
}
