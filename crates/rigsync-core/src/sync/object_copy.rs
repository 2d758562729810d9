use super::cleanup::prune;
use super::context::{join_path, SyncContext};
use crate::log_walk_error;
use crate::model::{CreatedRef, ModificationEntry, ModificationKind, TreeNode};

/// Duplicate source subtrees that have no counterpart under the destination
///
/// Each qualifying captured node's route is walked from the destination
/// root; the first hop without a matching child is duplicated from the
/// source, renamed through the pattern rules. Captured component types are
/// then stripped from the copy so merge can lay them down again.
pub fn copy_missing_objects(ctx: &mut SyncContext<'_>, snapshot: &TreeNode) {
    let matched_only = ctx.settings.object_copy_matched_only;
    let mut chains: Vec<Vec<&TreeNode>> = Vec::new();
    snapshot.visit_chains(&mut |chain| {
        let target = chain[chain.len() - 1];
        if chain.len() > 1 && (target.has_components() || !matched_only) {
            chains.push(chain.to_vec());
        }
    });

    for chain in chains {
        let mut dest = ctx.dest_root;
        for hop in &chain[1..] {
            if let Some(next) = ctx.find_matching_child(dest, &hop.name) {
                dest = next;
                continue;
            }

            let name = ctx.matcher.transform_name(&hop.name);
            let path = join_path(&ctx.path_of(dest), &name);
            if ctx
                .log()
                .find_object(&path, ModificationKind::CreateObject)
                .is_some()
            {
                break;
            }
            let entry = ctx.record_object(ModificationEntry::create_object(path.as_str()));
            if ctx.is_dry_run() {
                break;
            }

            match ctx.host.duplicate_subtree(hop.source, dest, &name) {
                Ok(created) => {
                    tracing::debug!(node = %created, path = %path, "duplicated missing object");
                    if let Some(index) = entry {
                        ctx.log_mut().attach_object(index, CreatedRef::Node(created));
                    }
                    prune(ctx, hop, created);
                }
                Err(err) => {
                    log_walk_error!("object_copy", err, node = %hop.source, path = %path);
                }
            }
            break;
        }
    }
}
