use super::context::SyncContext;
use crate::log_walk_error;
use crate::model::{CapturedComponent, CreatedRef, ModificationEntry, ModificationKind, TreeNode};
use crate::scene::{copy_fields, ComponentId, ComponentKind, NodeId};
use crate::spatial::remap_coefficients;

/// Merge captured components onto the matching destination subtree
///
/// Captured children without a matching destination child are skipped
/// together with their subtree.
pub fn merge(ctx: &mut SyncContext<'_>, snapshot: &TreeNode, dest: NodeId) {
    for captured in &snapshot.components {
        match captured.kind {
            ComponentKind::Transform => merge_transform(ctx, captured, dest),
            ComponentKind::Cloth => merge_cloth(ctx, captured, dest),
            ComponentKind::Generic => merge_generic(ctx, captured, dest),
        }
    }

    for child in &snapshot.children {
        if let Some(dest_child) = ctx.find_matching_child(dest, &child.name) {
            merge(ctx, child, dest_child);
        }
    }
}

fn record(
    ctx: &mut SyncContext<'_>,
    kind: ModificationKind,
    captured: &CapturedComponent,
    dest: NodeId,
) -> Option<usize> {
    let path = ctx.path_of(dest);
    ctx.record_component(ModificationEntry::component(
        kind,
        dest,
        path,
        captured.type_name.as_str(),
    ))
}

fn attach(ctx: &mut SyncContext<'_>, entry: Option<usize>, component: ComponentId) {
    if let Some(index) = entry {
        ctx.log_mut()
            .attach_component(index, CreatedRef::Component(component));
    }
}

fn merge_transform(ctx: &mut SyncContext<'_>, captured: &CapturedComponent, dest: NodeId) {
    if !ctx.settings.copy_transform_values {
        return;
    }
    let Some(target) = ctx
        .live_components_of_type(dest, &captured.type_name)
        .first()
        .copied()
    else {
        return;
    };

    let entry = record(ctx, ModificationKind::Update, captured, dest);
    if ctx.is_dry_run() {
        return;
    }
    copy_fields(&mut *ctx.host, captured.id, target);
    attach(ctx, entry, target);
}

fn merge_cloth(ctx: &mut SyncContext<'_>, captured: &CapturedComponent, dest: NodeId) {
    let existing = ctx
        .live_components_of_type(dest, &captured.type_name)
        .first()
        .copied();
    let kind = if existing.is_some() || ctx.is_planned(dest, &captured.type_name) {
        ModificationKind::Update
    } else {
        ModificationKind::Add
    };

    let entry = record(ctx, kind, captured, dest);
    if ctx.is_dry_run() {
        if kind == ModificationKind::Add {
            ctx.mark_planned(dest, &captured.type_name);
        }
        return;
    }

    let target = match existing {
        Some(target) => target,
        None => match ctx
            .host
            .add_component(dest, &captured.type_name, ComponentKind::Cloth)
        {
            Ok(target) => target,
            Err(err) => {
                log_walk_error!("merge", err, node = %dest, component_type = %captured.type_name);
                return;
            }
        },
    };

    copy_fields(&mut *ctx.host, captured.id, target);
    transfer_coefficients(ctx, captured.id, target);
    attach(ctx, entry, target);
    ctx.push_created(target);
}

fn transfer_coefficients(ctx: &mut SyncContext<'_>, src: ComponentId, dst: ComponentId) {
    let src_coefficients = ctx.host.cloth_coefficients(src);
    let dst_points = ctx.host.cloth_points(dst);

    let coefficients = if ctx.settings.use_nearest_neighbor_coefficients {
        remap_coefficients(&ctx.host.cloth_points(src), &src_coefficients, &dst_points)
    } else if dst_points.len() == src_coefficients.len() {
        src_coefficients
    } else {
        tracing::debug!(
            component_id = %dst,
            points = dst_points.len(),
            coefficients = src_coefficients.len(),
            "coefficient counts differ, transfer skipped"
        );
        return;
    };

    if let Err(err) = ctx.host.set_cloth_coefficients(dst, coefficients) {
        log_walk_error!("merge", err, component_id = %dst);
    }
}

fn merge_generic(ctx: &mut SyncContext<'_>, captured: &CapturedComponent, dest: NodeId) {
    let entry = record(ctx, ModificationKind::Add, captured, dest);
    if ctx.is_dry_run() {
        return;
    }

    match ctx
        .host
        .add_component(dest, &captured.type_name, captured.kind)
    {
        Ok(target) => {
            copy_fields(&mut *ctx.host, captured.id, target);
            attach(ctx, entry, target);
            ctx.push_created(target);
        }
        Err(err) => {
            log_walk_error!("merge", err, node = %dest, component_type = %captured.type_name);
        }
    }
}
