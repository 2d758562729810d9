use glam::Vec3;

use super::kd_tree::KdTree;
use crate::scene::ClothCoefficient;

/// Carry per-point coefficients from one point layout onto another
///
/// Only source points that actually have a coefficient are indexed, i.e. the
/// first `min(src_points.len(), src_coefficients.len())`. Each destination
/// point takes the coefficient of its nearest indexed source point; with
/// nothing indexed every destination point gets the default coefficient.
pub fn remap_coefficients(
    src_points: &[Vec3],
    src_coefficients: &[ClothCoefficient],
    dst_points: &[Vec3],
) -> Vec<ClothCoefficient> {
    let indexed = src_points.len().min(src_coefficients.len());
    let tree = KdTree::build_range(src_points, 0..indexed);

    dst_points
        .iter()
        .map(|p| {
            tree.find_nearest(*p)
                .map(|i| src_coefficients[i])
                .unwrap_or_default()
        })
        .collect()
}
