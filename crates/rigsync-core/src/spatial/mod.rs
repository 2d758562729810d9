//! Nearest-neighbor lookup over 3D point sets
//!
//! Used to carry per-point cloth coefficients between meshes whose points
//! are laid out differently.

pub mod coefficients;
pub mod kd_tree;

pub use coefficients::remap_coefficients;
pub use kd_tree::KdTree;
