pub mod bone;
pub mod modification;
pub mod rule;
pub mod tree_node;

pub use bone::{BoneGroup, BoneMapping, BoneSelection, HumanBone};
pub use modification::{
    CreatedRef, EntrySignature, ModificationEntry, ModificationKind, ModificationLog,
    ModificationTarget,
};
pub use rule::ReplacementRule;
pub use tree_node::{CapturedComponent, RouteHop, TreeNode};
