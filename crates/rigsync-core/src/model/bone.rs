use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scene::{NodeId, SceneHost};

/// Semantic skeletal joint, independent of project naming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumanBone {
    Hips,
    LeftUpperLeg,
    RightUpperLeg,
    LeftLowerLeg,
    RightLowerLeg,
    LeftFoot,
    RightFoot,
    Spine,
    Chest,
    Neck,
    Head,
    LeftShoulder,
    RightShoulder,
    LeftUpperArm,
    RightUpperArm,
    LeftLowerArm,
    RightLowerArm,
    LeftHand,
    RightHand,
    LeftToes,
    RightToes,
    LeftEye,
    RightEye,
    Jaw,
    LeftThumbProximal,
    LeftThumbIntermediate,
    LeftThumbDistal,
    LeftIndexProximal,
    LeftIndexIntermediate,
    LeftIndexDistal,
    LeftMiddleProximal,
    LeftMiddleIntermediate,
    LeftMiddleDistal,
    LeftRingProximal,
    LeftRingIntermediate,
    LeftRingDistal,
    LeftLittleProximal,
    LeftLittleIntermediate,
    LeftLittleDistal,
    RightThumbProximal,
    RightThumbIntermediate,
    RightThumbDistal,
    RightIndexProximal,
    RightIndexIntermediate,
    RightIndexDistal,
    RightMiddleProximal,
    RightMiddleIntermediate,
    RightMiddleDistal,
    RightRingProximal,
    RightRingIntermediate,
    RightRingDistal,
    RightLittleProximal,
    RightLittleIntermediate,
    RightLittleDistal,
    UpperChest,
}

impl HumanBone {
    /// Every semantic bone, in declaration order
    pub const ALL: [HumanBone; 55] = [
        HumanBone::Hips,
        HumanBone::LeftUpperLeg,
        HumanBone::RightUpperLeg,
        HumanBone::LeftLowerLeg,
        HumanBone::RightLowerLeg,
        HumanBone::LeftFoot,
        HumanBone::RightFoot,
        HumanBone::Spine,
        HumanBone::Chest,
        HumanBone::Neck,
        HumanBone::Head,
        HumanBone::LeftShoulder,
        HumanBone::RightShoulder,
        HumanBone::LeftUpperArm,
        HumanBone::RightUpperArm,
        HumanBone::LeftLowerArm,
        HumanBone::RightLowerArm,
        HumanBone::LeftHand,
        HumanBone::RightHand,
        HumanBone::LeftToes,
        HumanBone::RightToes,
        HumanBone::LeftEye,
        HumanBone::RightEye,
        HumanBone::Jaw,
        HumanBone::LeftThumbProximal,
        HumanBone::LeftThumbIntermediate,
        HumanBone::LeftThumbDistal,
        HumanBone::LeftIndexProximal,
        HumanBone::LeftIndexIntermediate,
        HumanBone::LeftIndexDistal,
        HumanBone::LeftMiddleProximal,
        HumanBone::LeftMiddleIntermediate,
        HumanBone::LeftMiddleDistal,
        HumanBone::LeftRingProximal,
        HumanBone::LeftRingIntermediate,
        HumanBone::LeftRingDistal,
        HumanBone::LeftLittleProximal,
        HumanBone::LeftLittleIntermediate,
        HumanBone::LeftLittleDistal,
        HumanBone::RightThumbProximal,
        HumanBone::RightThumbIntermediate,
        HumanBone::RightThumbDistal,
        HumanBone::RightIndexProximal,
        HumanBone::RightIndexIntermediate,
        HumanBone::RightIndexDistal,
        HumanBone::RightMiddleProximal,
        HumanBone::RightMiddleIntermediate,
        HumanBone::RightMiddleDistal,
        HumanBone::RightRingProximal,
        HumanBone::RightRingIntermediate,
        HumanBone::RightRingDistal,
        HumanBone::RightLittleProximal,
        HumanBone::RightLittleIntermediate,
        HumanBone::RightLittleDistal,
        HumanBone::UpperChest,
    ];
}

/// Fixed grouping of semantic bones used by bone-equivalence rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoneGroup {
    All,
    Body,
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    LeftFingers,
    RightFingers,
}

impl BoneGroup {
    /// Bones belonging to this group
    pub fn bones(self) -> &'static [HumanBone] {
        use HumanBone::*;
        match self {
            BoneGroup::All => &HumanBone::ALL,
            BoneGroup::Body => &[Hips, Spine, Chest, UpperChest],
            BoneGroup::Head => &[Neck, Head, LeftEye, RightEye, Jaw],
            BoneGroup::LeftArm => &[LeftShoulder, LeftUpperArm, LeftLowerArm, LeftHand],
            BoneGroup::RightArm => &[RightShoulder, RightUpperArm, RightLowerArm, RightHand],
            BoneGroup::LeftLeg => &[LeftUpperLeg, LeftLowerLeg, LeftFoot, LeftToes],
            BoneGroup::RightLeg => &[RightUpperLeg, RightLowerLeg, RightFoot, RightToes],
            BoneGroup::LeftFingers => &[
                LeftThumbProximal,
                LeftThumbIntermediate,
                LeftThumbDistal,
                LeftIndexProximal,
                LeftIndexIntermediate,
                LeftIndexDistal,
                LeftMiddleProximal,
                LeftMiddleIntermediate,
                LeftMiddleDistal,
                LeftRingProximal,
                LeftRingIntermediate,
                LeftRingDistal,
                LeftLittleProximal,
                LeftLittleIntermediate,
                LeftLittleDistal,
            ],
            BoneGroup::RightFingers => &[
                RightThumbProximal,
                RightThumbIntermediate,
                RightThumbDistal,
                RightIndexProximal,
                RightIndexIntermediate,
                RightIndexDistal,
                RightMiddleProximal,
                RightMiddleIntermediate,
                RightMiddleDistal,
                RightRingProximal,
                RightRingIntermediate,
                RightRingDistal,
                RightLittleProximal,
                RightLittleIntermediate,
                RightLittleDistal,
            ],
        }
    }

    pub fn contains(self, bone: HumanBone) -> bool {
        self.bones().contains(&bone)
    }
}

/// Which bones a bone-equivalence rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoneSelection {
    Group(BoneGroup),
    Single(HumanBone),
}

impl BoneSelection {
    pub fn selects(self, bone: HumanBone) -> bool {
        match self {
            BoneSelection::Group(group) => group.contains(bone),
            BoneSelection::Single(single) => single == bone,
        }
    }
}

/// Per-root table from node display name to semantic bone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoneMapping {
    bones: HashMap<String, HumanBone>,
}

impl BoneMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the bone tags declared under `root`
    ///
    /// When two nodes share a display name the first one in depth-first order
    /// wins.
    pub fn from_host(host: &dyn SceneHost, root: NodeId) -> Self {
        let mut mapping = Self::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if let (Some(name), Some(bone)) = (host.node_name(node), host.bone(node)) {
                mapping.bones.entry(name.to_string()).or_insert(bone);
            }
            // Reverse so children are visited in declaration order
            stack.extend(host.children(node).into_iter().rev());
        }
        mapping
    }

    pub fn insert(&mut self, name: impl Into<String>, bone: HumanBone) {
        self.bones.insert(name.into(), bone);
    }

    pub fn get(&self, name: &str) -> Option<HumanBone> {
        self.bones.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, HumanBone)> for BoneMapping {
    fn from_iter<I: IntoIterator<Item = (S, HumanBone)>>(iter: I) -> Self {
        Self {
            bones: iter.into_iter().map(|(n, b)| (n.into(), b)).collect(),
        }
    }
}
