// Copyright @yucwang 2023

use crate::math::constants::{ Float, Vector3f };

/// Surface classification reported by a distance field. Only meaningful
/// where the distance is close to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Neutral,
    RedWall,
    GreenWall,
    GoldSphere,
    LightPatch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSample {
    /// Positive in free space, negative inside solids.
    pub distance: Float,
    pub material: MaterialKind,
}

impl SceneSample {
    pub fn new(distance: Float, material: MaterialKind) -> Self {
        Self { distance, material }
    }
}

/// A signed distance field. Implementations must be pure: the same point
/// always yields the same sample, from any thread.
pub trait DistanceField: Send + Sync {
    fn evaluate(&self, p: &Vector3f) -> SceneSample;
}
