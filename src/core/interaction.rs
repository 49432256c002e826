// Copyright @yucwang 2023

use crate::core::shape::MaterialKind;
use crate::math::constants::Vector3f;

/// Result of marching a ray through a distance field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    pub position: Vector3f,
    /// Unit length when `found` is set.
    pub normal: Vector3f,
    pub material: MaterialKind,
    pub found: bool,
    /// Field evaluations spent, not counting the normal estimate.
    pub steps: u32,
}

impl HitRecord {
    pub fn hit(position: Vector3f, normal: Vector3f, material: MaterialKind, steps: u32) -> Self {
        Self { position, normal, material, found: true, steps }
    }

    pub fn miss(position: Vector3f, steps: u32) -> Self {
        Self {
            position,
            normal: Vector3f::zeros(),
            material: MaterialKind::Neutral,
            found: false,
            steps,
        }
    }
}
