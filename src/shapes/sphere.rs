// Copyright @yucwang 2026

use crate::math::constants::{ Float, Vector3f };

#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub center: Vector3f,
    pub radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }

    /// Positive outside the sphere.
    pub fn distance(&self, p: &Vector3f) -> Float {
        (p - self.center).norm() - self.radius
    }
}
