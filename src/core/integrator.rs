// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::core::shape::DistanceField;
use crate::math::constants::Vector3f;
use crate::math::ray::Ray3f;

pub trait Integrator: Send + Sync {
    /// One radiance sample along `ray`. Never negative.
    fn trace(&self, field: &dyn DistanceField, rng: &mut LcgRng, ray: &Ray3f) -> Vector3f;
    fn max_bounces(&self) -> u32;
}
