// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::math::constants::Vector2f;
use crate::math::ray::Ray3f;

pub trait Sensor: Send + Sync {
    /// Primary ray through film position `film`, given in pixel units
    /// (sub-pixel jitter already applied). Lens sampling draws from `rng`.
    fn sample_ray(&self, film: &Vector2f, rng: &mut LcgRng) -> Ray3f;
    fn describe(&self) -> String {
        String::from("Sensor")
    }
}
