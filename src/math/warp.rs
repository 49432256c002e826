// Copyright @yucwang 2023

use super::constants::{ Float, TAU, Vector2f, Vector3f };

/// Cosine-weighted direction in the local frame (z up).
/// `u.x` picks the azimuth, `u.y` the squared cosine of the polar angle.
pub fn sample_cosine_hemisphere(u: &Vector2f) -> Vector3f {
    let phi: Float = TAU * u.x;
    let r: Float = (1.0 - u.y).sqrt();
    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector3f::new(sin_phi * r, cos_phi * r, u.y.sqrt())
}

/// Aperture offset: each axis takes the square root of its own uniform,
/// is scaled, then weighted by the cosine/sine of a shared angle.
pub fn sample_lens_offset(u: &Vector2f, angle: Float, scale: Float) -> Vector2f {
    let (sin_a, cos_a) = angle.sin_cos();
    Vector2f::new(u.x.sqrt() * scale * cos_a, u.y.sqrt() * scale * sin_a)
}
