// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::core::sensor::Sensor;
use crate::math::constants::{Float, TAU, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::warp::sample_lens_offset;

/// Width of the 35mm film gate the focal length is expressed against.
const FILM_GATE_MM: Float = 36.0;

/// Pinhole film plane one unit in front of the eye, with a thin lens that
/// keeps everything at `focus_distance` sharp.
pub struct ThinLensCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    width: usize,
    height: usize,
    focal_length: Float,
    aperture: Float,
    focus_distance: Float,
    lens_offset_scale: Float,
}

impl ThinLensCamera {
    /// Camera standing in the doorway of the first room, looking down +Z.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_lens(width, height, 1.2, 15.8)
    }

    pub fn with_lens(width: usize, height: usize, aperture: Float, focus_distance: Float) -> Self {
        let aspect = width as Float / height as Float;
        let focal_length = FILM_GATE_MM / (2.0 * aspect);
        Self {
            origin: Vector3f::new(0.0, 0.0, -10.8),
            forward: Vector3f::new(0.0, 0.0, 1.0),
            right: Vector3f::new(aspect, 0.0, 0.0),
            up: Vector3f::new(0.0, 1.0, 0.0),
            width,
            height,
            focal_length,
            aperture,
            focus_distance,
            lens_offset_scale: focal_length / FILM_GATE_MM / aperture,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn focal_length(&self) -> Float {
        self.focal_length
    }

    pub fn aperture(&self) -> Float {
        self.aperture
    }

    pub fn lens_offset_scale(&self) -> Float {
        self.lens_offset_scale
    }

    /// Direction to the film position, not normalized.
    fn film_direction(&self, film: &Vector2f) -> Vector3f {
        let sx = 2.0 * film.x / self.width as Float - 1.0;
        let sy = 1.0 - 2.0 * film.y / self.height as Float;
        self.right * sx + self.up * sy + self.forward
    }
}

impl Sensor for ThinLensCamera {
    fn sample_ray(&self, film: &Vector2f, rng: &mut LcgRng) -> Ray3f {
        let dir = self.film_direction(film);
        let focal_point = self.origin + dir * self.focus_distance;

        let u = Vector2f::new(rng.next_f32(), rng.next_f32());
        let angle = rng.next_f32() * TAU;
        let offset = sample_lens_offset(&u, angle, self.lens_offset_scale);

        let lens_point = self.origin + dir + self.right * offset.x + self.up * offset.y;
        Ray3f::new(lens_point, focal_point - lens_point)
    }

    fn describe(&self) -> String {
        format!(
            "ThinLensCamera {}x{}: aperture f/{:.2}, focal length {:.2}, focus distance {:.2}, lens offset scale {:.6}",
            self.width, self.height, self.aperture, self.focal_length, self.focus_distance, self.lens_offset_scale
        )
    }
}
