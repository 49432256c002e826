// Copyright @yucwang 2026

use crate::math::constants::{ Float, Vector3f };

/// Axis-aligned box. `inside_distance` is positive inside the box and
/// negative outside, so a box stands for an empty room by default.
#[derive(Debug, Clone, Copy)]
pub struct Cube {
    pub p_min: Vector3f,
    pub p_max: Vector3f,
}

impl Cube {
    pub fn new(p_min: Vector3f, p_max: Vector3f) -> Self {
        Self { p_min, p_max }
    }

    pub fn inside_distance(&self, p: &Vector3f) -> Float {
        let to_min = p - self.p_min;
        let to_max = self.p_max - p;
        let m = to_min.inf(&to_max);
        m.x.min(m.y).min(m.z)
    }
}

/// A box evaluated in a frame rotated about the Y axis.
#[derive(Debug, Clone, Copy)]
pub struct RotatedCube {
    cube: Cube,
    x_axis: Vector3f,
    z_axis: Vector3f,
}

impl RotatedCube {
    /// `cos_a`/`sin_a` describe the rotation that maps world X and Z onto
    /// the box's local axes.
    pub fn new(cube: Cube, cos_a: Float, sin_a: Float) -> Self {
        Self {
            cube,
            x_axis: Vector3f::new(cos_a, 0.0, sin_a),
            z_axis: Vector3f::new(-sin_a, 0.0, cos_a),
        }
    }

    pub fn to_local(&self, p: &Vector3f) -> Vector3f {
        self.x_axis * p.x + Vector3f::new(0.0, p.y, 0.0) + self.z_axis * p.z
    }

    pub fn inside_distance(&self, p: &Vector3f) -> Float {
        self.cube.inside_distance(&self.to_local(p))
    }
}
