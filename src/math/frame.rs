// Copyright @yucwang 2023

use crate::math::constants::{Float, Vector3f};

/// Orthonormal frame whose z axis is a surface normal.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub x: Vector3f,
    pub y: Vector3f,
    pub z: Vector3f,
}

impl Frame {
    /// Builds the tangent vectors without a branch on the normal's direction
    /// (Duff et al. 2017), so normals with z close to -1 or 1 stay well defined.
    pub fn from_normal(n: &Vector3f) -> Frame {
        let sign: Float = if n.z < 0.0 { -1.0 } else { 1.0 };
        let a = -1.0 / (sign + n.z);
        let b = n.x * n.y * a;
        Frame {
            x: Vector3f::new(1.0 + sign * n.x * n.x * a, sign * b, -sign * n.x),
            y: Vector3f::new(b, sign + n.y * n.y * a, -n.y),
            z: *n,
        }
    }

    pub fn from_local(&self, v: &Vector3f) -> Vector3f {
        self.x * v.x + self.y * v.y + self.z * v.z
    }
}
