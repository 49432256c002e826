/* Copyright 2020 @Yuchen Wong */

use nalgebra as na;

pub type Float = f32;

/// Three-component value type used for points, directions and RGB radiance.
/// Backed by nalgebra; callers only rely on the arithmetic it exposes.
pub type Vector3f = na::Vector3<Float>;
pub type Vector2f = na::Vector2<Float>;

pub const TAU: Float = 6.283185307179586;

pub fn splat(v: Float) -> Vector3f {
    Vector3f::new(v, v, v)
}
