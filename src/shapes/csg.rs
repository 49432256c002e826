// Copyright @yucwang 2026

//! Boolean combinators for distance values that are positive in free space.

use crate::math::constants::Float;

/// Solid union: a point is free only where both operands are free.
pub fn union(a: Float, b: Float) -> Float {
    a.min(b)
}

/// Solid difference: carves the free region of `b` out of the solid of `a`.
pub fn subtract(a: Float, b: Float) -> Float {
    -(-a).min(-b)
}
