// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};

/// Constant added to the mean before compression so dark pixels are not
/// pure black.
pub const AMBIENT_BIAS: Float = 14.0 / 241.0;

/// Running radiance sum of one pixel across passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelAccumulator {
    color_sum: Vector3f,
    sample_count: u32,
}

impl Default for PixelAccumulator {
    fn default() -> Self {
        Self { color_sum: Vector3f::zeros(), sample_count: 0 }
    }
}

impl PixelAccumulator {
    pub fn color_sum(&self) -> Vector3f {
        self.color_sum
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Adds the sum of `count` new samples.
    pub fn add_samples(&mut self, color_sum: &Vector3f, count: u32) {
        debug_assert!(color_sum.x >= 0.0 && color_sum.y >= 0.0 && color_sum.z >= 0.0);
        self.color_sum += color_sum;
        self.sample_count += count;
    }

    /// Mean radiance; black until the first sample arrives.
    pub fn mean(&self) -> Vector3f {
        if self.sample_count == 0 {
            return Vector3f::zeros();
        }
        self.color_sum / (self.sample_count as Float)
    }

    /// Reinhard-compressed 8-bit color. Channels are truncated, not rounded.
    pub fn tone_map(&self) -> [u8; 3] {
        let mean = self.mean();
        [
            tone_map_channel(mean.x),
            tone_map_channel(mean.y),
            tone_map_channel(mean.z),
        ]
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub fn tone_map_channel(c: Float) -> u8 {
    let c = c + AMBIENT_BIAS;
    (c / (c + 1.0) * 255.0) as u8
}
