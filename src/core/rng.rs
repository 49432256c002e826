// Copyright @yucwang 2026

use crate::math::constants::Float;

const MULTIPLIER: u64 = 0x5DEECE66D;
const INCREMENT: u64 = 0xB;
const STATE_MASK: u64 = (1 << 48) - 1;
const MANTISSA_MASK: u64 = (1 << 24) - 1;

/// 48-bit linear congruential generator. Each worker owns one; the stream is
/// a pure function of the seed.
#[derive(Debug, Clone)]
pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed & STATE_MASK }
    }

    /// Seed for worker `index`. Worker 0 keeps the session seed unchanged.
    pub fn for_worker(seed: u64, index: usize) -> Self {
        let mixed = seed ^ (index as u64).wrapping_mul(0x9E3779B97F4A7C15);
        Self::new(mixed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT) & STATE_MASK;
        self.state
    }

    /// Uniform value in [0, 1) with 24 bits of resolution.
    pub fn next_f32(&mut self) -> Float {
        ((self.next_u64() & MANTISSA_MASK) as Float) / ((1u32 << 24) as Float)
    }
}

/// Wall-clock derived seed used when a session is not given one explicitly.
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
