//! Injectable random source
//!
//! The simulation only ever asks for uniform floats in [0, 1). Tests can swap in
//! a scripted source; production uses PCG.

use rand::Rng;
use rand_pcg::Pcg32;

/// Uniform random floats for the simulation
pub trait RandomSource {
    /// Next value in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// Uniform value in [lo, hi)
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }
}

impl RandomSource for Pcg32 {
    fn next_f32(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded linear-congruential generator (Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl RandomSource for Lcg {
    fn next_f32(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        // Top 24 bits fit an f32 mantissa exactly, so the result stays below 1.0
        (self.state >> 8) as f32 / (1u32 << 24) as f32
    }
}
