//! Uniform random draws backing cluster population and location encoding.
//!
//! Real instruments produce skewed pass-rate and spatial distributions;
//! fixtures use unweighted uniform draws throughout. Callers needing
//! realistic distributions must post-process. Sampling cannot fail.

use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Source of every random value in a simulated run.
///
/// Seeding makes runs reproducible: two samplers built from the same seed
/// drive byte-identical output trees.
pub struct Sampler {
    rng: SmallRng,
}

impl Sampler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self { rng }
    }

    /// One packed base-call/quality byte, uniform over [0, 255].
    pub fn call_byte(&mut self) -> u8 {
        self.rng.random()
    }

    /// One quality-filter flag, an unweighted coin flip.
    pub fn pass_flag(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    /// One coordinate, uniform over [0, limit).
    pub fn coord(&mut self, limit: f32) -> f32 {
        self.rng.random_range(0.0..limit)
    }

    /// One binned location offset, uniform over [0, 250).
    pub fn bin_offset(&mut self) -> u8 {
        self.rng.random_range(0..250)
    }

    /// The four-digit run number embedded in the run identifier.
    pub fn run_number(&mut self) -> u32 {
        self.rng.random_range(0..=9999)
    }
}
