use libnoise::{Generator, Source};

/// Smooth one-dimensional noise used to seed fresh genomes.
///
/// Implementations must be deterministic in `x` and return values in `[-1, 1]`.
pub trait NoiseSource {
    fn sample(&self, x: f64) -> f64;
}

/// Perlin noise backed by `libnoise`
#[derive(Debug, Clone, Copy)]
pub struct PerlinNoise {
    seed: u64,
}

impl PerlinNoise {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f64) -> f64 {
        Source::<1>::perlin(self.seed).sample([x]).clamp(-1.0, 1.0)
    }
}
