use crate::config::SimConfig;
use crate::error::SimError;
use crate::noise::NoiseSource;
use rand::Rng;
use std::f64::consts::PI;

/// A genome is the list of headings (radians) a bubble steers along over its life.
/// Gene `i` is applied for `life_gene_ratio` consecutive ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    pub genes: Vec<f64>,
}

impl Genome {
    pub fn new(genes: Vec<f64>) -> Self {
        Self { genes }
    }

    /// Create a fresh genome whose headings vary smoothly from gene to gene.
    ///
    /// A random noise offset decorrelates sibling genomes, and a random heading
    /// bias in `config.heading_bias` scales the whole genome towards one side.
    pub fn from_noise<N, R>(size: usize, noise: &N, rng: &mut R, config: &SimConfig) -> Self
    where
        N: NoiseSource + ?Sized,
        R: Rng + ?Sized,
    {
        let offset = rng.gen_range(0.0..config.noise_offset_max);
        let heading_bias = rng.gen_range(config.heading_bias.clone());
        let genes = (0..size)
            .map(|i| {
                (noise.sample(i as f64 / config.noise_smoothing + offset) + 1.0) * (PI * heading_bias)
            })
            .collect();
        Self { genes }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Heading for a gene index, clamped to the last gene
    pub fn heading(&self, index: usize) -> Option<f64> {
        let last = self.genes.len().checked_sub(1)?;
        Some(self.genes[index.min(last)])
    }

    /// Uniform crossover: every gene is inherited whole from one parent or the other
    pub fn crossover<R: Rng + ?Sized>(&self, other: &Genome, rng: &mut R) -> Result<Genome, SimError> {
        if self.len() != other.len() {
            return Err(SimError::GenomeLengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }

        let genes = self
            .genes
            .iter()
            .zip(&other.genes)
            .map(|(&a, &b)| if rng.gen_bool(0.5) { a } else { b })
            .collect();
        Ok(Genome { genes })
    }

    /// Perturb each gene with probability `rate` by up to ±`bound`
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f64, bound: f64, rng: &mut R) {
        for gene in self.genes.iter_mut() {
            if rng.gen_bool(rate.clamp(0.0, 1.0)) {
                *gene += rng.gen_range(-bound..=bound);
            }
        }
    }
}
