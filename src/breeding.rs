use crate::config::SimConfig;
use crate::error::SimError;
use crate::genome::Genome;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

/// Floor applied to every selection weight, so weak parents stay selectable
pub const MIN_SELECTION_WEIGHT: f64 = 1e-9;

/// Fitness-proportional parent picker.
///
/// Weights below `MIN_SELECTION_WEIGHT` are lifted to it, and non-finite
/// fitness counts as the floor. A population where nobody scored therefore
/// falls back to uniform sampling.
pub struct ParentSelector<'a> {
    genomes: Vec<&'a Genome>,
    index: WeightedIndex<f64>,
}

impl<'a> ParentSelector<'a> {
    pub fn new(parents: &[(&'a Genome, f64)]) -> Result<Self, SimError> {
        if parents.is_empty() {
            return Err(SimError::EmptyPopulation);
        }

        let weights = parents.iter().map(|&(_, fitness)| selection_weight(fitness));
        let index = WeightedIndex::new(weights).map_err(|_| SimError::EmptyPopulation)?;
        let genomes = parents.iter().map(|&(genome, _)| genome).collect();
        Ok(Self { genomes, index })
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a Genome {
        self.genomes[self.index.sample(rng)]
    }
}

fn selection_weight(fitness: f64) -> f64 {
    if fitness.is_finite() {
        fitness.max(MIN_SELECTION_WEIGHT)
    } else {
        MIN_SELECTION_WEIGHT
    }
}

/// Produce `count` children. Each child splices two fitness-weighted parents
/// (drawn independently, with replacement) and is then mutated.
pub fn breed<R: Rng + ?Sized>(
    parents: &[(&Genome, f64)],
    count: usize,
    config: &SimConfig,
    rng: &mut R,
) -> Result<Vec<Genome>, SimError> {
    let selector = ParentSelector::new(parents)?;

    (0..count)
        .map(|_| {
            let mother = selector.pick(rng);
            let father = selector.pick(rng);
            let mut child = mother.crossover(father, rng)?;
            child.mutate(config.mutation_rate, config.mutation_bound, rng);
            Ok(child)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn flat(value: f64) -> Genome {
        Genome::new(vec![value; 8])
    }

    fn no_mutation() -> SimConfig {
        SimConfig {
            mutation_rate: 0.0,
            ..SimConfig::default()
        }
    }

    #[test]
    fn fitter_parent_dominates_selection() {
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        let strong = flat(1.0);
        let weak = flat(2.0);
        let selector = ParentSelector::new(&[(&strong, 1000.0), (&weak, 0.0)]).unwrap();

        let trials = 10_000;
        let strong_picks = (0..trials)
            .filter(|_| std::ptr::eq(selector.pick(&mut rng), &strong))
            .count();
        assert!(strong_picks >= trials - 1, "strong parent picked {strong_picks} times");
    }

    #[test]
    fn breeding_from_a_dominant_parent_copies_it() {
        let mut rng = ChaCha12Rng::seed_from_u64(12);
        let strong = flat(1.0);
        let weak = flat(2.0);
        let children = breed(&[(&strong, 1000.0), (&weak, 0.0)], 2, &no_mutation(), &mut rng).unwrap();
        assert_eq!(children.len(), 2);
        for child in children {
            assert_eq!(child, strong);
        }
    }

    #[test]
    fn all_zero_fitness_samples_uniformly() {
        let mut rng = ChaCha12Rng::seed_from_u64(13);
        let a = flat(1.0);
        let b = flat(2.0);
        let selector = ParentSelector::new(&[(&a, 0.0), (&b, 0.0)]).unwrap();
        let trials = 10_000;
        let a_picks = (0..trials)
            .filter(|_| std::ptr::eq(selector.pick(&mut rng), &a))
            .count();
        assert!((4_000..6_000).contains(&a_picks), "a picked {a_picks} times");
    }

    #[test]
    fn nan_fitness_does_not_poison_selection() {
        let a = flat(1.0);
        let b = flat(2.0);
        assert!(ParentSelector::new(&[(&a, f64::NAN), (&b, 5.0)]).is_ok());
    }

    #[test]
    fn breeding_needs_parents() {
        let mut rng = ChaCha12Rng::seed_from_u64(14);
        let err = breed(&[], 3, &SimConfig::default(), &mut rng).unwrap_err();
        assert_eq!(err, SimError::EmptyPopulation);
    }

    #[test]
    fn mismatched_parents_fail_fast() {
        let mut rng = ChaCha12Rng::seed_from_u64(15);
        let short = Genome::new(vec![0.0; 3]);
        let long = Genome::new(vec![0.0; 4]);
        let result = breed(&[(&short, 1.0), (&long, 1.0)], 50, &no_mutation(), &mut rng);
        assert!(matches!(result, Err(SimError::GenomeLengthMismatch { .. })));
    }

    #[test]
    fn children_mix_parent_genes() {
        let mut rng = ChaCha12Rng::seed_from_u64(16);
        let a = flat(1.0);
        let b = flat(2.0);
        let children = breed(&[(&a, 1.0), (&b, 1.0)], 20, &no_mutation(), &mut rng).unwrap();
        assert_eq!(children.len(), 20);
        for child in &children {
            assert!(child.genes.iter().all(|&g| g == 1.0 || g == 2.0));
        }
        assert!(children.iter().any(|c| c.genes.contains(&1.0) && c.genes.contains(&2.0)));
    }
}
