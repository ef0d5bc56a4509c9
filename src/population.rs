use crate::bubble::{Bubble, Status};
use crate::config::SimConfig;
use crate::environment::Environment;
use crate::error::SimError;
use crate::genome::Genome;
use crate::vector::Vector2;
use rand::Rng;

/// Outcome counts and fitness summary for one finished generation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GenerationStats {
    pub generation: u32,
    pub ticks: u32,
    pub hit_obstacle: usize,
    pub hit_target: usize,
    pub expired: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
}

/// One generation of bubbles flying in lock-step
#[derive(Debug, Clone)]
pub struct Population {
    pub generation: u32,
    pub agents: Vec<Bubble>,
    ticks: u32,
}

impl Population {
    /// Spawn one bubble per genome at the start point. Generation 0 starts
    /// stacked on the spawn point; later generations get `uniform(-i, i)`
    /// horizontal jitter for agent `i`.
    pub fn spawn<R: Rng + ?Sized>(
        generation: u32,
        genomes: Vec<Genome>,
        config: &SimConfig,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        if genomes.is_empty() {
            return Err(SimError::EmptyPopulation);
        }

        let start = config.start_position();
        let agents = genomes
            .into_iter()
            .enumerate()
            .map(|(i, genome)| {
                let jitter = if generation == 0 {
                    0.0
                } else {
                    let spread = i as f64;
                    rng.gen_range(-spread..=spread)
                };
                Bubble::new(
                    Vector2::new(start.x + jitter, start.y),
                    config.initial_velocity,
                    config.lifespan,
                    genome,
                )
            })
            .collect();

        Ok(Self {
            generation,
            agents,
            ticks: 0,
        })
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn alive(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    pub fn is_finished(&self) -> bool {
        self.agents.iter().all(|a| !a.is_alive())
    }

    /// Advance every bubble once, in order. Returns true while any are still alive.
    pub fn step(&mut self, env: &Environment, config: &SimConfig) -> bool {
        if self.is_finished() {
            return false;
        }
        for agent in self.agents.iter_mut() {
            agent.update(env, config);
        }
        self.ticks += 1;
        !self.is_finished()
    }

    /// Step until every bubble is dead, or fail once `max_ticks_per_generation` is reached
    pub fn run(&mut self, env: &Environment, config: &SimConfig) -> Result<(), SimError> {
        while self.step(env, config) {
            if self.ticks >= config.max_ticks_per_generation {
                return Err(SimError::TickLimitExceeded {
                    generation: self.generation,
                    ticks: self.ticks,
                });
            }
        }
        Ok(())
    }

    /// Kill every bubble still flying, scoring it as expired
    pub fn expire_remaining(&mut self, env: &Environment, config: &SimConfig) {
        for agent in self.agents.iter_mut() {
            agent.force_expire(env, config);
        }
    }

    /// Genome and fitness of every dead bubble, ready for breeding
    pub fn parents(&self) -> Vec<(&Genome, f64)> {
        self.agents
            .iter()
            .filter_map(|a| a.fitness().map(|fitness| (&a.genome, fitness)))
            .collect()
    }

    pub fn stats(&self) -> GenerationStats {
        let mut stats = GenerationStats {
            generation: self.generation,
            ticks: self.ticks,
            ..GenerationStats::default()
        };

        let mut total = 0.0;
        let mut scored = 0usize;
        for agent in &self.agents {
            match agent.status() {
                Status::DeadHitObstacle => stats.hit_obstacle += 1,
                Status::DeadHitTarget => stats.hit_target += 1,
                Status::DeadExpired => stats.expired += 1,
                Status::Alive => {}
            }
            if let Some(fitness) = agent.fitness() {
                total += fitness;
                scored += 1;
                stats.best_fitness = stats.best_fitness.max(fitness);
            }
        }
        if scored > 0 {
            stats.mean_fitness = total / scored as f64;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Target;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::f64::consts::PI;

    fn env() -> Environment {
        Environment::new(
            600.0,
            400.0,
            Target {
                position: Vector2::new(300.0, 100.0),
                radius: 10.0,
            },
            Vec::new(),
        )
    }

    fn genomes(config: &SimConfig, headings: &[f64]) -> Vec<Genome> {
        headings
            .iter()
            .map(|&h| Genome::new(vec![h; config.genome_size()]))
            .collect()
    }

    #[test]
    fn generation_zero_spawns_on_the_start_point() {
        let config = SimConfig::default();
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let population = Population::spawn(0, genomes(&config, &[0.0; 10]), &config, &mut rng).unwrap();
        assert_eq!(population.agents.len(), 10);
        for agent in &population.agents {
            assert_eq!(agent.position, config.start_position());
            assert_eq!(agent.lifespan, config.lifespan);
            assert_eq!(agent.velocity, config.initial_velocity);
        }
    }

    #[test]
    fn later_generations_get_index_scaled_jitter() {
        let config = SimConfig::default();
        let mut rng = ChaCha12Rng::seed_from_u64(2);
        let population = Population::spawn(4, genomes(&config, &[0.0; 10]), &config, &mut rng).unwrap();
        let start = config.start_position();
        assert_eq!(population.agents[0].position, start);
        for (i, agent) in population.agents.iter().enumerate() {
            assert!((agent.position.x - start.x).abs() <= i as f64);
            assert_eq!(agent.position.y, start.y);
        }
    }

    #[test]
    fn spawning_nothing_is_an_error() {
        let config = SimConfig::default();
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let err = Population::spawn(0, Vec::new(), &config, &mut rng).unwrap_err();
        assert_eq!(err, SimError::EmptyPopulation);
    }

    #[test]
    fn run_finishes_and_counts_outcomes() {
        let config = SimConfig::default();
        let mut rng = ChaCha12Rng::seed_from_u64(4);
        // Straight up reaches the target, hard right leaves the arena
        let mut population =
            Population::spawn(0, genomes(&config, &[PI / 2.0, 0.0, PI]), &config, &mut rng).unwrap();
        population.run(&env(), &config).unwrap();

        assert!(population.is_finished());
        assert_eq!(population.alive(), 0);
        let stats = population.stats();
        assert_eq!(stats.hit_target, 1);
        assert_eq!(stats.hit_obstacle, 2);
        assert_eq!(stats.expired, 0);
        assert_eq!(stats.ticks, population.ticks());
        assert!(stats.best_fitness >= stats.mean_fitness);
        assert_eq!(population.parents().len(), 3);
        assert!(!population.step(&env(), &config));
    }

    #[test]
    fn tick_limit_is_reported_and_can_be_recovered() {
        let config = SimConfig {
            max_ticks_per_generation: 5,
            ..SimConfig::default()
        };
        let mut rng = ChaCha12Rng::seed_from_u64(5);
        let env = env();
        let mut population = Population::spawn(0, genomes(&config, &[PI / 3.0]), &config, &mut rng).unwrap();
        let err = population.run(&env, &config).unwrap_err();
        assert_eq!(
            err,
            SimError::TickLimitExceeded {
                generation: 0,
                ticks: 5
            }
        );

        population.expire_remaining(&env, &config);
        assert!(population.is_finished());
        assert_eq!(population.stats().expired, 1);
        assert!(population.agents[0].fitness().is_some());
    }
}
