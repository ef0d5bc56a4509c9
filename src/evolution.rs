use crate::breeding::breed;
use crate::config::SimConfig;
use crate::environment::Environment;
use crate::error::SimError;
use crate::genome::Genome;
use crate::noise::PerlinNoise;
use crate::population::{GenerationStats, Population};
use bevy::log::{info, warn};
use bevy::prelude::Resource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::collections::VecDeque;

/// Number of past generations kept for display
pub const HISTORY_CAPACITY: usize = 200;

/// Result of advancing the simulation by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Running,
    GenerationComplete(GenerationStats),
}

/// Owns everything the genetic loop needs: randomness, the current environment
/// and population, and a short history of finished generations.
#[derive(Resource)]
pub struct Evolution {
    config: SimConfig,
    rng: ChaCha12Rng,
    environment: Environment,
    /// Bumped whenever the target and obstacles are re-rolled
    environment_epoch: u32,
    population: Population,
    history: VecDeque<GenerationStats>,
    best_fitness: f64,
    completed: u32,
    regenerate_requested: bool,
}

impl Evolution {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::from_entropy(),
        };
        let noise = PerlinNoise::new(rng.r#gen());
        let environment = Environment::random(&config, &mut rng);
        let genomes = (0..config.population)
            .map(|_| Genome::from_noise(config.genome_size(), &noise, &mut rng, &config))
            .collect();
        let population = Population::spawn(0, genomes, &config, &mut rng)?;

        Ok(Self {
            config,
            rng,
            environment,
            environment_epoch: 0,
            population,
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
            best_fitness: 0.0,
            completed: 0,
            regenerate_requested: false,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_epoch(&self) -> u32 {
        self.environment_epoch
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn generation(&self) -> u32 {
        self.population.generation
    }

    /// Most recent generations, oldest first
    pub fn history(&self) -> &VecDeque<GenerationStats> {
        &self.history
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// Generations fully evaluated so far
    pub fn completed_generations(&self) -> u32 {
        self.completed
    }

    /// True once the configured number of generations has been evaluated
    pub fn is_done(&self) -> bool {
        self.completed >= self.config.generations
    }

    /// Re-roll the target and obstacles when the next generation starts
    pub fn request_new_environment(&mut self) {
        self.regenerate_requested = true;
    }

    /// Move every live bubble once. When the last one dies the generation is
    /// scored and the next one is bred.
    pub fn tick(&mut self) -> Result<TickOutcome, SimError> {
        if self.population.step(&self.environment, &self.config) {
            if self.population.ticks() < self.config.max_ticks_per_generation {
                return Ok(TickOutcome::Running);
            }
            self.report_tick_limit();
        }
        self.finish_generation().map(TickOutcome::GenerationComplete)
    }

    /// Run the current generation to completion and breed the next one
    pub fn run_generation(&mut self) -> Result<GenerationStats, SimError> {
        if self.population.run(&self.environment, &self.config).is_err() {
            self.report_tick_limit();
        }
        self.finish_generation()
    }

    fn report_tick_limit(&mut self) {
        let err = SimError::TickLimitExceeded {
            generation: self.population.generation,
            ticks: self.population.ticks(),
        };
        warn!(alive = self.population.alive(), "{err}; expiring survivors");
        self.population
            .expire_remaining(&self.environment, &self.config);
    }

    fn finish_generation(&mut self) -> Result<GenerationStats, SimError> {
        let stats = self.population.stats();
        info!(
            generation = stats.generation,
            ticks = stats.ticks,
            hit_obstacle = stats.hit_obstacle,
            hit_target = stats.hit_target,
            expired = stats.expired,
            best_fitness = stats.best_fitness,
            mean_fitness = stats.mean_fitness,
            "Generation complete"
        );

        let children = breed(
            &self.population.parents(),
            self.config.population,
            &self.config,
            &mut self.rng,
        )?;

        let next = stats.generation + 1;
        if self.regenerate_requested || next % self.config.environment_interval == 0 {
            self.regenerate_environment();
        }
        self.population = Population::spawn(next, children, &self.config, &mut self.rng)?;

        self.completed += 1;
        self.best_fitness = self.best_fitness.max(stats.best_fitness);
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(stats);
        Ok(stats)
    }

    fn regenerate_environment(&mut self) {
        self.environment = Environment::random(&self.config, &mut self.rng);
        self.environment_epoch += 1;
        self.regenerate_requested = false;
        info!(
            generation = self.population.generation + 1,
            target_x = self.environment.target.position.x,
            target_y = self.environment.target.position.y,
            obstacles = self.environment.obstacles.len(),
            "New environment"
        );
    }
}
