//! Configuration constants for the bubble simulator

use crate::error::SimError;
use crate::vector::Vector2;
use std::ops::Range;

// ============================================================================
// POPULATION & EVOLUTION
// ============================================================================

/// Number of bubbles in every generation
pub const POPULATION: usize = 10;

/// Number of generations to run before the app exits
pub const GENERATIONS: u32 = 1000;

/// Probability that any single gene is perturbed in a freshly bred genome
pub const MUTATION_RATE: f64 = 0.25;

/// Mutations add a value drawn uniformly from ±MUTATION_BOUND (radians)
pub const MUTATION_BOUND: f64 = 0.75;

/// Every gene steers the bubble for this many consecutive ticks
pub const LIFE_GENE_RATIO: u32 = 10;

// ============================================================================
// GENOME NOISE
// ============================================================================

/// Divisor applied to the gene index before sampling noise (higher = smoother headings)
pub const NOISE_SMOOTHING: f64 = 7.0;

/// Per-genome noise offsets are drawn from 0..NOISE_OFFSET_MAX
pub const NOISE_OFFSET_MAX: f64 = 1024.0;

/// Per-genome heading bias range, as a fraction of PI
pub const HEADING_BIAS_MIN: f64 = 1.0 / 3.0;
pub const HEADING_BIAS_MAX: f64 = 2.0 / 3.0;

// ============================================================================
// PHYSICS
// ============================================================================

/// Ticks a bubble lives for
pub const LIFESPAN: u32 = 220;

/// Upward impulse every bubble starts with
pub const INITIAL_VELOCITY: f64 = 3.0;

/// Velocity lost every tick
pub const GRAVITY_FACTOR: f64 = 0.05;

/// Cap on the vertical velocity term
pub const GRAVITY_CAP: f64 = 10.0;

/// Steering force is remaining lifespan divided by this
pub const STEERING_DIVISOR: f64 = 40.0;

/// How far past the left or right edge a bubble may drift before it counts as a crash
pub const BOUNDARY_MARGIN: f64 = 3.0;

// ============================================================================
// FITNESS
// ============================================================================

pub const FITNESS_SCALE: f64 = 1000.0;
pub const OBSTACLE_MULTIPLIER: f64 = 0.5;
pub const TARGET_MULTIPLIER: f64 = 2.0;
pub const EXPIRED_MULTIPLIER: f64 = 1.0;

/// Distances to the target are floored at this value when scoring
pub const MIN_FITNESS_DISTANCE: f64 = 0.1;

// ============================================================================
// WORLD
// ============================================================================

pub const WINDOW_WIDTH: f64 = 600.0;
pub const WINDOW_HEIGHT: f64 = 400.0;

/// Bubbles spawn this far above the bottom edge
pub const START_OFFSET_Y: f64 = 15.0;

pub const NUMBER_OBSTACLES: usize = 5;
pub const OBSTACLE_RADIUS_RANGE: Range<f64> = 5.0..25.0;

pub const TARGET_RADIUS: f64 = 10.0;
pub const TARGET_X_RANGE: Range<f64> = 150.0..450.0;
pub const TARGET_Y_RANGE: Range<f64> = 10.0..150.0;

/// Target and obstacles are re-rolled every this many generations
pub const ENVIRONMENT_INTERVAL: u32 = 100;

// ============================================================================
// PACING & SAFETY
// ============================================================================

/// Simulation ticks per second when a window is open
pub const FRAME_RATE: f64 = 120.0;

/// A generation still running after this many ticks is force-expired
pub const MAX_TICKS_PER_GENERATION: u32 = 10_000;

/// Run-time simulation settings. Defaults mirror the constants above.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub population: usize,
    pub generations: u32,
    pub mutation_rate: f64,
    pub mutation_bound: f64,
    pub life_gene_ratio: u32,
    pub noise_smoothing: f64,
    pub noise_offset_max: f64,
    pub heading_bias: Range<f64>,
    pub lifespan: u32,
    pub initial_velocity: f64,
    pub gravity_factor: f64,
    pub gravity_cap: f64,
    pub steering_divisor: f64,
    pub boundary_margin: f64,
    pub fitness_scale: f64,
    pub obstacle_multiplier: f64,
    pub target_multiplier: f64,
    pub expired_multiplier: f64,
    pub min_fitness_distance: f64,
    pub window_width: f64,
    pub window_height: f64,
    pub start_offset_y: f64,
    pub number_obstacles: usize,
    pub obstacle_radius_range: Range<f64>,
    pub target_radius: f64,
    pub target_x_range: Range<f64>,
    pub target_y_range: Range<f64>,
    pub environment_interval: u32,
    pub frame_rate: f64,
    pub max_ticks_per_generation: u32,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population: POPULATION,
            generations: GENERATIONS,
            mutation_rate: MUTATION_RATE,
            mutation_bound: MUTATION_BOUND,
            life_gene_ratio: LIFE_GENE_RATIO,
            noise_smoothing: NOISE_SMOOTHING,
            noise_offset_max: NOISE_OFFSET_MAX,
            heading_bias: HEADING_BIAS_MIN..HEADING_BIAS_MAX,
            lifespan: LIFESPAN,
            initial_velocity: INITIAL_VELOCITY,
            gravity_factor: GRAVITY_FACTOR,
            gravity_cap: GRAVITY_CAP,
            steering_divisor: STEERING_DIVISOR,
            boundary_margin: BOUNDARY_MARGIN,
            fitness_scale: FITNESS_SCALE,
            obstacle_multiplier: OBSTACLE_MULTIPLIER,
            target_multiplier: TARGET_MULTIPLIER,
            expired_multiplier: EXPIRED_MULTIPLIER,
            min_fitness_distance: MIN_FITNESS_DISTANCE,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            start_offset_y: START_OFFSET_Y,
            number_obstacles: NUMBER_OBSTACLES,
            obstacle_radius_range: OBSTACLE_RADIUS_RANGE,
            target_radius: TARGET_RADIUS,
            target_x_range: TARGET_X_RANGE,
            target_y_range: TARGET_Y_RANGE,
            environment_interval: ENVIRONMENT_INTERVAL,
            frame_rate: FRAME_RATE,
            max_ticks_per_generation: MAX_TICKS_PER_GENERATION,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Number of genes a genome needs to cover a full lifespan
    pub fn genome_size(&self) -> usize {
        self.lifespan.div_ceil(self.life_gene_ratio) as usize
    }

    /// Where generation 0 spawns (screen coordinates, y grows downwards)
    pub fn start_position(&self) -> Vector2 {
        Vector2::new(
            self.window_width / 2.0,
            self.window_height - self.start_offset_y,
        )
    }

    pub fn validate(&self) -> Result<(), SimError> {
        fn invalid(msg: &str) -> Result<(), SimError> {
            Err(SimError::InvalidConfig(msg.to_string()))
        }

        if self.population == 0 {
            return invalid("population must be at least 1");
        }
        if self.lifespan == 0 {
            return invalid("lifespan must be at least 1 tick");
        }
        if self.life_gene_ratio == 0 {
            return invalid("life_gene_ratio must be non-zero");
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid("mutation_rate must be between 0.0 and 1.0");
        }
        if !(self.mutation_bound.is_finite() && self.mutation_bound >= 0.0) {
            return invalid("mutation_bound must be finite and non-negative");
        }
        if self.environment_interval == 0 {
            return invalid("environment_interval must be non-zero");
        }
        if self.max_ticks_per_generation == 0 {
            return invalid("max_ticks_per_generation must be non-zero");
        }
        if !(self.window_width > 0.0 && self.window_height > 0.0) {
            return invalid("window dimensions must be positive");
        }
        if !(self.min_fitness_distance > 0.0) {
            return invalid("min_fitness_distance must be positive");
        }
        if !(self.frame_rate > 0.0) {
            return invalid("frame_rate must be positive");
        }
        if !(self.noise_smoothing > 0.0) {
            return invalid("noise_smoothing must be positive");
        }
        let ranges = [
            ("heading_bias", &self.heading_bias),
            ("obstacle_radius_range", &self.obstacle_radius_range),
            ("target_x_range", &self.target_x_range),
            ("target_y_range", &self.target_y_range),
        ];
        for (name, range) in ranges {
            if range.is_empty() || !range.start.is_finite() || !range.end.is_finite() {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be a finite, non-empty range"
                )));
            }
        }
        if !(self.noise_offset_max.is_finite() && self.noise_offset_max > 0.0) {
            return invalid("noise_offset_max must be finite and positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.genome_size(), 22);
        assert_eq!(config.start_position(), Vector2::new(300.0, 385.0));
    }

    #[test]
    fn genome_size_rounds_up() {
        let config = SimConfig {
            lifespan: 225,
            ..SimConfig::default()
        };
        assert_eq!(config.genome_size(), 23);
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            SimConfig {
                population: 0,
                ..SimConfig::default()
            },
            SimConfig {
                mutation_rate: 1.5,
                ..SimConfig::default()
            },
            SimConfig {
                life_gene_ratio: 0,
                ..SimConfig::default()
            },
            SimConfig {
                target_x_range: 10.0..10.0,
                ..SimConfig::default()
            },
        ];
        for config in cases {
            assert!(matches!(
                config.validate(),
                Err(SimError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn rejects_infinite_bounds_and_ranges() {
        let cases = [
            SimConfig {
                mutation_bound: f64::INFINITY,
                ..SimConfig::default()
            },
            SimConfig {
                mutation_bound: f64::NAN,
                ..SimConfig::default()
            },
            SimConfig {
                noise_offset_max: f64::INFINITY,
                ..SimConfig::default()
            },
            SimConfig {
                heading_bias: 0.3..f64::INFINITY,
                ..SimConfig::default()
            },
            SimConfig {
                obstacle_radius_range: f64::NEG_INFINITY..5.0,
                ..SimConfig::default()
            },
            SimConfig {
                target_y_range: 10.0..f64::INFINITY,
                ..SimConfig::default()
            },
        ];
        for config in cases {
            assert!(matches!(
                config.validate(),
                Err(SimError::InvalidConfig(_))
            ));
        }
    }
}
