use crate::config::SimConfig;
use crate::environment::Environment;
use crate::genome::Genome;
use crate::vector::Vector2;
use bevy::log::debug;

/// Life cycle of a bubble. Every dead state is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Alive,
    /// Touched an obstacle or drifted off the left/right edge
    DeadHitObstacle,
    DeadHitTarget,
    /// Ran out of lifespan without touching anything
    DeadExpired,
}

impl Status {
    pub fn is_alive(self) -> bool {
        self == Status::Alive
    }
}

/// How a bubble died. Only deaths are ever scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Death {
    HitObstacle,
    HitTarget,
    Expired,
}

impl Death {
    /// Fitness multiplier applied for dying this way
    pub fn multiplier(self, config: &SimConfig) -> f64 {
        match self {
            Death::HitObstacle => config.obstacle_multiplier,
            Death::HitTarget => config.target_multiplier,
            Death::Expired => config.expired_multiplier,
        }
    }
}

impl From<Death> for Status {
    fn from(death: Death) -> Self {
        match death {
            Death::HitObstacle => Status::DeadHitObstacle,
            Death::HitTarget => Status::DeadHitTarget,
            Death::Expired => Status::DeadExpired,
        }
    }
}

/// Fitness for a bubble that died `distance` pixels from the target.
/// Distances below `min_fitness_distance` score as if they were exactly that far.
pub fn score(death: Death, distance: f64, config: &SimConfig) -> f64 {
    let distance = distance.max(config.min_fitness_distance);
    (1.0 / distance) * config.fitness_scale * death.multiplier(config)
}

/// A point mass steered by its genome towards the target
#[derive(Debug, Clone)]
pub struct Bubble {
    pub position: Vector2,
    pub velocity: f64,
    pub lifespan: u32,
    pub genome: Genome,
    status: Status,
    fitness: Option<f64>,
}

impl Bubble {
    pub fn new(position: Vector2, velocity: f64, lifespan: u32, genome: Genome) -> Self {
        Self {
            position,
            velocity,
            lifespan,
            genome,
            status: Status::Alive,
            fitness: None,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status.is_alive()
    }

    /// Set exactly once, when the bubble dies
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Gene steering the current tick. Each gene covers `life_gene_ratio` ticks;
    /// out-of-range indices are clamped onto the genome.
    pub fn gene_index(&self, config: &SimConfig) -> usize {
        let ratio = i64::from(config.life_gene_ratio.max(1));
        let span = self.genome.len() as i64 * ratio;
        let index = (span - i64::from(self.lifespan) - 1).div_euclid(ratio);
        let last = self.genome.len().saturating_sub(1) as i64;
        index.clamp(0, last) as usize
    }

    /// Advance one tick: move, then check edges, target and obstacles.
    /// Dead bubbles are left untouched.
    pub fn update(&mut self, env: &Environment, config: &SimConfig) {
        if !self.is_alive() {
            return;
        }

        if self.lifespan == 0 {
            self.die(Death::Expired, env, config);
            return;
        }

        self.lifespan -= 1;
        self.velocity -= config.gravity_factor;

        let steering = self
            .genome
            .heading(self.gene_index(config))
            .map_or(Vector2::ZERO, |heading| {
                Vector2::from_angle(heading, f64::from(self.lifespan) / config.steering_divisor)
            });
        let gravity = Vector2::new(0.0, self.velocity.min(config.gravity_cap));
        let force = Vector2::sum([steering, gravity]);

        // Screen y grows downwards, so an upward force moves the bubble up the screen.
        self.position = self.position.add(Vector2::new(force.x, -force.y));

        if env.out_of_bounds(self.position.x, config.boundary_margin) {
            self.die(Death::HitObstacle, env, config);
        } else if env.reached_target(self.position) {
            self.die(Death::HitTarget, env, config);
        } else if env.hit_obstacle(self.position) {
            self.die(Death::HitObstacle, env, config);
        }
    }

    /// Kill a bubble that is still flying when a generation is cut short
    pub fn force_expire(&mut self, env: &Environment, config: &SimConfig) {
        if self.is_alive() {
            self.die(Death::Expired, env, config);
        }
    }

    fn die(&mut self, death: Death, env: &Environment, config: &SimConfig) {
        let distance = env.distance_to_target(self.position);
        let fitness = score(death, distance, config);
        debug!(?death, distance, fitness, "bubble died");
        self.status = death.into();
        self.fitness = Some(fitness);
    }
}
