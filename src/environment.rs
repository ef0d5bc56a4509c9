use crate::config::SimConfig;
use crate::vector::Vector2;
use rand::Rng;

/// The point every bubble is trying to reach
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub position: Vector2,
    pub radius: f64,
}

/// A circular hazard; touching one kills a bubble
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub position: Vector2,
    pub radius: f64,
}

impl Obstacle {
    pub fn contains(&self, point: Vector2) -> bool {
        self.position.distance(point) < self.radius
    }
}

/// Static world a generation flies through. Coordinates are screen pixels
/// with the origin top-left and y growing downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub width: f64,
    pub height: f64,
    pub target: Target,
    pub obstacles: Vec<Obstacle>,
}

impl Environment {
    pub fn new(width: f64, height: f64, target: Target, obstacles: Vec<Obstacle>) -> Self {
        Self {
            width,
            height,
            target,
            obstacles,
        }
    }

    /// Roll a new target and obstacle field inside the configured window
    pub fn random<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Self {
        let obstacles = (0..config.number_obstacles)
            .map(|_| Obstacle {
                position: Vector2::new(
                    rng.gen_range(0.0..config.window_width),
                    rng.gen_range(0.0..config.window_height),
                ),
                radius: rng.gen_range(config.obstacle_radius_range.clone()),
            })
            .collect();

        let target = Target {
            position: Vector2::new(
                rng.gen_range(config.target_x_range.clone()),
                rng.gen_range(config.target_y_range.clone()),
            ),
            radius: config.target_radius,
        };

        Self::new(config.window_width, config.window_height, target, obstacles)
    }

    pub fn distance_to_target(&self, point: Vector2) -> f64 {
        self.target.position.distance(point)
    }

    pub fn reached_target(&self, point: Vector2) -> bool {
        self.distance_to_target(point) < self.target.radius
    }

    pub fn hit_obstacle(&self, point: Vector2) -> bool {
        self.obstacles.iter().any(|obstacle| obstacle.contains(point))
    }

    /// True once `x` has drifted more than `margin` past the left or right edge
    pub fn out_of_bounds(&self, x: f64, margin: f64) -> bool {
        x < -margin || x > self.width + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn random_environment_respects_ranges() {
        let config = SimConfig::default();
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        for _ in 0..50 {
            let env = Environment::random(&config, &mut rng);
            assert_eq!(env.obstacles.len(), config.number_obstacles);
            assert!(config.target_x_range.contains(&env.target.position.x));
            assert!(config.target_y_range.contains(&env.target.position.y));
            assert_eq!(env.target.radius, config.target_radius);
            for obstacle in &env.obstacles {
                assert!(config.obstacle_radius_range.contains(&obstacle.radius));
                assert!((0.0..config.window_width).contains(&obstacle.position.x));
                assert!((0.0..config.window_height).contains(&obstacle.position.y));
            }
        }
    }

    #[test]
    fn collision_checks_are_strict() {
        let env = Environment::new(
            600.0,
            400.0,
            Target {
                position: Vector2::new(100.0, 100.0),
                radius: 10.0,
            },
            vec![Obstacle {
                position: Vector2::new(300.0, 200.0),
                radius: 20.0,
            }],
        );
        assert!(env.reached_target(Vector2::new(105.0, 100.0)));
        assert!(!env.reached_target(Vector2::new(110.0, 100.0)));
        assert!(env.hit_obstacle(Vector2::new(300.0, 219.0)));
        assert!(!env.hit_obstacle(Vector2::new(300.0, 220.0)));
        assert!(env.out_of_bounds(-3.5, 3.0));
        assert!(!env.out_of_bounds(-3.0, 3.0));
        assert!(env.out_of_bounds(603.5, 3.0));
        assert!(!env.out_of_bounds(603.0, 3.0));
    }
}
