use crate::evolution::Evolution;
use bevy::prelude::*;

/// Resource to control simulation state
#[derive(Resource, PartialEq, Eq, Clone, Copy, Debug)]
pub enum SimulationState {
    Running,
    Paused,
}

impl Default for SimulationState {
    fn default() -> Self {
        SimulationState::Running
    }
}

impl SimulationState {
    pub fn toggle(&mut self) {
        *self = match self {
            SimulationState::Running => SimulationState::Paused,
            SimulationState::Paused => SimulationState::Running,
        };
    }
}

/// How ticks are scheduled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pacing {
    /// One tick per `FixedUpdate`, at this many ticks per second
    Fixed(f64),
    /// One whole generation per `Update`, as fast as possible
    Unpaced,
}

/// Drives the `Evolution` resource, which must be inserted before the app runs.
pub struct SimulationPlugin {
    pub pacing: Pacing,
}

impl SimulationPlugin {
    pub fn paced(ticks_per_second: f64) -> Self {
        Self {
            pacing: Pacing::Fixed(ticks_per_second),
        }
    }

    pub fn headless() -> Self {
        Self {
            pacing: Pacing::Unpaced,
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationState>()
            .add_systems(Startup, log_start);

        match self.pacing {
            Pacing::Fixed(hz) => {
                app.insert_resource(Time::<Fixed>::from_hz(hz))
                    .add_systems(
                        FixedUpdate,
                        tick_simulation
                            .run_if(|state: Res<SimulationState>| *state == SimulationState::Running),
                    )
                    .add_systems(Update, exit_when_done);
            }
            Pacing::Unpaced => {
                app.add_systems(
                    Update,
                    (run_generation, exit_when_done)
                        .chain()
                        .run_if(|state: Res<SimulationState>| *state == SimulationState::Running),
                );
            }
        }
    }
}

fn log_start(evolution: Res<Evolution>) {
    let config = evolution.config();
    let env = evolution.environment();
    info!(
        population = config.population,
        generations = config.generations,
        seed = ?config.seed,
        target_x = env.target.position.x,
        target_y = env.target.position.y,
        obstacles = env.obstacles.len(),
        "Starting evolution"
    );
}

/// Advance every bubble by one tick
pub fn tick_simulation(mut evolution: ResMut<Evolution>, mut exit: EventWriter<AppExit>) {
    if evolution.is_done() {
        return;
    }
    if let Err(err) = evolution.tick() {
        error!("Simulation failed: {err}");
        exit.send(AppExit::error());
    }
}

/// Evaluate a whole generation in one go
pub fn run_generation(mut evolution: ResMut<Evolution>, mut exit: EventWriter<AppExit>) {
    if evolution.is_done() {
        return;
    }
    if let Err(err) = evolution.run_generation() {
        error!("Simulation failed: {err}");
        exit.send(AppExit::error());
    }
}

/// Close the app once the configured number of generations has run
pub fn exit_when_done(
    evolution: Res<Evolution>,
    mut exit: EventWriter<AppExit>,
    mut announced: Local<bool>,
) {
    if evolution.is_done() && !*announced {
        *announced = true;
        info!(
            generations = evolution.completed_generations(),
            best_fitness = evolution.best_fitness(),
            "Evolution finished"
        );
        exit.send(AppExit::Success);
    }
}
