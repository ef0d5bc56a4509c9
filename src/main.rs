use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use smart_bubbles::config::SimConfig;
use smart_bubbles::evolution::Evolution;
use smart_bubbles::{headless_app, windowed_app};

#[derive(Parser, Debug)]
#[command(name = "smart-bubbles")]
#[command(about = "Evolve bubbles that fly to a target while dodging obstacles")]
struct Cli {
    /// Run without a window, as fast as possible
    #[arg(long)]
    headless: bool,

    /// Bubbles per generation
    #[arg(short, long)]
    population: Option<usize>,

    /// Generations to run before exiting
    #[arg(short, long)]
    generations: Option<u32>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Per-gene mutation probability (0.0 - 1.0)
    #[arg(long)]
    mutation_rate: Option<f64>,
}

impl Cli {
    fn config(&self) -> SimConfig {
        let defaults = SimConfig::default();
        SimConfig {
            population: self.population.unwrap_or(defaults.population),
            generations: self.generations.unwrap_or(defaults.generations),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            seed: self.seed,
            ..defaults
        }
    }
}

fn main() -> AppExit {
    let cli = Cli::parse();

    let evolution = match Evolution::new(cli.config()) {
        Ok(evolution) => evolution,
        Err(err) => {
            eprintln!("smart-bubbles: {err}");
            return AppExit::error();
        }
    };

    if cli.headless {
        let mut app = headless_app(evolution);
        app.add_plugins(LogPlugin::default());
        app.run()
    } else {
        windowed_app(evolution).run()
    }
}
