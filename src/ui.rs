use crate::evolution::Evolution;
use crate::simulation::SimulationState;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Generations listed in the recent-history table
const RECENT_GENERATIONS: usize = 8;

pub fn ui_system(
    mut contexts: EguiContexts,
    mut evolution: ResMut<Evolution>,
    mut simulation_state: ResMut<SimulationState>,
) {
    egui::Window::new("Smart Bubbles")
        .default_pos(egui::pos2(10.0, 10.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal(|ui| {
                let button_text = if *simulation_state == SimulationState::Running {
                    "⏸ Pause"
                } else {
                    "▶ Resume"
                };
                if ui.button(button_text).clicked() {
                    simulation_state.toggle();
                }
                if ui.button("New environment").clicked() {
                    evolution.request_new_environment();
                }
            });

            ui.separator();

            let population = evolution.population();
            let size = population.agents.len().max(1);
            let alive = population.alive();
            ui.label(format!(
                "Generation: {} / {}",
                population.generation,
                evolution.config().generations
            ));
            ui.label(format!("Tick: {}", population.ticks()));
            ui.add(
                egui::ProgressBar::new(alive as f32 / size as f32)
                    .text(format!("{alive} / {size} flying")),
            );
            ui.label(format!("Best fitness so far: {:.2}", evolution.best_fitness()));

            let history = evolution.history();
            if let Some(last) = history.back() {
                ui.separator();
                ui.heading("Last generation");
                ui.label(format!("Died on obstacle or edge: {}", last.hit_obstacle));
                ui.label(format!("Made it to target: {}", last.hit_target));
                ui.label(format!("Ran out of time: {}", last.expired));
                ui.label(format!(
                    "Fitness best / mean: {:.2} / {:.2}",
                    last.best_fitness, last.mean_fitness
                ));
            }

            if history.len() > 1 {
                ui.separator();
                ui.heading("Recent");
                egui::Grid::new("recent_generations")
                    .striped(true)
                    .show(ui, |ui| {
                        ui.label("gen");
                        ui.label("target");
                        ui.label("crashed");
                        ui.label("best");
                        ui.end_row();
                        for stats in history.iter().rev().take(RECENT_GENERATIONS) {
                            ui.monospace(stats.generation.to_string());
                            ui.monospace(stats.hit_target.to_string());
                            ui.monospace(stats.hit_obstacle.to_string());
                            ui.monospace(format!("{:.2}", stats.best_fitness));
                            ui.end_row();
                        }
                    });
            }

            ui.separator();
            ui.label("Mouse wheel zooms, Home resets the view");
        });
}
