//! Bubbles that learn to fly to a target, evolved with a small genetic algorithm.
//!
//! The simulation core (`vector`, `genome`, `bubble`, `environment`,
//! `breeding`, `population`, `evolution`) has no rendering dependencies
//! beyond logging; `simulation`, `render`, `camera` and `ui` wire it into bevy.

pub mod breeding;
pub mod bubble;
pub mod camera;
pub mod config;
pub mod environment;
pub mod error;
pub mod evolution;
pub mod genome;
pub mod noise;
pub mod population;
pub mod render;
pub mod simulation;
pub mod ui;
pub mod vector;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use camera::{CameraState, camera_reset, camera_zoom, setup_camera};
use evolution::Evolution;
use render::BubbleRenderPlugin;
use simulation::SimulationPlugin;
use ui::ui_system;

/// Windowed app: one tick per fixed step at the configured frame rate
pub fn windowed_app(evolution: Evolution) -> App {
    let config = evolution.config().clone();
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Smart Bubbles".to_string(),
            resolution: (config.window_width as f32, config.window_height as f32).into(),
            resizable: false,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(EguiPlugin)
    .add_plugins(SimulationPlugin::paced(config.frame_rate))
    .add_plugins(BubbleRenderPlugin)
    .insert_resource(ClearColor(Color::srgb(0.08, 0.08, 0.12)))
    .init_resource::<CameraState>()
    .insert_resource(evolution)
    .add_systems(Startup, setup_camera)
    .add_systems(Update, (camera_zoom, camera_reset, ui_system));
    app
}

/// Headless app: no window, one whole generation per update. Callers add
/// `LogPlugin` themselves when they want log output.
pub fn headless_app(evolution: Evolution) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin::headless())
        .insert_resource(evolution);
    app
}
