//! Aquarium Viewer - Bevy front end for the fish tank simulation
//!
//! Loads the background and sprite sheet, then runs the tank frame loop and
//! presents each recorded frame. The toolbar buys fish and food, clicks on
//! the tank drop single pellets.

mod input;
mod loading;
mod rendering;
mod state;
mod ui;

use bevy::prelude::*;

use input::{canvas_click, shop_buttons, time_scale_keys};
use loading::{hide_status, poll_assets, start_loading};
use rendering::{present_frame, run_frame, setup_camera};
use state::{AppState, CircleMaterials, FrameList, TankConfig, UiState, ViewerConfig};
use ui::{button_colors, render_hud, render_toasts, setup_ui, show_failure};

fn main() {
    let viewer_config = ViewerConfig::from_args();
    let tank_config = match viewer_config.load_tank_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config {}", e);
            std::process::exit(1);
        }
    };
    let resolution = (tank_config.canvas.width, tank_config.canvas.height);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Aquarium".to_string(),
                resolution: resolution.into(),
                canvas: Some("#gameCanvas".to_string()),
                present_mode: bevy::window::PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(bevy::diagnostic::FrameTimeDiagnosticsPlugin::default())
        .add_plugins(bevy::diagnostic::LogDiagnosticsPlugin::default())
        .init_state::<AppState>()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.1, 0.2)))
        .insert_resource(viewer_config)
        .insert_resource(TankConfig(tank_config))
        .insert_resource(FrameList::default())
        .insert_resource(CircleMaterials::default())
        .insert_resource(UiState::default())
        .add_systems(Startup, (setup_camera, setup_ui, start_loading))
        .add_systems(Update, poll_assets.run_if(in_state(AppState::Loading)))
        .add_systems(OnEnter(AppState::Running), hide_status)
        .add_systems(OnEnter(AppState::Failed), show_failure)
        .add_systems(
            Update,
            (
                shop_buttons,
                canvas_click,
                time_scale_keys,
                run_frame,
                present_frame,
                render_hud,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        )
        .add_systems(Update, (button_colors, render_toasts))
        .run();
}
