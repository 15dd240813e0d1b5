//! State management for the aquarium viewer.
//!
//! Contains the app state machine, resource types and Bevy components used
//! throughout the viewer.

use aquarium_core::assets::AssetGate;
use aquarium_core::components::Rgba;
use aquarium_core::config::AquariumConfig;
use aquarium_core::engine::AquariumEngine;
use aquarium_core::render::DrawList;
use bevy::prelude::*;

// ============================================================================
// APP STATE
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the background and sprite sheet
    #[default]
    Loading,
    /// Tank open, frame loop running
    Running,
    /// An asset failed or loading timed out
    Failed,
}

// ============================================================================
// RESOURCES
// ============================================================================

/// Command-line options
#[derive(Resource, Debug, Clone, Default)]
pub struct ViewerConfig {
    pub config_path: Option<String>,
    pub seed: Option<u64>,
}

impl ViewerConfig {
    pub fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self::default();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" if i + 1 < args.len() => {
                    config.config_path = Some(args[i + 1].clone());
                    i += 2;
                }
                "--seed" | "-s" if i + 1 < args.len() => {
                    match args[i + 1].parse() {
                        Ok(seed) => config.seed = Some(seed),
                        Err(_) => eprintln!("Ignoring invalid seed: {}", args[i + 1]),
                    }
                    i += 2;
                }
                _ => i += 1,
            }
        }
        config
    }

    /// Tank configuration from `--config`, or the built-in defaults
    pub fn load_tank_config(&self) -> Result<AquariumConfig, String> {
        match &self.config_path {
            Some(path) => {
                AquariumConfig::load(path).map_err(|e| format!("{}: {}", path, e))
            }
            None => Ok(AquariumConfig::default()),
        }
    }
}

#[derive(Resource)]
pub struct TankConfig(pub AquariumConfig);

/// The running simulation, inserted once assets are ready
#[derive(Resource)]
pub struct TankWrapper(pub AquariumEngine);

/// Draw calls recorded by the last frame
#[derive(Resource, Default)]
pub struct FrameList(pub DrawList);

#[derive(Resource)]
pub struct TankAssets {
    pub background: Handle<Image>,
    pub sprite_sheet: Handle<Image>,
    pub layout: Option<Handle<TextureAtlasLayout>>,
    pub gate: AssetGate,
}

/// Shared handles for filled circles
#[derive(Resource)]
pub struct CircleMesh(pub Handle<Mesh>);

/// One material per circle color, reused across frames
#[derive(Resource, Default)]
pub struct CircleMaterials(pub Vec<(Rgba, Handle<ColorMaterial>)>);

impl CircleMaterials {
    pub fn get_or_add(
        &mut self,
        color: Rgba,
        materials: &mut Assets<ColorMaterial>,
    ) -> Handle<ColorMaterial> {
        if let Some((_, handle)) = self.0.iter().find(|(c, _)| *c == color) {
            return handle.clone();
        }
        let handle = materials.add(Color::srgba(color.r, color.g, color.b, color.a));
        self.0.push((color, handle.clone()));
        handle
    }
}

#[derive(Resource, Default)]
pub struct UiState {
    pub toasts: Vec<Toast>,
}

impl UiState {
    pub fn toast(&mut self, message: impl Into<String>, color: Color, timer: f32) {
        self.toasts.push(Toast {
            message: message.into(),
            color,
            timer,
        });
    }
}

pub struct Toast {
    pub message: String,
    pub color: Color,
    pub timer: f32,
}

// ============================================================================
// BEVY COMPONENTS
// ============================================================================

/// Everything spawned from the current frame's draw list
#[derive(Component)]
pub struct FrameEntity;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopButton {
    Feed,
    BuyFish,
}

#[derive(Component)]
pub struct FishCountText;

#[derive(Component)]
pub struct MoneyText;

#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct ToastContainer;
