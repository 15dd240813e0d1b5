//! Asset loading for the aquarium viewer.
//!
//! Feeds Bevy's load states into the core asset gate and opens the tank once
//! both images are in.

use aquarium_core::assets::{AssetGate, Readiness};
use aquarium_core::engine::AquariumEngine;
use aquarium_core::render::SpriteSheet;
use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::state::{
    AppState, StatusText, TankAssets, TankConfig, TankWrapper, UiState, ViewerConfig,
};

pub fn start_loading(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<TankConfig>,
) {
    let assets = &config.0.assets;
    let gate = AssetGate::new([assets.background.clone(), assets.sprite_sheet.clone()])
        .with_timeout(assets.load_timeout_ms);

    commands.insert_resource(TankAssets {
        background: asset_server.load(assets.background.clone()),
        sprite_sheet: asset_server.load(assets.sprite_sheet.clone()),
        layout: None,
        gate,
    });

    info!("Loading {} and {}", assets.background, assets.sprite_sheet);
}

#[allow(clippy::too_many_arguments)]
pub fn poll_assets(
    mut commands: Commands,
    time: Res<Time>,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut tank_assets: ResMut<TankAssets>,
    config: Res<TankConfig>,
    viewer: Res<ViewerConfig>,
    mut ui: ResMut<UiState>,
    mut next_state: ResMut<NextState<AppState>>,
    mut status_q: Query<&mut Text, With<StatusText>>,
) {
    let names = [
        (config.0.assets.background.clone(), tank_assets.background.id()),
        (config.0.assets.sprite_sheet.clone(), tank_assets.sprite_sheet.id()),
    ];
    for (name, id) in names {
        match asset_server.get_load_state(id) {
            Some(LoadState::Loaded) => tank_assets.gate.mark_loaded(&name),
            Some(LoadState::Failed(err)) => tank_assets.gate.mark_failed(&name, err.to_string()),
            _ => {}
        }
    }
    tank_assets.gate.tick(time.delta_secs_f64() * 1000.0);

    match tank_assets.gate.readiness() {
        Readiness::Waiting { loaded, total } => {
            for mut text in &mut status_q {
                **text = format!("Loading... {}/{}", loaded, total);
            }
        }
        Readiness::Failed(err) => {
            error!("{}", err);
            ui.toast(err.to_string(), Color::srgb(1.0, 0.3, 0.3), f32::INFINITY);
            for mut text in &mut status_q {
                **text = "Could not open the aquarium".to_string();
            }
            next_state.set(AppState::Failed);
        }
        Readiness::Ready => {
            let Some(image) = images.get(&tank_assets.sprite_sheet) else {
                return;
            };
            let size = image.size();
            let columns = config.0.assets.sprite_columns;
            let sheet = SpriteSheet::from_image_size(size.x, size.y, columns);

            let layout = TextureAtlasLayout::from_grid(
                UVec2::new(size.x / columns.max(1), size.y),
                columns,
                1,
                None,
                None,
            );
            tank_assets.layout = Some(layouts.add(layout));

            let mut engine = AquariumEngine::new(config.0.clone()).with_sprite_sheet(sheet);
            if let Some(seed) = viewer.seed {
                engine = engine.with_seed(seed);
            }
            engine.populate();
            commands.insert_resource(TankWrapper(engine));

            info!("Assets ready, sprite sheet {}x{} in {} cells", size.x, size.y, columns);
            next_state.set(AppState::Running);
        }
    }
}

pub fn hide_status(mut commands: Commands, status_q: Query<Entity, With<StatusText>>) {
    for entity in &status_q {
        commands.entity(entity).despawn_recursive();
    }
}
