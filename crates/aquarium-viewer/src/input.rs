//! Player input handling for the aquarium viewer.
//!
//! Handles canvas clicks, the shop buttons and the time scale keys.

use aquarium_core::components::{Rect as CanvasRect, Vec2 as CanvasVec2};
use aquarium_core::input::{screen_to_canvas, InputEvent, InputOutcome};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::rendering::canvas_to_world;
use crate::state::{ShopButton, TankConfig, TankWrapper, UiState};

/// Drop a pellet where the player clicks inside the tank
pub fn canvas_click(
    mouse: Res<ButtonInput<MouseButton>>,
    window_q: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    buttons: Query<&Interaction, With<Button>>,
    config: Res<TankConfig>,
    mut tank: ResMut<TankWrapper>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    // Clicks on the toolbar belong to the buttons
    if buttons.iter().any(|i| *i != Interaction::None) {
        return;
    }

    let Ok(window) = window_q.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_q.get_single() else {
        return;
    };

    // Where the canvas currently sits in the window
    let (width, height) = (config.0.canvas.width, config.0.canvas.height);
    let top_left = canvas_to_world(CanvasVec2::new(0.0, 0.0), (width, height));
    let bottom_right = canvas_to_world(CanvasVec2::new(width, height), (width, height));
    let (Ok(min), Ok(max)) = (
        camera.world_to_viewport(camera_transform, top_left.extend(0.0)),
        camera.world_to_viewport(camera_transform, bottom_right.extend(0.0)),
    ) else {
        return;
    };
    let displayed = CanvasRect::new(min.x, min.y, max.x - min.x, max.y - min.y);

    let Some(point) = screen_to_canvas(
        CanvasVec2::new(cursor.x, cursor.y),
        displayed,
        width,
        height,
    ) else {
        return;
    };

    if let Ok(InputOutcome::FoodDropped { .. }) =
        tank.0.handle_input(InputEvent::CanvasClick { x: point.x, y: point.y })
    {
        debug!("Pellet dropped at ({:.0}, {:.0})", point.x, point.y);
    }
}

/// Feed and Buy fish buttons
pub fn shop_buttons(
    buttons: Query<(&Interaction, &ShopButton), Changed<Interaction>>,
    mut tank: ResMut<TankWrapper>,
    mut ui: ResMut<UiState>,
) {
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }

        let event = match button {
            ShopButton::Feed => InputEvent::Feed,
            ShopButton::BuyFish => InputEvent::BuyFish,
        };
        match tank.0.handle_input(event) {
            Ok(InputOutcome::FishAdded) => {
                ui.toast("New fish added!", Color::srgb(0.5, 1.0, 0.5), 2.0);
            }
            Ok(InputOutcome::FoodDropped { count }) => {
                ui.toast(
                    format!("Dropped {} pellets", count),
                    Color::srgb(0.9, 0.8, 0.5),
                    2.0,
                );
            }
            Err(e) => {
                ui.toast(e.to_string(), Color::srgb(1.0, 0.3, 0.3), 3.0);
            }
        }
    }
}

/// Time scale controls: +/= to speed up, - to slow down, 0 to pause/resume
pub fn time_scale_keys(keyboard: Res<ButtonInput<KeyCode>>, mut tank: ResMut<TankWrapper>) {
    if keyboard.just_pressed(KeyCode::Equal) || keyboard.just_pressed(KeyCode::NumpadAdd) {
        let current = tank.0.time_scale();
        tank.0.set_time_scale((current * 2.0).min(8.0));
    }
    if keyboard.just_pressed(KeyCode::Minus) || keyboard.just_pressed(KeyCode::NumpadSubtract) {
        let current = tank.0.time_scale();
        tank.0.set_time_scale((current / 2.0).max(0.25));
    }
    if keyboard.just_pressed(KeyCode::Digit0) || keyboard.just_pressed(KeyCode::Numpad0) {
        let current = tank.0.time_scale();
        if current > 0.0 {
            tank.0.set_time_scale(0.0);
        } else {
            tank.0.set_time_scale(1.0);
        }
    }
}
