//! UI for the aquarium viewer.
//!
//! Handles the shop toolbar, the fish count and money labels, the loading
//! status line and toast notifications.

use bevy::prelude::*;

use crate::state::{
    FishCountText, MoneyText, ShopButton, StatusText, TankConfig, TankWrapper, ToastContainer,
    UiState,
};

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.35, 0.55);
const BUTTON_HOVER: Color = Color::srgb(0.2, 0.45, 0.7);
const BUTTON_PRESSED: Color = Color::srgb(0.1, 0.25, 0.4);

pub fn setup_ui(mut commands: Commands, config: Res<TankConfig>) {
    let economy = &config.0.economy;

    // Loading status (center), removed once the tank opens
    commands.spawn((
        Text::new("Loading..."),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(40.0),
            top: Val::Percent(45.0),
            ..default()
        },
        StatusText,
    ));

    // Toolbar (top-left)
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            column_gap: Val::Px(12.0),
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|bar| {
            spawn_button(bar, &format!("Feed (${})", economy.feed_price), ShopButton::Feed);
            spawn_button(
                bar,
                &format!("Buy fish (${})", economy.fish_price),
                ShopButton::BuyFish,
            );

            bar.spawn((
                Text::new("Fish: 0"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                FishCountText,
            ));
            bar.spawn((
                Text::new("Money: $0"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.3)),
                MoneyText,
            ));
        });

    // Toast container (top-center)
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.9, 0.3)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(30.0),
            right: Val::Percent(30.0),
            top: Val::Px(60.0),
            ..default()
        },
        ToastContainer,
    ));
}

fn spawn_button(parent: &mut ChildBuilder, label: &str, kind: ShopButton) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            kind,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn button_colors(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut background) in &mut buttons {
        background.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVER,
            Interaction::None => BUTTON_IDLE,
        };
    }
}

/// Refresh the labels whenever the tank reports a change
pub fn render_hud(
    mut tank: ResMut<TankWrapper>,
    mut fish_q: Query<&mut Text, (With<FishCountText>, Without<MoneyText>)>,
    mut money_q: Query<&mut Text, (With<MoneyText>, Without<FishCountText>)>,
) {
    let Some(hud) = tank.0.take_hud_update() else {
        return;
    };

    for mut text in &mut fish_q {
        **text = format!("Fish: {}", hud.fish_count);
    }
    for mut text in &mut money_q {
        **text = format!("Money: ${}", hud.money);
    }
}

pub fn render_toasts(
    time: Res<Time>,
    mut ui: ResMut<UiState>,
    mut toast_q: Query<(&mut Text, &mut TextColor), With<ToastContainer>>,
) {
    let dt = time.delta_secs();
    ui.toasts.retain_mut(|t| {
        t.timer -= dt;
        t.timer > 0.0
    });

    let Ok((mut text, mut color)) = toast_q.get_single_mut() else {
        return;
    };
    if ui.toasts.is_empty() {
        **text = "".into();
    } else {
        let toast_text: Vec<String> = ui.toasts.iter().map(|t| t.message.clone()).collect();
        **text = toast_text.join("\n");
        if let Some(latest) = ui.toasts.last() {
            color.0 = latest.color;
        }
    }
}

pub fn show_failure(mut status_q: Query<&mut TextColor, With<StatusText>>) {
    for mut color in &mut status_q {
        color.0 = Color::srgb(1.0, 0.3, 0.3);
    }
}
