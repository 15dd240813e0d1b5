//! Rendering for the aquarium viewer.
//!
//! The engine paints each frame into a `DrawList`; this module rebuilds the
//! frame's sprites and meshes from that list. Canvas space has its origin at
//! the top-left with y down, Bevy's world has it at the center with y up.

use aquarium_core::components::{Rect as CanvasRect, Rgba, Vec2 as CanvasVec2};
use aquarium_core::render::DrawCommand;
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use crate::state::{
    CircleMaterials, CircleMesh, FrameEntity, FrameList, TankAssets, TankConfig, TankWrapper,
};

/// Depth step between consecutive draw calls
const Z_STEP: f32 = 0.001;

pub fn setup_camera(
    mut commands: Commands,
    config: Res<TankConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: config.0.canvas.width,
                min_height: config.0.canvas.height,
            },
            ..OrthographicProjection::default_2d()
        },
    ));

    commands.insert_resource(CircleMesh(meshes.add(Circle::new(1.0))));
}

/// Advance the tank using the frame clock and record its draw calls
pub fn run_frame(time: Res<Time>, mut tank: ResMut<TankWrapper>, mut frame: ResMut<FrameList>) {
    let timestamp_ms = time.elapsed_secs_f64() * 1000.0;
    tank.0.frame(timestamp_ms, &mut frame.0);
}

/// Replace last frame's entities with the ones in the current draw list
#[allow(clippy::too_many_arguments)]
pub fn present_frame(
    mut commands: Commands,
    frame: Res<FrameList>,
    config: Res<TankConfig>,
    tank_assets: Res<TankAssets>,
    circle: Res<CircleMesh>,
    mut circle_materials: ResMut<CircleMaterials>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    old: Query<Entity, With<FrameEntity>>,
) {
    for entity in &old {
        commands.entity(entity).despawn();
    }

    let canvas = (config.0.canvas.width, config.0.canvas.height);

    for (index, command) in frame.0.iter().enumerate() {
        let z = index as f32 * Z_STEP;
        match command {
            // The window clear color covers this
            DrawCommand::Clear { .. } => {}
            DrawCommand::Background { dest } => {
                commands.spawn((
                    Sprite {
                        image: tank_assets.background.clone(),
                        custom_size: Some(Vec2::new(dest.width, dest.height)),
                        ..default()
                    },
                    rect_transform(dest, canvas, z),
                    FrameEntity,
                ));
            }
            DrawCommand::SpriteCell {
                cell,
                dest,
                mirrored,
            } => {
                let Some(layout) = &tank_assets.layout else {
                    continue;
                };
                commands.spawn((
                    Sprite {
                        image: tank_assets.sprite_sheet.clone(),
                        texture_atlas: Some(TextureAtlas {
                            layout: layout.clone(),
                            index: cell.index as usize,
                        }),
                        custom_size: Some(Vec2::new(dest.width, dest.height)),
                        flip_x: *mirrored,
                        ..default()
                    },
                    rect_transform(dest, canvas, z),
                    FrameEntity,
                ));
            }
            DrawCommand::FillRect { rect, color } => {
                if rect.width <= 0.0 || rect.height <= 0.0 {
                    continue;
                }
                commands.spawn((
                    Sprite::from_color(to_color(*color), Vec2::new(rect.width, rect.height)),
                    rect_transform(rect, canvas, z),
                    FrameEntity,
                ));
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                let world = canvas_to_world(*center, canvas);
                commands.spawn((
                    Mesh2d(circle.0.clone()),
                    MeshMaterial2d(circle_materials.get_or_add(*color, &mut materials)),
                    Transform::from_xyz(world.x, world.y, z).with_scale(Vec3::splat(*radius)),
                    FrameEntity,
                ));
            }
        }
    }
}

pub fn canvas_to_world(point: CanvasVec2, (width, height): (f32, f32)) -> Vec2 {
    Vec2::new(point.x - width / 2.0, height / 2.0 - point.y)
}

/// Transform placing a sprite over a canvas rectangle
fn rect_transform(rect: &CanvasRect, canvas: (f32, f32), z: f32) -> Transform {
    let center = canvas_to_world(rect.center(), canvas);
    Transform::from_xyz(center.x, center.y, z)
}

fn to_color(color: Rgba) -> Color {
    Color::srgba(color.r, color.g, color.b, color.a)
}
