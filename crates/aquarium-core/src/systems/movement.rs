//! Movement system - drifts fish by their velocity and bounces them off the glass

use hecs::World;
use crate::components::{Facing, Fish, Growth, Position, Rect, Velocity};

/// Advance every fish by one tick of velocity, reflecting off the tank walls
pub fn fish_movement_system(world: &mut World, tank: Rect) {
    for (_, (fish, growth, pos, vel, facing)) in world.query_mut::<(
        &Fish,
        &Growth,
        &mut Position,
        &mut Velocity,
        &mut Facing,
    )>() {
        step_fish(fish, growth, pos, vel, facing, tank);
    }
}

/// Move a single fish, bounce, then clamp it back inside the tank
fn step_fish(
    fish: &Fish,
    growth: &Growth,
    pos: &mut Position,
    vel: &mut Velocity,
    facing: &mut Facing,
    tank: Rect,
) {
    let (width, height) = fish.scaled(growth);
    pos.0 = pos.0 + vel.0;

    if pos.0.x < tank.x || pos.0.x + width > tank.x + tank.width {
        vel.0.x = -vel.0.x;
        facing.flip();
    }
    if pos.0.y < tank.y || pos.0.y + height > tank.y + tank.height {
        vel.0.y = -vel.0.y;
    }

    clamp_to_tank(fish, growth, pos, tank);
}

/// Keep the scaled sprite fully inside the tank
pub fn clamp_to_tank(fish: &Fish, growth: &Growth, pos: &mut Position, tank: Rect) {
    let (width, height) = fish.scaled(growth);
    let max_x = tank.x + tank.width - width;
    let max_y = tank.y + tank.height - height;

    pos.0.x = pos.0.x.min(max_x).max(tank.x);
    pos.0.y = pos.0.y.min(max_y).max(tank.y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Vec2;

    fn spawn_fish(world: &mut World, pos: Vec2, vel: Vec2) -> hecs::Entity {
        world.spawn((
            Fish::new(64.0, 64.0),
            Growth::new(3.0),
            Position(pos),
            Velocity(vel),
            Facing::Right,
        ))
    }

    #[test]
    fn test_fish_drifts() {
        let mut world = World::new();
        let entity = spawn_fish(&mut world, Vec2::new(100.0, 100.0), Vec2::new(0.5, -0.5));

        fish_movement_system(&mut world, Rect::from_size(800.0, 600.0));

        let pos = world.get::<&Position>(entity).unwrap();
        assert_eq!(pos.0, Vec2::new(100.5, 99.5));
    }

    #[test]
    fn test_bounce_off_right_wall() {
        let mut world = World::new();
        // 736 + 64 = 800, one more step crosses the wall
        let entity = spawn_fish(&mut world, Vec2::new(736.0, 100.0), Vec2::new(1.0, 0.0));

        fish_movement_system(&mut world, Rect::from_size(800.0, 600.0));

        let pos = world.get::<&Position>(entity).unwrap();
        let vel = world.get::<&Velocity>(entity).unwrap();
        let facing = world.get::<&Facing>(entity).unwrap();
        assert_eq!(pos.0.x, 736.0);
        assert_eq!(vel.0.x, -1.0);
        assert_eq!(*facing, Facing::Left);
    }

    #[test]
    fn test_vertical_bounce_keeps_facing() {
        let mut world = World::new();
        let entity = spawn_fish(&mut world, Vec2::new(100.0, 0.5), Vec2::new(0.0, -1.0));

        fish_movement_system(&mut world, Rect::from_size(800.0, 600.0));

        let pos = world.get::<&Position>(entity).unwrap();
        let vel = world.get::<&Velocity>(entity).unwrap();
        assert_eq!(pos.0.y, 0.0);
        assert_eq!(vel.0.y, 1.0);
        assert_eq!(*world.get::<&Facing>(entity).unwrap(), Facing::Right);
    }

    #[test]
    fn test_clamp_uses_scaled_size() {
        let fish = Fish::new(64.0, 64.0);
        let mut growth = Growth::new(3.0);
        growth.grow(1.0);
        let mut pos = Position(Vec2::new(790.0, 590.0));

        clamp_to_tank(&fish, &growth, &mut pos, Rect::from_size(800.0, 600.0));

        assert_eq!(pos.0, Vec2::new(672.0, 472.0));
    }
}
