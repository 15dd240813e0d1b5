//! Food system - pellets sink and disappear past the bottom of the tank

use hecs::{Entity, World};
use crate::components::{Food, Position};

/// Sink every pellet by its fall speed, then despawn the ones below `floor`.
/// Returns how many were lost.
pub fn food_fall_system(world: &mut World, floor: f32) -> u32 {
    let mut lost: Vec<Entity> = Vec::new();

    for (entity, (food, pos)) in world.query_mut::<(&Food, &mut Position)>() {
        pos.0.y += food.fall_speed;
        if pos.0.y > floor {
            lost.push(entity);
        }
    }

    let mut count = 0;
    for entity in lost {
        if world.despawn(entity).is_ok() {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Vec2;

    #[test]
    fn test_pellet_sinks() {
        let mut world = World::new();
        let pellet = world.spawn((Food::new(5.0, 1.0), Position(Vec2::new(50.0, 0.0))));

        food_fall_system(&mut world, 600.0);

        assert_eq!(world.get::<&Position>(pellet).unwrap().0.y, 1.0);
    }

    #[test]
    fn test_pellet_removed_past_floor() {
        let mut world = World::new();
        // Lands exactly on the floor: kept
        let on_floor = world.spawn((Food::new(5.0, 1.0), Position(Vec2::new(50.0, 599.0))));
        let below = world.spawn((Food::new(5.0, 1.0), Position(Vec2::new(60.0, 600.0))));

        let lost = food_fall_system(&mut world, 600.0);

        assert_eq!(lost, 1);
        assert!(world.contains(on_floor));
        assert!(!world.contains(below));
    }
}
