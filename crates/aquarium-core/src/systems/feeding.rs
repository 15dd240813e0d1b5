//! Feeding system - hungry fish steer toward the nearest pellet and eat it

use hecs::{Entity, World};
use rand::Rng;
use crate::components::{
    Facing, Fish, Food, Growth, Hunger, Position, Rect, SpawnOrder, Vec2, Velocity,
};
use crate::config::FishConfig;
use super::movement::clamp_to_tank;
use super::wandering::resume_wandering;

/// Let every hungry fish, in spawn order, chase and possibly eat a pellet.
///
/// Pellets eaten by one fish are invisible to the fish after it in the same
/// tick. Eaten pellets are despawned once the scan completes. Returns how many
/// pellets were eaten.
pub fn food_seeking_system<R: Rng>(
    world: &mut World,
    fish_config: &FishConfig,
    tank: Rect,
    rng: &mut R,
) -> u32 {
    let mut pellets: Vec<(Entity, SpawnOrder, Vec2)> = world
        .query::<(&Food, &Position, &SpawnOrder)>()
        .iter()
        .map(|(entity, (_, pos, order))| (entity, *order, pos.0))
        .collect();

    if pellets.is_empty() {
        return 0;
    }
    pellets.sort_by_key(|(_, order, _)| *order);

    let mut hungry: Vec<(Entity, SpawnOrder)> = world
        .query::<(&Fish, &Hunger, &SpawnOrder)>()
        .iter()
        .filter(|(_, (_, hunger, _))| hunger.is_hungry(fish_config.seek_threshold))
        .map(|(entity, (_, _, order))| (entity, *order))
        .collect();
    hungry.sort_by_key(|(_, order)| *order);

    let mut eaten = vec![false; pellets.len()];

    for (entity, _) in hungry {
        let Ok((fish, pos, vel, facing, hunger, growth)) = world.query_one_mut::<(
            &Fish,
            &mut Position,
            &mut Velocity,
            &mut Facing,
            &mut Hunger,
            &mut Growth,
        )>(entity) else {
            continue;
        };

        let Some((index, distance)) = nearest_pellet(pos.0, &pellets, &eaten) else {
            // Everything left was eaten by fish earlier in the order
            break;
        };

        let diff = pellets[index].2 - pos.0;
        // atan2(0, 0) points along +x
        let heading = if diff == Vec2::ZERO {
            Vec2::new(1.0, 0.0)
        } else {
            diff.normalize()
        };
        vel.0 = heading * fish_config.seek_speed;
        *facing = Facing::from_velocity(vel.0.x);

        if distance < fish_config.eat_radius {
            eaten[index] = true;
            hunger.relieve(fish_config.hunger_relief);
            growth.grow(fish_config.growth_step);
            // Growing can push the sprite past the glass
            clamp_to_tank(fish, growth, pos, tank);

            if fish_config.idle_wander && !hunger.is_hungry(fish_config.seek_threshold) {
                resume_wandering(vel, facing, rng);
            }
        }
    }

    let mut count = 0;
    for (index, (pellet, _, _)) in pellets.iter().enumerate() {
        if eaten[index] && world.despawn(*pellet).is_ok() {
            count += 1;
        }
    }

    if count > 0 {
        log::debug!("{} pellet(s) eaten", count);
    }
    count
}

/// Euclidean-nearest uneaten pellet; the earliest spawned wins ties
fn nearest_pellet(
    from: Vec2,
    pellets: &[(Entity, SpawnOrder, Vec2)],
    eaten: &[bool],
) -> Option<(usize, f32)> {
    let mut nearest: Option<(usize, f32)> = None;

    for (index, (_, _, pellet_pos)) in pellets.iter().enumerate() {
        if eaten[index] {
            continue;
        }
        let distance = from.distance(pellet_pos);
        if nearest.map_or(true, |(_, best)| distance < best) {
            nearest = Some((index, distance));
        }
    }

    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tank() -> Rect {
        Rect::from_size(800.0, 600.0)
    }

    fn spawn_fish(world: &mut World, order: u64, pos: Vec2, hunger_level: f32) -> Entity {
        let mut hunger = Hunger::new(100.0);
        hunger.increase(hunger_level);
        world.spawn((
            Fish::new(64.0, 64.0),
            Position(pos),
            Velocity(Vec2::ZERO),
            Facing::Right,
            hunger,
            Growth::new(3.0),
            SpawnOrder(order),
        ))
    }

    fn spawn_pellet(world: &mut World, order: u64, pos: Vec2) -> Entity {
        world.spawn((Food::new(5.0, 1.0), Position(pos), SpawnOrder(order)))
    }

    #[test]
    fn test_hungry_fish_eats_close_pellet() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let fish = spawn_fish(&mut world, 0, Vec2::new(100.0, 100.0), 50.0);
        let pellet = spawn_pellet(&mut world, 1, Vec2::new(100.0, 105.0));

        let eaten = food_seeking_system(&mut world, &FishConfig::default(), tank(), &mut rng);

        assert_eq!(eaten, 1);
        assert!(!world.contains(pellet));
        assert_eq!(world.get::<&Hunger>(fish).unwrap().level, 20.0);
        assert!((world.get::<&Growth>(fish).unwrap().size - 1.1).abs() < 1e-6);
        // Heading straight down at seek speed
        assert_eq!(world.get::<&Velocity>(fish).unwrap().0, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_fish_at_threshold_ignores_food() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let fish = spawn_fish(&mut world, 0, Vec2::new(100.0, 100.0), 30.0);
        let pellet = spawn_pellet(&mut world, 1, Vec2::new(100.0, 105.0));

        let eaten = food_seeking_system(&mut world, &FishConfig::default(), tank(), &mut rng);

        assert_eq!(eaten, 0);
        assert!(world.contains(pellet));
        assert_eq!(world.get::<&Velocity>(fish).unwrap().0, Vec2::ZERO);
    }

    #[test]
    fn test_far_pellet_steers_without_eating() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let fish = spawn_fish(&mut world, 0, Vec2::new(100.0, 100.0), 80.0);
        spawn_pellet(&mut world, 1, Vec2::new(400.0, 100.0));
        spawn_pellet(&mut world, 2, Vec2::new(0.0, 100.0));

        let eaten = food_seeking_system(&mut world, &FishConfig::default(), tank(), &mut rng);

        assert_eq!(eaten, 0);
        // The pellet at x = 0 is nearer
        assert_eq!(world.get::<&Velocity>(fish).unwrap().0, Vec2::new(-2.0, 0.0));
        assert_eq!(*world.get::<&Facing>(fish).unwrap(), Facing::Left);
    }

    #[test]
    fn test_pellet_at_eat_radius_is_kept() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let fish = spawn_fish(&mut world, 0, Vec2::new(100.0, 100.0), 50.0);
        let pellet = spawn_pellet(&mut world, 1, Vec2::new(100.0, 130.0));

        let eaten = food_seeking_system(&mut world, &FishConfig::default(), tank(), &mut rng);

        assert_eq!(eaten, 0);
        assert!(world.contains(pellet));
        assert_eq!(world.get::<&Hunger>(fish).unwrap().level, 50.0);
        assert_eq!(world.get::<&Velocity>(fish).unwrap().0, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_pellet_just_inside_eat_radius_is_eaten() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let fish = spawn_fish(&mut world, 0, Vec2::new(100.0, 100.0), 50.0);
        let pellet = spawn_pellet(&mut world, 1, Vec2::new(100.0, 129.9));

        let eaten = food_seeking_system(&mut world, &FishConfig::default(), tank(), &mut rng);

        assert_eq!(eaten, 1);
        assert!(!world.contains(pellet));
        assert_eq!(world.get::<&Hunger>(fish).unwrap().level, 20.0);
    }

    #[test]
    fn test_pellet_eaten_once_per_tick() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let first = spawn_fish(&mut world, 0, Vec2::new(100.0, 100.0), 60.0);
        let second = spawn_fish(&mut world, 1, Vec2::new(102.0, 100.0), 60.0);
        spawn_pellet(&mut world, 2, Vec2::new(101.0, 110.0));

        let eaten = food_seeking_system(&mut world, &FishConfig::default(), tank(), &mut rng);

        assert_eq!(eaten, 1);
        assert_eq!(world.get::<&Hunger>(first).unwrap().level, 30.0);
        assert_eq!(world.get::<&Hunger>(second).unwrap().level, 60.0);
    }

    #[test]
    fn test_idle_wander_after_meal() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(9);
        let config = FishConfig {
            idle_wander: true,
            ..FishConfig::default()
        };
        let fish = spawn_fish(&mut world, 0, Vec2::new(100.0, 100.0), 40.0);
        spawn_pellet(&mut world, 1, Vec2::new(100.0, 110.0));

        food_seeking_system(&mut world, &config, tank(), &mut rng);

        // Hunger 10 is below the threshold, so the seek heading was replaced
        let vel = world.get::<&Velocity>(fish).unwrap().0;
        assert!(vel.x.abs() < 1.0 && vel.y.abs() < 1.0);
    }

    #[test]
    fn test_growth_reclamps_position() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        // Right against the wall at size 1
        let fish = spawn_fish(&mut world, 0, Vec2::new(736.0, 100.0), 90.0);
        spawn_pellet(&mut world, 1, Vec2::new(740.0, 100.0));

        food_seeking_system(&mut world, &FishConfig::default(), tank(), &mut rng);

        let pos = world.get::<&Position>(fish).unwrap().0;
        let size = world.get::<&Growth>(fish).unwrap().size;
        assert!(pos.x + 64.0 * size <= 800.0 + 1e-3);
    }
}
