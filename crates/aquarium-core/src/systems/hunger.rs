//! Hunger system - fish get hungrier as time passes

use hecs::World;
use crate::components::{Fish, Hunger};

/// Raise hunger for every fish by `rate` per elapsed millisecond
pub fn hunger_system(world: &mut World, delta_ms: f32, rate: f32) {
    let amount = delta_ms.max(0.0) * rate;
    for (_, (_, hunger)) in world.query_mut::<(&Fish, &mut Hunger)>() {
        hunger.increase(amount);
    }
}

/// Count fish above the seek threshold
pub fn hungry_fish_count(world: &World, threshold: f32) -> usize {
    world
        .query::<(&Fish, &Hunger)>()
        .iter()
        .filter(|(_, (_, hunger))| hunger.is_hungry(threshold))
        .count()
}
