//! Animation system - cycles sprite frames on a fixed interval

use hecs::World;
use crate::components::SpriteAnimation;

pub fn animation_system(world: &mut World, delta_ms: f32) {
    for (_, anim) in world.query_mut::<&mut SpriteAnimation>() {
        anim.advance(delta_ms.max(0.0));
    }
}
