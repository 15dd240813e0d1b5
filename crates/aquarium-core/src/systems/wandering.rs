//! Wandering - random drift headings for new and sated fish

use rand::Rng;
use crate::components::{Facing, Vec2, Velocity};

/// Random drift velocity, each component in [-1, 1)
pub fn random_drift<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::new(
        (rng.gen::<f32>() - 0.5) * 2.0,
        (rng.gen::<f32>() - 0.5) * 2.0,
    )
}

/// Replace a seek heading with a fresh drift once the fish is no longer hungry
pub fn resume_wandering<R: Rng>(vel: &mut Velocity, facing: &mut Facing, rng: &mut R) {
    vel.0 = random_drift(rng);
    *facing = Facing::from_velocity(vel.0.x);
}
