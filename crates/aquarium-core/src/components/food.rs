//! Food pellets dropped into the tank.

use serde::{Deserialize, Serialize};

/// Marks an entity as a falling food pellet
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Food {
    pub radius: f32,
    /// Canvas units per tick
    pub fall_speed: f32,
}

impl Food {
    pub fn new(radius: f32, fall_speed: f32) -> Self {
        Self { radius, fall_speed }
    }
}
