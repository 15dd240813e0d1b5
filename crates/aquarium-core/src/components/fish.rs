//! Fish components: Fish, Hunger, Growth, Facing, SpriteAnimation.

use serde::{Deserialize, Serialize};

/// Marks an entity as a fish and carries its unscaled body size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Fish {
    pub width: f32,
    pub height: f32,
}

impl Fish {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Drawn width and height for a given size factor
    pub fn scaled(&self, growth: &Growth) -> (f32, f32) {
        (self.width * growth.size, self.height * growth.size)
    }
}

/// Need for food - 0.0 (full) to `max` (starving)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Hunger {
    pub level: f32,
    pub max: f32,
}

impl Hunger {
    pub fn new(max: f32) -> Self {
        Self { level: 0.0, max }
    }

    /// Hunger rises with elapsed time, capped at `max`
    pub fn increase(&mut self, amount: f32) {
        self.level = (self.level + amount).clamp(0.0, self.max);
    }

    /// Eating lowers hunger, floored at zero
    pub fn relieve(&mut self, amount: f32) {
        self.level = (self.level - amount).clamp(0.0, self.max);
    }

    pub fn is_hungry(&self, threshold: f32) -> bool {
        self.level > threshold
    }

    /// Fullness fraction used by the hunger bar (1.0 = full)
    pub fn fullness(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (1.0 - self.level / self.max).clamp(0.0, 1.0)
    }
}

/// Growth multiplier applied to the sprite, only ever increases
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Growth {
    pub size: f32,
    pub max: f32,
}

impl Growth {
    pub fn new(max: f32) -> Self {
        Self { size: 1.0, max }
    }

    pub fn grow(&mut self, step: f32) {
        self.size = (self.size + step).min(self.max).max(self.size);
    }
}

/// Which way the sprite faces
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn flip(&mut self) {
        *self = match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        };
    }

    /// Facing implied by a horizontal velocity; zero counts as left
    pub fn from_velocity(vx: f32) -> Self {
        if vx > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        }
    }
}

/// Cycling sprite-sheet animation, independent of movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpriteAnimation {
    pub frame: u32,
    pub frame_count: u32,
    /// Milliseconds accumulated since the last frame change
    pub timer: f32,
    pub interval: f32,
}

impl SpriteAnimation {
    pub fn new(frame_count: u32, interval: f32) -> Self {
        Self {
            frame: 0,
            frame_count: frame_count.max(1),
            timer: 0.0,
            interval,
        }
    }

    pub fn advance(&mut self, delta_ms: f32) {
        self.timer += delta_ms;
        if self.timer > self.interval {
            self.frame = (self.frame + 1) % self.frame_count;
            self.timer = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hunger_bounds() {
        let mut hunger = Hunger::new(100.0);
        hunger.increase(250.0);
        assert_eq!(hunger.level, 100.0);
        hunger.relieve(30.0);
        assert_eq!(hunger.level, 70.0);
        hunger.relieve(500.0);
        assert_eq!(hunger.level, 0.0);
        assert_eq!(hunger.fullness(), 1.0);
    }

    #[test]
    fn test_growth_caps_at_max() {
        let mut growth = Growth::new(3.0);
        for _ in 0..50 {
            growth.grow(0.1);
        }
        assert_eq!(growth.size, 3.0);
    }

    #[test]
    fn test_facing_flip() {
        let mut facing = Facing::Right;
        facing.flip();
        assert_eq!(facing, Facing::Left);
        assert_eq!(Facing::from_velocity(0.0), Facing::Left);
        assert_eq!(Facing::from_velocity(2.0), Facing::Right);
    }

    #[test]
    fn test_animation_cycles() {
        let mut anim = SpriteAnimation::new(4, 200.0);
        // Exactly the interval does not advance
        anim.advance(200.0);
        assert_eq!(anim.frame, 0);
        anim.advance(1.0);
        assert_eq!(anim.frame, 1);
        assert_eq!(anim.timer, 0.0);

        for _ in 0..3 {
            anim.advance(201.0);
        }
        assert_eq!(anim.frame, 0);
    }
}
