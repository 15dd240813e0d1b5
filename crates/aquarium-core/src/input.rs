//! Player input - maps clicks and button presses onto tank operations.

use serde::{Deserialize, Serialize};

use crate::components::{Rect, Vec2};

/// Everything the player can do to the tank
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Click inside the canvas, in canvas-local coordinates
    CanvasClick { x: f32, y: f32 },
    /// "Feed" button
    Feed,
    /// "Buy fish" button
    BuyFish,
}

/// What an input event changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    FoodDropped { count: u32 },
    FishAdded,
}

/// Convert a screen-space point into canvas-local coordinates.
///
/// `displayed` is where the canvas sits on screen and how large it is drawn;
/// `canvas_width`/`canvas_height` is its logical size. Points outside the
/// canvas yield `None`.
pub fn screen_to_canvas(
    screen: Vec2,
    displayed: Rect,
    canvas_width: f32,
    canvas_height: f32,
) -> Option<Vec2> {
    if displayed.width <= 0.0 || displayed.height <= 0.0 || !displayed.contains(&screen) {
        return None;
    }

    let local = screen - Vec2::new(displayed.x, displayed.y);
    Some(Vec2::new(
        local.x * canvas_width / displayed.width,
        local.y * canvas_height / displayed.height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscaled_canvas_subtracts_origin() {
        let displayed = Rect::new(20.0, 40.0, 800.0, 600.0);
        let local = screen_to_canvas(Vec2::new(120.0, 140.0), displayed, 800.0, 600.0);
        assert_eq!(local, Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_scaled_canvas() {
        let displayed = Rect::new(0.0, 0.0, 1600.0, 1200.0);
        let local = screen_to_canvas(Vec2::new(800.0, 300.0), displayed, 800.0, 600.0);
        assert_eq!(local, Some(Vec2::new(400.0, 150.0)));
    }

    #[test]
    fn test_click_outside_canvas() {
        let displayed = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(
            screen_to_canvas(Vec2::new(900.0, 10.0), displayed, 800.0, 600.0),
            None
        );
    }
}
