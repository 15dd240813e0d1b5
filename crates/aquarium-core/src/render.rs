//! Drawing - an engine-agnostic surface plus the views that paint onto it.
//!
//! The simulation never talks to a graphics API. Each frame it paints onto a
//! [`Surface`]; the viewer records those calls in a [`DrawList`] and presents
//! them with whatever renderer it owns.

use serde::{Deserialize, Serialize};

use crate::components::{Facing, Fish, Food, Growth, Hunger, Rect, Rgba, SpriteAnimation, Vec2};

/// One cell of the sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteCell {
    pub index: u32,
    /// Source rectangle in sheet pixels
    pub source: Rect,
}

/// A single-row sprite sheet split into equal cells
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSheet {
    pub columns: u32,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl SpriteSheet {
    /// Slice an image of the given pixel size into `columns` equal cells
    pub fn from_image_size(width: u32, height: u32, columns: u32) -> Self {
        let columns = columns.max(1);
        Self {
            columns,
            cell_width: width as f32 / columns as f32,
            cell_height: height as f32,
        }
    }

    /// Cell for an animation frame; frames past the last column wrap around
    pub fn cell(&self, frame: u32) -> SpriteCell {
        let index = frame % self.columns;
        SpriteCell {
            index,
            source: Rect::new(
                index as f32 * self.cell_width,
                0.0,
                self.cell_width,
                self.cell_height,
            ),
        }
    }
}

/// Anything the frame loop can paint onto
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    fn draw_background(&mut self, dest: Rect);
    fn draw_sprite_cell(&mut self, cell: SpriteCell, dest: Rect, mirrored: bool);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
}

/// A recorded surface call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    Background {
        dest: Rect,
    },
    SpriteCell {
        cell: SpriteCell,
        dest: Rect,
        mirrored: bool,
    },
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
}

/// Surface that records commands in paint order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }
}

impl Surface for DrawList {
    /// Clearing drops everything recorded so far
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn draw_background(&mut self, dest: Rect) {
        self.commands.push(DrawCommand::Background { dest });
    }

    fn draw_sprite_cell(&mut self, cell: SpriteCell, dest: Rect, mirrored: bool) {
        self.commands.push(DrawCommand::SpriteCell {
            cell,
            dest,
            mirrored,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }
}

/// Common draw interface for everything living in the tank
pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface, sheet: &SpriteSheet);
}

/// Borrowed view of a fish's drawable state
pub struct FishView<'a> {
    pub position: Vec2,
    pub fish: &'a Fish,
    pub growth: &'a Growth,
    pub hunger: &'a Hunger,
    pub facing: Facing,
    pub animation: &'a SpriteAnimation,
    pub bar_offset: f32,
    pub bar_height: f32,
}

impl Drawable for FishView<'_> {
    fn draw(&self, surface: &mut dyn Surface, sheet: &SpriteSheet) {
        let (width, height) = self.fish.scaled(self.growth);

        surface.draw_sprite_cell(
            sheet.cell(self.animation.frame),
            Rect::new(self.position.x, self.position.y, width, height),
            self.facing == Facing::Left,
        );

        // Hunger bar: red track, green fill for how full the fish is
        let bar_y = self.position.y - self.bar_offset;
        surface.fill_rect(
            Rect::new(self.position.x, bar_y, width, self.bar_height),
            Rgba::RED,
        );
        surface.fill_rect(
            Rect::new(
                self.position.x,
                bar_y,
                width * self.hunger.fullness(),
                self.bar_height,
            ),
            Rgba::GREEN,
        );
    }
}

/// Borrowed view of a food pellet
pub struct FoodView<'a> {
    pub position: Vec2,
    pub food: &'a Food,
}

impl Drawable for FoodView<'_> {
    fn draw(&self, surface: &mut dyn Surface, _sheet: &SpriteSheet) {
        surface.fill_circle(self.position, self.food.radius, Rgba::BROWN);
    }
}
