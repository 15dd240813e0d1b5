//! Aquarium Core - Fish Tank Simulation Engine
//!
//! A small ECS-based simulation of a fish tank: fish drift around, get
//! hungry, chase sinking food pellets and grow as they eat. The player
//! spends money on new fish and on batches of food.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Fish and food pellets
//! - **Components**: Pure data attached to entities (Position, Hunger, Growth, etc.)
//! - **Systems**: Logic that queries and updates components
//!
//! Drawing goes through the [`render::Surface`] trait so the engine stays
//! independent of any graphics backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use aquarium_core::prelude::*;
//!
//! let mut engine = AquariumEngine::new(AquariumConfig::default());
//! engine.populate();
//!
//! let mut frame = DrawList::new();
//! let mut now = 0.0;
//! loop {
//!     engine.frame(now, &mut frame);
//!     now += 1000.0 / 60.0;
//! }
//! ```

pub mod assets;
pub mod components;
pub mod config;
pub mod economy;
pub mod engine;
pub mod input;
pub mod render;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::AquariumConfig;
    pub use crate::economy::{Purchase, PurchaseError};
    pub use crate::engine::{AquariumEngine, Hud};
    pub use crate::input::{InputEvent, InputOutcome};
    pub use crate::render::{DrawCommand, DrawList, Surface};
}
