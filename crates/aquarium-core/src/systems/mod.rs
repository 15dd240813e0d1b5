//! Systems - logic that operates on components

mod animation;
mod feeding;
mod food;
mod hunger;
mod movement;
mod wandering;

pub use animation::*;
pub use feeding::*;
pub use food::*;
pub use hunger::*;
pub use movement::*;
pub use wandering::*;
