//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior beyond small helpers - that lives in systems.

mod common;
mod fish;
mod food;

pub use common::*;
pub use fish::*;
pub use food::*;
