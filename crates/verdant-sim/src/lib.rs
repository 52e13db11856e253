//! Simulation engine for VERDANT.
//!
//! Owns the hecs ECS world, drains fixed-size steps through the system
//! pipeline, validates player actions, and produces GameStateSnapshots.

pub mod channel;
pub mod clock;
pub mod economy;
pub mod engine;
pub mod gateway;
pub mod systems;
pub mod world_setup;

pub use verdant_core as core;
pub use engine::{SimConfig, SimulationEngine};
