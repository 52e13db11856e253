//! VERDANT headless host.
//!
//! Wires the simulation crates together: a game-loop thread driven by the
//! tick driver, a command/snapshot surface over it, and a fixed-step runner
//! used by the `verdant` binary.

pub mod game_loop;
pub mod host;
pub mod runner;
pub mod state;

pub use verdant_core as core;
