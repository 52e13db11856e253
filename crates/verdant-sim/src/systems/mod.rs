//! ECS systems that operate on the simulation world each step.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only)
//! plus the step size. They do not own state. All per-entity state lives in
//! components, level-wide state in `LevelSession`.
//!
//! Pipeline order: spawn, outcome, defender, attacker, projectile, movement,
//! collision, combat, resource, cooldown, cleanup.

pub mod attacker;
pub mod cleanup;
pub mod collision;
pub mod combat;
pub mod cooldown;
pub mod defender;
pub mod movement;
pub mod outcome;
pub mod projectile;
pub mod resource;
pub mod snapshot;
pub mod spawn;
