//! Kind tables and combat rules for VERDANT.
//!
//! Static per-kind stats, the damage rules shared by projectiles, blasts and
//! bites, and the attacker lifecycle state machine. Plain data in, plain data
//! out; nothing here touches the ECS.

pub mod damage;
pub mod fsm;
pub mod profiles;

pub use verdant_core as core;

#[cfg(test)]
mod tests;
