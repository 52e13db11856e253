//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.
//! `Position` and `GridCell` are defined in types.rs and double as components.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Type tag and liveness, present on every entity.
///
/// Killing an entity only clears `alive`; Cleanup despawns it on a later step
/// so the rest of the current step can still observe it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EntityTag {
    pub kind: EntityKind,
    pub alive: bool,
    /// Tick on which `alive` was cleared.
    pub removal_tick: u64,
}

/// Health and armor pools. Both are clamped at zero after every mutation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vitality {
    pub health: f64,
    pub max_health: f64,
    pub armor: f64,
    pub max_armor: f64,
}

/// Movement along a fixed direction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Kinetics {
    /// Effective speed, including any active slow.
    pub speed: f64,
    /// Design speed with no slow applied.
    pub base_speed: f64,
    /// Unit direction, x component.
    pub dx: f64,
    /// Unit direction, y component.
    pub dy: f64,
}

/// Per-defender behavior state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenderState {
    pub kind: DefenderKind,
    pub phase: DefenderPhase,
    /// Seconds accumulated toward the next action (or phase deadline).
    pub action_timer: f64,
    /// Seconds between actions.
    pub action_interval: f64,
}

/// Per-attacker behavior state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackerState {
    pub kind: AttackerKind,
    pub phase: AttackerPhase,
    /// Leaper has already used its one hop.
    pub has_leaped: bool,
    /// Armor pool has been emptied at least once.
    pub armor_broken: bool,
    /// Seconds of chill remaining. Zero when not chilled.
    pub slow_remaining: f64,
    /// Seconds spent in the dying phase.
    pub dying_elapsed: f64,
}

/// Periodic melee attack.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeleeAttack {
    pub damage: f64,
    pub interval: f64,
    pub timer: f64,
}

/// Projectile payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectileState {
    pub damage: f64,
    /// Chills the target on hit.
    pub chill: bool,
    pub chill_secs: f64,
}

/// Resource pickup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PickupState {
    pub value: u32,
    /// Seconds left before an uncollected pickup expires.
    pub lifetime_remaining: f64,
    pub collected: bool,
    /// Y coordinate where a falling pickup comes to rest.
    pub landing_y: f64,
    pub landed: bool,
    /// Anchor a collected pickup flies toward.
    pub flight_target: Option<(f64, f64)>,
}

/// Per-lane mower. Idle until triggered, then sweeps right.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MowerState {
    pub active: bool,
}

/// Cosmetic effect lifetime, consumed by Cleanup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransientEffect {
    pub duration: f64,
    pub elapsed: f64,
}
