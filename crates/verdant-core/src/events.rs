//! Events emitted by the simulation for rendering, audio, UI and persistence.
//!
//! Events are fire-and-forget. They are collected during a step and published
//! in the order they were raised once the step completes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Everything an observer can learn about a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Resource balance changed (placement, collection, level setup).
    BalanceChanged { balance: u32 },
    /// Top-level game phase changed.
    PhaseChanged { phase: GamePhase },
    /// A wave finished spawning. `current` counts completed waves.
    WaveProgress { current: usize, total: usize },
    DefenderPlaced {
        entity: u64,
        kind: DefenderKind,
        row: usize,
        col: i32,
    },
    /// A defender left its cell: destroyed, dug up, or spent.
    DefenderRemoved {
        entity: u64,
        kind: DefenderKind,
        row: usize,
        col: i32,
    },
    AttackerSpawned {
        entity: u64,
        kind: AttackerKind,
        row: usize,
    },
    /// An attacker's health and armor reached zero; it is now dying.
    AttackerKilled {
        entity: u64,
        kind: AttackerKind,
        row: usize,
    },
    ProjectileFired {
        entity: u64,
        row: usize,
        chill: bool,
    },
    ProjectileHit {
        projectile: u64,
        target: u64,
        damage: f64,
    },
    /// A blast went off centred on a cell.
    AreaDamage {
        kind: DefenderKind,
        row: usize,
        col: i32,
        targets: usize,
    },
    /// Fraction of each kind's cooldown still remaining (1.0 = just started).
    CooldownUpdate { fractions: BTreeMap<DefenderKind, f64> },

    // --- Persistence hooks ---
    LevelCompleted { level_id: u32 },
    LevelFailed { level_id: u32 },

    // --- Presentation cues ---
    ResourceProduced {
        entity: u64,
        x: f64,
        y: f64,
        from_sky: bool,
    },
    ResourceCollected { entity: u64, value: u32 },
    ResourceExpired { entity: u64 },
    ArmorBroken { entity: u64, kind: AttackerKind },
    AttackerLeaped { entity: u64, row: usize },
    AttackerBite {
        attacker: u64,
        defender: u64,
        damage: f64,
    },
    MowerActivated { row: usize },
}
