//! Game state snapshot: the render surface handed to observers after each tick.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level_id: Option<u32>,
    pub balance: u32,
    pub wave: WaveView,
    /// Remaining cooldown fraction per roster kind.
    pub cooldowns: BTreeMap<DefenderKind, f64>,
    /// Entities sorted by id.
    pub entities: Vec<EntityView>,
    /// Events raised during the tick, in order.
    pub events: Vec<GameEvent>,
    /// Fraction of a step the host clock is past `time`, for render
    /// interpolation. Zero outside `SimulationEngine::frame`.
    #[serde(default)]
    pub interpolation: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveView {
    /// Completed waves.
    pub current: usize,
    pub total: usize,
    pub all_spawned: bool,
}

/// Presentation-relevant view of one entity. Carries no pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u64,
    pub kind: EntityKind,
    pub alive: bool,
    pub position: Position,
    /// Current health over max health, 1.0 for entities without vitality.
    pub health_ratio: f64,
    pub armor_broken: bool,
    pub lifecycle: Lifecycle,
    /// Only set for blockers.
    pub damage_tier: Option<DamageTier>,
}

/// Kind-specific discrete state for animation dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Lifecycle {
    Defender {
        kind: DefenderKind,
        phase: DefenderPhase,
    },
    /// `kind` is the presentation kind: an armored attacker whose armor broke
    /// reports its unarmored base kind.
    Attacker {
        kind: AttackerKind,
        phase: AttackerPhase,
    },
    Projectile { chill: bool },
    Pickup { collected: bool, landed: bool },
    Mower { active: bool },
    Effect,
}
