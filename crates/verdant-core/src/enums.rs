//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Type tag carried by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Defender,
    Attacker,
    Projectile,
    Pickup,
    Mower,
    Effect,
}

/// Defender kinds. Behavior dispatch matches on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DefenderKind {
    /// Produces resource pickups on a timer.
    Sunflower,
    /// Fires one projectile per action.
    Peashooter,
    /// Fires one chilling projectile per action.
    SnowPea,
    /// Fires two projectiles per action, the second slightly delayed.
    Repeater,
    /// Absorbs attacks; no behavior.
    WallNut,
    /// Detonates shortly after placement, 3x3 cells.
    CherryBomb,
    /// Arms over time, then detonates on contact within its own cell.
    PotatoMine,
    /// Swallows the attacker in front of it, then digests for a long time.
    Chomper,
}

impl DefenderKind {
    pub const ALL: [DefenderKind; 8] = [
        DefenderKind::Sunflower,
        DefenderKind::Peashooter,
        DefenderKind::SnowPea,
        DefenderKind::Repeater,
        DefenderKind::WallNut,
        DefenderKind::CherryBomb,
        DefenderKind::PotatoMine,
        DefenderKind::Chomper,
    ];
}

/// Attacker kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttackerKind {
    Normal,
    /// Light armor.
    Conehead,
    /// Heavy armor.
    Buckethead,
    /// Hops over the first defender it meets.
    PoleVaulter,
    /// Thin armor.
    Newspaper,
}

impl AttackerKind {
    pub const ALL: [AttackerKind; 5] = [
        AttackerKind::Normal,
        AttackerKind::Conehead,
        AttackerKind::Buckethead,
        AttackerKind::PoleVaulter,
        AttackerKind::Newspaper,
    ];
}

/// Defender lifecycle. Traps use Idle/Arming/Armed/Exploding; the instant
/// area kind uses Idle/Exploding; everything else uses Idle/Acting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefenderPhase {
    #[default]
    Idle,
    /// Busy with a long action (the chewing kind while digesting).
    Acting,
    Arming,
    Armed,
    Exploding,
}

/// Attacker lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackerPhase {
    /// Walking left along its lane.
    #[default]
    Advancing,
    /// Stopped, biting the defender in front of it.
    Engaging,
    /// Health and armor depleted; death animation running.
    Dying,
    /// Finished dying. Pending removal from the store.
    Removed,
}

impl AttackerPhase {
    /// Advancing or engaging: a valid target that still counts toward the lose line.
    pub fn is_active(self) -> bool {
        matches!(self, AttackerPhase::Advancing | AttackerPhase::Engaging)
    }
}

/// Visual damage tier of a blocker, derived from its health ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageTier {
    Intact,
    Cracked,
    Crumbling,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    Won,
    Lost,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}
