//! Kind-specific stat tables.
//!
//! Consolidates per-kind parameters for placement, behavior and combat.

use serde::{Deserialize, Serialize};

use verdant_core::constants::*;
use verdant_core::enums::{AttackerKind, DefenderKind};

/// Stats for a defender kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefenderStats {
    /// Resource cost to place.
    pub cost: u32,
    /// Seconds before the kind can be placed again.
    pub cooldown_secs: f64,
    pub health: f64,
    /// Seconds between actions. Zero for kinds with no periodic action.
    pub action_interval: f64,
}

/// Stats for an attacker kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackerStats {
    pub health: f64,
    pub armor: f64,
    /// Walking speed (px/s).
    pub speed: f64,
    /// Damage per bite.
    pub damage: f64,
    /// Seconds between bites.
    pub attack_interval: f64,
}

/// Get the stats for a defender kind.
pub fn defender_stats(kind: DefenderKind) -> DefenderStats {
    match kind {
        DefenderKind::Sunflower => DefenderStats {
            cost: 50,
            cooldown_secs: 7.5,
            health: 300.0,
            action_interval: 24.0,
        },
        DefenderKind::Peashooter => DefenderStats {
            cost: 100,
            cooldown_secs: 7.5,
            health: 300.0,
            action_interval: 1.4,
        },
        DefenderKind::SnowPea => DefenderStats {
            cost: 175,
            cooldown_secs: 7.5,
            health: 300.0,
            action_interval: 1.4,
        },
        DefenderKind::Repeater => DefenderStats {
            cost: 200,
            cooldown_secs: 7.5,
            health: 300.0,
            action_interval: 1.4,
        },
        DefenderKind::WallNut => DefenderStats {
            cost: 50,
            cooldown_secs: 30.0,
            health: 4000.0,
            action_interval: 0.0,
        },
        DefenderKind::CherryBomb => DefenderStats {
            cost: 150,
            cooldown_secs: 50.0,
            health: 300.0,
            action_interval: CHERRY_BOMB_FUSE_SECS,
        },
        DefenderKind::PotatoMine => DefenderStats {
            cost: 25,
            cooldown_secs: 30.0,
            health: 300.0,
            action_interval: POTATO_MINE_ARM_SECS,
        },
        DefenderKind::Chomper => DefenderStats {
            cost: 150,
            cooldown_secs: 7.5,
            health: 300.0,
            action_interval: CHOMPER_DIGEST_SECS,
        },
    }
}

/// Get the stats for an attacker kind.
pub fn attacker_stats(kind: AttackerKind) -> AttackerStats {
    let base = AttackerStats {
        health: 200.0,
        armor: 0.0,
        speed: 15.0,
        damage: 100.0,
        attack_interval: 1.0,
    };
    match kind {
        AttackerKind::Normal => base,
        AttackerKind::Conehead => AttackerStats {
            armor: 370.0,
            ..base
        },
        AttackerKind::Buckethead => AttackerStats {
            armor: 1100.0,
            ..base
        },
        AttackerKind::PoleVaulter => AttackerStats {
            speed: 30.0,
            ..base
        },
        AttackerKind::Newspaper => AttackerStats {
            armor: 150.0,
            speed: 12.0,
            attack_interval: 1.2,
            ..base
        },
    }
}

/// Kind used for presentation and attack timing.
///
/// Armored kinds report the unarmored base kind once their armor has broken.
pub fn presentation_kind(kind: AttackerKind, armor_broken: bool) -> AttackerKind {
    match kind {
        AttackerKind::Conehead | AttackerKind::Buckethead | AttackerKind::Newspaper
            if armor_broken =>
        {
            AttackerKind::Normal
        }
        other => other,
    }
}

/// Whether the kind carries an armor pool at spawn.
pub fn is_armored(kind: AttackerKind) -> bool {
    attacker_stats(kind).armor > 0.0
}
