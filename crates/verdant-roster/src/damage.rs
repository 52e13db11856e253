//! Damage rules shared by projectiles, blasts, bites and mowers.

use verdant_core::components::Vitality;
use verdant_core::constants::{TIER_CRACKED_RATIO, TIER_INTACT_RATIO};
use verdant_core::enums::DamageTier;

/// What a single application of damage did to a target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Armor went from positive to zero during this application.
    pub armor_broken: bool,
    /// Health and armor are both at zero afterwards.
    pub depleted: bool,
}

/// Apply regular damage: armor absorbs first, any excess overflows into health.
pub fn apply_hit(v: &mut Vitality, damage: f64) -> DamageOutcome {
    let had_armor = v.armor > 0.0;
    if had_armor {
        v.armor -= damage;
        if v.armor < 0.0 {
            v.health += v.armor;
            v.armor = 0.0;
        }
    } else {
        v.health -= damage;
    }
    clamp(v);
    DamageOutcome {
        armor_broken: had_armor && v.armor <= 0.0,
        depleted: is_depleted(v),
    }
}

/// Apply blast damage: armor is zeroed outright, then health takes the full amount.
pub fn apply_blast(v: &mut Vitality, damage: f64) -> DamageOutcome {
    let had_armor = v.armor > 0.0;
    v.armor = 0.0;
    v.health -= damage;
    clamp(v);
    DamageOutcome {
        armor_broken: had_armor,
        depleted: is_depleted(v),
    }
}

/// Zero both pools (mower sweep, chomper bite).
pub fn apply_lethal(v: &mut Vitality) -> DamageOutcome {
    let had_armor = v.armor > 0.0;
    v.armor = 0.0;
    v.health = 0.0;
    DamageOutcome {
        armor_broken: had_armor,
        depleted: true,
    }
}

pub fn is_depleted(v: &Vitality) -> bool {
    v.health <= 0.0 && v.armor <= 0.0
}

pub fn health_ratio(v: &Vitality) -> f64 {
    if v.max_health <= 0.0 {
        return 0.0;
    }
    (v.health / v.max_health).clamp(0.0, 1.0)
}

/// Visual tier of a blocker for a given health ratio.
pub fn damage_tier(ratio: f64) -> DamageTier {
    if ratio > TIER_INTACT_RATIO {
        DamageTier::Intact
    } else if ratio > TIER_CRACKED_RATIO {
        DamageTier::Cracked
    } else {
        DamageTier::Crumbling
    }
}

fn clamp(v: &mut Vitality) {
    v.health = v.health.max(0.0);
    v.armor = v.armor.max(0.0);
}
