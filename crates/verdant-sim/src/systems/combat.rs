//! Combat resolution: turns depleted pools into deaths.
//!
//! Defenders at zero health are destroyed and free their cell. Attackers whose
//! health and armor are both gone start dying. Also detects the step an
//! armored attacker loses its armor.

use hecs::World;
use tracing::debug;

use verdant_core::components::*;
use verdant_core::enums::AttackerPhase;
use verdant_core::events::GameEvent;
use verdant_core::types::{GridCell, Position};
use verdant_roster::damage::is_depleted;
use verdant_roster::profiles::{attacker_stats, presentation_kind};

use super::cleanup::mark_removed;
use crate::economy::Occupancy;
use crate::world_setup::{self, entity_id};

pub fn run(world: &mut World, occupancy: &mut Occupancy, tick: u64, events: &mut Vec<GameEvent>) {
    resolve_defenders(world, occupancy, tick, events);
    resolve_attackers(world, events);
}

fn resolve_defenders(
    world: &mut World,
    occupancy: &mut Occupancy,
    tick: u64,
    events: &mut Vec<GameEvent>,
) {
    for (entity, (tag, state, vitality, cell)) in
        world.query_mut::<(&mut EntityTag, &DefenderState, &Vitality, &GridCell)>()
    {
        if !tag.alive || vitality.health > 0.0 {
            continue;
        }
        mark_removed(tag, tick);
        occupancy.release(*cell, entity);
        debug!(kind = ?state.kind, row = cell.row, col = cell.col, "defender destroyed");
        events.push(GameEvent::DefenderRemoved {
            entity: entity_id(entity),
            kind: state.kind,
            row: cell.row,
            col: cell.col,
        });
    }
}

fn resolve_attackers(world: &mut World, events: &mut Vec<GameEvent>) {
    let mut remnants = Vec::new();

    for (entity, (tag, state, vitality, melee, pos, cell)) in world.query_mut::<(
        &EntityTag,
        &mut AttackerState,
        &Vitality,
        &mut MeleeAttack,
        &Position,
        &GridCell,
    )>() {
        if !tag.alive || !state.phase.is_active() {
            continue;
        }

        if vitality.max_armor > 0.0 && vitality.armor <= 0.0 && !state.armor_broken {
            state.armor_broken = true;
            // Attack timing follows the presentation kind from now on.
            let shown = presentation_kind(state.kind, true);
            melee.interval = attacker_stats(shown).attack_interval;
            debug!(id = entity_id(entity), kind = ?state.kind, "armor broken");
            events.push(GameEvent::ArmorBroken {
                entity: entity_id(entity),
                kind: state.kind,
            });
        }

        if is_depleted(vitality) {
            state.phase = AttackerPhase::Dying;
            state.dying_elapsed = 0.0;
            melee.timer = 0.0;
            remnants.push((pos.x, pos.y));
            events.push(GameEvent::AttackerKilled {
                entity: entity_id(entity),
                kind: state.kind,
                row: cell.row,
            });
        }
    }

    for (x, y) in remnants {
        world_setup::spawn_remnant(world, x, y);
    }
}
