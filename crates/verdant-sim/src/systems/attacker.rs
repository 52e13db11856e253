//! Attacker behavior system.
//!
//! Feeds each attacker's surroundings into the lifecycle FSM in
//! `verdant_roster::fsm`, applies the resulting hop or phase change, counts
//! down chill, and runs the periodic bite against an engaged defender.

use hecs::{Entity, World};
use tracing::debug;

use verdant_core::components::{
    AttackerState, DefenderState, EntityTag, Kinetics, MeleeAttack, Vitality,
};
use verdant_core::constants::{CHILL_SPEED_FACTOR, LEAPER_LANDED_SPEED};
use verdant_core::enums::AttackerPhase;
use verdant_core::events::GameEvent;
use verdant_core::types::{GridCell, Position};
use verdant_roster::fsm::{self, AttackerContext, DefenderContact};

use super::cleanup::mark_removed;
use crate::world_setup::entity_id;

struct Blocker {
    entity: Entity,
    row: usize,
    pos: Position,
}

struct Bite {
    attacker: Entity,
    defender: Entity,
    damage: f64,
}

pub fn run(world: &mut World, dt: f64, tick: u64, events: &mut Vec<GameEvent>) {
    let blockers: Vec<Blocker> = world
        .query::<(&EntityTag, &DefenderState, &Position, &GridCell)>()
        .iter()
        .filter(|(_, (tag, _, _, _))| tag.alive)
        .map(|(entity, (_, _, pos, cell))| Blocker {
            entity,
            row: cell.row,
            pos: *pos,
        })
        .collect();

    let mut bites = Vec::new();

    for (entity, (tag, state, pos, kinetics, melee, cell)) in world.query_mut::<(
        &mut EntityTag,
        &mut AttackerState,
        &mut Position,
        &mut Kinetics,
        &mut MeleeAttack,
        &GridCell,
    )>() {
        if !tag.alive {
            continue;
        }

        if state.phase == AttackerPhase::Dying {
            state.dying_elapsed += dt;
        }

        if state.phase.is_active() && state.slow_remaining > 0.0 {
            state.slow_remaining -= dt;
            if state.slow_remaining <= 0.0 {
                state.slow_remaining = 0.0;
                kinetics.speed = kinetics.base_speed;
            }
        }

        let ahead = if state.phase.is_active() {
            nearest_ahead(&blockers, cell.row, pos)
        } else {
            None
        };

        let update = fsm::evaluate(&AttackerContext {
            kind: state.kind,
            phase: state.phase,
            has_leaped: state.has_leaped,
            dying_elapsed: state.dying_elapsed,
            defender_ahead: ahead.map(|(_, contact)| contact),
        });

        if let Some(x) = update.leap_to {
            pos.x = x;
            state.has_leaped = true;
            kinetics.base_speed = LEAPER_LANDED_SPEED;
            kinetics.speed = if state.slow_remaining > 0.0 {
                LEAPER_LANDED_SPEED * CHILL_SPEED_FACTOR
            } else {
                LEAPER_LANDED_SPEED
            };
            debug!(id = entity_id(entity), row = cell.row, x, "attacker leaped");
            events.push(GameEvent::AttackerLeaped {
                entity: entity_id(entity),
                row: cell.row,
            });
        }

        if update.phase_changed {
            debug!(
                id = entity_id(entity),
                from = ?state.phase,
                to = ?update.new_phase,
                "attacker transition"
            );
            state.phase = update.new_phase;
        }

        match state.phase {
            AttackerPhase::Removed => mark_removed(tag, tick),
            AttackerPhase::Engaging => {
                let Some((defender, _)) = ahead else {
                    continue;
                };
                melee.timer += dt;
                if melee.timer >= melee.interval {
                    melee.timer = 0.0;
                    bites.push(Bite {
                        attacker: entity,
                        defender,
                        damage: melee.damage,
                    });
                }
            }
            AttackerPhase::Advancing | AttackerPhase::Dying => {}
        }
    }

    for bite in bites {
        if let Ok(mut vitality) = world.get::<&mut Vitality>(bite.defender) {
            vitality.health = (vitality.health - bite.damage).max(0.0);
            events.push(GameEvent::AttackerBite {
                attacker: entity_id(bite.attacker),
                defender: entity_id(bite.defender),
                damage: bite.damage,
            });
        }
    }
}

/// Closest live defender in `row` that the attacker has not yet passed.
fn nearest_ahead(
    blockers: &[Blocker],
    row: usize,
    pos: &Position,
) -> Option<(Entity, DefenderContact)> {
    blockers
        .iter()
        .filter(|b| b.row == row && pos.x - b.pos.x > 0.0)
        .map(|b| {
            (
                b.entity,
                DefenderContact {
                    x: b.pos.x,
                    gap: pos.x - b.pos.x,
                    reach: (pos.width + b.pos.width) / 2.0,
                },
            )
        })
        .min_by(|a, b| a.1.gap.total_cmp(&b.1.gap))
}
