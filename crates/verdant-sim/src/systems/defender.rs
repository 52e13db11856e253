//! Defender behavior system.
//!
//! One state machine per defender kind, dispatched with an exhaustive match.
//! Behavior is decided while iterating defenders; the resulting spawns and
//! damage are applied afterwards so the world is never mutated mid-query.
//!
//! Follow-up shots live in a level-owned queue, not on the defender, so a
//! shot already queued still fires if its shooter is destroyed or removed.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use verdant_core::components::{AttackerState, DefenderState, EntityTag, Vitality};
use verdant_core::constants::*;
use verdant_core::enums::{DefenderKind, DefenderPhase};
use verdant_core::events::GameEvent;
use verdant_core::types::{GridCell, Position};
use verdant_roster::damage::{apply_blast, apply_lethal};

use super::cleanup::mark_entity_removed;
use crate::economy::Occupancy;
use crate::world_setup::{self, entity_id};

/// A live, non-dying attacker as seen at the start of the step.
struct Target {
    entity: Entity,
    row: usize,
    pos: Position,
}

/// A delayed projectile waiting to be fired from a fixed muzzle point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingShot {
    pub x: f64,
    pub y: f64,
    pub row: usize,
    pub remaining: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlastReach {
    /// 3x3 cells centred on the defender.
    Square,
    /// One cell either side, own lane only.
    Lane,
}

enum Action {
    Produce {
        x: f64,
        y: f64,
    },
    Fire {
        x: f64,
        y: f64,
        row: usize,
        chill: bool,
    },
    Blast {
        defender: Entity,
        kind: DefenderKind,
        cell: GridCell,
        x: f64,
        y: f64,
        reach: BlastReach,
    },
    Chomp {
        target: Entity,
    },
}

/// Run defender behavior for one step.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    occupancy: &mut Occupancy,
    pending: &mut Vec<PendingShot>,
    dt: f64,
    tick: u64,
    events: &mut Vec<GameEvent>,
) {
    let targets: Vec<Target> = world
        .query::<(&EntityTag, &AttackerState, &Position, &GridCell)>()
        .iter()
        .filter(|(_, (tag, state, _, _))| tag.alive && state.phase.is_active())
        .map(|(entity, (_, _, pos, cell))| Target {
            entity,
            row: cell.row,
            pos: *pos,
        })
        .collect();

    let mut actions = Vec::new();

    pending.retain_mut(|shot| {
        shot.remaining -= dt;
        if shot.remaining > 0.0 {
            return true;
        }
        actions.push(Action::Fire {
            x: shot.x,
            y: shot.y,
            row: shot.row,
            chill: false,
        });
        false
    });

    for (entity, (tag, state, pos, cell)) in
        world.query_mut::<(&EntityTag, &mut DefenderState, &Position, &GridCell)>()
    {
        if !tag.alive {
            continue;
        }
        state.action_timer += dt;

        match state.kind {
            DefenderKind::Sunflower => {
                if state.action_timer >= state.action_interval {
                    state.action_timer = 0.0;
                    actions.push(Action::Produce { x: pos.x, y: pos.y });
                }
            }
            DefenderKind::Peashooter | DefenderKind::SnowPea | DefenderKind::Repeater => {
                // The timer keeps running without a target; only firing waits for one.
                if state.action_timer >= state.action_interval
                    && has_target_ahead(&targets, cell.row, pos.x)
                {
                    state.action_timer = 0.0;
                    actions.push(fire(pos, cell, state.kind == DefenderKind::SnowPea));
                    if state.kind == DefenderKind::Repeater {
                        pending.push(PendingShot {
                            x: pos.x + pos.width / 2.0,
                            y: pos.y,
                            row: cell.row,
                            remaining: FOLLOW_UP_SHOT_DELAY_SECS,
                        });
                    }
                }
            }
            DefenderKind::WallNut => {}
            DefenderKind::CherryBomb => match state.phase {
                DefenderPhase::Idle => {
                    state.phase = DefenderPhase::Exploding;
                    state.action_timer = 0.0;
                }
                DefenderPhase::Exploding if state.action_timer >= state.action_interval => {
                    actions.push(blast(entity, state.kind, pos, cell, BlastReach::Square));
                }
                _ => {}
            },
            DefenderKind::PotatoMine => match state.phase {
                DefenderPhase::Idle => {
                    state.phase = DefenderPhase::Arming;
                    state.action_timer = 0.0;
                }
                DefenderPhase::Arming if state.action_timer >= state.action_interval => {
                    state.phase = DefenderPhase::Armed;
                    debug!(row = cell.row, col = cell.col, "potato mine armed");
                }
                DefenderPhase::Armed => {
                    let stepped_on = targets.iter().any(|t| {
                        t.row == cell.row
                            && (t.pos.x - pos.x).abs() < (pos.width + t.pos.width) / 2.0
                    });
                    if stepped_on {
                        state.phase = DefenderPhase::Exploding;
                        actions.push(blast(entity, state.kind, pos, cell, BlastReach::Lane));
                    }
                }
                _ => {}
            },
            DefenderKind::Chomper => match state.phase {
                DefenderPhase::Idle => {
                    let prey = targets.iter().find(|t| {
                        t.row == cell.row && t.pos.x > pos.x && t.pos.x - pos.x < CHOMPER_REACH
                    });
                    if let Some(prey) = prey {
                        state.phase = DefenderPhase::Acting;
                        state.action_timer = 0.0;
                        actions.push(Action::Chomp {
                            target: prey.entity,
                        });
                    }
                }
                DefenderPhase::Acting if state.action_timer >= state.action_interval => {
                    state.phase = DefenderPhase::Idle;
                    state.action_timer = 0.0;
                }
                _ => {}
            },
        }
    }

    for action in actions {
        apply(world, rng, occupancy, &targets, action, tick, events);
    }
}

fn apply(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    occupancy: &mut Occupancy,
    targets: &[Target],
    action: Action,
    tick: u64,
    events: &mut Vec<GameEvent>,
) {
    match action {
        Action::Produce { x, y } => {
            let entity = world_setup::spawn_producer_pickup(world, rng, x, y);
            if let Ok(pos) = world.get::<&Position>(entity) {
                events.push(GameEvent::ResourceProduced {
                    entity: entity_id(entity),
                    x: pos.x,
                    y: pos.y,
                    from_sky: false,
                });
            }
        }
        Action::Fire { x, y, row, chill } => {
            let entity = world_setup::spawn_projectile(world, x, y, row, chill);
            events.push(GameEvent::ProjectileFired {
                entity: entity_id(entity),
                row,
                chill,
            });
        }
        Action::Blast {
            defender,
            kind,
            cell,
            x,
            y,
            reach,
        } => {
            let mut hit = 0;
            for target in targets.iter().filter(|t| in_blast(reach, x, y, cell.row, t)) {
                if let Ok(mut vitality) = world.get::<&mut Vitality>(target.entity) {
                    apply_blast(&mut vitality, BLAST_DAMAGE);
                    hit += 1;
                }
            }
            debug!(?kind, row = cell.row, col = cell.col, hit, "blast");

            world_setup::spawn_explosion(world, x, y);
            mark_entity_removed(world, defender, tick);
            occupancy.release(cell, defender);
            events.push(GameEvent::AreaDamage {
                kind,
                row: cell.row,
                col: cell.col,
                targets: hit,
            });
            events.push(GameEvent::DefenderRemoved {
                entity: entity_id(defender),
                kind,
                row: cell.row,
                col: cell.col,
            });
        }
        Action::Chomp { target } => {
            if let Ok(mut vitality) = world.get::<&mut Vitality>(target) {
                apply_lethal(&mut vitality);
            }
        }
    }
}

fn fire(pos: &Position, cell: &GridCell, chill: bool) -> Action {
    Action::Fire {
        x: pos.x + pos.width / 2.0,
        y: pos.y,
        row: cell.row,
        chill,
    }
}

fn blast(
    defender: Entity,
    kind: DefenderKind,
    pos: &Position,
    cell: &GridCell,
    reach: BlastReach,
) -> Action {
    Action::Blast {
        defender,
        kind,
        cell: *cell,
        x: pos.x,
        y: pos.y,
        reach,
    }
}

/// A live attacker in `row` to the right of `x` and not too far off-screen.
fn has_target_ahead(targets: &[Target], row: usize, x: f64) -> bool {
    targets
        .iter()
        .any(|t| t.row == row && t.pos.x > x && t.pos.x < TARGET_SCAN_LIMIT_X)
}

fn in_blast(reach: BlastReach, x: f64, y: f64, row: usize, target: &Target) -> bool {
    let dx = (target.pos.x - x).abs();
    match reach {
        BlastReach::Square => dx < CELL_WIDTH * 1.5 && (target.pos.y - y).abs() < CELL_HEIGHT * 1.5,
        BlastReach::Lane => target.row == row && dx < CELL_WIDTH,
    }
}
