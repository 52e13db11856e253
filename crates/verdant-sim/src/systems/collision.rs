//! Collision and trigger system.
//!
//! Resolves projectile hits per lane and runs the per-lane mowers. Targets
//! are live attackers that are neither dying nor removed.

use hecs::{Entity, World};
use tracing::{debug, info};

use verdant_core::components::*;
use verdant_core::constants::{
    CHILL_SPEED_FACTOR, DESIGN_WIDTH, MOWER_EXIT_MARGIN, MOWER_SPEED, MOWER_TRIGGER_OFFSET,
};
use verdant_core::events::GameEvent;
use verdant_core::types::{GridCell, Position};
use verdant_roster::damage::{apply_hit, apply_lethal};

use super::cleanup::mark_entity_removed;
use crate::world_setup::entity_id;

struct Target {
    entity: Entity,
    row: usize,
    pos: Position,
}

struct Shot {
    entity: Entity,
    row: usize,
    pos: Position,
    payload: ProjectileState,
}

struct Mower {
    entity: Entity,
    row: usize,
    pos: Position,
    active: bool,
}

pub fn run(world: &mut World, tick: u64, events: &mut Vec<GameEvent>) {
    let targets = collect_targets(world);
    resolve_projectiles(world, &targets, tick, events);
    resolve_mowers(world, &targets, tick, events);
}

fn collect_targets(world: &World) -> Vec<Target> {
    world
        .query::<(&EntityTag, &AttackerState, &Position, &GridCell)>()
        .iter()
        .filter(|(_, (tag, state, _, _))| tag.alive && state.phase.is_active())
        .map(|(entity, (_, _, pos, cell))| Target {
            entity,
            row: cell.row,
            pos: *pos,
        })
        .collect()
}

fn resolve_projectiles(
    world: &mut World,
    targets: &[Target],
    tick: u64,
    events: &mut Vec<GameEvent>,
) {
    let shots: Vec<Shot> = world
        .query::<(&EntityTag, &ProjectileState, &Position, &GridCell)>()
        .iter()
        .filter(|(_, (tag, _, _, _))| tag.alive)
        .map(|(entity, (_, payload, pos, cell))| Shot {
            entity,
            row: cell.row,
            pos: *pos,
            payload: *payload,
        })
        .collect();

    for shot in shots {
        // Leftmost overlapping target in the lane takes the hit.
        let hit = targets
            .iter()
            .filter(|t| t.row == shot.row && shot.pos.overlaps(&t.pos))
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));
        let Some(target) = hit else {
            continue;
        };

        if let Ok(mut vitality) = world.get::<&mut Vitality>(target.entity) {
            apply_hit(&mut vitality, shot.payload.damage);
        }

        if shot.payload.chill && shot.payload.chill_secs > 0.0 {
            if let Ok((state, kinetics)) =
                world.query_one_mut::<(&mut AttackerState, &mut Kinetics)>(target.entity)
            {
                // Refreshes rather than stacks.
                state.slow_remaining = shot.payload.chill_secs;
                kinetics.speed = kinetics.base_speed * CHILL_SPEED_FACTOR;
            }
        }

        events.push(GameEvent::ProjectileHit {
            projectile: entity_id(shot.entity),
            target: entity_id(target.entity),
            damage: shot.payload.damage,
        });
        mark_entity_removed(world, shot.entity, tick);
    }
}

fn resolve_mowers(world: &mut World, targets: &[Target], tick: u64, events: &mut Vec<GameEvent>) {
    let mowers: Vec<Mower> = world
        .query::<(&EntityTag, &MowerState, &Position, &GridCell)>()
        .iter()
        .filter(|(_, (tag, _, _, _))| tag.alive)
        .map(|(entity, (_, state, pos, cell))| Mower {
            entity,
            row: cell.row,
            pos: *pos,
            active: state.active,
        })
        .collect();

    for mower in mowers {
        let in_lane = targets.iter().filter(|t| t.row == mower.row);
        if mower.active {
            if mower.pos.x > DESIGN_WIDTH + MOWER_EXIT_MARGIN {
                mark_entity_removed(world, mower.entity, tick);
                continue;
            }
            for target in in_lane.filter(|t| mower.pos.overlaps_horizontally(&t.pos)) {
                if let Ok(mut vitality) = world.get::<&mut Vitality>(target.entity) {
                    apply_lethal(&mut vitality);
                    debug!(row = mower.row, id = entity_id(target.entity), "mowed");
                }
            }
            continue;
        }

        let mut in_lane = in_lane;
        if !in_lane.any(|t| t.pos.left() <= mower.pos.x + MOWER_TRIGGER_OFFSET) {
            continue;
        }

        if let Ok(mut state) = world.get::<&mut MowerState>(mower.entity) {
            state.active = true;
        }
        if let Ok(mut kinetics) = world.get::<&mut Kinetics>(mower.entity) {
            kinetics.speed = MOWER_SPEED;
        }
        info!(row = mower.row, "mower activated");
        events.push(GameEvent::MowerActivated { row: mower.row });
    }
}
