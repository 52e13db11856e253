//! Placement/economy gateway: validates and applies player actions.
//!
//! Every check runs before any mutation, so a rejected action leaves the
//! world, balance, occupancy and cooldowns exactly as they were.

use hecs::{Entity, World};
use thiserror::Error;
use tracing::debug;

use verdant_core::components::{DefenderState, EntityTag, PickupState};
use verdant_core::constants::{COLLECT_ANCHOR_X, COLLECT_ANCHOR_Y};
use verdant_core::enums::{DefenderKind, GamePhase};
use verdant_core::events::GameEvent;
use verdant_core::types::GridCell;
use verdant_roster::profiles::defender_stats;

use crate::economy::LevelSession;
use crate::systems::cleanup::mark_entity_removed;
use crate::world_setup::{self, entity_id};

/// Why a player action was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("no level is being played")]
    NotPlaying,
    #[error("cell ({row}, {col}) is off the grid")]
    OutOfBounds { row: usize, col: i32 },
    #[error("{0:?} is not available on this level")]
    KindUnavailable(DefenderKind),
    #[error("costs {cost}, balance is {balance}")]
    InsufficientBalance { cost: u32, balance: u32 },
    #[error("cell ({row}, {col}) is occupied")]
    CellOccupied { row: usize, col: i32 },
    #[error("{kind:?} is cooling down ({remaining:.2}s left)")]
    CoolingDown { kind: DefenderKind, remaining: f64 },
    #[error("no defender at ({row}, {col})")]
    NoDefenderAt { row: usize, col: i32 },
    #[error("entity is not a live resource pickup")]
    NotAPickup,
    #[error("pickup was already collected")]
    AlreadyCollected,
}

/// Place a defender of `kind` in `cell`.
pub fn place_defender(
    world: &mut World,
    session: &mut LevelSession,
    phase: GamePhase,
    kind: DefenderKind,
    cell: GridCell,
    events: &mut Vec<GameEvent>,
) -> Result<Entity, ActionError> {
    if phase != GamePhase::Playing {
        return Err(ActionError::NotPlaying);
    }
    if !cell.in_bounds() {
        return Err(ActionError::OutOfBounds {
            row: cell.row,
            col: cell.col,
        });
    }
    if !session.roster.contains(&kind) {
        return Err(ActionError::KindUnavailable(kind));
    }
    let stats = defender_stats(kind);
    if session.balance < stats.cost {
        return Err(ActionError::InsufficientBalance {
            cost: stats.cost,
            balance: session.balance,
        });
    }
    if session.occupancy.is_occupied(cell) {
        return Err(ActionError::CellOccupied {
            row: cell.row,
            col: cell.col,
        });
    }
    if !session.cooldowns.is_ready(kind) {
        return Err(ActionError::CoolingDown {
            kind,
            remaining: session.cooldowns.remaining(kind),
        });
    }

    let entity = world_setup::spawn_defender(world, kind, cell);
    session.occupancy.occupy(cell, entity);
    session.balance -= stats.cost;
    session.cooldowns.start(kind, stats.cooldown_secs);

    debug!(?kind, row = cell.row, col = cell.col, balance = session.balance, "defender placed");
    events.push(GameEvent::BalanceChanged {
        balance: session.balance,
    });
    events.push(GameEvent::DefenderPlaced {
        entity: entity_id(entity),
        kind,
        row: cell.row,
        col: cell.col,
    });
    Ok(entity)
}

/// Mark a pickup collected. The resource system flies it to the anchor and
/// credits the balance on arrival.
pub fn collect_resource(
    world: &mut World,
    phase: GamePhase,
    entity: Entity,
    events: &mut Vec<GameEvent>,
) -> Result<(), ActionError> {
    if phase != GamePhase::Playing {
        return Err(ActionError::NotPlaying);
    }
    let (tag, pickup) = world
        .query_one_mut::<(&EntityTag, &mut PickupState)>(entity)
        .map_err(|_| ActionError::NotAPickup)?;
    if !tag.alive {
        return Err(ActionError::NotAPickup);
    }
    if pickup.collected {
        return Err(ActionError::AlreadyCollected);
    }

    pickup.collected = true;
    pickup.flight_target = Some((COLLECT_ANCHOR_X, COLLECT_ANCHOR_Y));
    events.push(GameEvent::ResourceCollected {
        entity: entity_id(entity),
        value: pickup.value,
    });
    Ok(())
}

/// Dig up the defender in `cell`. Free of charge.
pub fn remove_defender(
    world: &mut World,
    session: &mut LevelSession,
    phase: GamePhase,
    tick: u64,
    cell: GridCell,
    events: &mut Vec<GameEvent>,
) -> Result<Entity, ActionError> {
    if phase != GamePhase::Playing {
        return Err(ActionError::NotPlaying);
    }
    let Some(entity) = session.occupancy.occupant(cell) else {
        return Err(ActionError::NoDefenderAt {
            row: cell.row,
            col: cell.col,
        });
    };
    let kind = world
        .get::<&DefenderState>(entity)
        .map(|state| state.kind)
        .map_err(|_| ActionError::NoDefenderAt {
            row: cell.row,
            col: cell.col,
        })?;

    mark_entity_removed(world, entity, tick);
    session.occupancy.release(cell, entity);

    debug!(?kind, row = cell.row, col = cell.col, "defender removed");
    events.push(GameEvent::DefenderRemoved {
        entity: entity_id(entity),
        kind,
        row: cell.row,
        col: cell.col,
    });
    Ok(entity)
}
