//! Level-scoped shared state: balance, occupancy table, cooldowns, wave plan.
//!
//! Created at level start and dropped on reset. Owned by the engine, never
//! stored in the ECS world.

use hecs::Entity;

use verdant_core::constants::{GRID_COLS, GRID_ROWS};
use verdant_core::enums::DefenderKind;
use verdant_core::types::GridCell;
use verdant_levels::LevelConfig;

use crate::systems::cooldown::CooldownTable;
use crate::systems::defender::PendingShot;
use crate::systems::spawn::WaveState;

/// Authoritative record of which cells hold a defender.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    cells: [[Option<Entity>; GRID_COLS]; GRID_ROWS],
}

impl Occupancy {
    pub fn occupant(&self, cell: GridCell) -> Option<Entity> {
        if !cell.in_bounds() {
            return None;
        }
        self.cells[cell.row][cell.col as usize]
    }

    pub fn is_occupied(&self, cell: GridCell) -> bool {
        self.occupant(cell).is_some()
    }

    /// Claim a free cell. Returns false if the cell is taken or off the grid.
    pub fn occupy(&mut self, cell: GridCell, entity: Entity) -> bool {
        if !cell.in_bounds() || self.is_occupied(cell) {
            return false;
        }
        self.cells[cell.row][cell.col as usize] = Some(entity);
        true
    }

    /// Free a cell, but only if `entity` is the one holding it.
    pub fn release(&mut self, cell: GridCell, entity: Entity) -> bool {
        if self.occupant(cell) != Some(entity) {
            return false;
        }
        self.cells[cell.row][cell.col as usize] = None;
        true
    }
}

/// Everything the engine tracks for the level being played.
#[derive(Debug, Clone)]
pub struct LevelSession {
    pub level: LevelConfig,
    /// Kinds the player may place this level.
    pub roster: Vec<DefenderKind>,
    pub balance: u32,
    pub occupancy: Occupancy,
    pub cooldowns: CooldownTable,
    pub waves: WaveState,
    /// Follow-up shots waiting to fire.
    pub pending_shots: Vec<PendingShot>,
}

impl LevelSession {
    pub fn new(level: LevelConfig, roster: Vec<DefenderKind>, broadcast_secs: f64) -> Self {
        Self {
            balance: level.initial_balance,
            occupancy: Occupancy::default(),
            cooldowns: CooldownTable::new(&roster, broadcast_secs),
            waves: WaveState::new(level.waves.len()),
            pending_shots: Vec::new(),
            roster,
            level,
        }
    }

    pub fn level_id(&self) -> u32 {
        self.level.id
    }
}
