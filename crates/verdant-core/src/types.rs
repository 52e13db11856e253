//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::{CELL_HEIGHT, CELL_WIDTH, GRID_COLS, GRID_OFFSET_X, GRID_OFFSET_Y, GRID_ROWS};

/// Continuous centre position plus footprint, in design-space pixels.
/// x grows to the right (toward the attacker spawn), y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Lane and column of a grid-bound entity. Derived from `Position`, never the reverse.
/// Columns may be negative or past the grid for entities outside the lawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: usize,
    pub col: i32,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each step).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Strict axis-aligned bounding box overlap. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Position) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Horizontal overlap only, for lane-bound checks where rows already match.
    pub fn overlaps_horizontally(&self, other: &Position) -> bool {
        (self.x - other.x).abs() < (self.width + other.width) / 2.0
    }
}

impl GridCell {
    pub fn new(row: usize, col: i32) -> Self {
        Self { row, col }
    }

    /// Whether this cell lies on the placement grid.
    pub fn in_bounds(&self) -> bool {
        self.row < GRID_ROWS && self.col >= 0 && (self.col as usize) < GRID_COLS
    }

    /// Centre of the cell in design space.
    pub fn center(&self) -> (f64, f64) {
        (
            GRID_OFFSET_X + self.col as f64 * CELL_WIDTH + CELL_WIDTH / 2.0,
            lane_center_y(self.row),
        )
    }
}

impl SimTime {
    /// Advance by one step of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Vertical centre of a lane.
pub fn lane_center_y(row: usize) -> f64 {
    GRID_OFFSET_Y + row as f64 * CELL_HEIGHT + CELL_HEIGHT / 2.0
}

/// Column index containing `x`. Unbounded: values left of the lawn are negative.
pub fn column_of(x: f64) -> i32 {
    ((x - GRID_OFFSET_X) / CELL_WIDTH).floor() as i32
}

/// Map a design-space point to the grid cell under it, if any.
pub fn world_to_grid(x: f64, y: f64) -> Option<GridCell> {
    let col = column_of(x);
    let row = ((y - GRID_OFFSET_Y) / CELL_HEIGHT).floor();
    if row < 0.0 {
        return None;
    }
    let cell = GridCell::new(row as usize, col);
    cell.in_bounds().then_some(cell)
}
