use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CELL_SIZE, DEFAULT_COLUMN_COUNT, DEFAULT_ROW_COUNT};
use crate::types::{Cell, WorldPos};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub columns: i32,
    pub rows: i32,
    #[serde(rename = "cellSize")]
    pub cell_size: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMN_COUNT,
            rows: DEFAULT_ROW_COUNT,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl GridConfig {
    pub fn half_cell(&self) -> f32 {
        self.cell_size * 0.5
    }

    pub fn cell_count(&self) -> usize {
        (self.columns.max(0) as usize) * (self.rows.max(0) as usize)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.col >= 0 && cell.row >= 0 && cell.col < self.columns && cell.row < self.rows
    }

    /// Cell whose corner is closest to `pos`. Used wherever an entity's
    /// position is snapped to the grid: planning, sight lines, props.
    pub fn nearest_cell(&self, pos: WorldPos) -> Cell {
        let half = self.half_cell();
        Cell {
            col: ((pos.x + half) / self.cell_size).floor() as i32,
            row: ((pos.y + half) / self.cell_size).floor() as i32,
        }
    }

    /// Cell that contains `pos`. Used for occupancy lookups around a point.
    pub fn containing_cell(&self, pos: WorldPos) -> Cell {
        Cell {
            col: (pos.x / self.cell_size).floor() as i32,
            row: (pos.y / self.cell_size).floor() as i32,
        }
    }

    pub fn clamp(&self, cell: Cell) -> Cell {
        Cell {
            col: cell.col.clamp(0, (self.columns - 1).max(0)),
            row: cell.row.clamp(0, (self.rows - 1).max(0)),
        }
    }

    pub fn cell_origin(&self, cell: Cell) -> WorldPos {
        WorldPos {
            x: cell.col as f32 * self.cell_size,
            y: cell.row as f32 * self.cell_size,
        }
    }

    pub fn collision_radius_sqr(&self) -> f32 {
        self.half_cell() * self.half_cell()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub grid: GridConfig,
    #[serde(rename = "pursuerSpawns")]
    pub pursuer_spawns: [Cell; 2],
    #[serde(rename = "ambushSpawn")]
    pub ambush_spawn: Cell,
    #[serde(rename = "repositionSpawn")]
    pub reposition_spawn: Cell,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            pursuer_spawns: [Cell::new(14, 1), Cell::new(14, 15)],
            ambush_spawn: Cell::new(23, 13),
            reposition_spawn: Cell::new(21, 11),
        }
    }
}
