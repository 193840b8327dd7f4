use crate::config::GridConfig;
use crate::types::Cell;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    columns: i32,
    rows: i32,
    solid: Vec<bool>,
}

impl OccupancyGrid {
    pub fn open(config: &GridConfig) -> Self {
        Self {
            columns: config.columns,
            rows: config.rows,
            solid: vec![false; config.cell_count()],
        }
    }

    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as i32;
        let mut grid = Self {
            columns: width,
            rows: height,
            solid: vec![false; (width * height) as usize],
        };
        for (y, row) in rows.iter().enumerate() {
            for (x, tile) in row.bytes().enumerate() {
                grid.set_solid(Cell::new(x as i32, y as i32), tile == b'#');
            }
        }
        grid
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.col >= 0 && cell.row >= 0 && cell.col < self.columns && cell.row < self.rows
    }

    pub(crate) fn index(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some((cell.row * self.columns + cell.col) as usize)
    }

    pub fn is_solid(&self, cell: Cell) -> bool {
        self.index(cell)
            .and_then(|idx| self.solid.get(idx).copied())
            .unwrap_or(true)
    }

    pub fn is_floor(&self, cell: Cell) -> bool {
        !self.is_solid(cell)
    }

    pub(crate) fn set_solid(&mut self, cell: Cell, solid: bool) {
        if let Some(idx) = self.index(cell) {
            self.solid[idx] = solid;
        }
    }

    pub fn floor_count(&self) -> usize {
        self.solid.iter().filter(|solid| !**solid).count()
    }

    pub fn floor_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns)
                .map(move |col| Cell::new(col, row))
                .filter(move |cell| self.is_floor(*cell))
        })
    }
}
