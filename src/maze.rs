use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::animation::FrameAnimator;
use crate::config::GridConfig;
use crate::constants::{
    COIN_FRAME_COUNT, COIN_FRAME_SECS, LAYOUT_PURSE_PAYLOAD, SHIMMER_FRAME_COUNT,
    SHIMMER_FRAME_SECS, STAR_FRAME_COUNT, STAR_FRAME_SECS,
};
use crate::error::MazeError;
use crate::grid::OccupancyGrid;
use crate::layout::{LayoutLibrary, LayoutTile, MazeLayout};
use crate::rng::Rng;
use crate::types::{Cell, PropFrames, PropKind, PropsView, WorldPos};

#[derive(Clone, Debug)]
struct PropAnimation {
    coin: FrameAnimator,
    star: FrameAnimator,
    shimmer: FrameAnimator,
}

impl PropAnimation {
    fn new() -> Self {
        Self {
            coin: FrameAnimator::new(COIN_FRAME_COUNT),
            star: FrameAnimator::new(STAR_FRAME_COUNT),
            shimmer: FrameAnimator::new(SHIMMER_FRAME_COUNT),
        }
    }

    fn restart(&mut self) {
        self.coin.restart();
        self.star.restart();
        self.shimmer.restart();
    }

    fn tick(&mut self, dt: f32) {
        self.coin.tick_ping_pong(dt, COIN_FRAME_SECS);
        self.star.tick_looping(dt, STAR_FRAME_SECS);
        self.shimmer.tick_looping(dt, SHIMMER_FRAME_SECS);
    }
}

#[derive(Clone, Debug)]
pub struct MazeModel {
    grid: GridConfig,
    library: LayoutLibrary,
    layout_name: String,
    occupancy: OccupancyGrid,
    props: Vec<PropKind>,
    coin_positions: Vec<Cell>,
    treasure_positions: Vec<Cell>,
    purse_positions: Vec<Cell>,
    star_positions: Vec<Cell>,
    purse_payloads: BTreeMap<Cell, i32>,
    animation: PropAnimation,
}

impl MazeModel {
    pub fn new(grid: GridConfig, library: LayoutLibrary) -> Self {
        Self {
            grid,
            library,
            layout_name: String::new(),
            occupancy: OccupancyGrid::open(&grid),
            props: vec![PropKind::None; grid.cell_count()],
            coin_positions: Vec::new(),
            treasure_positions: Vec::new(),
            purse_positions: Vec::new(),
            star_positions: Vec::new(),
            purse_payloads: BTreeMap::new(),
            animation: PropAnimation::new(),
        }
    }

    pub fn from_layout(grid: GridConfig, layout: MazeLayout) -> Result<Self, MazeError> {
        let mut maze = Self::new(grid, LayoutLibrary::new(vec![layout])?);
        maze.reset(&mut Rng::new(0))?;
        Ok(maze)
    }

    pub fn reset(&mut self, rng: &mut Rng) -> Result<(), MazeError> {
        let layout = self.library.pick(rng).clone();
        layout.ensure_fits(&self.grid)?;

        self.animation.restart();
        self.coin_positions.clear();
        self.treasure_positions.clear();
        self.purse_positions.clear();
        self.star_positions.clear();
        self.purse_payloads.clear();
        self.props.fill(PropKind::None);
        self.occupancy = OccupancyGrid::open(&self.grid);

        for col in 0..self.grid.columns {
            for row in 0..self.grid.rows {
                let cell = Cell::new(col, row);
                match layout.tile_at(col, row) {
                    LayoutTile::Wall => self.occupancy.set_solid(cell, true),
                    LayoutTile::Floor(PropKind::None) => {}
                    LayoutTile::Floor(kind) => {
                        self.place_prop(cell, kind);
                        if kind == PropKind::Purse {
                            self.purse_payloads.insert(cell, LAYOUT_PURSE_PAYLOAD);
                        }
                    }
                }
            }
        }

        self.layout_name = layout.name().to_string();
        info!(
            layout = %self.layout_name,
            floor = self.occupancy.floor_count(),
            coins = self.coin_positions.len(),
            treasures = self.treasure_positions.len(),
            purses = self.purse_positions.len(),
            stars = self.star_positions.len(),
            "maze reset"
        );
        Ok(())
    }

    pub fn update(&mut self, dt: f32) {
        self.animation.tick(dt);
    }

    pub fn handle_collection(&mut self, pos: WorldPos) -> (PropKind, i32) {
        let cell = self.grid.nearest_cell(pos);
        let Some(idx) = self.occupancy.index(cell) else {
            return (PropKind::None, 0);
        };
        let kind = std::mem::take(&mut self.props[idx]);
        if kind == PropKind::None {
            return (PropKind::None, 0);
        }
        self.remove_from_list(kind, cell);

        let payload = if kind == PropKind::Purse {
            self.purse_payloads.remove(&cell).unwrap_or_else(|| {
                warn!(?cell, "collected purse without payload");
                0
            })
        } else {
            0
        };
        debug!(?cell, ?kind, payload, "prop collected");
        (kind, payload)
    }

    pub fn drop_purse(&mut self, pos: WorldPos, amount: i32) {
        if amount <= 0 {
            return;
        }
        let cell = self.grid.nearest_cell(pos);
        let Some(idx) = self.occupancy.index(cell) else {
            return;
        };

        match self.props[idx] {
            PropKind::None => self.place_prop(cell, PropKind::Purse),
            PropKind::Purse => {
                if let Some(previous) = self.purse_payloads.get(&cell) {
                    warn!(?cell, previous, amount, "purse dropped onto purse; payload replaced");
                }
            }
            existing => {
                self.remove_from_list(existing, cell);
                self.props[idx] = PropKind::None;
                self.place_prop(cell, PropKind::Purse);
            }
        }
        self.purse_payloads.insert(cell, amount);
        debug!(?cell, amount, "purse dropped");
    }

    pub fn occupancy(&self) -> &OccupancyGrid {
        &self.occupancy
    }

    pub fn grid_config(&self) -> &GridConfig {
        &self.grid
    }

    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }

    pub fn prop_at(&self, cell: Cell) -> PropKind {
        self.occupancy
            .index(cell)
            .map(|idx| self.props[idx])
            .unwrap_or(PropKind::None)
    }

    pub fn purse_payload(&self, cell: Cell) -> Option<i32> {
        self.purse_payloads.get(&cell).copied()
    }

    pub fn coin_positions(&self) -> &[Cell] {
        &self.coin_positions
    }

    pub fn treasure_positions(&self) -> &[Cell] {
        &self.treasure_positions
    }

    pub fn purse_positions(&self) -> &[Cell] {
        &self.purse_positions
    }

    pub fn star_positions(&self) -> &[Cell] {
        &self.star_positions
    }

    pub fn frames(&self) -> PropFrames {
        PropFrames {
            coin: self.animation.coin.frame(),
            star: self.animation.star.frame(),
            shimmer: self.animation.shimmer.frame(),
        }
    }

    pub fn props_view(&self) -> PropsView {
        PropsView {
            coins: self.coin_positions.clone(),
            treasures: self.treasure_positions.clone(),
            purses: self.purse_positions.clone(),
            stars: self.star_positions.clone(),
            frames: self.frames(),
        }
    }

    pub fn check_invariants(&self) -> Result<(), MazeError> {
        let mut listed = vec![0u8; self.props.len()];
        for kind in [
            PropKind::Coin,
            PropKind::Treasure,
            PropKind::Purse,
            PropKind::Star,
        ] {
            for &cell in self.positions(kind) {
                let Some(idx) = self.occupancy.index(cell) else {
                    return Err(MazeError::PropListMismatch {
                        cell,
                        mask: PropKind::None,
                    });
                };
                if self.props[idx] != kind {
                    return Err(MazeError::PropListMismatch {
                        cell,
                        mask: self.props[idx],
                    });
                }
                listed[idx] = listed[idx].saturating_add(1);
            }
        }

        for cell in (0..self.grid.rows)
            .flat_map(|row| (0..self.grid.columns).map(move |col| Cell::new(col, row)))
        {
            let Some(idx) = self.occupancy.index(cell) else {
                continue;
            };
            let mask = self.props[idx];
            if mask != PropKind::None && listed[idx] != 1 {
                return Err(MazeError::PropListMismatch { cell, mask });
            }
            if mask == PropKind::Purse && !self.purse_payloads.contains_key(&cell) {
                return Err(MazeError::MissingPayload { cell });
            }
        }

        for &cell in self.purse_payloads.keys() {
            if self.prop_at(cell) != PropKind::Purse {
                return Err(MazeError::OrphanPayload { cell });
            }
        }
        Ok(())
    }

    fn positions(&self, kind: PropKind) -> &[Cell] {
        match kind {
            PropKind::Coin => &self.coin_positions,
            PropKind::Treasure => &self.treasure_positions,
            PropKind::Purse => &self.purse_positions,
            PropKind::Star => &self.star_positions,
            PropKind::None => &[],
        }
    }

    fn positions_mut(&mut self, kind: PropKind) -> Option<&mut Vec<Cell>> {
        match kind {
            PropKind::Coin => Some(&mut self.coin_positions),
            PropKind::Treasure => Some(&mut self.treasure_positions),
            PropKind::Purse => Some(&mut self.purse_positions),
            PropKind::Star => Some(&mut self.star_positions),
            PropKind::None => None,
        }
    }

    fn place_prop(&mut self, cell: Cell, kind: PropKind) {
        let Some(idx) = self.occupancy.index(cell) else {
            return;
        };
        self.props[idx] = kind;
        if let Some(list) = self.positions_mut(kind) {
            list.push(cell);
        }
    }

    fn remove_from_list(&mut self, kind: PropKind, cell: Cell) {
        let Some(list) = self.positions_mut(kind) else {
            return;
        };
        if let Some(pos) = list.iter().position(|listed| *listed == cell) {
            list.remove(pos);
        } else {
            warn!(?cell, ?kind, "prop missing from its position list");
        }
    }
}
