use tracing::debug;

use super::{heading, FollowStep, PathFollower};
use crate::animation::FrameAnimator;
use crate::collision::resolve_contact;
use crate::config::GridConfig;
use crate::constants::{
    AMBUSH_CROUCH_FRAME_COUNT, AMBUSH_CROUCH_FRAME_SECS, AMBUSH_PATROL_FRAME_COUNT,
    AMBUSH_PATROL_FRAME_SECS, AMBUSH_ROLL_FRAME_COUNT, AMBUSH_ROLL_FRAME_SECS,
    AMBUSH_ROLL_SPEED_CELLS, AMBUSH_WALK_SPEED_CELLS,
};
use crate::grid::OccupancyGrid;
use crate::maze::MazeModel;
use crate::pathfinding::find_path;
use crate::player::PlayerHandle;
use crate::rng::Rng;
use crate::types::{AgentKind, AgentView, Cell, WorldPos};

const SPRITE_BASE_DEG: f32 = 270.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmbushState {
    Patrol,
    Crouch,
    Roll,
    Hit,
}

impl AmbushState {
    pub fn as_str(self) -> &'static str {
        match self {
            AmbushState::Patrol => "patrol",
            AmbushState::Crouch => "crouch",
            AmbushState::Roll => "roll",
            AmbushState::Hit => "hit",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sighting {
    pub target: Cell,
    pub dcol: i32,
    pub drow: i32,
}

pub fn sight_line(from: Cell, to: Cell, occupancy: &OccupancyGrid) -> Option<Sighting> {
    if from.col == to.col {
        let drow = if from.row < to.row { 1 } else { -1 };
        let (low, high) = (from.row.min(to.row), from.row.max(to.row));
        if (low..=high).all(|row| occupancy.is_floor(Cell::new(from.col, row))) {
            return Some(Sighting {
                target: to,
                dcol: 0,
                drow,
            });
        }
    }
    if from.row == to.row {
        let dcol = if from.col < to.col { 1 } else { -1 };
        let (low, high) = (from.col.min(to.col), from.col.max(to.col));
        if (low..=high).all(|col| occupancy.is_floor(Cell::new(col, from.row))) {
            return Some(Sighting {
                target: to,
                dcol,
                drow: 0,
            });
        }
    }
    None
}

pub fn has_line_of_sight(from: Cell, to: Cell, occupancy: &OccupancyGrid) -> bool {
    sight_line(from, to, occupancy).is_some()
}

#[derive(Clone, Debug)]
pub struct AmbushAgent {
    grid: GridConfig,
    spawn: WorldPos,
    position: WorldPos,
    rotation: f32,
    state: AmbushState,
    animation: FrameAnimator,
    follower: PathFollower,
    sighting: Option<Sighting>,
    hit_player: bool,
}

impl AmbushAgent {
    pub fn new(grid: GridConfig, spawn: Cell) -> Self {
        let spawn = grid.cell_origin(spawn);
        Self {
            grid,
            spawn,
            position: spawn,
            rotation: 0.0,
            state: AmbushState::Patrol,
            animation: FrameAnimator::new(AMBUSH_PATROL_FRAME_COUNT),
            follower: PathFollower::default(),
            sighting: None,
            hit_player: false,
        }
    }

    pub fn reset(&mut self, occupancy: &OccupancyGrid, rng: &mut Rng) {
        self.position = self.spawn;
        self.sighting = None;
        self.hit_player = false;
        self.enter_patrol(occupancy, rng);
    }

    pub fn update<P: PlayerHandle>(
        &mut self,
        dt: f32,
        red: &mut P,
        blue: &mut P,
        maze: &mut MazeModel,
        rng: &mut Rng,
    ) {
        for player in [&mut *red, &mut *blue] {
            if resolve_contact(self.position, player, maze).is_some() {
                self.hit_player = true;
            }
        }

        match self.state {
            AmbushState::Patrol => self.update_patrol(dt, &*red, &*blue, maze.occupancy(), rng),
            AmbushState::Crouch => self.update_crouch(dt, maze.occupancy()),
            AmbushState::Roll => self.update_roll(dt),
            AmbushState::Hit => self.update_hit(dt, maze.occupancy(), rng),
        }
    }

    fn enter_patrol(&mut self, occupancy: &OccupancyGrid, rng: &mut Rng) {
        self.transition(AmbushState::Patrol);
        self.animation.switch_to(AMBUSH_PATROL_FRAME_COUNT);
        self.select_patrol_path(occupancy, rng);
    }

    fn update_patrol<P: PlayerHandle>(
        &mut self,
        dt: f32,
        red: &P,
        blue: &P,
        occupancy: &OccupancyGrid,
        rng: &mut Rng,
    ) {
        self.animation.tick_ping_pong(dt, AMBUSH_PATROL_FRAME_SECS);

        let here = self.grid.nearest_cell(self.position);
        for player in [red, blue] {
            if player.is_dead() {
                continue;
            }
            let there = self.grid.nearest_cell(player.position());
            if let Some(sighting) = sight_line(here, there, occupancy) {
                self.sighting = Some(sighting);
                self.enter_crouch();
                return;
            }
        }

        let speed = AMBUSH_WALK_SPEED_CELLS * self.grid.cell_size;
        match self.follower.follow(&mut self.position, dt, speed, &self.grid) {
            FollowStep::Moving { dx, dy } => self.rotation = heading(SPRITE_BASE_DEG, dx, dy),
            FollowStep::Advanced => {}
            FollowStep::Exhausted => self.select_patrol_path(occupancy, rng),
        }
    }

    // Walks down the column from a random cell, wrapping, then moves on to the
    // next column until a floor cell turns up.
    fn select_patrol_path(&mut self, occupancy: &OccupancyGrid, rng: &mut Rng) {
        let (columns, rows) = (self.grid.columns, self.grid.rows);
        let mut col = rng.pick_index(columns as usize) as i32;
        let mut row = rng.pick_index(rows as usize) as i32;

        'search: for _ in 0..columns {
            for _ in 0..rows {
                if occupancy.is_floor(Cell::new(col, row)) {
                    break 'search;
                }
                row = (row + 1) % rows;
            }
            col = (col + 1) % columns;
        }

        let start = self.grid.nearest_cell(self.position);
        let goal = Cell::new(col, row);
        self.follower.set(find_path(start, goal, occupancy));
        debug!(?goal, waypoints = self.follower.path().len(), "ambush patrol goal");
    }

    fn enter_crouch(&mut self) {
        self.transition(AmbushState::Crouch);
        self.animation.switch_to(AMBUSH_CROUCH_FRAME_COUNT);
    }

    fn update_crouch(&mut self, dt: f32, occupancy: &OccupancyGrid) {
        if self.animation.tick_looping(dt, AMBUSH_CROUCH_FRAME_SECS) {
            self.enter_roll(occupancy);
        }
    }

    fn enter_roll(&mut self, occupancy: &OccupancyGrid) {
        self.transition(AmbushState::Roll);
        self.animation.switch_to(AMBUSH_ROLL_FRAME_COUNT);
        self.hit_player = false;

        let target = match self.sighting {
            Some(sighting) => self.slide_target(sighting, occupancy),
            None => self.grid.nearest_cell(self.position),
        };
        self.follower.set(vec![target]);
    }

    fn slide_target(&self, sighting: Sighting, occupancy: &OccupancyGrid) -> Cell {
        let mut cell = sighting.target;
        while 0 < cell.col
            && cell.col < self.grid.columns - 1
            && 0 < cell.row
            && cell.row < self.grid.rows - 1
        {
            let next = cell.offset(sighting.dcol, sighting.drow);
            if occupancy.is_solid(next) {
                break;
            }
            cell = next;
        }
        cell
    }

    fn update_roll(&mut self, dt: f32) {
        self.animation.tick_looping(dt, AMBUSH_ROLL_FRAME_SECS);

        if self.hit_player {
            self.enter_hit();
            return;
        }

        let speed = AMBUSH_ROLL_SPEED_CELLS * self.grid.cell_size;
        match self.follower.follow(&mut self.position, dt, speed, &self.grid) {
            FollowStep::Moving { dx, dy } => self.rotation = heading(SPRITE_BASE_DEG, dx, dy),
            FollowStep::Advanced => {}
            FollowStep::Exhausted => self.enter_hit(),
        }
    }

    fn enter_hit(&mut self) {
        self.transition(AmbushState::Hit);
        self.animation.switch_to(AMBUSH_CROUCH_FRAME_COUNT);
        self.animation.restart_reversed();
    }

    fn update_hit(&mut self, dt: f32, occupancy: &OccupancyGrid, rng: &mut Rng) {
        if self.animation.tick_looping(dt, AMBUSH_CROUCH_FRAME_SECS) {
            self.enter_patrol(occupancy, rng);
        }
    }

    fn transition(&mut self, next: AmbushState) {
        if self.state != next {
            debug!(from = self.state.as_str(), to = next.as_str(), "ambush state");
        }
        self.state = next;
    }

    pub fn state(&self) -> AmbushState {
        self.state
    }

    pub fn position(&self) -> WorldPos {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn animation_frame(&self) -> usize {
        self.animation.frame()
    }

    pub fn path(&self) -> &[Cell] {
        self.follower.path()
    }

    pub fn view(&self) -> AgentView {
        AgentView {
            kind: AgentKind::Ambush,
            x: self.position.x,
            y: self.position.y,
            rotation: self.rotation,
            frame: self.animation.frame(),
            state: Some(self.state.as_str()),
        }
    }
}
