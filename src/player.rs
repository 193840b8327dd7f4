use tracing::debug;

use crate::animation::FrameAnimator;
use crate::config::GridConfig;
use crate::constants::{
    COIN_SCORE, PLAYER_DEATH_FRAME_COUNT, PLAYER_DEATH_FRAME_SECS, PLAYER_FRAME_SECS,
    PLAYER_INPUT_THRESHOLD, PLAYER_WALK_FRAME_COUNT, PLAYER_WALK_SPEED_CELLS, PURSE_DROP_AMOUNT,
    RAD_TO_DEG, STAR_POWER_SECS, TREASURE_SCORE,
};
use crate::grid::OccupancyGrid;
use crate::maze::MazeModel;
use crate::types::{Cell, PlayerColor, PlayerInput, PlayerView, PropKind, WorldPos};

/// What agents may see of, and do to, a player.
///
/// `kill` enforces invincibility and death itself: it returns the forfeited
/// score, or 0 when the player cannot currently be killed.
pub trait PlayerHandle {
    fn position(&self) -> WorldPos;
    fn is_dead(&self) -> bool;
    fn kill(&mut self) -> i32;
    fn apply_prop(&mut self, kind: PropKind, amount: i32);
}

#[derive(Clone, Debug)]
pub struct Player {
    color: PlayerColor,
    grid: GridConfig,
    spawn: WorldPos,
    spawn_rotation: f32,
    position: WorldPos,
    rotation: f32,
    score: i32,
    dead: bool,
    star_power_secs: f32,
    input: PlayerInput,
    walk: FrameAnimator,
    death: FrameAnimator,
}

impl Player {
    pub fn new(color: PlayerColor, grid: GridConfig) -> Self {
        let spawn_y = grid.cell_size * (1 + (grid.rows - 2) / 2) as f32;
        let (spawn, spawn_rotation) = match color {
            PlayerColor::Red => (
                WorldPos::new(grid.cell_size * (grid.columns - 2) as f32, spawn_y),
                90.0,
            ),
            PlayerColor::Blue => (WorldPos::new(grid.cell_size, spawn_y), 270.0),
        };
        Self {
            color,
            grid,
            spawn,
            spawn_rotation,
            position: spawn,
            rotation: spawn_rotation,
            score: 0,
            dead: false,
            star_power_secs: 0.0,
            input: PlayerInput::IDLE,
            walk: FrameAnimator::new(PLAYER_WALK_FRAME_COUNT),
            death: FrameAnimator::new(PLAYER_DEATH_FRAME_COUNT),
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.dead = false;
        self.star_power_secs = 0.0;
        self.input = PlayerInput::IDLE;
        self.walk.restart();
        self.death.restart();
        self.respawn();
    }

    fn respawn(&mut self) {
        self.position = self.spawn;
        self.rotation = self.spawn_rotation;
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn spawn(&self) -> WorldPos {
        self.spawn
    }

    pub fn has_star_power(&self) -> bool {
        self.star_power_secs > 0.0
    }

    #[cfg(test)]
    pub(crate) fn set_position(&mut self, position: WorldPos) {
        self.position = position;
    }

    pub fn animation_frame(&self) -> usize {
        if self.dead {
            self.death.frame()
        } else {
            self.walk.frame()
        }
    }

    pub fn update_movement(&mut self, dt: f32, input: PlayerInput) {
        if self.dead {
            if !self.death.tick_looping(dt, PLAYER_DEATH_FRAME_SECS) {
                return;
            }
            self.dead = false;
            self.death.restart();
            self.respawn();
            debug!(color = ?self.color, "player respawned");
        }

        if self.star_power_secs > 0.0 {
            self.star_power_secs = (self.star_power_secs - dt).max(0.0);
        }

        self.input = input;
        if input.x.abs() > PLAYER_INPUT_THRESHOLD || input.y.abs() > PLAYER_INPUT_THRESHOLD {
            let magnitude = (input.x * input.x + input.y * input.y).sqrt();
            self.input = PlayerInput::new(input.x / magnitude, input.y / magnitude);
            self.rotation = 90.0 + self.input.y.atan2(-self.input.x) * RAD_TO_DEG;

            let speed = PLAYER_WALK_SPEED_CELLS * self.grid.cell_size * dt;
            self.position.x += self.input.x * speed;
            self.position.y += self.input.y * speed;
            self.walk.tick_looping(dt, PLAYER_FRAME_SECS);
        } else {
            self.walk.restart();
        }
    }

    pub fn handle_wall_collisions(&mut self, occupancy: &OccupancyGrid) {
        let radius = self.grid.half_cell();
        let half = self.grid.half_cell();
        let origin = self.grid.containing_cell(self.position);

        for col in (origin.col - 1).max(0)..(origin.col + 2).min(self.grid.columns) {
            for row in (origin.row - 1).max(0)..(origin.row + 2).min(self.grid.rows) {
                if !occupancy.is_solid(Cell::new(col, row)) {
                    continue;
                }
                let tile_center_x = col as f32 * self.grid.cell_size + half;
                let tile_center_y = row as f32 * self.grid.cell_size + half;
                let center_x = self.position.x + radius;
                let center_y = self.position.y + radius;

                let closest_x = tile_center_x + (center_x - tile_center_x).clamp(-half, half);
                let closest_y = tile_center_y + (center_y - tile_center_y).clamp(-half, half);

                let distance_x = center_x - closest_x;
                let distance_y = center_y - closest_y;
                let distance_sqr = distance_x * distance_x + distance_y * distance_y;
                if distance_sqr >= radius * radius {
                    continue;
                }

                if distance_sqr > 0.0 {
                    let magnitude = distance_sqr.sqrt();
                    let penetration = radius - magnitude;
                    self.position.x += distance_x / magnitude * penetration;
                    self.position.y += distance_y / magnitude * penetration;
                } else {
                    self.position.x = closest_x + self.input.x * radius;
                    self.position.y = closest_y + self.input.y * radius;
                }
            }
        }
    }

    pub fn collect_props(&mut self, maze: &mut MazeModel) {
        if self.dead {
            return;
        }
        let (kind, payload) = maze.handle_collection(self.position);
        if kind != PropKind::None {
            self.apply_prop(kind, payload);
        }
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            color: self.color,
            x: self.position.x,
            y: self.position.y,
            rotation: self.rotation,
            score: self.score,
            dead: self.dead,
            star_power: self.has_star_power(),
            frame: self.animation_frame(),
        }
    }
}

impl PlayerHandle for Player {
    fn position(&self) -> WorldPos {
        self.position
    }

    fn is_dead(&self) -> bool {
        self.dead
    }

    fn kill(&mut self) -> i32 {
        if self.has_star_power() || self.dead {
            return 0;
        }
        self.dead = true;
        self.death.restart();

        let forfeited = self.score.clamp(0, PURSE_DROP_AMOUNT);
        self.score -= forfeited;
        debug!(color = ?self.color, forfeited, "player killed");
        forfeited
    }

    fn apply_prop(&mut self, kind: PropKind, amount: i32) {
        match kind {
            PropKind::Coin => self.score += COIN_SCORE,
            PropKind::Treasure => self.score += TREASURE_SCORE,
            PropKind::Purse => self.score += amount,
            PropKind::Star => self.star_power_secs = STAR_POWER_SECS,
            PropKind::None => {}
        }
    }
}
