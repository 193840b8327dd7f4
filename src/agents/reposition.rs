use tracing::debug;

use crate::animation::FrameAnimator;
use crate::collision::resolve_contact;
use crate::config::GridConfig;
use crate::constants::{
    REPOSITION_FRAME_COUNT, REPOSITION_FRAME_SECS, REPOSITION_MOVE_SECS, REPOSITION_RADIUS_CELLS,
};
use crate::grid::OccupancyGrid;
use crate::maze::MazeModel;
use crate::player::PlayerHandle;
use crate::rng::Rng;
use crate::types::{AgentKind, AgentView, Cell, WorldPos};

#[derive(Clone, Debug)]
pub struct RepositionAgent {
    grid: GridConfig,
    spawn: WorldPos,
    position: WorldPos,
    move_secs: f32,
    animation: FrameAnimator,
}

impl RepositionAgent {
    pub fn new(grid: GridConfig, spawn: Cell) -> Self {
        let spawn = grid.cell_origin(spawn);
        Self {
            grid,
            spawn,
            position: spawn,
            move_secs: 0.0,
            animation: FrameAnimator::new(REPOSITION_FRAME_COUNT),
        }
    }

    pub fn reset(&mut self) {
        self.position = self.spawn;
        self.move_secs = 0.0;
        self.animation.restart();
    }

    pub fn update<P: PlayerHandle>(
        &mut self,
        dt: f32,
        red: &mut P,
        blue: &mut P,
        maze: &mut MazeModel,
        rng: &mut Rng,
    ) {
        self.move_secs += dt;
        if self.move_secs >= REPOSITION_MOVE_SECS {
            self.move_secs -= REPOSITION_MOVE_SECS;
            let anchor = if rng.bool(0.5) {
                blue.position()
            } else {
                red.position()
            };
            self.relocate(anchor, rng.angle(), maze.occupancy());
        }

        self.animation.tick_ping_pong(dt, REPOSITION_FRAME_SECS);

        resolve_contact(self.position, red, maze);
        resolve_contact(self.position, blue, maze);
    }

    /// A column with no floor leaves the agent where it is.
    fn relocate(&mut self, anchor: WorldPos, angle: f32, occupancy: &OccupancyGrid) {
        let reach = REPOSITION_RADIUS_CELLS * self.grid.cell_size;
        let landing = WorldPos::new(anchor.x + angle.sin() * reach, anchor.y + angle.cos() * reach);
        let mut cell = self.grid.clamp(self.grid.containing_cell(landing));

        for _ in 0..self.grid.rows {
            if occupancy.is_floor(cell) {
                self.position = self.grid.cell_origin(cell);
                debug!(?cell, "reposition agent moved");
                return;
            }
            cell.row = (cell.row + 1) % self.grid.rows;
        }
    }

    pub fn position(&self) -> WorldPos {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        0.0
    }

    pub fn animation_frame(&self) -> usize {
        self.animation.frame()
    }

    pub fn view(&self) -> AgentView {
        AgentView {
            kind: AgentKind::Reposition,
            x: self.position.x,
            y: self.position.y,
            rotation: 0.0,
            frame: self.animation.frame(),
            state: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::test_support::FakePlayer;
    use crate::layout::MazeLayout;
    use crate::types::PropKind;

    fn maze(rows: &[&str]) -> MazeModel {
        let layout = MazeLayout::from_ascii("test", rows).expect("layout");
        let grid = GridConfig {
            columns: rows[0].len() as i32,
            rows: rows.len() as i32,
            cell_size: 32.0,
        };
        MazeModel::from_layout(grid, layout).expect("maze")
    }

    #[test]
    fn waits_for_full_interval() {
        let mut maze = maze(&["...................."; 20]);
        let mut rng = Rng::new(1);
        let mut agent = RepositionAgent::new(*maze.grid_config(), Cell::new(2, 2));
        let mut red = FakePlayer::at(320.0, 320.0);
        let mut blue = FakePlayer::at(320.0, 320.0);

        for _ in 0..9 {
            agent.update(1.0, &mut red, &mut blue, &mut maze, &mut rng);
        }
        assert_eq!(agent.position(), WorldPos::new(64.0, 64.0));

        agent.update(1.0, &mut red, &mut blue, &mut maze, &mut rng);
        assert_ne!(agent.position(), WorldPos::new(64.0, 64.0));
    }

    #[test]
    fn lands_six_cells_from_anchor_on_a_corner() {
        let mut maze = maze(&["...................."; 20]);
        let seed = 42;
        let mut rng = Rng::new(seed);
        let mut agent = RepositionAgent::new(*maze.grid_config(), Cell::new(0, 0));
        let mut red = FakePlayer::at(320.0, 320.0);
        let mut blue = FakePlayer::at(320.0, 320.0);

        let mut expected_rng = Rng::new(seed);
        expected_rng.bool(0.5);
        let angle = expected_rng.angle();
        let expected = Cell::new(
            ((320.0 + angle.sin() * 192.0) / 32.0).floor() as i32,
            ((320.0 + angle.cos() * 192.0) / 32.0).floor() as i32,
        );

        agent.update(10.0, &mut red, &mut blue, &mut maze, &mut rng);
        assert_eq!(agent.position(), maze.grid_config().cell_origin(expected));
    }

    #[test]
    fn scans_down_column_past_walls() {
        let occupancy = OccupancyGrid::from_rows(&["....", ".#..", ".#..", "...."]);
        let grid = GridConfig {
            columns: 4,
            rows: 4,
            cell_size: 32.0,
        };
        let mut agent = RepositionAgent::new(grid, Cell::new(3, 3));

        // lands on the wall at (1, 1) and settles on (1, 3)
        agent.relocate(WorldPos::new(40.0, -160.0), 0.0, &occupancy);
        assert_eq!(agent.position(), WorldPos::new(32.0, 96.0));
    }

    #[test]
    fn wraps_to_top_of_column() {
        let occupancy = OccupancyGrid::from_rows(&["....", ".#..", ".#..", ".#.."]);
        let grid = GridConfig {
            columns: 4,
            rows: 4,
            cell_size: 32.0,
        };
        let mut agent = RepositionAgent::new(grid, Cell::new(3, 3));
        agent.relocate(WorldPos::new(40.0, 0.0), 0.0, &occupancy);
        assert_eq!(agent.position(), WorldPos::new(32.0, 0.0));
    }

    #[test]
    fn solid_column_keeps_position() {
        let occupancy = OccupancyGrid::from_rows(&[".#..", ".#..", ".#..", ".#.."]);
        let grid = GridConfig {
            columns: 4,
            rows: 4,
            cell_size: 32.0,
        };
        let mut agent = RepositionAgent::new(grid, Cell::new(3, 3));
        agent.relocate(WorldPos::new(40.0, 0.0), 0.0, &occupancy);
        assert_eq!(agent.position(), WorldPos::new(96.0, 96.0));
    }

    #[test]
    fn contact_checked_every_frame() {
        let mut maze = maze(&["........"; 8]);
        let mut rng = Rng::new(8);
        let mut agent = RepositionAgent::new(*maze.grid_config(), Cell::new(3, 3));
        let mut red = FakePlayer::at(96.0, 100.0).with_score(250);
        let mut blue = FakePlayer::at(0.0, 0.0);

        agent.update(0.016, &mut red, &mut blue, &mut maze, &mut rng);
        assert!(red.dead);
        assert!(!blue.dead);
        assert_eq!(maze.prop_at(Cell::new(3, 3)), PropKind::Purse);
        assert_eq!(maze.purse_payload(Cell::new(3, 3)), Some(100));
    }
}
