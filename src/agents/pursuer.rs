use tracing::debug;

use super::{heading, FollowStep, PathFollower};
use crate::animation::FrameAnimator;
use crate::collision::resolve_contact;
use crate::config::GridConfig;
use crate::constants::{
    CHASE_FRAME_COUNT, CHASE_FRAME_SECS, CHASE_REPLAN_SECS, CHASE_WALK_SPEED_CELLS,
};
use crate::grid::OccupancyGrid;
use crate::maze::MazeModel;
use crate::pathfinding::find_path;
use crate::player::PlayerHandle;
use crate::types::{AgentKind, AgentView, Cell, WorldPos};

const SPRITE_BASE_DEG: f32 = 90.0;

#[derive(Clone, Debug)]
pub struct PursuerAgent {
    grid: GridConfig,
    spawn: WorldPos,
    position: WorldPos,
    rotation: f32,
    animation: FrameAnimator,
    follower: PathFollower,
    replan_secs: f32,
}

impl PursuerAgent {
    pub fn new(grid: GridConfig, spawn: Cell) -> Self {
        let spawn = grid.cell_origin(spawn);
        Self {
            grid,
            spawn,
            position: spawn,
            rotation: 0.0,
            animation: FrameAnimator::new(CHASE_FRAME_COUNT),
            follower: PathFollower::default(),
            replan_secs: 0.0,
        }
    }

    pub fn reset(&mut self, target: WorldPos, occupancy: &OccupancyGrid) {
        self.position = self.spawn;
        self.animation.restart();
        self.plan_toward(target, occupancy);
    }

    pub fn update<P: PlayerHandle>(
        &mut self,
        dt: f32,
        target: &mut P,
        other: &mut P,
        maze: &mut MazeModel,
    ) {
        self.animation.tick_ping_pong(dt, CHASE_FRAME_SECS);

        if self.follower.is_exhausted() {
            let goal = chase_goal(&*target, &*other);
            self.plan_toward(goal, maze.occupancy());
        } else {
            let speed = CHASE_WALK_SPEED_CELLS * self.grid.cell_size;
            if let FollowStep::Moving { dx, dy } =
                self.follower.follow(&mut self.position, dt, speed, &self.grid)
            {
                self.rotation = heading(SPRITE_BASE_DEG, dx, dy);
            }

            self.replan_secs += dt;
            if self.replan_secs >= CHASE_REPLAN_SECS {
                let goal = chase_goal(&*target, &*other);
                self.plan_toward(goal, maze.occupancy());
            }
        }

        for player in [target, other] {
            if resolve_contact(self.position, player, maze).is_some() {
                debug!(x = self.position.x, y = self.position.y, "pursuer returning to spawn");
                self.plan_toward(self.spawn, maze.occupancy());
            }
        }
    }

    fn plan_toward(&mut self, goal: WorldPos, occupancy: &OccupancyGrid) {
        let start = self.grid.nearest_cell(self.position);
        let goal = self.grid.nearest_cell(goal);
        self.follower.set(find_path(start, goal, occupancy));
        self.replan_secs = 0.0;
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
            kind: AgentKind::Pursuer,
            x: self.position.x,
            y: self.position.y,
            rotation: self.rotation,
            frame: self.animation.frame(),
            state: None,
        }
    }
}

// A dead target is ignored in favour of a live second player.
fn chase_goal<P: PlayerHandle>(target: &P, other: &P) -> WorldPos {
    if target.is_dead() && !other.is_dead() {
        other.position()
    } else {
        target.position()
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

    fn open_maze() -> MazeModel {
        maze(&["..........", "..........", "..........", "..........", ".........."])
    }

    #[test]
    fn reset_plans_to_target_cell() {
        let maze = open_maze();
        let mut pursuer = PursuerAgent::new(*maze.grid_config(), Cell::new(0, 0));
        pursuer.reset(WorldPos::new(4.0 * 32.0, 0.0), maze.occupancy());
        assert_eq!(pursuer.path().first(), Some(&Cell::new(0, 0)));
        assert_eq!(pursuer.path().last(), Some(&Cell::new(4, 0)));
        assert_eq!(pursuer.path().len(), 5);
    }

    #[test]
    fn walks_toward_target_and_faces_travel() {
        let mut maze = open_maze();
        let mut pursuer = PursuerAgent::new(*maze.grid_config(), Cell::new(0, 0));
        let mut red = FakePlayer::at(9.0 * 32.0, 0.0);
        let mut blue = FakePlayer::at(9.0 * 32.0, 4.0 * 32.0);
        pursuer.reset(red.position, maze.occupancy());

        for _ in 0..20 {
            pursuer.update(0.05, &mut red, &mut blue, &mut maze);
        }
        assert!(pursuer.position().x > 32.0);
        assert_eq!(pursuer.position().y, 0.0);
        // moving toward +x with a 90 degree sprite base
        assert!((pursuer.rotation() - 270.0).abs() < 1e-3);
    }

    #[test]
    fn contact_kills_drops_purse_and_heads_home() {
        let mut maze = open_maze();
        let mut pursuer = PursuerAgent::new(*maze.grid_config(), Cell::new(0, 0));
        let mut red = FakePlayer::at(5.0, 0.0).with_score(70);
        let mut blue = FakePlayer::at(9.0 * 32.0, 4.0 * 32.0);
        pursuer.reset(WorldPos::new(9.0 * 32.0, 0.0), maze.occupancy());

        pursuer.update(0.01, &mut red, &mut blue, &mut maze);
        assert!(red.dead);
        assert_eq!(maze.prop_at(Cell::new(0, 0)), PropKind::Purse);
        assert_eq!(maze.purse_payload(Cell::new(0, 0)), Some(70));
        assert_eq!(pursuer.path(), &[Cell::new(0, 0)]);
        assert!(!blue.dead);
    }

    #[test]
    fn invincible_contact_still_replans_home() {
        let mut maze = open_maze();
        let mut pursuer = PursuerAgent::new(*maze.grid_config(), Cell::new(0, 0));
        let mut red = FakePlayer::at(0.0, 5.0).with_score(70);
        red.invincible = true;
        let mut blue = FakePlayer::at(9.0 * 32.0, 4.0 * 32.0);
        pursuer.reset(WorldPos::new(9.0 * 32.0, 0.0), maze.occupancy());

        pursuer.update(0.01, &mut red, &mut blue, &mut maze);
        assert!(!red.dead);
        assert!(maze.purse_positions().is_empty());
        assert_eq!(pursuer.path(), &[Cell::new(0, 0)]);
    }

    #[test]
    fn periodic_replan_tracks_moving_target() {
        let mut maze = maze(&[
            "..............................",
            "..............................",
        ]);
        let mut pursuer = PursuerAgent::new(*maze.grid_config(), Cell::new(0, 0));
        let mut red = FakePlayer::at(29.0 * 32.0, 0.0);
        let mut blue = FakePlayer::at(29.0 * 32.0, 32.0);
        pursuer.reset(red.position, maze.occupancy());
        assert_eq!(pursuer.path().last(), Some(&Cell::new(29, 0)));

        red.position = WorldPos::new(29.0 * 32.0, 32.0);
        for _ in 0..61 {
            pursuer.update(0.1, &mut red, &mut blue, &mut maze);
        }
        assert_eq!(pursuer.path().last(), Some(&Cell::new(29, 1)));
    }

    #[test]
    fn dead_target_falls_back_to_other_player() {
        let mut red = FakePlayer::at(0.0, 0.0);
        let blue = FakePlayer::at(64.0, 64.0);
        red.dead = true;
        assert_eq!(chase_goal(&red, &blue), blue.position);

        let mut blue = blue;
        blue.dead = true;
        assert_eq!(chase_goal(&red, &blue), red.position);
    }

    #[test]
    fn view_reports_pursuer_without_state() {
        let maze = open_maze();
        let pursuer = PursuerAgent::new(*maze.grid_config(), Cell::new(2, 1));
        let view = pursuer.view();
        assert_eq!(view.kind, AgentKind::Pursuer);
        assert_eq!((view.x, view.y), (64.0, 32.0));
        assert!(view.state.is_none());
    }
}
