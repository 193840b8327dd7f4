pub mod ambush;
pub mod pursuer;
pub mod reposition;

pub use self::ambush::{has_line_of_sight, sight_line, AmbushAgent, AmbushState, Sighting};
pub use self::pursuer::PursuerAgent;
pub use self::reposition::RepositionAgent;

use crate::config::GridConfig;
use crate::constants::{PATH_ARRIVED_CELLS, RAD_TO_DEG};
use crate::types::{Cell, WorldPos};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum FollowStep {
    Moving { dx: f32, dy: f32 },
    Advanced,
    Exhausted,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct PathFollower {
    path: Vec<Cell>,
    index: usize,
}

impl PathFollower {
    pub(crate) fn set(&mut self, path: Vec<Cell>) {
        self.path = path;
        self.index = 0;
    }

    pub(crate) fn path(&self) -> &[Cell] {
        &self.path
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.index >= self.path.len()
    }

    pub(crate) fn follow(
        &mut self,
        position: &mut WorldPos,
        dt: f32,
        speed: f32,
        grid: &GridConfig,
    ) -> FollowStep {
        let Some(&node) = self.path.get(self.index) else {
            return FollowStep::Exhausted;
        };
        let target = grid.cell_origin(node);
        let dx = target.x - position.x;
        let dy = target.y - position.y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance <= PATH_ARRIVED_CELLS * grid.cell_size {
            self.index += 1;
            return FollowStep::Advanced;
        }

        let step = (speed * dt).min(distance);
        position.x += dx * step / distance;
        position.y += dy * step / distance;
        FollowStep::Moving { dx, dy }
    }
}

pub(crate) fn heading(base: f32, dx: f32, dy: f32) -> f32 {
    base + dy.atan2(-dx) * RAD_TO_DEG
}
