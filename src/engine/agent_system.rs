use super::*;
use crate::player::PlayerHandle;

impl MatchEngine {
    pub(super) fn reset_agents(&mut self) {
        let [red, blue] = &self.players;
        let occupancy = self.maze.occupancy();
        self.pursuers[0].reset(red.position(), occupancy);
        self.pursuers[1].reset(blue.position(), occupancy);
        self.ambush.reset(occupancy, &mut self.rng);
        self.reposition.reset();
    }

    // Each agent kills through `PlayerHandle`, so a player downed by an
    // earlier agent is already dead for the ones after it.
    pub(super) fn update_agents(&mut self, dt: f32) {
        let [red, blue] = &mut self.players;
        self.pursuers[0].update(dt, red, blue, &mut self.maze);
        self.pursuers[1].update(dt, blue, red, &mut self.maze);
        self.ambush.update(dt, red, blue, &mut self.maze, &mut self.rng);
        self.reposition.update(dt, red, blue, &mut self.maze, &mut self.rng);
    }
}
