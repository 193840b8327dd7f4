use super::*;

impl MatchEngine {
    pub(super) fn reset_players(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
    }

    pub(super) fn update_players(&mut self, dt: f32, inputs: [PlayerInput; 2]) {
        for (player, input) in self.players.iter_mut().zip(inputs) {
            player.update_movement(dt, input);
        }
        for player in &mut self.players {
            player.handle_wall_collisions(self.maze.occupancy());
        }
        for player in &mut self.players {
            player.collect_props(&mut self.maze);
        }
    }
}
