use tracing::debug;

use crate::config::GridConfig;
use crate::maze::MazeModel;
use crate::player::PlayerHandle;
use crate::types::WorldPos;

pub fn touches<P: PlayerHandle + ?Sized>(agent: WorldPos, player: &P, grid: &GridConfig) -> bool {
    !player.is_dead() && agent.distance_sqr(player.position()) <= grid.collision_radius_sqr()
}

/// Returns `None` when there was no contact, otherwise the forfeited amount,
/// which is 0 for an invincible player.
pub fn resolve_contact<P: PlayerHandle + ?Sized>(
    agent: WorldPos,
    player: &mut P,
    maze: &mut MazeModel,
) -> Option<i32> {
    if !touches(agent, &*player, maze.grid_config()) {
        return None;
    }
    let position = player.position();
    let forfeited = player.kill();
    maze.drop_purse(position, forfeited);
    debug!(x = position.x, y = position.y, forfeited, "agent contact");
    Some(forfeited)
}


#[cfg(test)]
mod tests {
    use super::test_support::FakePlayer;
    use super::*;
    use crate::layout::MazeLayout;
    use crate::types::{Cell, PropKind};

    fn open_maze() -> MazeModel {
        let rows = vec!["........"; 8];
        let layout = MazeLayout::from_ascii("open", &rows).expect("layout");
        let grid = GridConfig {
            columns: 8,
            rows: 8,
            cell_size: 32.0,
        };
        MazeModel::from_layout(grid, layout).expect("maze")
    }

    #[test]
    fn contact_radius_is_half_a_cell() {
        let mut maze = open_maze();
        let mut player = FakePlayer::at(0.0, 10.0).with_score(40);
        let agent = WorldPos::new(0.0, 0.0);
        assert!(touches(agent, &player, maze.grid_config()));

        player.position = WorldPos::new(0.0, 17.0);
        assert_eq!(resolve_contact(agent, &mut player, &mut maze), None);
        assert!(!player.dead);
    }

    #[test]
    fn contact_kills_and_drops_forfeit() {
        let mut maze = open_maze();
        let mut player = FakePlayer::at(0.0, 5.0).with_score(40);
        assert_eq!(
            resolve_contact(WorldPos::new(0.0, 0.0), &mut player, &mut maze),
            Some(40)
        );
        assert!(player.dead);
        assert_eq!(maze.prop_at(Cell::new(0, 0)), PropKind::Purse);
        assert_eq!(maze.purse_payload(Cell::new(0, 0)), Some(40));
    }

    #[test]
    fn dead_player_is_ignored() {
        let mut maze = open_maze();
        let mut player = FakePlayer::at(0.0, 0.0).with_score(40);
        player.dead = true;
        assert_eq!(resolve_contact(WorldPos::new(0.0, 0.0), &mut player, &mut maze), None);
        assert!(maze.purse_positions().is_empty());
    }

    #[test]
    fn invincible_contact_drops_nothing() {
        let mut maze = open_maze();
        let mut player = FakePlayer::at(3.0, 3.0).with_score(40);
        player.invincible = true;
        assert_eq!(
            resolve_contact(WorldPos::new(0.0, 0.0), &mut player, &mut maze),
            Some(0)
        );
        assert!(!player.dead);
        assert!(maze.purse_positions().is_empty());
    }
}
