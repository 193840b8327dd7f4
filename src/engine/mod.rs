use tracing::info;

use crate::agents::{AmbushAgent, PursuerAgent, RepositionAgent};
use crate::config::MatchConfig;
use crate::error::MazeError;
use crate::layout::LayoutLibrary;
use crate::maze::MazeModel;
use crate::player::Player;
use crate::rng::Rng;
use crate::types::{MatchSnapshot, PlayerColor, PlayerInput};

mod agent_system;
mod player_system;

#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: MatchConfig,
    seed: u32,
    rng: Rng,
    maze: MazeModel,
    players: [Player; 2],
    pursuers: [PursuerAgent; 2],
    ambush: AmbushAgent,
    reposition: RepositionAgent,
    frame: u64,
    elapsed_secs: f32,
}

impl MatchEngine {
    pub fn new(config: MatchConfig, library: LayoutLibrary, seed: u32) -> Result<Self, MazeError> {
        let grid = config.grid;
        let mut engine = Self {
            seed,
            rng: Rng::new(seed),
            maze: MazeModel::new(grid, library),
            players: [
                Player::new(PlayerColor::Red, grid),
                Player::new(PlayerColor::Blue, grid),
            ],
            pursuers: [
                PursuerAgent::new(grid, config.pursuer_spawns[0]),
                PursuerAgent::new(grid, config.pursuer_spawns[1]),
            ],
            ambush: AmbushAgent::new(grid, config.ambush_spawn),
            reposition: RepositionAgent::new(grid, config.reposition_spawn),
            frame: 0,
            elapsed_secs: 0.0,
            config,
        };
        engine.reset()?;
        Ok(engine)
    }

    pub fn with_random_seed(config: MatchConfig, library: LayoutLibrary) -> Result<Self, MazeError> {
        let seed = rand::random::<u32>();
        info!(seed, "seeding match");
        Self::new(config, library, seed)
    }

    pub fn reset(&mut self) -> Result<(), MazeError> {
        self.maze.reset(&mut self.rng)?;
        self.frame = 0;
        self.elapsed_secs = 0.0;
        self.reset_players();
        self.reset_agents();
        info!(
            layout = self.maze.layout_name(),
            coins = self.maze.coin_positions().len(),
            "match reset"
        );
        Ok(())
    }

    pub fn step(&mut self, dt: f32, inputs: [PlayerInput; 2]) {
        self.frame += 1;
        self.elapsed_secs += dt;

        self.maze.update(dt);
        self.update_players(dt, inputs);
        self.update_agents(dt);
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            frame: self.frame,
            elapsed_secs: self.elapsed_secs,
            players: self.players.iter().map(Player::view).collect(),
            agents: vec![
                self.pursuers[0].view(),
                self.pursuers[1].view(),
                self.ambush.view(),
                self.reposition.view(),
            ],
            props: self.maze.props_view(),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn maze(&self) -> &MazeModel {
        &self.maze
    }

    pub fn player(&self, color: PlayerColor) -> &Player {
        match color {
            PlayerColor::Red => &self.players[0],
            PlayerColor::Blue => &self.players[1],
        }
    }

    pub fn pursuers(&self) -> &[PursuerAgent; 2] {
        &self.pursuers
    }

    pub fn ambush(&self) -> &AmbushAgent {
        &self.ambush
    }

    pub fn reposition(&self) -> &RepositionAgent {
        &self.reposition
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_secs
    }
}
