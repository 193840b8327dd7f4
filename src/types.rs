use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn offset(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    pub fn manhattan(self, other: Cell) -> i32 {
        (self.col - other.col).abs() + (self.row - other.row).abs()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_sqr(self, other: WorldPos) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropKind {
    #[default]
    None,
    Coin,
    Treasure,
    Purse,
    Star,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerColor {
    Red,
    Blue,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerInput {
    pub x: f32,
    pub y: f32,
}

impl PlayerInput {
    pub const IDLE: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Pursuer,
    Ambush,
    Reposition,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    pub color: PlayerColor,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub score: i32,
    pub dead: bool,
    #[serde(rename = "starPower")]
    pub star_power: bool,
    pub frame: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct AgentView {
    pub kind: AgentKind,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub frame: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PropFrames {
    pub coin: usize,
    pub star: usize,
    pub shimmer: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct PropsView {
    pub coins: Vec<Cell>,
    pub treasures: Vec<Cell>,
    pub purses: Vec<Cell>,
    pub stars: Vec<Cell>,
    pub frames: PropFrames,
}

#[derive(Clone, Debug, Serialize)]
pub struct MatchSnapshot {
    pub frame: u64,
    #[serde(rename = "elapsedSecs")]
    pub elapsed_secs: f32,
    pub players: Vec<PlayerView>,
    pub agents: Vec<AgentView>,
    pub props: PropsView,
}
