pub const DEFAULT_COLUMN_COUNT: i32 = 30;
pub const DEFAULT_ROW_COUNT: i32 = 17;
pub const DEFAULT_CELL_SIZE: f32 = 32.0;

pub const PATH_ARRIVED_CELLS: f32 = 0.05;

pub const CHASE_WALK_SPEED_CELLS: f32 = 3.0;
pub const CHASE_REPLAN_SECS: f32 = 6.0;
pub const CHASE_FRAME_SECS: f32 = 0.15;
pub const CHASE_FRAME_COUNT: usize = 4;

pub const AMBUSH_WALK_SPEED_CELLS: f32 = 2.0;
pub const AMBUSH_ROLL_SPEED_CELLS: f32 = 3.75;
pub const AMBUSH_PATROL_FRAME_SECS: f32 = 0.15;
pub const AMBUSH_CROUCH_FRAME_SECS: f32 = 0.2;
pub const AMBUSH_ROLL_FRAME_SECS: f32 = 0.1;
pub const AMBUSH_PATROL_FRAME_COUNT: usize = 3;
pub const AMBUSH_CROUCH_FRAME_COUNT: usize = 3;
pub const AMBUSH_ROLL_FRAME_COUNT: usize = 6;

pub const REPOSITION_MOVE_SECS: f32 = 10.0;
pub const REPOSITION_FRAME_SECS: f32 = 0.15;
pub const REPOSITION_FRAME_COUNT: usize = 4;
pub const REPOSITION_RADIUS_CELLS: f32 = 6.0;

pub const PLAYER_WALK_SPEED_CELLS: f32 = 4.0;
pub const PLAYER_FRAME_SECS: f32 = 0.1;
pub const PLAYER_WALK_FRAME_COUNT: usize = 6;
pub const PLAYER_DEATH_FRAME_SECS: f32 = 0.2;
pub const PLAYER_DEATH_FRAME_COUNT: usize = 8;
pub const PLAYER_INPUT_THRESHOLD: f32 = 0.5;
pub const STAR_POWER_SECS: f32 = 10.0;

pub const COIN_SCORE: i32 = 10;
pub const TREASURE_SCORE: i32 = COIN_SCORE * 10;
pub const PURSE_DROP_AMOUNT: i32 = 100;
pub const LAYOUT_PURSE_PAYLOAD: i32 = PURSE_DROP_AMOUNT;

pub const COIN_FRAME_SECS: f32 = 0.15;
pub const COIN_FRAME_COUNT: usize = 4;
pub const STAR_FRAME_SECS: f32 = 0.15;
pub const STAR_FRAME_COUNT: usize = 8;
pub const SHIMMER_FRAME_SECS: f32 = 0.1;
pub const SHIMMER_FRAME_COUNT: usize = 6;

pub const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;
