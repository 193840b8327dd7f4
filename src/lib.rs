pub mod agents;
pub mod animation;
pub mod collision;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod grid;
pub mod layout;
pub mod maze;
pub mod pathfinding;
pub mod player;
pub mod rng;
pub mod types;
