use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::Parser;
use maze_heist::config::GridConfig;
use maze_heist::constants::{DEFAULT_CELL_SIZE, DEFAULT_COLUMN_COUNT, DEFAULT_ROW_COUNT};
use maze_heist::layout::{layout_files, load_layout_file, MazeLayout};
use maze_heist::maze::MazeModel;
use maze_heist::pathfinding::find_path;
use maze_heist::player::Player;
use maze_heist::types::{Cell, PlayerColor};
use serde::Serialize;
use tracing::{info, warn};

/// Checks maze layout files: size, prop counts and reachability from the Red
/// spawn.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    layouts: PathBuf,
    #[arg(long, default_value_t = DEFAULT_COLUMN_COUNT)]
    columns: i32,
    #[arg(long, default_value_t = DEFAULT_ROW_COUNT)]
    rows: i32,
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    cell_size: f32,
    /// One JSON report per line instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
struct PropCounts {
    coins: usize,
    treasures: usize,
    purses: usize,
    stars: usize,
}

#[derive(Clone, Debug, Serialize)]
struct LayoutReport {
    file: String,
    layout: String,
    #[serde(rename = "checkedAt")]
    checked_at: String,
    width: i32,
    height: i32,
    #[serde(rename = "floorCells")]
    floor_cells: usize,
    /// Floor cells the Red spawn cannot reach. Reported, never fatal.
    #[serde(rename = "isolatedFloor")]
    isolated_floor: usize,
    props: PropCounts,
    #[serde(rename = "unreachableProps")]
    unreachable_props: Vec<Cell>,
    #[serde(rename = "unreachableSpawns")]
    unreachable_spawns: Vec<PlayerColor>,
    errors: Vec<String>,
}

impl LayoutReport {
    fn new(path: &Path, layout: &str, width: i32, height: i32) -> Self {
        Self {
            file: path.display().to_string(),
            layout: layout.to_string(),
            checked_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            width,
            height,
            floor_cells: 0,
            isolated_floor: 0,
            props: PropCounts::default(),
            unreachable_props: Vec::new(),
            unreachable_spawns: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn unreadable(path: &Path, error: String) -> Self {
        let mut report = Self::new(path, "", 0, 0);
        report.errors.push(error);
        report
    }

    fn passed(&self) -> bool {
        self.errors.is_empty()
            && self.unreachable_props.is_empty()
            && self.unreachable_spawns.is_empty()
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let grid = GridConfig {
        columns: cli.columns,
        rows: cli.rows,
        cell_size: cli.cell_size,
    };
    let files = layout_files(&cli.layouts)
        .with_context(|| format!("listing layouts in {}", cli.layouts.display()))?;
    if files.is_empty() {
        bail!("no *.json layouts in {}", cli.layouts.display());
    }

    let mut failures = 0usize;
    for path in &files {
        let report = match load_layout_file(path) {
            Ok(layout) => audit_layout(path, &layout, &grid),
            Err(error) => LayoutReport::unreadable(path, error.to_string()),
        };
        if !report.passed() {
            failures += 1;
            warn!(file = %report.file, errors = report.errors.len(), "layout failed");
        }
        if cli.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_report(&report);
        }
    }

    info!(files = files.len(), failures, "lint finished");
    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn audit_layout(path: &Path, layout: &MazeLayout, grid: &GridConfig) -> LayoutReport {
    let mut report = LayoutReport::new(path, layout.name(), layout.width(), layout.height());
    let maze = match MazeModel::from_layout(*grid, layout.clone()) {
        Ok(maze) => maze,
        Err(error) => {
            report.errors.push(error.to_string());
            return report;
        }
    };

    let occupancy = maze.occupancy();
    report.floor_cells = occupancy.floor_count();
    report.props = PropCounts {
        coins: maze.coin_positions().len(),
        treasures: maze.treasure_positions().len(),
        purses: maze.purse_positions().len(),
        stars: maze.star_positions().len(),
    };

    let red = grid.nearest_cell(Player::new(PlayerColor::Red, *grid).spawn());
    let blue = grid.nearest_cell(Player::new(PlayerColor::Blue, *grid).spawn());
    if occupancy.is_solid(red) {
        report.errors.push(format!("red spawn {red:?} is a wall"));
        return report;
    }
    let reachable = |goal: Cell| !find_path(red, goal, occupancy).is_empty();

    if !reachable(blue) {
        report.unreachable_spawns.push(PlayerColor::Blue);
    }
    report.unreachable_props = maze
        .coin_positions()
        .iter()
        .chain(maze.treasure_positions())
        .chain(maze.purse_positions())
        .chain(maze.star_positions())
        .copied()
        .filter(|&cell| !reachable(cell))
        .collect();
    report.isolated_floor = occupancy.floor_cells().filter(|&cell| !reachable(cell)).count();
    report
}

fn print_report(report: &LayoutReport) {
    let verdict = if report.passed() { "ok" } else { "FAIL" };
    println!(
        "{verdict:4} {} ({}) {}x{} floor={} isolated={} coins={} treasures={} purses={} stars={}",
        report.file,
        report.layout,
        report.width,
        report.height,
        report.floor_cells,
        report.isolated_floor,
        report.props.coins,
        report.props.treasures,
        report.props.purses,
        report.props.stars,
    );
    for error in &report.errors {
        println!("     error: {error}");
    }
    for color in &report.unreachable_spawns {
        println!("     unreachable spawn: {color:?}");
    }
    for cell in &report.unreachable_props {
        println!("     unreachable prop at ({}, {})", cell.col, cell.row);
    }
}
