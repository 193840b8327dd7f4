use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::GridConfig;
use crate::error::MazeError;
use crate::rng::Rng;
use crate::types::PropKind;

pub const WALL_COLOR: u32 = 0x000000;
pub const FLOOR_COLOR: u32 = 0xFFFFFF;
pub const COIN_COLOR: u32 = 0xFFFF00;
pub const TREASURE_COLOR: u32 = 0xFF00FF;
pub const PURSE_COLOR: u32 = 0xFF8000;
pub const STAR_COLOR: u32 = 0xFF0000;

const FLOOR_RED_THRESHOLD: u32 = 0xFF;

const LAYOUT_FILE_EXTENSION: &str = "json";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTile {
    Wall,
    Floor(PropKind),
}

impl LayoutTile {
    pub fn from_color(color: u32) -> Self {
        if color == WALL_COLOR || ((color >> 16) & 0xFF) < FLOOR_RED_THRESHOLD {
            return Self::Wall;
        }
        match color & 0xFF_FFFF {
            COIN_COLOR => Self::Floor(PropKind::Coin),
            TREASURE_COLOR => Self::Floor(PropKind::Treasure),
            PURSE_COLOR => Self::Floor(PropKind::Purse),
            STAR_COLOR => Self::Floor(PropKind::Star),
            _ => Self::Floor(PropKind::None),
        }
    }
}

fn color_for_tile(tile: char) -> Option<u32> {
    match tile {
        '#' => Some(WALL_COLOR),
        '.' | ' ' => Some(FLOOR_COLOR),
        'c' => Some(COIN_COLOR),
        't' => Some(TREASURE_COLOR),
        'p' => Some(PURSE_COLOR),
        's' => Some(STAR_COLOR),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    name: String,
    width: i32,
    height: i32,
    pixels: Vec<u32>,
}

impl MazeLayout {
    pub fn from_pixels(name: impl Into<String>, width: i32, height: i32, pixels: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            width: width.max(0),
            height: height.max(0),
            pixels,
        }
    }

    pub fn from_ascii<S: AsRef<str>>(name: impl Into<String>, rows: &[S]) -> Result<Self, MazeError> {
        let name = name.into();
        let expected = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        let mut pixels = Vec::with_capacity(expected * rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != expected {
                return Err(MazeError::RaggedLayout {
                    name,
                    row: row_idx,
                    found,
                    expected,
                });
            }
            for (col_idx, tile) in row.chars().enumerate() {
                let Some(color) = color_for_tile(tile) else {
                    return Err(MazeError::UnknownTile {
                        name,
                        tile,
                        col: col_idx,
                        row: row_idx,
                    });
                };
                pixels.push(color);
            }
        }
        Ok(Self {
            name,
            width: expected as i32,
            height: rows.len() as i32,
            pixels,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn color_at(&self, col: i32, row: i32) -> u32 {
        if col < 0 || row < 0 || col >= self.width || row >= self.height {
            return WALL_COLOR;
        }
        self.pixels
            .get((row * self.width + col) as usize)
            .copied()
            .unwrap_or(WALL_COLOR)
    }

    pub fn tile_at(&self, col: i32, row: i32) -> LayoutTile {
        LayoutTile::from_color(self.color_at(col, row))
    }

    pub fn ensure_fits(&self, grid: &GridConfig) -> Result<(), MazeError> {
        if self.width < grid.columns || self.height < grid.rows {
            return Err(MazeError::LayoutTooSmall {
                name: self.name.clone(),
                width: self.width,
                height: self.height,
                columns: grid.columns,
                rows: grid.rows,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct LayoutFile {
    #[serde(default)]
    name: Option<String>,
    rows: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct LayoutLibrary {
    layouts: Vec<MazeLayout>,
}

impl LayoutLibrary {
    pub fn new(layouts: Vec<MazeLayout>) -> Result<Self, MazeError> {
        if layouts.is_empty() {
            return Err(MazeError::NoLayouts);
        }
        Ok(Self { layouts })
    }

    pub fn load_dir(dir: &Path) -> Result<Self, MazeError> {
        let mut layouts = Vec::new();
        for path in layout_files(dir)? {
            layouts.push(load_layout_file(&path)?);
        }
        info!(dir = %dir.display(), count = layouts.len(), "loaded maze layouts");
        Self::new(layouts)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn layouts(&self) -> &[MazeLayout] {
        &self.layouts
    }

    pub fn pick(&self, rng: &mut Rng) -> &MazeLayout {
        &self.layouts[rng.pick_index(self.layouts.len())]
    }
}

pub fn layout_files(dir: &Path) -> Result<Vec<PathBuf>, MazeError> {
    let io_error = |source: std::io::Error| MazeError::LayoutIo {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_layout = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == LAYOUT_FILE_EXTENSION);
        if is_layout {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

pub fn load_layout_file(path: &Path) -> Result<MazeLayout, MazeError> {
    let text = fs::read_to_string(path).map_err(|source| MazeError::LayoutIo {
        path: path.to_path_buf(),
        source,
    })?;
    let file: LayoutFile =
        serde_json::from_str(&text).map_err(|source| MazeError::LayoutParse {
            path: path.to_path_buf(),
            source,
        })?;
    let name = file.name.unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default()
    });
    debug!(path = %path.display(), %name, "decoding layout file");
    MazeLayout::from_ascii(name, &file.rows)
}
