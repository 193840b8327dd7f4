use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Cell, PropKind};

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("no maze layouts available")]
    NoLayouts,

    #[error(
        "layout {name:?} is {width}x{height}, smaller than the {columns}x{rows} grid"
    )]
    LayoutTooSmall {
        name: String,
        width: i32,
        height: i32,
        columns: i32,
        rows: i32,
    },

    #[error("layout {name:?} has ragged rows: row {row} is {found} wide, expected {expected}")]
    RaggedLayout {
        name: String,
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("layout {name:?} uses unknown tile {tile:?} at ({col},{row})")]
    UnknownTile {
        name: String,
        tile: char,
        col: usize,
        row: usize,
    },

    #[error("failed to read layout {path}: {source}")]
    LayoutIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse layout {path}: {source}")]
    LayoutParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("prop mask holds {mask:?} at {cell:?} but its position list disagrees")]
    PropListMismatch { cell: Cell, mask: PropKind },

    #[error("purse at {cell:?} has no payload entry")]
    MissingPayload { cell: Cell },

    #[error("payload entry at {cell:?} has no purse")]
    OrphanPayload { cell: Cell },
}
