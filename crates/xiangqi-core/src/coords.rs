//! Mapping between rendered grid cells and logical board coordinates.
//!
//! The server's origin is bottom-left: `y = 0` is the first player's home rank.
//! The rendered grid is drawn top-to-bottom, so row 0 is logical rank 9.
//! Every lookup, highlight and outgoing move goes through this module; nothing
//! else in the workspace should compute `9 - y` itself.

use serde::{Deserialize, Serialize};

/// Number of files (columns), `x ∈ [0, 8]`.
pub const FILES: u8 = 9;

/// Number of ranks (rows), `y ∈ [0, 9]`.
pub const RANKS: u8 = 10;

/// A logical board coordinate in the server's convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    /// Returns `None` when the coordinate is off the board.
    pub fn new(x: u8, y: u8) -> Option<Self> {
        let pos = Self { x, y };
        pos.in_bounds().then_some(pos)
    }

    pub fn in_bounds(&self) -> bool {
        self.x < FILES && self.y < RANKS
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A cell of the rendered grid. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualCell {
    pub row: u8,
    pub col: u8,
}

impl VisualCell {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < RANKS && col < FILES).then_some(Self { row, col })
    }

    /// All 90 cells in drawing order: top row first, left to right.
    pub fn all() -> impl Iterator<Item = VisualCell> {
        (0..RANKS).flat_map(|row| (0..FILES).map(move |col| VisualCell { row, col }))
    }
}

/// Translate a clicked grid cell into the server's coordinate.
pub fn visual_to_logical(cell: VisualCell) -> Option<Position> {
    if cell.row >= RANKS || cell.col >= FILES {
        return None;
    }
    Some(Position {
        x: cell.col,
        y: RANKS - 1 - cell.row,
    })
}

/// Translate a server coordinate into the grid cell it is drawn in.
pub fn logical_to_visual(pos: Position) -> Option<VisualCell> {
    if !pos.in_bounds() {
        return None;
    }
    Some(VisualCell {
        row: RANKS - 1 - pos.y,
        col: pos.x,
    })
}
