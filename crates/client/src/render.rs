//! Board renderer: a pure function from snapshot and selection to a visual grid.

use std::fmt;

use xiangqi_core::{logical_to_visual, visual_to_logical, GameState, Piece, Position, VisualCell, FILES, RANKS};

use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub cell: VisualCell,
    pub position: Position,
    pub piece: Option<Piece>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// 90 cells in drawing order: top row first.
    cells: Vec<CellView>,
    pub status: String,
}

impl BoardView {
    /// `None` for a cell off the board, even if it was built without `VisualCell::new`.
    pub fn cell(&self, cell: VisualCell) -> Option<&CellView> {
        if cell.row >= RANKS || cell.col >= FILES {
            return None;
        }
        self.cells.get(cell.row as usize * FILES as usize + cell.col as usize)
    }

    pub fn cells(&self) -> &[CellView] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(FILES as usize)
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.piece.is_some()).count()
    }

    pub fn selected_cell(&self) -> Option<VisualCell> {
        self.cells.iter().find(|c| c.selected).map(|c| c.cell)
    }
}

pub fn render(state: Option<&GameState>, selection: Selection) -> BoardView {
    let selected_at = match (state, selection) {
        (Some(game), Selection::PieceSelected(index)) => game
            .pieces
            .get(index)
            .and_then(|p| logical_to_visual(p.position)),
        _ => None,
    };

    let cells = VisualCell::all()
        .filter_map(|cell| {
            let position = visual_to_logical(cell)?;
            let piece = state.and_then(|g| g.piece_at(position)).map(|(_, p)| *p);
            Some(CellView {
                cell,
                position,
                piece,
                selected: selected_at == Some(cell),
            })
        })
        .collect();

    let status = match state {
        None => "Start a new game".to_string(),
        Some(game) => match game.outcome() {
            Some(outcome) => format!("Game Over! {outcome}"),
            None => format!("Current Turn: {}", game.current_turn),
        },
    };

    BoardView { cells, status }
}

/// Plain-text board for terminals. The selected cell is marked with `>`.
impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..FILES {
            write!(f, "  {col}")?;
        }
        writeln!(f)?;

        for (row, cells) in self.rows().enumerate() {
            write!(f, "{row:>2}")?;
            for cell in cells {
                let mark = if cell.selected { '>' } else { ' ' };
                let glyph = cell.piece.map(|p| p.glyph()).unwrap_or('＋');
                write!(f, "{mark}{glyph}")?;
            }
            writeln!(f)?;
            // River between the two halves.
            if row + 1 == RANKS as usize / 2 {
                writeln!(f, "   {}", "~".repeat(FILES as usize * 3 - 1))?;
            }
        }
        write!(f, "{}", self.status)
    }
}
