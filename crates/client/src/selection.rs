//! Piece selection state machine.
//!
//! Only two checks happen on the client: the clicked piece must belong to the
//! local player and it must be that player's turn. Whether a move is legal is
//! for the server alone to decide.

use tracing::debug;
use xiangqi_core::{GameState, Move, Position, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    /// Index into the pieces of the snapshot that was current when selected.
    PieceSelected(usize),
}

/// What a click amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Nothing happened: empty cell, opponent piece, wrong turn, or no game.
    Ignored,
    Selected(usize),
    /// The selected piece's own cell was clicked again.
    Cancelled,
    /// A move to hand to the server. The machine is already back to idle.
    Propose(Move),
}

#[derive(Debug)]
pub struct SelectionMachine {
    player: Side,
    state: Selection,
}

impl SelectionMachine {
    pub fn new(player: Side) -> Self {
        Self {
            player,
            state: Selection::Idle,
        }
    }

    pub fn player(&self) -> Side {
        self.player
    }

    pub fn state(&self) -> Selection {
        self.state
    }

    /// Drop any selection. Called whenever a new snapshot is installed.
    pub fn reset(&mut self) {
        self.state = Selection::Idle;
    }

    /// Feed a click at logical coordinate `pos` against the current snapshot.
    pub fn click(&mut self, game: Option<&GameState>, pos: Position) -> ClickAction {
        let Some(game) = game else {
            self.state = Selection::Idle;
            return ClickAction::Ignored;
        };

        match self.state {
            Selection::Idle => {
                if game.game_over || game.current_turn != self.player {
                    debug!(%pos, turn = %game.current_turn, "Click ignored: not our turn");
                    return ClickAction::Ignored;
                }
                match game.find_piece(pos, self.player) {
                    Some(index) => {
                        debug!(index, %pos, "Piece selected");
                        self.state = Selection::PieceSelected(index);
                        ClickAction::Selected(index)
                    }
                    None => {
                        debug!(%pos, "Click ignored: no own piece");
                        ClickAction::Ignored
                    }
                }
            }
            Selection::PieceSelected(index) => {
                self.state = Selection::Idle;
                let Some(piece) = game.pieces.get(index) else {
                    return ClickAction::Ignored;
                };
                if piece.position == pos {
                    debug!(index, "Selection cancelled");
                    ClickAction::Cancelled
                } else {
                    ClickAction::Propose(Move::new(index, pos))
                }
            }
        }
    }
}
