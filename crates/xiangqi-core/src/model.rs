use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::coords::Position;
use crate::error::StateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// First player, moves first, home rank `y = 0`.
    Red,
    /// Second player, home rank `y = 9`.
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Red => "Red",
            Side::Black => "Black",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "first" => Ok(Side::Red),
            "black" | "second" => Ok(Side::Black),
            other => Err(format!("unknown side '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

impl PieceType {
    /// Traditional glyph for this piece as drawn for `side`.
    pub fn glyph(self, side: Side) -> char {
        match (self, side) {
            (PieceType::General, Side::Red) => '帥',
            (PieceType::General, Side::Black) => '將',
            (PieceType::Advisor, Side::Red) => '仕',
            (PieceType::Advisor, Side::Black) => '士',
            (PieceType::Elephant, Side::Red) => '相',
            (PieceType::Elephant, Side::Black) => '象',
            (PieceType::Horse, _) => '馬',
            (PieceType::Chariot, _) => '車',
            (PieceType::Cannon, Side::Red) => '炮',
            (PieceType::Cannon, Side::Black) => '砲',
            (PieceType::Soldier, Side::Red) => '兵',
            (PieceType::Soldier, Side::Black) => '卒',
        }
    }
}

/// One piece on the wire: `{"type": .., "side": .., "x": .., "y": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: PieceType,
    pub side: Side,
    #[serde(flatten)]
    pub position: Position,
}

impl Piece {
    pub fn new(kind: PieceType, side: Side, x: u8, y: u8) -> Self {
        Self {
            kind,
            side,
            position: Position { x, y },
        }
    }

    pub fn glyph(&self) -> char {
        self.kind.glyph(self.side)
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(side) => write!(f, "{} wins!", side.label().to_uppercase()),
            Outcome::Draw => f.write_str("Draw!"),
        }
    }
}

/// Server-confirmed snapshot of a game.
///
/// A piece's index in `pieces` is its identifier in the move protocol and is
/// only meaningful against the snapshot it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub pieces: Vec<Piece>,
    pub current_turn: Side,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub winner: Option<Side>,
}

impl GameState {
    /// The standard starting position, first player on ranks 0-3.
    pub fn standard() -> Self {
        let mut pieces = Vec::with_capacity(32);
        for side in [Side::Red, Side::Black] {
            // Mirror ranks for the second player.
            let rank = |r: u8| match side {
                Side::Red => r,
                Side::Black => 9 - r,
            };
            let back = [
                (PieceType::General, 4),
                (PieceType::Advisor, 3),
                (PieceType::Advisor, 5),
                (PieceType::Elephant, 2),
                (PieceType::Elephant, 6),
                (PieceType::Horse, 1),
                (PieceType::Horse, 7),
                (PieceType::Chariot, 0),
                (PieceType::Chariot, 8),
            ];
            for (kind, x) in back {
                pieces.push(Piece::new(kind, side, x, rank(0)));
            }
            for x in [1, 7] {
                pieces.push(Piece::new(PieceType::Cannon, side, x, rank(2)));
            }
            for x in [0, 2, 4, 6, 8] {
                pieces.push(Piece::new(PieceType::Soldier, side, x, rank(3)));
            }
        }

        Self {
            pieces,
            current_turn: Side::Red,
            game_over: false,
            winner: None,
        }
    }

    /// The piece standing on `pos`, with its index.
    pub fn piece_at(&self, pos: Position) -> Option<(usize, &Piece)> {
        self.pieces
            .iter()
            .enumerate()
            .find(|(_, p)| p.position == pos)
    }

    /// Index of the piece of `side` standing on `pos`.
    pub fn find_piece(&self, pos: Position, side: Side) -> Option<usize> {
        self.pieces
            .iter()
            .position(|p| p.position == pos && p.side == side)
    }

    /// `None` while the game is running.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.game_over {
            return None;
        }
        Some(match self.winner {
            Some(side) => Outcome::Winner(side),
            None => Outcome::Draw,
        })
    }

    /// Check the invariants a server snapshot must satisfy before it is installed.
    pub fn validate(&self) -> Result<(), StateError> {
        let mut occupied = HashSet::with_capacity(self.pieces.len());
        for (index, piece) in self.pieces.iter().enumerate() {
            if !piece.position.in_bounds() {
                return Err(StateError::OutOfBounds {
                    index,
                    x: piece.position.x,
                    y: piece.position.y,
                });
            }
            if !occupied.insert(piece.position) {
                return Err(StateError::SharedCell {
                    index,
                    x: piece.position.x,
                    y: piece.position.y,
                });
            }
        }

        if !self.game_over && self.winner.is_some() {
            return Err(StateError::WinnerWhileRunning);
        }

        Ok(())
    }
}

/// A move proposal. Only the server decides whether it is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub piece_id: usize,
    pub to_x: u8,
    pub to_y: u8,
}

impl Move {
    pub fn new(piece_id: usize, to: Position) -> Self {
        Self {
            piece_id,
            to_x: to.x,
            to_y: to.y,
        }
    }

    pub fn destination(&self) -> Position {
        Position {
            x: self.to_x,
            y: self.to_y,
        }
    }
}
