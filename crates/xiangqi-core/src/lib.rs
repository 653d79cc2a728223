//! Xiangqi wire model and board coordinate mapping shared by the client crates.

pub mod coords;
pub mod error;
pub mod model;

pub use coords::{logical_to_visual, visual_to_logical, Position, VisualCell, FILES, RANKS};
pub use error::StateError;
pub use model::{GameState, Move, Outcome, Piece, PieceType, Side};
