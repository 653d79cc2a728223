//! Snapshot validation errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("piece {index} is off the board at ({x}, {y})")]
    OutOfBounds { index: usize, x: u8, y: u8 },

    #[error("piece {index} shares cell ({x}, {y}) with another piece")]
    SharedCell { index: usize, x: u8, y: u8 },

    #[error("winner reported while the game is still running")]
    WinnerWhileRunning,
}
