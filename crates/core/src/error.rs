//! Error type shared by the board and the engine.

use thiserror::Error;

/// Errors produced by the core game logic.
///
/// Illegal moves are not errors: they surface as `false` from
/// [`GameState::can_move`](crate::GameState::can_move) and the `try_*` helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// A mutating operation was called after the game ended.
    #[error("game is over; no further moves are accepted")]
    GameOver,

    #[error("board dimensions must be positive (got {width}x{height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("board is {board_width}x{board_height} but config expects {width}x{height}")]
    BoardMismatch {
        board_width: usize,
        board_height: usize,
        width: usize,
        height: usize,
    },

    #[error("lookahead queue length must be at least 1")]
    InvalidPreviewLength,

    #[error("piece sequence must contain at least one piece")]
    EmptySequence,
}

pub type GameResult<T> = Result<T, GameError>;
