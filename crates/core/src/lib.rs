//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has no
//! dependencies on terminal I/O, so the same engine can sit behind any shell.
//!
//! - **Deterministic**: the same seed produces the same sequence of pieces
//! - **Encapsulated**: the board only changes through locking and line clears
//! - **Frame-driven**: one [`GameState::tick`] is one gravity step; the shell
//!   decides how often to call it
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size occupancy grid with line clearing
//! - [`pieces`]: tetromino catalog (rotation matrices) and the movable piece
//! - [`rng`]: seeded uniform piece generator
//! - [`scoring`]: line-clear points, level ratchet, gravity cadence
//! - [`snapshot`]: owned render view of a game
//! - [`game_state`]: the engine tying everything together
//!
//! # Game Rules
//!
//! - **Spawn**: row 0, horizontally centered; a spawn that does not fit ends the game
//! - **Rotation**: next matrix in the catalog, rejected if it does not fit (no wall kicks)
//! - **Scoring**: 100 / 300 / 500 / 800 for 1 / 2 / 3 / 4 lines
//! - **Level**: `lines / 10 + 1`, never decreasing
//! - **Flash**: a four-line clear sets a 10-tick flash timer
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, TickOutcome};
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! assert!(game.is_running());
//!
//! game.apply_action(GameAction::MoveRight).unwrap();
//! game.apply_action(GameAction::Rotate).unwrap();
//!
//! // Gravity until the first piece locks.
//! while game.tick().unwrap() == TickOutcome::Moved {}
//! assert_eq!(game.pieces_spawned(), 2);
//! ```

pub mod board;
pub mod error;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::{GameError, GameResult};
pub use game_state::{GameState, TickOutcome};
pub use pieces::{get_shape, rotation_count, rotation_states, shape_cells, Tetromino};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{calculate_level, calculate_line_score, gravity_delay_frames};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
