//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! Coordinates are always `(row, col)`.
//!
//! # Frame Timing
//!
//! The game is frame-driven. Every timing value is a frame count at
//! [`FRAMES_PER_SECOND`]:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAMES_PER_SECOND` | 15 | Render/update rate of the shell |
//! | `BASE_DROP_FRAMES` | 25 | Gravity period at level 1 |
//! | `DROP_STEP_FRAMES` | 4 | Gravity speed-up per level |
//! | `MIN_DROP_FRAMES` | 3 | Fastest gravity period |
//! | `SIDE_REPEAT_FRAMES` | 2 | Held left/right repeat period |
//! | `DOWN_REPEAT_FRAMES` | 1 | Held soft drop repeat period |
//! | `FLASH_TICKS` | 10 | Flash duration after a four-line clear |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameConfig, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let pieces = PieceKind::parse_sequence("tiO").unwrap();
//! assert_eq!(pieces, vec![PieceKind::T, PieceKind::I, PieceKind::O]);
//!
//! let config = GameConfig::default();
//! assert_eq!(config.width, BOARD_WIDTH);
//! assert_eq!(config.height, BOARD_HEIGHT);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Number of upcoming pieces kept in the lookahead queue
pub const PREVIEW_LEN: usize = 2;

/// Flash duration (in presentation ticks) after a four-line clear
pub const FLASH_TICKS: u32 = 10;

/// Shell frame rate
pub const FRAMES_PER_SECOND: u32 = 15;

/// Gravity period at level 1, in frames
pub const BASE_DROP_FRAMES: u32 = 25;

/// Frames removed from the gravity period per level gained
pub const DROP_STEP_FRAMES: u32 = 4;

/// Gravity period floor, in frames
pub const MIN_DROP_FRAMES: u32 = 3;

/// Held left/right keys repeat at most once every this many frames
pub const SIDE_REPEAT_FRAMES: u32 = 2;

/// Held soft drop repeats at most once every this many frames
pub const DOWN_REPEAT_FRAMES: u32 = 1;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points awarded per lock event, indexed by lines cleared (0-4)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Piece for a letter, ignoring case
    pub fn from_char(ch: char) -> Option<Self> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.as_char().eq_ignore_ascii_case(&ch))
    }

    /// Parse a run of piece letters such as `"IOTSZJL"`.
    ///
    /// Returns the first character that is not a piece letter on failure.
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::parse_sequence("oo"), Ok(vec![PieceKind::O, PieceKind::O]));
    /// assert_eq!(PieceKind::parse_sequence("TX"), Err('X'));
    /// ```
    pub fn parse_sequence(letters: &str) -> Result<Vec<Self>, char> {
        letters
            .chars()
            .map(|ch| PieceKind::from_char(ch).ok_or(ch))
            .collect()
    }

    /// Uppercase letter used for display
    pub fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Player intents understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Quit,
}

/// Gravity cadence parameters, in frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityConfig {
    pub base_delay: u32,
    pub step: u32,
    pub min_delay: u32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            base_delay: BASE_DROP_FRAMES,
            step: DROP_STEP_FRAMES,
            min_delay: MIN_DROP_FRAMES,
        }
    }
}

/// Runtime game configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Length of the lookahead queue
    pub preview_len: usize,
    /// Flash duration set on a four-line clear
    pub flash_ticks: u32,
    pub gravity: GravityConfig,
}

impl GameConfig {
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_preview_len(mut self, preview_len: usize) -> Self {
        self.preview_len = preview_len;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            preview_len: PREVIEW_LEN,
            flash_ticks: FLASH_TICKS,
            gravity: GravityConfig::default(),
        }
    }
}
