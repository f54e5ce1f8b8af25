//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is either empty or filled.
//! Uses a flat row-major vector for cache locality; the size is fixed at construction.
//! Coordinates: (row, col) where row 0 is the top and col 0 is the left edge.
//!
//! The board knows nothing about the falling piece. It only changes through
//! [`Board::lock_cells`] and [`Board::clear_full_lines`].

use crate::error::{GameError, GameResult};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<bool>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> GameResult<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
        })
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check whether a signed position lies on the board
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Fill state of a cell.
    ///
    /// Callers pass in-bounds coordinates; an out-of-bounds query reports empty.
    pub fn is_cell_occupied(&self, row: usize, col: usize) -> bool {
        self.index(row, col).map(|i| self.cells[i]).unwrap_or(false)
    }

    /// Mark every given cell as filled.
    ///
    /// No collision validation happens here; the engine checks legality first.
    /// Positions outside the grid are ignored.
    pub fn lock_cells(&mut self, positions: &[(usize, usize)]) {
        for &(row, col) in positions {
            if let Some(i) = self.index(row, col) {
                self.cells[i] = true;
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height {
            return false;
        }
        self.row(row).iter().all(|&cell| cell)
    }

    /// Remove every full row, shift the rest down, and return how many were removed.
    ///
    /// Two-pointer compaction from the bottom: surviving rows keep their relative
    /// order and the vacated rows at the top become empty.
    pub fn clear_full_lines(&mut self) -> usize {
        let width = self.width;
        let mut write_row = self.height;
        let mut cleared = 0;

        for read_row in (0..self.height).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * width;
                    self.cells.copy_within(src..src + width, write_row * width);
                }
            }
        }

        self.cells[..write_row * width].fill(false);
        cleared
    }

    /// True if the top row has any filled cell.
    ///
    /// Informational only; the engine ends the game on spawn collision.
    pub fn is_game_over_condition(&self) -> bool {
        self.row(0).iter().any(|&cell| cell)
    }

    /// Cells of one row, left to right; empty when `row` is off the board
    pub fn row(&self, row: usize) -> &[bool] {
        if row >= self.height {
            return &[];
        }
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.width)
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Flat row-major cells
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

impl Default for Board {
    /// Standard 10x20 board
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![false; BOARD_WIDTH * BOARD_HEIGHT],
        }
    }
}
