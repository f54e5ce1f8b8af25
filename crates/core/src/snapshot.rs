use crate::pieces::{shape_cells, PieceCells, Tetromino};
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: usize,
    pub row: i32,
    pub col: i32,
}

impl ActiveSnapshot {
    /// Absolute positions of the filled cells (may be off-board)
    pub fn cells(&self) -> PieceCells {
        shape_cells(self.kind, self.rotation)
            .into_iter()
            .map(|(r, c)| (self.row + r, self.col + c))
            .collect()
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            row: value.row(),
            col: value.col(),
        }
    }
}

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major occupancy of locked cells
    pub board: Vec<bool>,
    pub active: Option<ActiveSnapshot>,
    pub next_queue: Vec<PieceKind>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub running: bool,
    /// Set only when a spawned piece collided
    pub game_over: bool,
    pub flash_timer: u32,
}

impl GameSnapshot {
    /// Locked state of a cell; off-board reads as empty
    pub fn cell(&self, row: usize, col: usize) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        self.board[row * self.width + col]
    }

    pub fn flash_active(&self) -> bool {
        self.flash_timer > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GameState;

    #[test]
    fn cell_reads_off_board_as_empty() {
        let mut snap = GameState::new(3).snapshot();
        snap.board[snap.width - 1] = true;
        assert!(snap.cell(0, snap.width - 1));
        assert!(!snap.cell(0, snap.width));
        assert!(!snap.cell(snap.height, 0));
        assert!(!snap.flash_active());
    }
}
