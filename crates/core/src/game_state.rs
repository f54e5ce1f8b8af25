//! Game state module - the engine
//!
//! Ties together the board, the active piece, the lookahead queue, and scoring.
//! The engine is a two-state machine: it starts running (unless the very first
//! spawn collides) and ends for good when a spawned piece does not fit or the
//! shell calls [`GameState::stop`].
//!
//! Every mutating operation returns [`GameError::GameOver`] once the game is no
//! longer running and leaves the state untouched.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::error::{GameError, GameResult};
use crate::pieces::{ShapeMatrix, Tetromino};
use crate::rng::PieceGenerator;
use crate::scoring::{calculate_line_score, gravity_delay_frames, next_level};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameConfig};

/// Result of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The active piece moved down one row
    Moved,
    /// The active piece could not fall and was locked
    Locked { lines_cleared: usize },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Tetromino,
    next_queue: VecDeque<Tetromino>,
    generator: PieceGenerator,
    score: u32,
    level: u32,
    lines: u32,
    last_lines_cleared: usize,
    pieces_spawned: u32,
    flash_timer: u32,
    running: bool,
    game_over: bool,
}

impl GameState {
    /// Create a default-sized game with a seeded random piece generator
    pub fn new(seed: u32) -> Self {
        Self::build(
            GameConfig::default(),
            Board::default(),
            PieceGenerator::random(seed),
        )
    }

    pub fn with_config(config: GameConfig, generator: PieceGenerator) -> GameResult<Self> {
        let board = Board::new(config.width, config.height)?;
        Self::with_board(config, board, generator)
    }

    /// Start a game on a pre-filled board
    pub fn with_board(
        config: GameConfig,
        board: Board,
        generator: PieceGenerator,
    ) -> GameResult<Self> {
        if board.width() != config.width || board.height() != config.height {
            return Err(GameError::BoardMismatch {
                board_width: board.width(),
                board_height: board.height(),
                width: config.width,
                height: config.height,
            });
        }
        if config.preview_len == 0 {
            return Err(GameError::InvalidPreviewLength);
        }
        Ok(Self::build(config, board, generator))
    }

    fn build(config: GameConfig, board: Board, mut generator: PieceGenerator) -> Self {
        let next_queue: VecDeque<Tetromino> = (0..config.preview_len.max(1))
            .map(|_| Tetromino::spawn(generator.next_kind(), config.width))
            .collect();

        let mut state = Self {
            config,
            board,
            // Replaced by the first spawn below.
            active: next_queue[0],
            next_queue,
            generator,
            score: 0,
            level: 1,
            lines: 0,
            last_lines_cleared: 0,
            pieces_spawned: 0,
            flash_timer: 0,
            running: true,
            game_over: false,
        };
        state.spawn_next();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Tetromino {
        &self.active
    }

    /// Matrix of the active piece's current rotation
    pub fn active_shape(&self) -> ShapeMatrix {
        self.active.shape()
    }

    pub fn next_queue(&self) -> &VecDeque<Tetromino> {
        &self.next_queue
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Lines cleared by the most recent lock event
    pub fn last_lines_cleared(&self) -> usize {
        self.last_lines_cleared
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn flash_timer(&self) -> u32 {
        self.flash_timer
    }

    pub fn flash_active(&self) -> bool {
        self.flash_timer > 0
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True only when a spawned piece collided (not after [`GameState::stop`])
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Gravity period in frames at the current level
    pub fn gravity_delay_frames(&self) -> u32 {
        gravity_delay_frames(self.level, &self.config.gravity)
    }

    fn ensure_running(&self) -> GameResult<()> {
        if self.running {
            Ok(())
        } else {
            Err(GameError::GameOver)
        }
    }

    fn fits(&self, piece: &Tetromino, d_row: i32, d_col: i32) -> bool {
        piece.board_cells().iter().all(|&(row, col)| {
            let (row, col) = (row + d_row, col + d_col);
            self.board.contains(row, col) && !self.board.is_cell_occupied(row as usize, col as usize)
        })
    }

    /// Check if the active piece can be shifted by (d_row, d_col).
    ///
    /// The single legality oracle: false iff some filled cell would land off the
    /// board or on a locked cell. With (0, 0) it validates the current rotation.
    pub fn can_move(&self, d_row: i32, d_col: i32) -> bool {
        self.fits(&self.active, d_row, d_col)
    }

    /// Promote the queue front to the active piece and refill the queue.
    pub fn try_spawn_next(&mut self) -> GameResult<()> {
        self.ensure_running()?;
        self.spawn_next();
        Ok(())
    }

    fn spawn_next(&mut self) {
        let Some(next) = self.next_queue.pop_front() else {
            return;
        };
        let kind = self.generator.next_kind();
        self.next_queue
            .push_back(Tetromino::spawn(kind, self.config.width));

        self.active = Tetromino::spawn(next.kind(), self.config.width);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);

        if self.can_move(0, 0) {
            debug!(kind = %self.active.kind(), col = self.active.col(), "spawned piece");
        } else {
            // The piece stays active so the final frame can still draw it.
            self.running = false;
            self.game_over = true;
            info!(
                score = self.score,
                level = self.level,
                lines = self.lines,
                "Game Over!"
            );
        }
    }

    /// Translate the active piece without validation.
    ///
    /// Callers confirm [`GameState::can_move`] first.
    pub fn move_active(&mut self, d_row: i32, d_col: i32) -> GameResult<()> {
        self.ensure_running()?;
        self.active.move_by(d_row, d_col);
        Ok(())
    }

    /// Advance the active piece's rotation without validation.
    ///
    /// Callers check `can_move(0, 0)` afterwards and revert on failure, or use
    /// [`GameState::try_rotate`].
    pub fn rotate_active(&mut self) -> GameResult<()> {
        self.ensure_running()?;
        self.active.rotate();
        Ok(())
    }

    /// Undo one [`GameState::rotate_active`]
    pub fn rotate_active_back(&mut self) -> GameResult<()> {
        self.ensure_running()?;
        self.active.rotate_back();
        Ok(())
    }

    /// Move if legal; returns whether the piece moved
    pub fn try_move(&mut self, d_row: i32, d_col: i32) -> GameResult<bool> {
        self.ensure_running()?;
        if !self.can_move(d_row, d_col) {
            return Ok(false);
        }
        self.active.move_by(d_row, d_col);
        Ok(true)
    }

    /// Rotate in place, reverting if the new orientation does not fit.
    ///
    /// No wall kicks: a blocked rotation is simply rejected.
    pub fn try_rotate(&mut self) -> GameResult<bool> {
        self.rotate_active()?;
        if self.can_move(0, 0) {
            return Ok(true);
        }
        self.active.rotate_back();
        Ok(false)
    }

    /// Lock the active piece, clear lines, update score/level, and spawn the next piece.
    ///
    /// Returns the number of lines cleared.
    pub fn lock_active_and_advance(&mut self) -> GameResult<usize> {
        self.ensure_running()?;

        let cells: ArrayVec<(usize, usize), 4> = self
            .active
            .board_cells()
            .into_iter()
            .filter(|&(row, col)| self.board.contains(row, col))
            .map(|(row, col)| (row as usize, col as usize))
            .collect();
        self.board.lock_cells(&cells);

        let cleared = self.board.clear_full_lines();
        self.last_lines_cleared = cleared;

        if cleared > 0 {
            self.score = self.score.saturating_add(calculate_line_score(cleared));
            if cleared == 4 {
                self.flash_timer = self.config.flash_ticks;
            }
            self.lines = self.lines.saturating_add(cleared as u32);
            self.level = next_level(self.level, self.lines);
            debug!(
                cleared,
                score = self.score,
                level = self.level,
                lines = self.lines,
                "cleared lines"
            );
        } else {
            trace!(kind = %self.active.kind(), "locked piece");
        }

        self.spawn_next();
        Ok(cleared)
    }

    /// One gravity step: fall one row if possible, otherwise lock.
    pub fn tick(&mut self) -> GameResult<TickOutcome> {
        self.ensure_running()?;
        if self.can_move(1, 0) {
            self.active.move_by(1, 0);
            return Ok(TickOutcome::Moved);
        }
        let lines_cleared = self.lock_active_and_advance()?;
        Ok(TickOutcome::Locked { lines_cleared })
    }

    /// Count down the four-line-clear flash by one presentation tick
    pub fn tick_flash(&mut self) {
        self.flash_timer = self.flash_timer.saturating_sub(1);
    }

    /// End the game. Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            debug!("game stopped");
        }
        self.running = false;
    }

    /// Apply a player intent.
    ///
    /// Soft drop only moves down; it never locks (gravity does that).
    /// `Quit` always succeeds.
    pub fn apply_action(&mut self, action: GameAction) -> GameResult<bool> {
        match action {
            GameAction::MoveLeft => self.try_move(0, -1),
            GameAction::MoveRight => self.try_move(0, 1),
            GameAction::SoftDrop => self.try_move(1, 0),
            GameAction::Rotate => self.try_rotate(),
            GameAction::Quit => {
                self.stop();
                Ok(true)
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.active = Some(ActiveSnapshot::from(self.active));
        out.next_queue.clear();
        out.next_queue
            .extend(self.next_queue.iter().map(|piece| piece.kind()));
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.running = self.running;
        out.game_over = self.game_over;
        out.flash_timer = self.flash_timer;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
