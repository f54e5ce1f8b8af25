//! Pieces module - tetromino catalog and the movable piece
//!
//! Every kind maps to an ordered list of rotation matrices. Rotating forward
//! always moves to the next matrix and wraps to the first after the last.
//! There are no wall kicks: a rotation either fits where it is or is rejected.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// One rotation state, rows top to bottom; `true` marks a filled sub-cell
pub type ShapeMatrix = &'static [&'static [bool]];

/// Offset of a single mino relative to the piece anchor, as (row, col)
pub type MinoOffset = (i32, i32);

/// The four filled offsets of one rotation state
pub type PieceCells = ArrayVec<MinoOffset, 4>;

const F: bool = true;
const E: bool = false;

static I_STATES: &[ShapeMatrix] = &[
    &[&[F, F, F, F]],
    &[&[F], &[F], &[F], &[F]],
];

static O_STATES: &[ShapeMatrix] = &[&[&[F, F], &[F, F]]];

static T_STATES: &[ShapeMatrix] = &[
    &[&[E, F, E], &[F, F, F]],
    &[&[F, E], &[F, F], &[F, E]],
    &[&[F, F, F], &[E, F, E]],
    &[&[E, F], &[F, F], &[E, F]],
];

static S_STATES: &[ShapeMatrix] = &[
    &[&[E, F, F], &[F, F, E]],
    &[&[F, E], &[F, F], &[E, F]],
];

static Z_STATES: &[ShapeMatrix] = &[
    &[&[F, F, E], &[E, F, F]],
    &[&[E, F], &[F, F], &[F, E]],
];

static J_STATES: &[ShapeMatrix] = &[
    &[&[F, E, E], &[F, F, F]],
    &[&[F, F], &[F, E], &[F, E]],
    &[&[F, F, F], &[E, E, F]],
    &[&[E, F], &[E, F], &[F, F]],
];

static L_STATES: &[ShapeMatrix] = &[
    &[&[E, E, F], &[F, F, F]],
    &[&[F, E], &[F, E], &[F, F]],
    &[&[F, F, F], &[F, E, E]],
    &[&[F, F], &[E, F], &[E, F]],
];

/// All rotation states of a kind, in rotation order
pub fn rotation_states(kind: PieceKind) -> &'static [ShapeMatrix] {
    match kind {
        PieceKind::I => I_STATES,
        PieceKind::O => O_STATES,
        PieceKind::T => T_STATES,
        PieceKind::S => S_STATES,
        PieceKind::Z => Z_STATES,
        PieceKind::J => J_STATES,
        PieceKind::L => L_STATES,
    }
}

pub fn rotation_count(kind: PieceKind) -> usize {
    rotation_states(kind).len()
}

/// Matrix for a rotation index (wrapped into range)
pub fn get_shape(kind: PieceKind, rotation: usize) -> ShapeMatrix {
    let states = rotation_states(kind);
    states[rotation % states.len()]
}

/// Filled offsets of a rotation state, row-major
pub fn shape_cells(kind: PieceKind, rotation: usize) -> PieceCells {
    let mut cells = PieceCells::new();
    for (r, row) in get_shape(kind, rotation).iter().enumerate() {
        for (c, &filled) in row.iter().enumerate() {
            if filled {
                cells.push((r as i32, c as i32));
            }
        }
    }
    cells
}

/// Column that horizontally centers the spawn orientation on a board
pub fn spawn_col(kind: PieceKind, board_width: usize) -> i32 {
    let shape_width = get_shape(kind, 0)[0].len();
    (board_width.saturating_sub(shape_width) / 2) as i32
}

/// A movable, rotatable piece instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    kind: PieceKind,
    rotation: usize,
    row: i32,
    col: i32,
}

impl Tetromino {
    pub fn new(kind: PieceKind, row: i32, col: i32) -> Self {
        Self {
            kind,
            rotation: 0,
            row,
            col,
        }
    }

    /// Create a piece at row 0, centered for the given board width
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        Self::new(kind, 0, spawn_col(kind, board_width))
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn rotation_count(&self) -> usize {
        rotation_count(self.kind)
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    /// Anchor as (row, col)
    pub fn position(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    /// Matrix of the current rotation
    pub fn shape(&self) -> ShapeMatrix {
        get_shape(self.kind, self.rotation)
    }

    /// Filled offsets of the current rotation
    pub fn cells(&self) -> PieceCells {
        shape_cells(self.kind, self.rotation)
    }

    /// Absolute board positions of the filled cells (may be off-board)
    pub fn board_cells(&self) -> PieceCells {
        self.cells()
            .into_iter()
            .map(|(r, c)| (self.row + r, self.col + c))
            .collect()
    }

    /// Advance to the next rotation state, wrapping to 0
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.rotation_count();
    }

    /// Undo one [`Tetromino::rotate`]
    pub fn rotate_back(&mut self) {
        let count = self.rotation_count();
        self.rotation = (self.rotation + count - 1) % count;
    }

    /// Translate the anchor without any bounds checks
    pub fn move_by(&mut self, d_row: i32, d_col: i32) {
        self.row += d_row;
        self.col += d_col;
    }
}
