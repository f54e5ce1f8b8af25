//! Piece catalog and tetromino tests

use blockfall::core::{get_shape, rotation_count, Tetromino};
use blockfall::types::PieceKind;

#[test]
fn test_rotation_counts() {
    assert_eq!(rotation_count(PieceKind::I), 2);
    assert_eq!(rotation_count(PieceKind::O), 1);
    assert_eq!(rotation_count(PieceKind::T), 4);
    assert_eq!(rotation_count(PieceKind::S), 2);
    assert_eq!(rotation_count(PieceKind::Z), 2);
    assert_eq!(rotation_count(PieceKind::J), 4);
    assert_eq!(rotation_count(PieceKind::L), 4);
}

#[test]
fn test_rotation_wraps_for_all_kinds() {
    for kind in PieceKind::ALL {
        let mut piece = Tetromino::new(kind, 0, 0);
        let start = piece.shape();
        for _ in 0..rotation_count(kind) {
            piece.rotate();
        }
        assert_eq!(piece.shape(), start, "{kind:?}");
        assert_eq!(piece.rotation(), 0);
    }
}

#[test]
fn test_rotate_back_undoes_rotate() {
    for kind in PieceKind::ALL {
        let mut piece = Tetromino::new(kind, 3, 4);
        piece.rotate();
        piece.rotate_back();
        assert_eq!(piece, Tetromino::new(kind, 3, 4));
    }
}

#[test]
fn test_move_bookkeeping() {
    let mut piece = Tetromino::new(PieceKind::T, 0, 0);
    piece.move_by(1, 0);
    piece.move_by(0, 2);
    assert_eq!(piece.position(), (1, 2));
    assert_eq!(piece.rotation(), 0);
}

#[test]
fn test_spawn_is_centered_on_default_board() {
    assert_eq!(Tetromino::spawn(PieceKind::I, 10).col(), 3);
    assert_eq!(Tetromino::spawn(PieceKind::O, 10).col(), 4);
    for kind in [
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ] {
        let piece = Tetromino::spawn(kind, 10);
        assert_eq!(piece.col(), 3, "{kind:?}");
        assert_eq!(piece.row(), 0);
    }
}

#[test]
fn test_t_spawn_matrix() {
    let shape = get_shape(PieceKind::T, 0);
    assert_eq!(shape, &[&[false, true, false][..], &[true, true, true][..]]);
}

#[test]
fn test_board_cells_are_offset_by_position() {
    let piece = Tetromino::new(PieceKind::O, 5, 7);
    let cells: Vec<_> = piece.board_cells().into_iter().collect();
    assert_eq!(cells, vec![(5, 7), (5, 8), (6, 7), (6, 8)]);
}
