use blockfall::core::{GameSnapshot, GameState};
use blockfall::term::{piece_color, AnchorY, FrameBuffer, GameView, Viewport};
use blockfall::types::PieceKind;

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn empty_snapshot() -> GameSnapshot {
    let mut snap = GameState::new(1).snapshot();
    snap.active = None;
    snap
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = empty_snapshot();
    snap.board[19 * snap.width] = true;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_overlays_active_piece_in_its_color() {
    let snap = GameState::new(1).snapshot();
    let active = snap.active.unwrap();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    for (row, col) in active.cells() {
        let cell = fb.get(1 + 2 * col as u16, 1 + row as u16).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_color(active.kind));
    }
}

#[test]
fn term_view_follows_board_size() {
    let mut snap = empty_snapshot();
    snap.width = 6;
    snap.height = 8;
    snap.board = vec![false; 6 * 8];

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(14, 10));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(13, 9).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameState::new(1).snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;
    snap.next_queue = vec![PieceKind::O, PieceKind::I];

    let fb = GameView::default().render(&snap, Viewport::new(40, 24));
    let text = screen_text(&fb);

    for needle in ["SCORE", "1234", "LEVEL", "LINES", "NEXT"] {
        assert!(text.contains(needle), "missing {needle}");
    }
    // The O preview is drawn in its own color somewhere right of the well.
    let o_color = piece_color(PieceKind::O);
    let found = (0..fb.height()).any(|y| {
        (24..fb.width()).any(|x| fb.get(x, y).is_some_and(|c| c.style.fg == o_color))
    });
    assert!(found);
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut snap = GameState::new(1).snapshot();
    snap.running = false;
    snap.game_over = true;
    let text = screen_text(&GameView::default().render(&snap, Viewport::new(40, 24)));
    assert!(text.contains("GAME OVER"));

    snap.game_over = false;
    let text = screen_text(&GameView::default().render(&snap, Viewport::new(40, 24)));
    assert!(!text.contains("GAME OVER"));
    assert!(text.contains("STOPPED"));
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(1, 1);
    view.render_into(&snap, Viewport::new(30, 22), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 22));
    assert_eq!(fb, view.render(&snap, Viewport::new(30, 22)));
}
