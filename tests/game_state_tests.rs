//! Engine tests: spawning, locking, scoring, levels, flash, and game over.

use blockfall::core::{Board, GameError, GameState, PieceGenerator, TickOutcome};
use blockfall::types::{GameAction, GameConfig, PieceKind, FLASH_TICKS};

fn only(kind: PieceKind) -> PieceGenerator {
    PieceGenerator::sequence(vec![kind]).unwrap()
}

/// Tick until the active piece locks; returns the lines that lock cleared.
fn drop_to_lock(state: &mut GameState) -> usize {
    loop {
        if let TickOutcome::Locked { lines_cleared } = state.tick().unwrap() {
            return lines_cleared;
        }
    }
}

/// 4x8 board whose bottom `rows` rows are full except column 0.
fn well_with_gap(rows: usize) -> GameState {
    let config = GameConfig::default().with_size(4, 8);
    let mut board = Board::new(4, 8).unwrap();
    let cells: Vec<_> = (8 - rows..8)
        .flat_map(|r| (1..4).map(move |c| (r, c)))
        .collect();
    board.lock_cells(&cells);
    GameState::with_board(config, board, only(PieceKind::I)).unwrap()
}

#[test]
fn test_line_scores_are_exact() {
    for (rows, points) in [(1, 100), (2, 300), (3, 500), (4, 800)] {
        let mut state = well_with_gap(rows);
        // Stand the I up and drop it into the gap.
        assert_eq!(state.try_rotate(), Ok(true));
        assert_eq!(drop_to_lock(&mut state), rows);

        assert_eq!(state.score(), points, "{rows} lines");
        assert_eq!(state.lines(), rows as u32);
        assert_eq!(state.last_lines_cleared(), rows);
        assert!(state.is_running());
    }
}

#[test]
fn test_flash_only_on_four_lines() {
    let mut state = well_with_gap(3);
    state.try_rotate().unwrap();
    drop_to_lock(&mut state);
    assert_eq!(state.flash_timer(), 0);

    let mut state = well_with_gap(4);
    state.try_rotate().unwrap();
    drop_to_lock(&mut state);
    assert_eq!(state.flash_timer(), FLASH_TICKS);
    assert!(state.flash_active());

    for _ in 0..FLASH_TICKS {
        state.tick_flash();
    }
    assert_eq!(state.flash_timer(), 0);
    state.tick_flash();
    assert_eq!(state.flash_timer(), 0);
}

#[test]
fn test_level_ratchets_with_lines() {
    // A flat I fills a whole row of a 4-wide board.
    let config = GameConfig::default().with_size(4, 6);
    let mut state = GameState::with_config(config, only(PieceKind::I)).unwrap();
    assert_eq!(state.gravity_delay_frames(), 25);

    let mut last_level = state.level();
    for _ in 0..10 {
        assert_eq!(drop_to_lock(&mut state), 1);
        assert!(state.level() >= last_level);
        assert_eq!(state.level(), state.lines() / 10 + 1);
        last_level = state.level();
    }

    assert_eq!(state.lines(), 10);
    assert_eq!(state.level(), 2);
    assert_eq!(state.score(), 1000);
    assert_eq!(state.gravity_delay_frames(), 21);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_queue_length_is_constant() {
    let mut state = GameState::new(7);
    let mut spawned = state.pieces_spawned();
    for _ in 0..2_000 {
        if state.tick().is_err() {
            break;
        }
        assert_eq!(state.next_queue().len(), 2);
        assert!(state.pieces_spawned() >= spawned);
        spawned = state.pieces_spawned();
    }
    assert!(spawned > 1);
}

#[test]
fn test_next_piece_comes_from_queue_front() {
    let kinds = vec![PieceKind::T, PieceKind::O, PieceKind::L, PieceKind::Z];
    let mut state =
        GameState::with_config(GameConfig::default(), PieceGenerator::sequence(kinds).unwrap())
            .unwrap();
    assert_eq!(state.active().kind(), PieceKind::T);
    drop_to_lock(&mut state);
    assert_eq!(state.active().kind(), PieceKind::O);
    let queued: Vec<_> = state.next_queue().iter().map(|p| p.kind()).collect();
    assert_eq!(queued, vec![PieceKind::L, PieceKind::Z]);
}

#[test]
fn test_soft_drop_never_locks() {
    let mut state = GameState::with_config(GameConfig::default(), only(PieceKind::O)).unwrap();
    let mut moves = 0;
    while state.apply_action(GameAction::SoftDrop).unwrap() {
        moves += 1;
    }
    assert_eq!(moves, 18);
    assert_eq!(state.pieces_spawned(), 1);
    assert_eq!(state.board().filled_count(), 0);

    assert_eq!(
        state.tick(),
        Ok(TickOutcome::Locked { lines_cleared: 0 })
    );
    assert_eq!(state.board().filled_count(), 4);
}

#[test]
fn test_walls_block_movement_and_rotation() {
    let mut state = GameState::with_config(GameConfig::default(), only(PieceKind::T)).unwrap();
    assert_eq!(state.try_rotate(), Ok(true));
    assert_eq!(state.active().rotation(), 1);

    while state.try_move(0, 1).unwrap() {}
    assert_eq!(state.active().col(), 8);
    assert!(!state.can_move(0, 1));

    // The next state is three wide and would poke through the right wall.
    assert_eq!(state.try_rotate(), Ok(false));
    assert_eq!(state.active().rotation(), 1);
    assert_eq!(state.active().col(), 8);
}

#[test]
fn test_manual_rotate_and_revert() {
    let mut state = GameState::with_config(GameConfig::default(), only(PieceKind::J)).unwrap();
    state.rotate_active().unwrap();
    assert!(state.can_move(0, 0));
    state.rotate_active_back().unwrap();
    assert_eq!(state.active().rotation(), 0);

    state.move_active(2, -1).unwrap();
    assert_eq!(state.active().position(), (2, 2));
}

#[test]
fn test_spawn_collision_ends_game() {
    // O pieces stack in the two left columns of a 3-wide well.
    let config = GameConfig::default().with_size(3, 4);
    let mut state = GameState::with_config(config, only(PieceKind::O)).unwrap();

    assert_eq!(state.tick(), Ok(TickOutcome::Moved));
    assert_eq!(state.tick(), Ok(TickOutcome::Moved));
    assert_eq!(state.tick(), Ok(TickOutcome::Locked { lines_cleared: 0 }));
    assert!(state.is_running());
    assert_eq!(state.tick(), Ok(TickOutcome::Locked { lines_cleared: 0 }));

    assert!(!state.is_running());
    assert!(state.is_game_over());
    assert_eq!(state.pieces_spawned(), 3);
    assert_eq!(state.board().filled_count(), 8);

    let snap = state.snapshot();
    assert!(snap.game_over);
    assert!(!snap.running);
    assert!(snap.active.is_some());
}

#[test]
fn test_blocked_first_spawn_is_game_over() {
    let mut board = Board::new(10, 20).unwrap();
    board.lock_cells(&[(0, 4)]);
    let state = GameState::with_board(GameConfig::default(), board, only(PieceKind::O)).unwrap();
    assert!(state.is_game_over());
    assert_eq!(state.pieces_spawned(), 1);
}

#[test]
fn test_spawn_out_of_bounds_is_game_over() {
    // A 4-wide I cannot fit a 3-wide board anywhere.
    let config = GameConfig::default().with_size(3, 6);
    let mut state = GameState::with_config(config, only(PieceKind::I)).unwrap();
    assert!(state.is_game_over());
    assert!(!state.is_running());
    assert_eq!(state.board().filled_count(), 0);
    assert_eq!(state.snapshot().active.map(|a| a.col), Some(0));
    assert_eq!(state.tick(), Err(GameError::GameOver));

    let tiny = GameConfig::default().with_size(1, 1);
    for seed in 0..8 {
        let random = PieceGenerator::random(seed);
        assert!(GameState::with_config(tiny, random).unwrap().is_game_over());
    }
}

#[test]
fn test_every_mutation_fails_after_game_over() {
    let mut board = Board::new(10, 20).unwrap();
    board.lock_cells(&[(0, 4), (10, 0)]);
    let mut state = GameState::with_board(GameConfig::default(), board, only(PieceKind::O)).unwrap();
    let before = state.board().clone();

    assert_eq!(state.tick(), Err(GameError::GameOver));
    assert_eq!(state.try_move(1, 0), Err(GameError::GameOver));
    assert_eq!(state.try_rotate(), Err(GameError::GameOver));
    assert_eq!(state.move_active(0, 1), Err(GameError::GameOver));
    assert_eq!(state.rotate_active(), Err(GameError::GameOver));
    assert_eq!(state.rotate_active_back(), Err(GameError::GameOver));
    assert_eq!(state.lock_active_and_advance(), Err(GameError::GameOver));
    assert_eq!(state.try_spawn_next(), Err(GameError::GameOver));
    assert_eq!(
        state.apply_action(GameAction::MoveLeft),
        Err(GameError::GameOver)
    );

    // Queries and shell controls keep working.
    assert!(!state.can_move(0, 0));
    assert_eq!(state.apply_action(GameAction::Quit), Ok(true));
    state.stop();
    state.tick_flash();

    assert_eq!(state.board(), &before);
    assert_eq!(state.score(), 0);
    assert_eq!(state.pieces_spawned(), 1);
    assert!(state.is_game_over());
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(99);
    let mut b = GameState::new(99);
    for _ in 0..300 {
        let ra = a.tick();
        let rb = b.tick();
        assert_eq!(ra, rb);
        if ra.is_err() {
            break;
        }
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
