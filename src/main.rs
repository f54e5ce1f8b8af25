//! Terminal blockfall runner.
//!
//! Frame-driven shell around `blockfall::core::GameState`: crossterm input,
//! a framebuffer renderer, and gravity paced in frames.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::builder::TypedValueParser;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use blockfall::core::{GameSnapshot, GameState, PieceGenerator};
use blockfall::input::{handle_key_event, InputHandler};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{
    GameAction, GameConfig, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, FRAMES_PER_SECOND,
};

/// Frames a movement key stays held after its last press or auto-repeat.
const KEY_HOLD_FRAMES: u32 = 1;
/// How long the final frame stays up unless a key is pressed.
const GAME_OVER_LINGER: Duration = Duration::from_secs(3);

#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about = "Falling-block puzzle game for the terminal")]
struct Cli {
    /// Seed for the piece generator (defaults to the current time)
    #[arg(long)]
    seed: Option<u32>,

    /// Replay a fixed, repeating piece order instead, e.g. `IOTSZJL`
    #[arg(long, conflicts_with = "seed")]
    sequence: Option<String>,

    #[arg(long, default_value_t = BOARD_WIDTH, value_parser = clap::value_parser!(u16).range(4..=64).map(usize::from))]
    width: usize,

    #[arg(long, default_value_t = BOARD_HEIGHT, value_parser = clap::value_parser!(u16).range(4..=64).map(usize::from))]
    height: usize,

    /// Frames per second; gravity and key repeat are counted in frames
    #[arg(long, default_value_t = FRAMES_PER_SECOND, value_parser = clap::value_parser!(u32).range(1..=120))]
    fps: u32,

    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(level)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(1)
    });
    let generator = match &cli.sequence {
        Some(letters) => {
            let kinds = PieceKind::parse_sequence(letters)
                .map_err(|ch| anyhow!("`{ch}` is not a piece letter (use I, O, T, S, Z, J, L)"))?;
            PieceGenerator::sequence(kinds)?
        }
        None => PieceGenerator::random(seed),
    };
    let config = GameConfig::default().with_size(cli.width, cli.height);
    let mut game = GameState::with_config(config, generator)?;
    info!(seed, width = cli.width, height = cli.height, fps = cli.fps, "starting game");

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut game, cli.fps);
    // Always try to restore terminal state.
    let restored = term.exit();
    result?;
    restored?;

    println!("{}", exit_summary(&game));
    Ok(())
}

/// Final line printed once the terminal is restored.
fn exit_summary(game: &GameState) -> String {
    let status = if game.is_game_over() {
        "Game Over!"
    } else {
        "Stopped."
    };
    format!(
        "{status} score={} level={} lines={}",
        game.score(),
        game.level(),
        game.lines()
    )
}

fn run(term: &mut TerminalRenderer, game: &mut GameState, fps: u32) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new().with_key_release_timeout_frames(KEY_HOLD_FRAMES);
    let frame = Duration::from_secs(1) / fps;
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut gravity_frames = 0u32;

    while game.is_running() {
        let deadline = Instant::now() + frame;

        poll_until(deadline, term, |action, kind| {
            match kind {
                KeyEventKind::Release => input.handle_release(action),
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if !input.handle_press(action) && game.is_running() {
                        game.apply_action(action)?;
                    }
                }
            }
            Ok(())
        })?;
        if !game.is_running() {
            break;
        }

        for action in input.update() {
            game.apply_action(action)?;
        }

        gravity_frames += 1;
        if gravity_frames >= game.gravity_delay_frames() {
            gravity_frames = 0;
            game.tick()?;
        }
        game.tick_flash();

        draw(term, &view, game, &mut snap, &mut fb)?;
    }

    // Leave the final board up briefly (a key press skips it).
    draw(term, &view, game, &mut snap, &mut fb)?;
    if game.is_game_over() && event::poll(GAME_OVER_LINGER)? {
        let _ = event::read()?;
    }
    Ok(())
}

/// Drain terminal events until `deadline`.
fn poll_until(
    deadline: Instant,
    term: &mut TerminalRenderer,
    mut on_key: impl FnMut(GameAction, KeyEventKind) -> Result<()>,
) -> Result<()> {
    loop {
        let timeout = deadline.saturating_duration_since(Instant::now());
        if !event::poll(timeout)? {
            return Ok(());
        }
        match event::read()? {
            Event::Key(key) => {
                if let Some(action) = handle_key_event(key) {
                    on_key(action, key.kind)?;
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}

fn draw(
    term: &mut TerminalRenderer,
    view: &GameView,
    game: &GameState,
    snap: &mut GameSnapshot,
    fb: &mut FrameBuffer,
) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    game.snapshot_into(snap);
    view.render_into(snap, Viewport::new(w, h), fb);
    term.draw_swap(fb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall::core::Board;

    #[test]
    fn quitting_is_not_reported_as_game_over() {
        let mut game = GameState::new(7);
        game.stop();
        assert_eq!(exit_summary(&game), "Stopped. score=0 level=1 lines=0");
    }

    #[test]
    fn spawn_collision_is_reported_as_game_over() {
        let mut board = Board::new(10, 20).unwrap();
        let spawn_area: Vec<_> = (0..2).flat_map(|r| (3..7).map(move |c| (r, c))).collect();
        board.lock_cells(&spawn_area);
        let generator = PieceGenerator::random(7);
        let game = GameState::with_board(GameConfig::default(), board, generator).unwrap();
        assert!(exit_summary(&game).starts_with("Game Over! "));
    }
}
