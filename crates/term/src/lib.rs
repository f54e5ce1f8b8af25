//! Terminal rendering for blockfall.
//!
//! A small game-oriented layer: a pure [`GameView`] draws a
//! [`core::GameSnapshot`] into a [`FrameBuffer`], and the [`TerminalRenderer`]
//! flushes changed cells through crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
