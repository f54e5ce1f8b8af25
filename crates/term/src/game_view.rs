//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{shape_cells, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const LOCKED_FG: Rgb = Rgb::new(170, 170, 185);
const FLASH_COLOR: Rgb = Rgb::new(255, 230, 120);
const PANEL_MIN_WIDTH: u16 = 10;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board placement inside the viewport, in terminal cells.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Draws the well, the falling piece and the side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is resized to the
    /// viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_w = clamp_u16(snap.width).saturating_mul(self.cell_w);
        let board_h = clamp_u16(snap.height).saturating_mul(self.cell_h);
        let frame_w = board_w.saturating_add(2);
        let frame_h = board_h.saturating_add(2);

        let panel_w = if viewport.width >= frame_w.saturating_add(2 + PANEL_MIN_WIDTH) {
            2 + PANEL_MIN_WIDTH
        } else {
            0
        };
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w.saturating_add(panel_w)) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', empty);
        draw_border(fb, frame, CellStyle::default());

        for row in 0..snap.height {
            for col in 0..snap.width {
                if snap.cell(row, col) {
                    let style = CellStyle::new(LOCKED_FG, PLAY_BG);
                    self.fill_board_cell(fb, frame, row as i32, col as i32, '█', style);
                } else {
                    self.fill_board_cell(fb, frame, row as i32, col as i32, '·', empty);
                }
            }
        }

        if let Some(active) = snap.active {
            let style = CellStyle::new(piece_color(active.kind), PLAY_BG).bold();
            for (row, col) in active.cells() {
                if row >= 0 && col >= 0 && (row as usize) < snap.height && (col as usize) < snap.width
                {
                    self.fill_board_cell(fb, frame, row, col, '█', style);
                }
            }
        }

        if snap.flash_active() {
            // Strongest on the first flash frame, fading as the timer runs out.
            let amount = (snap.flash_timer.min(10) * 12) as u8;
            tint_region(fb, frame, FLASH_COLOR, amount);
        }

        if panel_w > 0 {
            self.draw_side_panel(fb, snap, viewport, frame);
        }

        if snap.game_over {
            draw_overlay_text(fb, frame, "GAME OVER");
        } else if !snap.running {
            draw_overlay_text(fb, frame, "STOPPED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        row: i32,
        col: i32,
        ch: char,
        style: CellStyle,
    ) {
        let px = (frame.x + 1)
            .saturating_add(clamp_u16(col as usize).saturating_mul(self.cell_w));
        let py = (frame.y + 1)
            .saturating_add(clamp_u16(row as usize).saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let x = frame.x.saturating_add(frame.w).saturating_add(2);
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::default());

        let mut y = frame.y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(x, y, "NEXT", label);
        y = y.saturating_add(1);
        for &kind in &snap.next_queue {
            if y >= viewport.height {
                break;
            }
            y = self.draw_preview(fb, x, y, kind);
        }
    }

    /// Draw a piece in its spawn orientation; returns the next free row.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) -> u16 {
        let style = CellStyle::new(piece_color(kind), Rgb::default()).bold();
        let cells = shape_cells(kind, 0);
        let rows = cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0) as u16;
        for (r, c) in cells {
            let px = x.saturating_add((c as u16).saturating_mul(self.cell_w));
            let py = y.saturating_add(r as u16);
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
        y.saturating_add(rows + 1)
    }
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn tint_region(fb: &mut FrameBuffer, frame: Frame, color: Rgb, amount: u8) {
    for y in frame.y + 1..frame.y + frame.h - 1 {
        for x in frame.x + 1..frame.x + frame.w - 1 {
            if let Some(mut cell) = fb.get(x, y) {
                cell.style.bg = cell.style.bg.blend(color, amount);
                fb.set(x, y, cell);
            }
        }
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::default()).bold();
    fb.put_str(x, mid_y, text, style);
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
