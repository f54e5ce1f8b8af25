//! Scoring module - points, levels, and gravity cadence
//!
//! - A lock event awards a fixed amount by lines cleared (no level multiplier).
//! - Level is `lines / 10 + 1` and only ever goes up.
//! - Gravity period shrinks by a fixed step per level down to a floor.

use crate::types::{GravityConfig, LINES_PER_LEVEL, LINE_SCORES};

/// Points for one lock event clearing `lines` rows
pub fn calculate_line_score(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Level implied by a line total
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Ratchet: the new level never drops below the current one
pub fn next_level(current: u32, total_lines: u32) -> u32 {
    current.max(calculate_level(total_lines))
}

/// Gravity period in frames for a level:
/// `max(base_delay - (level - 1) * step, min_delay)`
pub fn gravity_delay_frames(level: u32, gravity: &GravityConfig) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(gravity.step);
    gravity
        .base_delay
        .saturating_sub(speedup)
        .max(gravity.min_delay)
}
