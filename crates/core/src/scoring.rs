//! Scoring module - points for a placed piece and the lines it cleared
//!
//! - Every placed block is worth `BLOCK_POINTS`.
//! - Clearing `n` lines in one move adds `LINE_BONUS * (1 + 2 + ... + n)`,
//!   so each extra simultaneous line is worth more than the previous one.

use crate::types::{BLOCK_POINTS, LINE_BONUS};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points for the blocks of the placed piece.
    pub placement: u32,
    /// Bonus for the lines cleared by the move.
    pub line_bonus: u32,
    pub total: u32,
}

/// Bonus for clearing `lines` rows and columns with one move.
pub fn calculate_line_bonus(lines: usize) -> u32 {
    let n = lines as u32;
    LINE_BONUS.saturating_mul(n * (n + 1) / 2)
}

/// Score for placing a piece of `blocks` blocks that cleared `lines` lines.
pub fn calculate_score(blocks: usize, lines: usize) -> ScoreResult {
    let placement = BLOCK_POINTS.saturating_mul(blocks as u32);
    let line_bonus = calculate_line_bonus(lines);
    ScoreResult {
        placement,
        line_bonus,
        total: placement.saturating_add(line_bonus),
    }
}
