//! Reference move sources.
//!
//! Strategy is not part of the game rules: the session only needs something
//! that implements [`MoveSource`]. These two are enough to drive headless
//! games, benchmarks and tests.

use tenten_core::{Board, Move, MoveSource, SimpleRng};

pub use tenten_core as core;
pub use tenten_types as types;

/// Always plays the first move of [`Board::get_valid_moves`].
///
/// Must only be asked while a valid move exists; the session guarantees this.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstValid;

impl MoveSource for FirstValid {
    fn get_move(&mut self, board: &Board) -> Move {
        match board.get_valid_moves().first() {
            Some(&mv) => mv,
            // Nothing legal: hand back an anchor the board is sure to reject.
            None => fallback_move(board),
        }
    }
}

/// Uniform choice among the valid moves, from a seeded LCG.
#[derive(Debug, Clone)]
pub struct RandomValid {
    rng: SimpleRng,
}

impl RandomValid {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl MoveSource for RandomValid {
    fn get_move(&mut self, board: &Board) -> Move {
        let moves = board.get_valid_moves();
        if moves.is_empty() {
            return fallback_move(board);
        }
        let i = self.rng.next_range(moves.len() as u32) as usize;
        moves[i]
    }
}

fn fallback_move(board: &Board) -> Move {
    let piece = board.hand().first().copied().unwrap_or(tenten_core::PieceId(0));
    Move::new(piece, -1, -1)
}
