//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the 10x10 block puzzle: the piece
//! catalog, moves and their tokens, the board state machine with its
//! reversible history, scoring and the turn loop. It has **no dependencies**
//! on terminals, files or randomness sources outside its own seeded dealer.
//!
//! # Module Structure
//!
//! - [`catalog`]: the 19 polyomino pieces, looked up by id or glyph
//! - [`moves`]: a piece at an anchor, and its 2-character token
//! - [`board`]: grid, hand, legality, placement, line clears, undo, string export/import
//! - [`history`]: structured move log, transcript rendering, parsing and replay
//! - [`scoring`]: points for placed blocks and cleared lines
//! - [`deal`]: hand refill contract, seeded random and scripted dealers
//! - [`session`]: turn orchestration against an external move source
//!
//! # Game Rules
//!
//! - A hand holds up to 3 pieces; a new hand is dealt only once it is empty
//! - A piece may go anywhere its blocks land on empty cells inside the grid
//! - Every full row and full column is cleared after a placement
//! - The game ends when no piece in hand fits anywhere
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tenten_core::{Board, Catalog, Move};
//!
//! let catalog = Arc::new(Catalog::standard());
//! let mono = catalog.by_glyph('a').unwrap();
//!
//! let mut board = Board::new(catalog);
//! board.deal(&[mono]).unwrap();
//!
//! let cleared = board.make_move(Move::new(mono, 0, 0)).unwrap();
//! assert!(cleared.is_empty());
//! assert_eq!(board.cell(0, 0), Some(1));
//!
//! board.undo_move().unwrap();
//! assert_eq!(board.cell(0, 0), Some(0));
//! assert_eq!(board.hand(), &[mono]);
//! ```

pub mod board;
pub mod catalog;
pub mod deal;
pub mod history;
pub mod moves;
pub mod scoring;
pub mod session;

pub use tenten_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError, Hand, ImportError, LineSet};
pub use catalog::{BlockOffset, Catalog, CatalogError, Piece, PieceId, UnknownPiece};
pub use deal::{Dealer, RandomDealer, ScriptedDealer, SimpleRng};
pub use history::{parse_transcript, Cleared, HistoryEntry, TranscriptEntry, TranscriptError};
pub use moves::{Move, MoveError, MoveToken};
pub use scoring::{calculate_line_bonus, calculate_score, ScoreResult};
pub use session::{
    GameResult, GameSession, MoveSource, SessionConfig, SessionError, StepOutcome, TurnRecord,
};
