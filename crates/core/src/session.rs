//! Session module - one game from first hand to game over
//!
//! The session owns the board and drives turns:
//! 1. refill the hand through a [`Dealer`] when it is empty,
//! 2. stop if no piece in hand fits anywhere,
//! 3. ask the [`MoveSource`] for a move and apply it,
//! 4. add the move's score.
//!
//! A rejected move is asked for again, up to `max_invalid_retries` times;
//! after that the rejection is returned to the caller.

use std::fmt;
use std::sync::Arc;

use crate::board::{Board, BoardError};
use crate::catalog::Catalog;
use crate::deal::Dealer;
use crate::history::Cleared;
use crate::moves::{Move, MoveToken};
use crate::scoring::{calculate_score, ScoreResult};

/// Picks the next move for the current board.
///
/// Implementations must return a move that is currently valid; anything else
/// is rejected by the board and counted against the retry budget.
pub trait MoveSource {
    fn get_move(&mut self, board: &Board) -> Move;
}

impl<F> MoveSource for F
where
    F: FnMut(&Board) -> Move,
{
    fn get_move(&mut self, board: &Board) -> Move {
        self(board)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Extra attempts granted to a move source after an invalid move.
    pub max_invalid_retries: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_invalid_retries: 3,
        }
    }
}

/// Everything that happened during one played turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    /// 1-based turn number.
    pub turn: u32,
    pub mv: Move,
    pub token: MoveToken,
    pub cleared: Cleared,
    pub score: ScoreResult,
    /// Session score after this turn.
    pub total_score: u32,
    /// Moves the source proposed and the board rejected before this one.
    pub rejected: Vec<Move>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Played(TurnRecord),
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The move source kept proposing invalid moves.
    TooManyInvalidMoves { last: Move, attempts: u32 },
    Board(BoardError),
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::TooManyInvalidMoves { .. } => "invalid_move",
            SessionError::Board(e) => e.code(),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::TooManyInvalidMoves { last, attempts } => write!(
                f,
                "move source gave {} invalid moves in a row (last: {})",
                attempts, last
            ),
            SessionError::Board(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<BoardError> for SessionError {
    fn from(e: BoardError) -> Self {
        SessionError::Board(e)
    }
}

/// Summary of a finished (or interrupted) game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub moves: u32,
    pub cleared_lines: u32,
    pub score: u32,
    /// Replayable transcript of the game.
    pub move_str: String,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    config: SessionConfig,
    score: u32,
    cleared_lines: u32,
    moves: u32,
    game_over: bool,
}

impl GameSession {
    pub fn new(catalog: Arc<Catalog>, config: SessionConfig) -> Self {
        Self::from_board(Board::new(catalog), config)
    }

    /// Continue from an existing board (imported or scripted).
    pub fn from_board(board: Board, config: SessionConfig) -> Self {
        Self {
            board,
            config,
            score: 0,
            cleared_lines: 0,
            moves: 0,
            game_over: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn cleared_lines(&self) -> u32 {
        self.cleared_lines
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Deal a new hand if the current one is empty. Returns true if it dealt.
    pub fn refill(&mut self, dealer: &mut dyn Dealer) -> Result<bool, SessionError> {
        if !self.board.hand().is_empty() {
            return Ok(false);
        }
        let catalog = Arc::clone(self.board.catalog());
        let hand = dealer.deal(&catalog);
        self.board.deal(&hand)?;
        Ok(true)
    }

    /// Play one turn.
    pub fn step(
        &mut self,
        source: &mut dyn MoveSource,
        dealer: &mut dyn Dealer,
    ) -> Result<StepOutcome, SessionError> {
        if self.game_over {
            return Ok(StepOutcome::GameOver);
        }
        self.refill(dealer)?;
        if !self.board.has_valid_moves() {
            self.game_over = true;
            return Ok(StepOutcome::GameOver);
        }

        let mut rejected = Vec::new();
        loop {
            let mv = source.get_move(&self.board);
            match self.board.make_move(mv) {
                Ok(cleared) => {
                    return Ok(StepOutcome::Played(self.record_turn(mv, cleared, rejected)));
                }
                Err(BoardError::InvalidMove(bad)) => {
                    rejected.push(bad);
                    let attempts = rejected.len() as u32;
                    if attempts > self.config.max_invalid_retries {
                        return Err(SessionError::TooManyInvalidMoves { last: bad, attempts });
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn record_turn(&mut self, mv: Move, cleared: Cleared, rejected: Vec<Move>) -> TurnRecord {
        let blocks = self.board.catalog().get(mv.piece).size();
        let score = calculate_score(blocks, cleared.lines());
        self.score = self.score.saturating_add(score.total);
        self.cleared_lines += cleared.lines() as u32;
        self.moves += 1;

        let token = self
            .board
            .history()
            .last()
            .map(|entry| entry.token)
            .expect("make_move records a history entry");

        TurnRecord {
            turn: self.moves,
            mv,
            token,
            cleared,
            score,
            total_score: self.score,
            rejected,
        }
    }

    /// Play until no move is possible, reporting every turn to `on_turn`.
    pub fn run(
        &mut self,
        source: &mut dyn MoveSource,
        dealer: &mut dyn Dealer,
        mut on_turn: impl FnMut(&TurnRecord),
    ) -> Result<GameResult, SessionError> {
        while let StepOutcome::Played(record) = self.step(source, dealer)? {
            on_turn(&record);
        }
        Ok(self.result())
    }

    pub fn result(&self) -> GameResult {
        GameResult {
            moves: self.moves,
            cleared_lines: self.cleared_lines,
            score: self.score,
            move_str: self.board.move_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::ScriptedDealer;

    fn first_valid(board: &Board) -> Move {
        board.get_valid_moves()[0]
    }

    #[test]
    fn step_deals_when_hand_is_empty() {
        let catalog = Arc::new(Catalog::standard());
        let mut dealer = ScriptedDealer::from_glyphs(&catalog, "a").unwrap();
        let mut session = GameSession::new(catalog, SessionConfig::default());

        let outcome = session.step(&mut first_valid, &mut dealer).unwrap();
        let StepOutcome::Played(record) = outcome else {
            panic!("expected a played turn");
        };
        assert_eq!(record.turn, 1);
        assert_eq!(record.total_score, 1);
        assert_eq!(session.board().hand().len(), 2);
    }

    #[test]
    fn invalid_moves_are_retried_then_reported() {
        let catalog = Arc::new(Catalog::standard());
        let mut dealer = ScriptedDealer::from_glyphs(&catalog, "a").unwrap();
        let mut session = GameSession::new(
            catalog,
            SessionConfig {
                max_invalid_retries: 2,
            },
        );

        let bad = Move::new(crate::catalog::PieceId(0), 10, 10);
        let mut always_bad = |_: &Board| bad;
        let err = session.step(&mut always_bad, &mut dealer).unwrap_err();
        assert_eq!(
            err,
            SessionError::TooManyInvalidMoves {
                last: bad,
                attempts: 3
            }
        );
        assert_eq!(session.board().history().len(), 0);
    }
}
