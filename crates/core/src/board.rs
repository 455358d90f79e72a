//! Board module - the 10x10 grid, the hand and the move history
//!
//! Cells are plain integers stored in a flat row-major array (`y * 10 + x`).
//! 0 is empty and 1 is occupied. Line clears decrement cells instead of
//! zeroing them and nothing is clamped, so forced moves and imported states
//! can leave other values behind; they are kept as-is.
//!
//! Coordinates: (x, y) where x is the column (left to right) and y is the row
//! (top to bottom), both in 0..=9.

use std::fmt;
use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::catalog::{Catalog, PieceId, UnknownPiece};
use crate::history::{
    parse_transcript, render_transcript, Cleared, HistoryEntry, TranscriptError,
};
use crate::moves::{Move, MoveError, MoveToken};
use crate::types::{Cell, Mark, BOARD_SIZE, CELL_COUNT, EMPTY, FILLED, HAND_SIZE};

/// Pieces currently available to play, in draw order.
pub type Hand = ArrayVec<PieceId, HAND_SIZE>;

/// Indices of full lines along one axis, ascending.
pub type LineSet = ArrayVec<u8, { BOARD_SIZE as usize }>;

const SIZE: usize = BOARD_SIZE as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Fewer than 100 grid characters.
    TooShort { len: usize },
    /// A grid character that is not a decimal digit.
    BadCell { pos: usize, ch: char },
    UnknownPiece(char),
    /// More hand glyphs than a hand can hold.
    TooManyPieces(usize),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::TooShort { len } => {
                write!(f, "board string has {} chars, need at least {}", len, CELL_COUNT)
            }
            ImportError::BadCell { pos, ch } => {
                write!(f, "cell {} is {:?}, expected a digit", pos, ch)
            }
            ImportError::UnknownPiece(c) => write!(f, "no piece with glyph {:?}", c),
            ImportError::TooManyPieces(n) => {
                write!(f, "{} hand pieces, at most {} allowed", n, HAND_SIZE)
            }
        }
    }
}

impl From<UnknownPiece> for ImportError {
    fn from(e: UnknownPiece) -> Self {
        ImportError::UnknownPiece(e.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Rejected by `make_move`; the board is unchanged.
    InvalidMove(Move),
    NothingToUndo,
    /// The hand cannot take another piece.
    HandFull,
    /// Piece id outside the board's catalog.
    UnknownPiece(PieceId),
    /// Forced move whose anchor has no token slot.
    Unencodable(MoveError),
    /// Cell value with no single-digit form in the board string.
    UnencodableCell { x: u8, y: u8, value: Cell },
    Import(ImportError),
}

impl BoardError {
    pub fn code(&self) -> &'static str {
        match self {
            BoardError::InvalidMove(_) => "invalid_move",
            BoardError::NothingToUndo => "nothing_to_undo",
            BoardError::HandFull => "hand_full",
            BoardError::UnknownPiece(_) => "unknown_piece",
            BoardError::Unencodable(_) => "unencodable_move",
            BoardError::UnencodableCell { .. } => "unencodable_cell",
            BoardError::Import(_) => "import_error",
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidMove(mv) => write!(f, "{} is not a valid move", mv),
            BoardError::NothingToUndo => write!(f, "no move to undo"),
            BoardError::HandFull => write!(f, "hand already holds {} pieces", HAND_SIZE),
            BoardError::UnknownPiece(id) => write!(f, "piece #{} is not in the catalog", id.0),
            BoardError::Unencodable(e) => write!(f, "{}", e),
            BoardError::UnencodableCell { x, y, value } => {
                write!(f, "cell {},{} holds {}, not a single digit", x, y, value)
            }
            BoardError::Import(e) => write!(f, "import failed: {}", e),
        }
    }
}

impl std::error::Error for BoardError {}

impl From<ImportError> for BoardError {
    fn from(e: ImportError) -> Self {
        BoardError::Import(e)
    }
}

/// Game board: grid, hand, last-action overlay and history.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    catalog: Arc<Catalog>,
    cells: [Cell; CELL_COUNT],
    marks: [Mark; CELL_COUNT],
    hand: Hand,
    history: Vec<HistoryEntry>,
}

impl Board {
    /// Create an empty board with an empty hand.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cells: [EMPTY; CELL_COUNT],
            marks: [Mark::None; CELL_COUNT],
            hand: Hand::new(),
            history: Vec::new(),
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_SIZE as i8 || y < 0 || y >= BOARD_SIZE as i8 {
            return None;
        }
        Some((y as usize) * SIZE + (x as usize))
    }

    #[inline(always)]
    fn block_index(mv: &Move, dx: i8, dy: i8) -> Option<usize> {
        Self::index(mv.x.saturating_add(dx), mv.y.saturating_add(dy))
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Cell value at (x, y); `None` if out of bounds.
    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Overwrite a cell (scripted setup). Returns false if out of bounds.
    pub fn set_cell(&mut self, x: i8, y: i8, value: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Overlay mark left by the last action; `None` if out of bounds.
    pub fn mark(&self, x: i8, y: i8) -> Option<Mark> {
        Self::index(x, y).map(|idx| self.marks[idx])
    }

    /// Row-major cell values.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_empty_at(&self, x: i8, y: i8) -> bool {
        self.cell(x, y) == Some(EMPTY)
    }

    pub fn hand(&self) -> &[PieceId] {
        &self.hand
    }

    fn check_piece(&self, piece: PieceId) -> Result<(), BoardError> {
        match self.catalog.try_get(piece) {
            Some(_) => Ok(()),
            None => Err(BoardError::UnknownPiece(piece)),
        }
    }

    /// Fill an empty hand. Nothing changes on error.
    pub fn deal(&mut self, pieces: &[PieceId]) -> Result<(), BoardError> {
        if !self.hand.is_empty() || pieces.len() > HAND_SIZE {
            return Err(BoardError::HandFull);
        }
        for &piece in pieces {
            self.check_piece(piece)?;
        }
        self.hand.extend(pieces.iter().copied());
        Ok(())
    }

    /// Append one piece, dropping the oldest one when the hand is full.
    pub fn add_to_hand(&mut self, piece: PieceId) -> Result<(), BoardError> {
        self.check_piece(piece)?;
        if self.hand.is_full() {
            self.hand.remove(0);
        }
        self.hand.push(piece);
        Ok(())
    }

    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Transcript of every applied move and clear, oldest first.
    pub fn move_str(&self) -> String {
        render_transcript(&self.history)
    }

    /// True if every block of the move lands inside the grid on a cell that
    /// reads exactly 0. Hand membership is not checked; a piece outside the
    /// catalog never fits.
    pub fn fits(&self, mv: &Move) -> bool {
        let Some(piece) = self.catalog.try_get(mv.piece) else {
            return false;
        };
        piece.blocks().iter().all(|&(dx, dy)| {
            Self::block_index(mv, dx, dy).is_some_and(|idx| self.cells[idx] == EMPTY)
        })
    }

    /// Legal iff the piece is in hand and it fits at the anchor.
    pub fn is_valid_move(&self, mv: &Move) -> bool {
        self.hand.contains(&mv.piece) && self.fits(mv)
    }

    /// All legal moves: hand order, then x ascending, then y ascending.
    pub fn get_valid_moves(&self) -> Vec<Move> {
        let mut out = Vec::new();
        for &piece in &self.hand {
            self.push_moves_for(piece, &mut out);
        }
        out
    }

    /// Legal moves for one piece, x ascending then y ascending.
    pub fn valid_moves_for(&self, piece: PieceId) -> Vec<Move> {
        let mut out = Vec::new();
        if self.hand.contains(&piece) {
            self.push_moves_for(piece, &mut out);
        }
        out
    }

    fn push_moves_for(&self, piece: PieceId, out: &mut Vec<Move>) {
        for x in 0..BOARD_SIZE as i8 {
            for y in 0..BOARD_SIZE as i8 {
                let mv = Move::new(piece, x, y);
                if self.fits(&mv) {
                    out.push(mv);
                }
            }
        }
    }

    /// Short-circuiting form of `!get_valid_moves().is_empty()`.
    pub fn has_valid_moves(&self) -> bool {
        self.hand.iter().any(|&piece| {
            (0..BOARD_SIZE as i8)
                .any(|x| (0..BOARD_SIZE as i8).any(|y| self.fits(&Move::new(piece, x, y))))
        })
    }

    /// Rows with no cell equal to 0.
    pub fn get_full_rows(&self) -> LineSet {
        (0..SIZE)
            .filter(|&y| self.cells[y * SIZE..(y + 1) * SIZE].iter().all(|&c| c != EMPTY))
            .map(|y| y as u8)
            .collect()
    }

    /// Columns with no cell equal to 0.
    pub fn get_full_cols(&self) -> LineSet {
        (0..SIZE)
            .filter(|&x| (0..SIZE).all(|y| self.cells[y * SIZE + x] != EMPTY))
            .map(|x| x as u8)
            .collect()
    }

    /// Validate and apply a move from the hand.
    ///
    /// Returns the cleared rows and columns. On failure nothing changes.
    pub fn make_move(&mut self, mv: Move) -> Result<Cleared, BoardError> {
        if !self.is_valid_move(&mv) {
            return Err(BoardError::InvalidMove(mv));
        }
        let token = mv.encode(&self.catalog).map_err(BoardError::Unencodable)?;
        let slot = self
            .hand
            .iter()
            .position(|&p| p == mv.piece)
            .ok_or(BoardError::InvalidMove(mv))?;

        self.hand.remove(slot);
        Ok(self.apply(mv, token, Some(slot as u8)))
    }

    /// Apply a move without legality checks and without touching the hand.
    ///
    /// Blocks outside the grid are skipped. The anchor must still be
    /// encodable so the move can be recorded.
    pub fn force_move(&mut self, mv: Move) -> Result<Cleared, BoardError> {
        self.check_piece(mv.piece)?;
        let token = mv.encode(&self.catalog).map_err(BoardError::Unencodable)?;
        Ok(self.apply(mv, token, None))
    }

    fn apply(&mut self, mv: Move, token: MoveToken, hand_slot: Option<u8>) -> Cleared {
        let cleared = self.place_and_clear(&mv);
        self.history.push(HistoryEntry {
            mv,
            token,
            hand_slot,
            cleared: cleared.clone(),
        });
        cleared
    }

    fn place_and_clear(&mut self, mv: &Move) -> Cleared {
        let catalog = Arc::clone(&self.catalog);
        let blocks = catalog.get(mv.piece).blocks();

        self.marks = [Mark::None; CELL_COUNT];
        for &(dx, dy) in blocks {
            if let Some(idx) = Self::block_index(mv, dx, dy) {
                self.cells[idx] = FILLED;
                self.marks[idx] = Mark::Placed;
            }
        }

        let rows = self.get_full_rows();
        let cols = self.get_full_cols();

        // Row pass skips full columns so intersections are decremented once,
        // by the column pass.
        for &y in &rows {
            for x in 0..SIZE {
                if !cols.contains(&(x as u8)) {
                    let idx = y as usize * SIZE + x;
                    self.cells[idx] -= 1;
                    self.marks[idx] = Mark::ClearedRow;
                }
            }
        }
        for &x in &cols {
            for y in 0..SIZE {
                let idx = y * SIZE + x as usize;
                self.cells[idx] -= 1;
                self.marks[idx] = Mark::ClearedCol;
            }
        }

        for &(dx, dy) in blocks {
            if let Some(idx) = Self::block_index(mv, dx, dy) {
                self.marks[idx] = Mark::Placed;
            }
        }

        Cleared { rows, cols }
    }

    /// Reverse the most recent move.
    ///
    /// Cleared lines are incremented back (each cell at most once), the piece
    /// blocks are zeroed and a piece taken from the hand goes back into its
    /// slot. Returns the undone move.
    pub fn undo_move(&mut self) -> Result<Move, BoardError> {
        let Some(last) = self.history.last() else {
            return Err(BoardError::NothingToUndo);
        };
        if last.hand_slot.is_some() && self.hand.is_full() {
            return Err(BoardError::HandFull);
        }
        let Some(entry) = self.history.pop() else {
            return Err(BoardError::NothingToUndo);
        };

        let mut restored = [false; CELL_COUNT];
        for &x in &entry.cleared.cols {
            for y in 0..SIZE {
                let idx = y * SIZE + x as usize;
                if !restored[idx] {
                    restored[idx] = true;
                    self.cells[idx] += 1;
                }
            }
        }
        for &y in &entry.cleared.rows {
            for x in 0..SIZE {
                let idx = y as usize * SIZE + x;
                if !restored[idx] {
                    restored[idx] = true;
                    self.cells[idx] += 1;
                }
            }
        }

        let mv = entry.mv;
        let catalog = Arc::clone(&self.catalog);
        for &(dx, dy) in catalog.get(mv.piece).blocks() {
            if let Some(idx) = Self::block_index(&mv, dx, dy) {
                self.cells[idx] = EMPTY;
            }
        }

        if let Some(slot) = entry.hand_slot {
            let slot = (slot as usize).min(self.hand.len());
            self.hand.insert(slot, mv.piece);
        }
        self.marks = [Mark::None; CELL_COUNT];
        Ok(mv)
    }

    /// Grid as 100 digits (outer loop x, inner loop y) followed by the hand glyphs.
    pub fn export_as_str(&self) -> Result<String, BoardError> {
        let mut out = String::with_capacity(CELL_COUNT + HAND_SIZE);
        for x in 0..SIZE {
            for y in 0..SIZE {
                let value = self.cells[y * SIZE + x];
                let digit = u32::try_from(value)
                    .ok()
                    .and_then(|v| char::from_digit(v, 10))
                    .ok_or(BoardError::UnencodableCell {
                        x: x as u8,
                        y: y as u8,
                        value,
                    })?;
                out.push(digit);
            }
        }
        for &piece in &self.hand {
            out.push(self.catalog.get(piece).glyph());
        }
        Ok(out)
    }

    /// Inverse of [`Board::export_as_str`]. The history starts empty.
    pub fn import_as_str(catalog: Arc<Catalog>, s: &str) -> Result<Self, BoardError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() < CELL_COUNT {
            return Err(ImportError::TooShort { len: chars.len() }.into());
        }

        let mut board = Self::new(catalog);
        for (pos, &ch) in chars[..CELL_COUNT].iter().enumerate() {
            let digit = ch.to_digit(10).ok_or(ImportError::BadCell { pos, ch })?;
            let (x, y) = (pos / SIZE, pos % SIZE);
            board.cells[y * SIZE + x] = digit as Cell;
        }

        let glyphs = &chars[CELL_COUNT..];
        if glyphs.len() > HAND_SIZE {
            return Err(ImportError::TooManyPieces(glyphs.len()).into());
        }
        for &glyph in glyphs {
            let piece = board.catalog.by_glyph(glyph).map_err(ImportError::from)?;
            board.hand.push(piece);
        }
        Ok(board)
    }

    /// Rebuild a board by forcing every move of a transcript onto an empty grid.
    ///
    /// Each replayed move must clear exactly the lines the transcript recorded.
    ///
    /// Anchors refer to each piece's top-left block after normalization. Mirrored
    /// L shapes (`k`, `o`) therefore land on different cells than in transcripts
    /// written with bounding-box anchors, and blocks that end up off the grid are
    /// skipped without an error.
    pub fn replay(catalog: Arc<Catalog>, transcript: &str) -> Result<Self, TranscriptError> {
        let entries = parse_transcript(transcript, &catalog)?;
        let mut board = Self::new(catalog);
        for (index, entry) in entries.into_iter().enumerate() {
            let actual = board.apply(entry.mv, entry.token, None);
            if actual != entry.cleared {
                return Err(TranscriptError::Mismatch {
                    index,
                    expected: entry.cleared,
                    actual,
                });
            }
        }
        Ok(board)
    }
}
