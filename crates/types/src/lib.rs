//! Shared types and constants for the 10x10 block puzzle.
//!
//! Everything here is plain data with no dependencies, so the same definitions
//! can be used by the core rules, the text view and the command-line runner.
//!
//! # Board Geometry
//!
//! - **Size**: 10 columns by 10 rows (indexed 0-9 on both axes)
//! - **Origin**: (0, 0) is the top-left cell; `x` grows to the right, `y` grows down
//! - **Hand**: up to 3 pieces are available before a refill is required
//!
//! # Move Tokens
//!
//! A move serializes to two characters. The first one carries the anchor as
//! `char::from(TOKEN_BASE + y * 10 + x)`, the second one is the piece glyph.
//! Only anchors in `0..=9` on both axes have a slot, which gives
//! [`ANCHOR_SLOTS`] (100) possible codes.
//!
//! # Scoring
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BLOCK_POINTS` | 1 | Points per placed block |
//! | `LINE_BONUS` | 10 | Multiplier for the triangular line-clear bonus |
//!
//! # Examples
//!
//! ```
//! use tenten_types::{Axis, Mark, BOARD_SIZE, HAND_SIZE};
//!
//! assert_eq!(BOARD_SIZE, 10);
//! assert_eq!(HAND_SIZE, 3);
//!
//! assert_eq!(Axis::from_marker('y'), Some(Axis::Row));
//! assert_eq!(Axis::Col.marker(), 'x');
//!
//! assert_eq!(Mark::from_u8(1), Some(Mark::Placed));
//! ```

/// Width and height of the board in cells.
pub const BOARD_SIZE: u8 = 10;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Maximum number of pieces held in a hand.
pub const HAND_SIZE: usize = 3;

/// Offset added to the anchor index when encoding a move token.
pub const TOKEN_BASE: u32 = 32;

/// Number of anchor codes a move token can express (10 x 10).
pub const ANCHOR_SLOTS: u32 = CELL_COUNT as u32;

/// Points awarded for every block of a placed piece.
pub const BLOCK_POINTS: u32 = 1;

/// Line-clear bonus unit: the k-th line cleared by one move is worth `k * LINE_BONUS`.
pub const LINE_BONUS: u32 = 10;

/// Value of a grid cell.
///
/// - `0`: empty
/// - `1`: occupied
///
/// Other values are possible after forced moves or imported states; the board
/// never clamps them.
pub type Cell = i32;

/// Empty cell value.
pub const EMPTY: Cell = 0;

/// Occupied cell value.
pub const FILLED: Cell = 1;

/// Line orientation used by clear markers.
///
/// The transcript writes a cleared row as `"<index>y"` and a cleared column as
/// `"<index>x"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Col,
}

impl Axis {
    /// Parse a transcript marker character.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenten_types::Axis;
    ///
    /// assert_eq!(Axis::from_marker('x'), Some(Axis::Col));
    /// assert_eq!(Axis::from_marker('z'), None);
    /// ```
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            'y' => Some(Axis::Row),
            'x' => Some(Axis::Col),
            _ => None,
        }
    }

    /// Transcript marker character for this axis.
    pub fn marker(&self) -> char {
        match self {
            Axis::Row => 'y',
            Axis::Col => 'x',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Col => "col",
        }
    }
}

/// Highlight state of a cell after the last board action.
///
/// This is presentation data only. The numeric codes match the classic
/// overlay values: 0 untouched, 1 placed, 2 cleared by a row, 3 cleared by a
/// column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    None,
    Placed,
    ClearedRow,
    ClearedCol,
}

impl Mark {
    pub fn as_u8(&self) -> u8 {
        match self {
            Mark::None => 0,
            Mark::Placed => 1,
            Mark::ClearedRow => 2,
            Mark::ClearedCol => 3,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Mark::None),
            1 => Some(Mark::Placed),
            2 => Some(Mark::ClearedRow),
            3 => Some(Mark::ClearedCol),
            _ => None,
        }
    }

    /// True for marks left by a line clear.
    pub fn is_cleared(&self) -> bool {
        matches!(self, Mark::ClearedRow | Mark::ClearedCol)
    }
}
