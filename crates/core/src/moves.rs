//! Move module - "this piece at this anchor" plus its 2-character token
//!
//! Token layout:
//! - char 0: `char::from(TOKEN_BASE + y * 10 + x)`
//! - char 1: the piece glyph
//!
//! Only anchors in `0..=9` can be encoded. Whether a move is legal is the
//! board's business, not the move's.

use std::fmt;

use crate::catalog::{Catalog, PieceId, UnknownPiece};
use crate::types::{ANCHOR_SLOTS, BOARD_SIZE, TOKEN_BASE};

/// A piece placed with its origin block at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: PieceId,
    pub x: i8,
    pub y: i8,
}

/// Encoded form of a move: anchor character followed by the piece glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveToken {
    pub anchor: char,
    pub glyph: char,
}

impl MoveToken {
    pub fn write_into(&self, out: &mut String) {
        out.push(self.anchor);
        out.push(self.glyph);
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.anchor, self.glyph)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// x or y outside 0..=9; the token has no slot for it.
    AnchorOutOfRange { x: i8, y: i8 },
    /// Token is not two characters, or its anchor code is outside the 100 slots.
    Decode,
    UnknownPiece(char),
}

impl MoveError {
    pub fn code(self) -> &'static str {
        match self {
            MoveError::AnchorOutOfRange { .. } => "anchor_out_of_range",
            MoveError::Decode => "decode_error",
            MoveError::UnknownPiece(_) => "unknown_piece",
        }
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::AnchorOutOfRange { x, y } => {
                write!(f, "anchor {},{} cannot be encoded (0..=9 only)", x, y)
            }
            MoveError::Decode => write!(f, "malformed move token"),
            MoveError::UnknownPiece(c) => write!(f, "no piece with glyph {:?}", c),
        }
    }
}

impl std::error::Error for MoveError {}

impl From<UnknownPiece> for MoveError {
    fn from(e: UnknownPiece) -> Self {
        MoveError::UnknownPiece(e.0)
    }
}

impl Move {
    pub fn new(piece: PieceId, x: i8, y: i8) -> Self {
        Self { piece, x, y }
    }

    /// Encode the move as a 2-character token.
    pub fn encode(&self, catalog: &Catalog) -> Result<MoveToken, MoveError> {
        let size = BOARD_SIZE as i8;
        if !(0..size).contains(&self.x) || !(0..size).contains(&self.y) {
            return Err(MoveError::AnchorOutOfRange {
                x: self.x,
                y: self.y,
            });
        }
        let slot = self.y as u32 * BOARD_SIZE as u32 + self.x as u32;
        // 32..=131 are all valid scalar values.
        let anchor = char::from_u32(TOKEN_BASE + slot).ok_or(MoveError::Decode)?;
        Ok(MoveToken {
            anchor,
            glyph: catalog.get(self.piece).glyph(),
        })
    }

    /// Decode a token produced by [`Move::encode`].
    pub fn decode(token: &str, catalog: &Catalog) -> Result<Self, MoveError> {
        let mut chars = token.chars();
        let (Some(anchor), Some(glyph), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(MoveError::Decode);
        };
        Self::from_token(MoveToken { anchor, glyph }, catalog)
    }

    pub fn from_token(token: MoveToken, catalog: &Catalog) -> Result<Self, MoveError> {
        let slot = (token.anchor as u32)
            .checked_sub(TOKEN_BASE)
            .filter(|&s| s < ANCHOR_SLOTS)
            .ok_or(MoveError::Decode)?;
        let piece = catalog.by_glyph(token.glyph)?;
        let size = BOARD_SIZE as u32;
        Ok(Self {
            piece,
            x: (slot % size) as i8,
            y: (slot / size) as i8,
        })
    }

    /// Human-readable form, e.g. `"L1 at 3,4"`.
    pub fn describe(&self, catalog: &Catalog) -> String {
        match catalog.try_get(self.piece) {
            Some(p) => format!("{} at {},{}", p.id(), self.x, self.y),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece #{} at {},{}", self.piece.0, self.x, self.y)
    }
}
