//! History module - structured move log and its transcript form
//!
//! The board keeps one [`HistoryEntry`] per applied move. Undo pops the last
//! entry and reverses it from its fields.
//!
//! The transcript (`move_str`) is the classic flat text form of the same log:
//! every move token followed by `"<row>y"` for each cleared row and
//! `"<col>x"` for each cleared column. It can be parsed back and replayed.

use std::fmt;

use arrayvec::ArrayVec;

use crate::catalog::Catalog;
use crate::moves::{Move, MoveError, MoveToken};
use crate::types::{Axis, BOARD_SIZE};

/// Row and column indices cleared by one move, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Cleared {
    pub rows: ArrayVec<u8, { BOARD_SIZE as usize }>,
    pub cols: ArrayVec<u8, { BOARD_SIZE as usize }>,
}

impl Cleared {
    /// Total number of cleared lines.
    pub fn lines(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }

    fn write_markers(&self, out: &mut String) {
        for &y in &self.rows {
            push_marker(out, y, Axis::Row);
        }
        for &x in &self.cols {
            push_marker(out, x, Axis::Col);
        }
    }
}

fn push_marker(out: &mut String, index: u8, axis: Axis) {
    out.push(char::from(b'0' + index));
    out.push(axis.marker());
}

/// One applied move as recorded by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mv: Move,
    pub token: MoveToken,
    /// Hand slot the piece was taken from; `None` for forced moves.
    pub hand_slot: Option<u8>,
    pub cleared: Cleared,
}

impl HistoryEntry {
    /// Append this entry's transcript text to `out`.
    pub fn write_transcript(&self, out: &mut String) {
        self.token.write_into(out);
        self.cleared.write_markers(out);
    }
}

/// A move parsed back out of a transcript, with the clears it recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub mv: Move,
    pub token: MoveToken,
    pub cleared: Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    /// A clear marker appeared before any move token.
    OrphanMarker { pos: usize },
    /// Input ended in the middle of a move token.
    Truncated { pos: usize },
    BadToken { pos: usize, source: MoveError },
    /// Replaying a move produced different clears than the transcript recorded.
    Mismatch { index: usize, expected: Cleared, actual: Cleared },
    /// The same line is recorded twice for one move.
    DuplicateMarker { pos: usize },
}

impl TranscriptError {
    pub fn code(&self) -> &'static str {
        match self {
            TranscriptError::OrphanMarker { .. } => "orphan_marker",
            TranscriptError::Truncated { .. } => "truncated",
            TranscriptError::BadToken { .. } => "bad_token",
            TranscriptError::Mismatch { .. } => "replay_mismatch",
            TranscriptError::DuplicateMarker { .. } => "duplicate_marker",
        }
    }
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptError::OrphanMarker { pos } => {
                write!(f, "clear marker at char {} precedes any move", pos)
            }
            TranscriptError::Truncated { pos } => write!(f, "truncated move token at char {}", pos),
            TranscriptError::BadToken { pos, source } => {
                write!(f, "bad move token at char {}: {}", pos, source)
            }
            TranscriptError::Mismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "move {} cleared rows {:?} cols {:?}, transcript says rows {:?} cols {:?}",
                index,
                actual.rows.as_slice(),
                actual.cols.as_slice(),
                expected.rows.as_slice(),
                expected.cols.as_slice()
            ),
            TranscriptError::DuplicateMarker { pos } => {
                write!(f, "line recorded twice at char {}", pos)
            }
        }
    }
}

impl std::error::Error for TranscriptError {}

/// Render a full log as a transcript string.
pub fn render_transcript(entries: &[HistoryEntry]) -> String {
    let mut out = String::with_capacity(entries.len() * 4);
    for entry in entries {
        entry.write_transcript(&mut out);
    }
    out
}

/// Parse a transcript into structured entries.
///
/// A digit followed by `x` or `y` is read as a clear marker for the preceding
/// move; anything else starts a new 2-character move token.
pub fn parse_transcript(s: &str, catalog: &Catalog) -> Result<Vec<TranscriptEntry>, TranscriptError> {
    let chars: Vec<char> = s.chars().collect();
    let mut out: Vec<TranscriptEntry> = Vec::new();
    let mut pos = 0usize;

    while pos < chars.len() {
        if let Some((index, axis)) = marker_at(&chars, pos) {
            let Some(last) = out.last_mut() else {
                return Err(TranscriptError::OrphanMarker { pos });
            };
            let list = match axis {
                Axis::Row => &mut last.cleared.rows,
                Axis::Col => &mut last.cleared.cols,
            };
            if list.contains(&index) {
                return Err(TranscriptError::DuplicateMarker { pos });
            }
            list.push(index);
            pos += 2;
            continue;
        }

        if pos + 1 >= chars.len() {
            return Err(TranscriptError::Truncated { pos });
        }
        let token = MoveToken {
            anchor: chars[pos],
            glyph: chars[pos + 1],
        };
        let mv = Move::from_token(token, catalog)
            .map_err(|source| TranscriptError::BadToken { pos, source })?;
        out.push(TranscriptEntry {
            mv,
            token,
            cleared: Cleared::default(),
        });
        pos += 2;
    }

    for entry in &mut out {
        entry.cleared.rows.sort_unstable();
        entry.cleared.cols.sort_unstable();
    }
    Ok(out)
}

fn marker_at(chars: &[char], pos: usize) -> Option<(u8, Axis)> {
    let digit = chars.get(pos)?.to_digit(10)?;
    let axis = Axis::from_marker(*chars.get(pos + 1)?)?;
    Some((digit as u8, axis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PieceId;

    fn cleared(rows: &[u8], cols: &[u8]) -> Cleared {
        let mut c = Cleared::default();
        c.rows.extend(rows.iter().copied());
        c.cols.extend(cols.iter().copied());
        c
    }

    #[test]
    fn renders_rows_before_cols() {
        let catalog = Catalog::standard();
        let mv = Move::new(PieceId(0), 0, 0);
        let entry = HistoryEntry {
            mv,
            token: mv.encode(&catalog).unwrap(),
            hand_slot: Some(0),
            cleared: cleared(&[0, 4], &[0]),
        };
        let s = render_transcript(&[entry]);
        assert_eq!(s, " a0y4y0x");
    }

    #[test]
    fn parses_markers_into_previous_move() {
        let catalog = Catalog::standard();
        let parsed = parse_transcript(" a0y0x!b", &catalog).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].mv, Move::new(PieceId(0), 0, 0));
        assert_eq!(parsed[0].cleared, cleared(&[0], &[0]));
        assert_eq!(parsed[1].mv, Move::new(PieceId(1), 1, 0));
        assert!(parsed[1].cleared.is_empty());
    }

    #[test]
    fn digit_anchor_is_not_a_marker() {
        // '0' is anchor slot 16 -> (6, 1).
        let catalog = Catalog::standard();
        let parsed = parse_transcript("0a", &catalog).unwrap();
        assert_eq!(parsed[0].mv, Move::new(PieceId(0), 6, 1));
    }

    #[test]
    fn parse_errors() {
        let catalog = Catalog::standard();
        assert_eq!(
            parse_transcript("3y a", &catalog),
            Err(TranscriptError::OrphanMarker { pos: 0 })
        );
        assert_eq!(
            parse_transcript(" a!", &catalog),
            Err(TranscriptError::Truncated { pos: 2 })
        );
        assert!(matches!(
            parse_transcript(" Z", &catalog),
            Err(TranscriptError::BadToken { pos: 0, .. })
        ));
        assert_eq!(
            parse_transcript(" a1y1y", &catalog),
            Err(TranscriptError::DuplicateMarker { pos: 4 })
        );
    }
}
