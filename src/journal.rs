//! JSONL turn journal.
//!
//! One JSON object per line: a `turn` record for every played move and a
//! `summary` record when the game ends. Records are tagged by `type`.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Catalog, GameResult, Move, TurnRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalMove {
    pub piece: String,
    pub x: i8,
    pub y: i8,
}

impl JournalMove {
    pub fn from_move(mv: &Move, catalog: &Catalog) -> Self {
        let piece = match catalog.try_get(mv.piece) {
            Some(p) => p.id().to_string(),
            None => format!("#{}", mv.piece.0),
        };
        Self {
            piece,
            x: mv.x,
            y: mv.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalRecord {
    Turn {
        turn: u32,
        #[serde(rename = "move")]
        mv: JournalMove,
        token: String,
        rows: Vec<u8>,
        cols: Vec<u8>,
        placement: u32,
        line_bonus: u32,
        total_score: u32,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        rejected: Vec<JournalMove>,
    },
    Summary {
        seed: u32,
        moves: u32,
        cleared_lines: u32,
        score: u32,
        move_str: String,
    },
}

impl JournalRecord {
    pub fn turn(record: &TurnRecord, catalog: &Catalog) -> Self {
        JournalRecord::Turn {
            turn: record.turn,
            mv: JournalMove::from_move(&record.mv, catalog),
            token: record.token.to_string(),
            rows: record.cleared.rows.to_vec(),
            cols: record.cleared.cols.to_vec(),
            placement: record.score.placement,
            line_bonus: record.score.line_bonus,
            total_score: record.total_score,
            rejected: record
                .rejected
                .iter()
                .map(|mv| JournalMove::from_move(mv, catalog))
                .collect(),
        }
    }

    pub fn summary(result: &GameResult, seed: u32) -> Self {
        JournalRecord::Summary {
            seed,
            moves: result.moves,
            cleared_lines: result.cleared_lines,
            score: result.score,
            move_str: result.move_str.clone(),
        }
    }
}

/// Line-delimited JSON sink for [`JournalRecord`]s.
pub struct Journal<W: Write> {
    out: W,
    buf: Vec<u8>,
}

impl Journal<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("journal: cannot open {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Journal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(512),
        }
    }

    pub fn write(&mut self, record: &JournalRecord) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, record)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cleared, MoveToken, PieceId, ScoreResult};

    #[test]
    fn turn_record_serializes_with_tag() {
        let catalog = Catalog::standard();
        let mut cleared = Cleared::default();
        cleared.rows.push(3);
        let record = TurnRecord {
            turn: 2,
            mv: Move::new(PieceId(0), 1, 0),
            token: MoveToken {
                anchor: '!',
                glyph: 'a',
            },
            cleared,
            score: ScoreResult {
                placement: 1,
                line_bonus: 10,
                total: 11,
            },
            total_score: 20,
            rejected: vec![],
        };

        let mut journal = Journal::new(Vec::new());
        journal.write(&JournalRecord::turn(&record, &catalog)).unwrap();
        let text = String::from_utf8(journal.into_inner()).unwrap();
        assert!(text.ends_with('\n'));

        let v: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(v["type"], "turn");
        assert_eq!(v["move"]["piece"], catalog.get(PieceId(0)).id());
        assert_eq!(v["token"], "!a");
        assert_eq!(v["rows"], serde_json::json!([3]));
        assert!(v.get("rejected").is_none());
    }

    #[test]
    fn records_read_back() {
        let result = GameResult {
            moves: 4,
            cleared_lines: 1,
            score: 21,
            move_str: "!a\"a".to_string(),
        };
        let mut journal = Journal::new(Vec::new());
        journal.write(&JournalRecord::summary(&result, 9)).unwrap();
        journal.write(&JournalRecord::summary(&result, 10)).unwrap();
        let text = String::from_utf8(journal.into_inner()).unwrap();

        let parsed: Vec<JournalRecord> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], JournalRecord::summary(&result, 9));
    }
}
