//! Catalog module - the fixed set of polyomino pieces
//!
//! Every piece is stored as a list of block offsets relative to its origin
//! block: the topmost, then leftmost occupied cell, which is always (0, 0).
//! Offsets on lower rows may have a negative `dx` (for example the mirrored L).
//!
//! The catalog is built once and shared read-only (`Arc<Catalog>`). Pieces are
//! referred to by [`PieceId`], their index in the catalog.

use std::fmt;

use crate::types::Axis;

/// Offset of a single block relative to the piece origin.
pub type BlockOffset = (i8, i8);

/// Index of a piece inside its [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u8);

impl PieceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A polyomino shape with its identifier and display glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    id: String,
    glyph: char,
    blocks: Vec<BlockOffset>,
}

impl Piece {
    /// Build a piece from raw cell coordinates.
    ///
    /// The cells are normalized so the topmost, then leftmost one becomes
    /// (0, 0), then sorted row by row with duplicates removed.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty; every catalog shape has at least one block.
    pub fn new(id: impl Into<String>, glyph: char, cells: &[BlockOffset]) -> Self {
        assert!(!cells.is_empty(), "piece must have at least one block");
        Self {
            id: id.into(),
            glyph,
            blocks: normalize(cells),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn blocks(&self) -> &[BlockOffset] {
        &self.blocks
    }

    /// Number of blocks (also the placement score of the piece).
    pub fn size(&self) -> usize {
        self.blocks.len()
    }

    /// Inclusive horizontal extent of the blocks: `(min_dx, max_dx)`.
    pub fn x_span(&self) -> (i8, i8) {
        let min = self.blocks.iter().map(|b| b.0).min().unwrap_or(0);
        let max = self.blocks.iter().map(|b| b.0).max().unwrap_or(0);
        (min, max)
    }

    /// Largest vertical offset of the blocks.
    pub fn max_dy(&self) -> i8 {
        self.blocks.iter().map(|b| b.1).max().unwrap_or(0)
    }
}

/// Draws the piece as rows of its uppercase glyph.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min_dx, max_dx) = self.x_span();
        let ch = self.glyph.to_ascii_uppercase();
        for dy in 0..=self.max_dy() {
            let mut line = String::new();
            for dx in min_dx..=max_dx {
                line.push(if self.blocks.contains(&(dx, dy)) { ch } else { ' ' });
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

fn normalize(cells: &[BlockOffset]) -> Vec<BlockOffset> {
    let origin = cells
        .iter()
        .copied()
        .min_by_key(|&(x, y)| (y, x))
        .unwrap_or((0, 0));
    let mut out: Vec<BlockOffset> = cells
        .iter()
        .map(|&(x, y)| (x - origin.0, y - origin.1))
        .collect();
    out.sort_by_key(|&(x, y)| (y, x));
    out.dedup();
    out
}

/// Lookup failure for a glyph that is not in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownPiece(pub char);

impl UnknownPiece {
    pub fn code(self) -> &'static str {
        "unknown_piece"
    }
}

impl fmt::Display for UnknownPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no piece with glyph {:?}", self.0)
    }
}

impl std::error::Error for UnknownPiece {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Empty,
    TooMany(usize),
    DuplicateGlyph(char),
    DuplicateId(String),
    /// Glyph that cannot appear in a transcript token: a digit, a clear
    /// axis letter (`x`/`y`), whitespace or a control character.
    ReservedGlyph(char),
}

impl CatalogError {
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::Empty => "empty_catalog",
            CatalogError::TooMany(_) => "catalog_too_large",
            CatalogError::DuplicateGlyph(_) => "duplicate_glyph",
            CatalogError::DuplicateId(_) => "duplicate_id",
            CatalogError::ReservedGlyph(_) => "reserved_glyph",
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Empty => write!(f, "catalog has no pieces"),
            CatalogError::TooMany(n) => write!(f, "catalog has {} pieces (max 256)", n),
            CatalogError::DuplicateGlyph(c) => write!(f, "glyph {:?} used by two pieces", c),
            CatalogError::DuplicateId(id) => write!(f, "id {:?} used by two pieces", id),
            CatalogError::ReservedGlyph(c) => {
                write!(f, "glyph {:?} is reserved by the transcript format", c)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

fn is_reserved_glyph(c: char) -> bool {
    c.is_ascii_digit() || Axis::from_marker(c).is_some() || c.is_whitespace() || c.is_control()
}

/// Immutable registry of pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pieces: Vec<Piece>,
}

impl Catalog {
    /// Build a catalog from a custom piece list.
    ///
    /// Glyphs and ids must be unique; shapes may repeat. Glyphs must be
    /// printable and must not be a digit, `x` or `y`, so every move token
    /// stays readable next to clear markers.
    pub fn new(pieces: Vec<Piece>) -> Result<Self, CatalogError> {
        if pieces.is_empty() {
            return Err(CatalogError::Empty);
        }
        if pieces.len() > u8::MAX as usize + 1 {
            return Err(CatalogError::TooMany(pieces.len()));
        }
        for (i, p) in pieces.iter().enumerate() {
            if is_reserved_glyph(p.glyph) {
                return Err(CatalogError::ReservedGlyph(p.glyph));
            }
            for q in &pieces[..i] {
                if q.glyph == p.glyph {
                    return Err(CatalogError::DuplicateGlyph(p.glyph));
                }
                if q.id == p.id {
                    return Err(CatalogError::DuplicateId(p.id.clone()));
                }
            }
        }
        Ok(Self { pieces })
    }

    /// The 19 canonical pieces, glyphs `a` through `s`.
    pub fn standard() -> Self {
        let pieces = STANDARD_SHAPES
            .iter()
            .map(|&(id, glyph, cells)| Piece::new(id, glyph, cells))
            .collect();
        Self { pieces }
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Piece for an id handed out by this catalog.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this catalog.
    pub fn get(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    pub fn try_get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    pub fn by_glyph(&self, glyph: char) -> Result<PieceId, UnknownPiece> {
        self.pieces
            .iter()
            .position(|p| p.glyph == glyph)
            .map(|i| PieceId(i as u8))
            .ok_or(UnknownPiece(glyph))
    }

    pub fn by_id(&self, id: &str) -> Option<PieceId> {
        self.pieces
            .iter()
            .position(|p| p.id == id)
            .map(|i| PieceId(i as u8))
    }

    pub fn ids(&self) -> impl Iterator<Item = PieceId> + '_ {
        (0..self.pieces.len()).map(|i| PieceId(i as u8))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, p)| (PieceId(i as u8), p))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

type ShapeDef = (&'static str, char, &'static [BlockOffset]);

const STANDARD_SHAPES: [ShapeDef; 19] = [
    ("1", 'a', &[(0, 0)]),
    ("2h", 'b', &[(0, 0), (1, 0)]),
    ("3h", 'c', &[(0, 0), (1, 0), (2, 0)]),
    ("4h", 'd', &[(0, 0), (1, 0), (2, 0), (3, 0)]),
    ("5h", 'e', &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]),
    ("2v", 'f', &[(0, 0), (0, 1)]),
    ("3v", 'g', &[(0, 0), (0, 1), (0, 2)]),
    ("4v", 'h', &[(0, 0), (0, 1), (0, 2), (0, 3)]),
    ("5v", 'i', &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]),
    // Small L trominoes.
    ("l", 'j', &[(0, 0), (0, 1), (1, 1)]),
    ("l1", 'k', &[(1, 0), (1, 1), (0, 1)]),
    ("l3", 'l', &[(0, 0), (0, 1), (1, 0)]),
    ("l2", 'm', &[(0, 0), (1, 1), (1, 0)]),
    // Large L pentominoes.
    ("L", 'n', &[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]),
    ("L1", 'o', &[(2, 0), (2, 1), (2, 2), (1, 2), (0, 2)]),
    ("L3", 'p', &[(0, 0), (0, 1), (0, 2), (1, 0), (2, 0)]),
    ("L2", 'q', &[(0, 0), (2, 1), (2, 2), (1, 0), (2, 0)]),
    ("4", 'r', &[(0, 0), (0, 1), (1, 0), (1, 1)]),
    (
        "9",
        's',
        &[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 1),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ],
    ),
];
