//! Deal module - refilling an empty hand
//!
//! The board never draws pieces by itself. Whoever drives the game hands it
//! three pieces through a [`Dealer`] once the hand runs empty.
//!
//! Two dealers ship with the crate:
//! - [`RandomDealer`]: uniform choice over the catalog from a seeded LCG, so a
//!   seed always reproduces the same game.
//! - [`ScriptedDealer`]: cycles through a fixed list, for tests and fixtures.

use crate::catalog::{Catalog, PieceId, UnknownPiece};
use crate::types::HAND_SIZE;

/// Source of fresh hands.
pub trait Dealer {
    fn deal(&mut self, catalog: &Catalog) -> [PieceId; HAND_SIZE];
}

impl<F> Dealer for F
where
    F: FnMut(&Catalog) -> [PieceId; HAND_SIZE],
{
    fn deal(&mut self, catalog: &Catalog) -> [PieceId; HAND_SIZE] {
        self(catalog)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits have short periods.
        (self.next_u32() >> 16) % max.max(1)
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform random dealer.
#[derive(Debug, Clone)]
pub struct RandomDealer {
    rng: SimpleRng,
    seed: u32,
}

impl RandomDealer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for RandomDealer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Dealer for RandomDealer {
    fn deal(&mut self, catalog: &Catalog) -> [PieceId; HAND_SIZE] {
        let n = catalog.len() as u32;
        let mut hand = [PieceId(0); HAND_SIZE];
        for slot in &mut hand {
            *slot = PieceId(self.rng.next_range(n) as u8);
        }
        hand
    }
}

/// Deals pieces from a fixed list, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedDealer {
    pieces: Vec<PieceId>,
    next: usize,
}

impl ScriptedDealer {
    /// # Panics
    ///
    /// Panics if `pieces` is empty.
    pub fn new(pieces: Vec<PieceId>) -> Self {
        assert!(!pieces.is_empty(), "scripted dealer needs at least one piece");
        Self { pieces, next: 0 }
    }

    /// Build from catalog glyphs, e.g. `"aes"`.
    ///
    /// # Panics
    ///
    /// Panics if `glyphs` is empty.
    pub fn from_glyphs(catalog: &Catalog, glyphs: &str) -> Result<Self, UnknownPiece> {
        let pieces = glyphs
            .chars()
            .map(|g| catalog.by_glyph(g))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(pieces))
    }
}

impl Dealer for ScriptedDealer {
    fn deal(&mut self, _catalog: &Catalog) -> [PieceId; HAND_SIZE] {
        let mut hand = [PieceId(0); HAND_SIZE];
        for slot in &mut hand {
            *slot = self.pieces[self.next % self.pieces.len()];
            self.next += 1;
        }
        hand
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_not_stuck() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn random_dealer_stays_in_catalog() {
        let catalog = Catalog::standard();
        let mut dealer = RandomDealer::new(7);
        for _ in 0..200 {
            for id in dealer.deal(&catalog) {
                assert!(id.index() < catalog.len());
            }
        }
    }

    #[test]
    fn random_dealer_is_reproducible() {
        let catalog = Catalog::standard();
        let mut a = RandomDealer::new(99);
        let mut b = RandomDealer::new(99);
        for _ in 0..20 {
            assert_eq!(a.deal(&catalog), b.deal(&catalog));
        }
    }

    #[test]
    fn random_dealer_covers_catalog() {
        let catalog = Catalog::standard();
        let mut dealer = RandomDealer::new(3);
        let mut seen = vec![false; catalog.len()];
        for _ in 0..500 {
            for id in dealer.deal(&catalog) {
                seen[id.index()] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn scripted_dealer_cycles() {
        let catalog = Catalog::standard();
        let mut dealer = ScriptedDealer::from_glyphs(&catalog, "ab").unwrap();
        assert_eq!(dealer.deal(&catalog), [PieceId(0), PieceId(1), PieceId(0)]);
        assert_eq!(dealer.deal(&catalog), [PieceId(1), PieceId(0), PieceId(1)]);
    }
}
