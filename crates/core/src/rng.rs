//! RNG module - piece generation
//!
//! Each new piece is an independent uniform pick among the seven kinds (no bag).
//! A small LCG keeps games reproducible from a seed, and a scripted sequence
//! lets tests and replays fix the exact order of pieces.

use crate::error::{GameError, GameResult};
use crate::types::PieceKind;

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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of an LCG have short periods; use the high half.
        (self.next_u32() >> 16) % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Source of upcoming piece kinds
#[derive(Debug, Clone)]
pub enum PieceGenerator {
    /// Uniform random kinds from a seeded LCG
    Random(SimpleRng),
    /// Fixed list of kinds, repeated forever
    Sequence { kinds: Vec<PieceKind>, index: usize },
}

impl PieceGenerator {
    pub fn random(seed: u32) -> Self {
        PieceGenerator::Random(SimpleRng::new(seed))
    }

    pub fn sequence(kinds: Vec<PieceKind>) -> GameResult<Self> {
        if kinds.is_empty() {
            return Err(GameError::EmptySequence);
        }
        Ok(PieceGenerator::Sequence { kinds, index: 0 })
    }

    /// Produce the next piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        match self {
            PieceGenerator::Random(rng) => {
                PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            PieceGenerator::Sequence { kinds, index } => {
                let kind = kinds[*index];
                *index = (*index + 1) % kinds.len();
                kind
            }
        }
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::random(1)
    }
}
