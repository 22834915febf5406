//! RNG module - uniform random piece generation
//!
//! Every draw picks one of the seven kinds independently and uniformly; there
//! is no bag, so the same kind can repeat any number of times.
//!
//! The session owns its [`PieceSource`], so a fixed seed (or a scripted
//! [`SequenceSource`]) reproduces a game exactly.

use crate::types::PieceKind;

/// Supplier of piece kinds for the "next" slot
pub trait PieceSource {
    fn draw(&mut self) -> PieceKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// The low bits of a power-of-two LCG are short-period, so the value is
    /// taken from the high half.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for SimpleRng {
    fn draw(&mut self) -> PieceKind {
        let index = self.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[index]
    }
}

/// Replays a fixed list of kinds in a loop.
///
/// An empty list falls back to `I`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSource {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl SequenceSource {
    pub fn new(kinds: &[PieceKind]) -> Self {
        Self {
            kinds: kinds.to_vec(),
            pos: 0,
        }
    }
}

impl PieceSource for SequenceSource {
    fn draw(&mut self) -> PieceKind {
        let Some(&kind) = self.kinds.get(self.pos) else {
            return PieceKind::I;
        };
        self.pos = (self.pos + 1) % self.kinds.len();
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn draw(&mut self) -> PieceKind {
        (**self).draw()
    }
}
