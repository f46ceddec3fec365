pub mod identity;
pub mod nw_aligner;
pub mod scoring;

pub use identity::identity;
pub use nw_aligner::NeedlemanWunsch;
pub use scoring::{NucleotideMatrix, ScoringMatrix, SubstitutionMatrix};

use agc_core::AgcResult;

/// Gap symbol used in aligned strings
pub const GAP: u8 = b'-';

/// A global alignment of two sequences as two gap-padded rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentResult {
    pub score: i32,
    pub first: Vec<u8>,
    pub second: Vec<u8>,
}

impl AlignmentResult {
    pub fn new(score: i32, first: Vec<u8>, second: Vec<u8>) -> Self {
        Self { score, first, second }
    }

    /// Percent identity of the two rows
    pub fn identity(&self) -> AgcResult<f64> {
        identity(self)
    }
}

/// Capability to globally align two sequences
pub trait Aligner {
    fn align(&self, first: &[u8], second: &[u8]) -> AgcResult<AlignmentResult>;
}

impl<A: Aligner + ?Sized> Aligner for &A {
    fn align(&self, first: &[u8], second: &[u8]) -> AgcResult<AlignmentResult> {
        (**self).align(first, second)
    }
}
