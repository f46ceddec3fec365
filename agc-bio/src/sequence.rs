use std::cmp::Ordering;
use std::fmt;

/// A distinct read sequence with the number of raw reads collapsing to it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbundanceRecord {
    pub sequence: String,
    pub count: usize,
}

impl AbundanceRecord {
    pub fn new(sequence: impl Into<String>, count: usize) -> Self {
        Self {
            sequence: sequence.into(),
            count,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.sequence.as_bytes()
    }

    /// Clustering order: most abundant first, then lexicographic on sequence
    pub fn abundance_order(a: &Self, b: &Self) -> Ordering {
        b.count
            .cmp(&a.count)
            .then_with(|| a.sequence.cmp(&b.sequence))
    }
}

impl fmt::Display for AbundanceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (x{})", self.sequence, self.count)
    }
}
