//! Sequence handling for amplicon clustering: FASTA reading, global
//! alignment, dereplication and greedy OTU clustering.

pub mod alignment;
pub mod clustering;
pub mod formats;
pub mod sequence;

// Re-export commonly used types
pub use alignment::{identity, Aligner, AlignmentResult, NeedlemanWunsch};
pub use clustering::{dereplicate, dereplicate_fasta, Clustering, Dereplication, GreedyClusterer};
pub use formats::fasta::{read_fasta, SequenceReader};
pub use formats::otu::{read_otus, write_otu_file, write_otus};
pub use sequence::AbundanceRecord;
