pub mod fasta;
pub mod otu;

pub use fasta::{open_for_reading, read_fasta, SequenceReader};
pub use otu::{read_otus, write_otu_file, write_otus, LINE_WIDTH};
