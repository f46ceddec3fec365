pub mod dereplication;
pub mod greedy;

pub use dereplication::{dereplicate, dereplicate_fasta, Dereplication};
pub use greedy::{Clustering, ClusteringStats, GreedyClusterer, DEFAULT_IDENTITY_THRESHOLD};
