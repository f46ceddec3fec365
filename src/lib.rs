pub mod cli;
pub mod pipeline;

pub use crate::pipeline::{ClusteringResult, Pipeline, RunStats};
pub use agc_core::{AgcError, AgcResult, Config};
