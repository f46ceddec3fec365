//! Core utilities and types shared across the agc crates

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{
    load_config, save_config, AlignmentConfig, ClusteringConfig, ComparisonScope, Config,
};
pub use error::{AgcError, AgcResult};

/// Version information for agc
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
