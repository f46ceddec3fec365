//! Configuration types for agc

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::AgcError;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub alignment: AlignmentConfig,
}

/// Which existing OTUs a candidate is compared against before it is
/// accepted as a new representative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ComparisonScope {
    /// Best identity over every OTU decides
    #[default]
    All,
    /// Only the most recently added OTU decides
    Last,
}

impl std::fmt::Display for ComparisonScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonScope::All => write!(f, "all"),
            ComparisonScope::Last => write!(f, "last"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusteringConfig {
    #[serde(default = "default_min_seq_len")]
    pub min_seq_len: usize,
    #[serde(default = "default_min_count")]
    pub min_count: usize,
    /// Reserved for batched prefiltering, not read by the clustering loop
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Reserved for a k-mer prefilter, not read by the clustering loop
    #[serde(default = "default_kmer_size")]
    pub kmer_size: usize,
    #[serde(default = "default_identity_threshold")]
    pub identity_threshold: f64,
    #[serde(default)]
    pub comparison_scope: ComparisonScope,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlignmentConfig {
    #[serde(default = "default_gap_open")]
    pub gap_open: i32,
    #[serde(default = "default_gap_extend")]
    pub gap_extend: i32,
    /// Substitution matrix in NCBI text format; built-in nucleotide matrix if unset
    #[serde(default)]
    pub matrix: Option<PathBuf>,
}

// Default value functions
fn default_min_seq_len() -> usize { 400 }
fn default_min_count() -> usize { 10 }
fn default_chunk_size() -> usize { 100 }
fn default_kmer_size() -> usize { 8 }
fn default_identity_threshold() -> f64 { 97.0 }
fn default_gap_open() -> i32 { 1 }
fn default_gap_extend() -> i32 { 1 }

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            min_seq_len: default_min_seq_len(),
            min_count: default_min_count(),
            chunk_size: default_chunk_size(),
            kmer_size: default_kmer_size(),
            identity_threshold: default_identity_threshold(),
            comparison_scope: ComparisonScope::default(),
        }
    }
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            gap_open: default_gap_open(),
            gap_extend: default_gap_extend(),
            matrix: None,
        }
    }
}

impl Config {
    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<(), AgcError> {
        let c = &self.clustering;
        if !(c.identity_threshold > 0.0 && c.identity_threshold <= 100.0) {
            return Err(AgcError::Configuration(format!(
                "identity threshold must be in (0, 100], got {}",
                c.identity_threshold
            )));
        }
        if c.min_count == 0 {
            return Err(AgcError::Configuration("mincount must be >= 1".to_string()));
        }
        if c.chunk_size == 0 {
            return Err(AgcError::Configuration("chunk size must be >= 1".to_string()));
        }
        if c.kmer_size == 0 {
            return Err(AgcError::Configuration("kmer size must be >= 1".to_string()));
        }

        let a = &self.alignment;
        if a.gap_open < 0 || a.gap_extend < 0 {
            return Err(AgcError::Configuration(format!(
                "gap penalties must be non-negative, got open={} extend={}",
                a.gap_open, a.gap_extend
            )));
        }
        Ok(())
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, AgcError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| AgcError::Configuration(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), AgcError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| AgcError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
