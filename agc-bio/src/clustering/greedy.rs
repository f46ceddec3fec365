/// Abundance-ordered greedy clustering of dereplicated sequences
use crate::alignment::Aligner;
use crate::sequence::AbundanceRecord;
use agc_core::{AgcError, AgcResult, ComparisonScope};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

/// Default percent identity at or above which two sequences share an OTU
pub const DEFAULT_IDENTITY_THRESHOLD: f64 = 97.0;

// Smaller runs finish before a bar is worth drawing
const PROGRESS_MIN_CANDIDATES: usize = 1000;

pub struct GreedyClusterer<A: Aligner> {
    aligner: A,
    identity_threshold: f64,
    scope: ComparisonScope,
}

/// Outcome of a clustering run
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Representatives in insertion order
    pub otus: Vec<AbundanceRecord>,
    pub stats: ClusteringStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusteringStats {
    pub candidates: usize,
    pub alignments: usize,
    pub discarded: usize,
}

impl<A: Aligner> GreedyClusterer<A> {
    pub fn new(aligner: A) -> Self {
        Self {
            aligner,
            identity_threshold: DEFAULT_IDENTITY_THRESHOLD,
            scope: ComparisonScope::All,
        }
    }

    pub fn with_identity_threshold(mut self, threshold: f64) -> Self {
        self.identity_threshold = threshold;
        self
    }

    pub fn with_scope(mut self, scope: ComparisonScope) -> Self {
        self.scope = scope;
        self
    }

    /// Cluster records given in descending abundance order.
    ///
    /// The first record always becomes the first OTU. Every later record
    /// becomes a new OTU only if its identity to the compared OTUs stays
    /// below the threshold; otherwise it is dropped without adding its count
    /// to the matching OTU. Any alignment error aborts the whole run.
    pub fn cluster(&self, records: Vec<AbundanceRecord>) -> AgcResult<Clustering> {
        let mut records = records.into_iter();
        let first = records
            .next()
            .ok_or_else(|| AgcError::EmptyInput("no sequence left to cluster".to_string()))?;

        let mut otus = vec![first];
        let mut stats = ClusteringStats {
            candidates: 1,
            ..Default::default()
        };

        let remaining = records.len();
        let pb = self.progress_bar(remaining);

        for candidate in records {
            stats.candidates += 1;

            let (best, aligned) = self.best_identity(&candidate, &otus)?;
            stats.alignments += aligned;

            if best < self.identity_threshold {
                debug!(
                    "New OTU #{} (count {}, best identity {:.2}%)",
                    otus.len() + 1,
                    candidate.count,
                    best
                );
                otus.push(candidate);
            } else {
                debug!(
                    "Discarded candidate with count {} (identity {:.2}%)",
                    candidate.count, best
                );
                stats.discarded += 1;
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        info!(
            "Clustered {} sequences into {} OTUs ({} alignments, scope={})",
            stats.candidates,
            otus.len(),
            stats.alignments,
            self.scope
        );

        Ok(Clustering { otus, stats })
    }

    /// Identity deciding the candidate's fate and the number of alignments run
    fn best_identity(
        &self,
        candidate: &AbundanceRecord,
        otus: &[AbundanceRecord],
    ) -> AgcResult<(f64, usize)> {
        match self.scope {
            ComparisonScope::All => {
                let mut best = 0.0_f64;
                let mut aligned = 0;
                for otu in otus {
                    let identity = self.identity(candidate, otu)?;
                    aligned += 1;
                    best = best.max(identity);
                    // Already a member of an existing cluster
                    if best >= self.identity_threshold {
                        break;
                    }
                }
                Ok((best, aligned))
            }
            ComparisonScope::Last => match otus.last() {
                Some(otu) => Ok((self.identity(candidate, otu)?, 1)),
                None => Ok((0.0, 0)),
            },
        }
    }

    fn identity(&self, candidate: &AbundanceRecord, otu: &AbundanceRecord) -> AgcResult<f64> {
        self.aligner
            .align(candidate.as_bytes(), otu.as_bytes())?
            .identity()
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if len < PROGRESS_MIN_CANDIDATES || std::env::var("AGC_SILENT").is_ok() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} Clustering candidates")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        pb.set_style(style);
        pb
    }
}
