/// End-to-end clustering run: read, dereplicate, cluster
use agc_bio::alignment::{Aligner, NeedlemanWunsch, NucleotideMatrix, SubstitutionMatrix};
use agc_bio::{dereplicate_fasta, AbundanceRecord, Clustering, GreedyClusterer};
use agc_core::{AgcError, AgcResult, Config};
use std::path::Path;
use tracing::{info, warn};

pub struct Pipeline {
    config: Config,
}

/// OTUs of a successful run together with what each stage kept
#[derive(Debug, Clone)]
pub struct ClusteringResult {
    pub otus: Vec<AbundanceRecord>,
    pub stats: RunStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Reads passing the length filter
    pub reads: usize,
    /// Distinct sequences passing the count filter
    pub records: usize,
    pub alignments: usize,
    pub discarded: usize,
}

impl Pipeline {
    pub fn new(config: Config) -> AgcResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn run<P: AsRef<Path>>(&self, input: P) -> AgcResult<ClusteringResult> {
        let clustering = &self.config.clustering;
        let defaults = agc_core::ClusteringConfig::default();
        if clustering.chunk_size != defaults.chunk_size || clustering.kmer_size != defaults.kmer_size {
            warn!(
                "chunk_size={} and kmer_size={} are reserved and do not change clustering",
                clustering.chunk_size, clustering.kmer_size
            );
        }

        let dereplicated =
            dereplicate_fasta(input.as_ref(), clustering.min_seq_len, clustering.min_count)?;
        let read_count = dereplicated.reads;
        let records = dereplicated.records;
        if records.is_empty() {
            return Err(AgcError::EmptyInput(format!(
                "no sequence of {} reads occurs at least {} times",
                read_count, clustering.min_count
            )));
        }
        let record_count = records.len();

        let alignment = &self.config.alignment;
        let clustering = match &alignment.matrix {
            Some(path) => {
                let matrix = SubstitutionMatrix::from_file(path)?
                    .with_gap_penalties(alignment.gap_open, alignment.gap_extend);
                info!("Scoring alignments with {}", path.display());
                self.cluster(NeedlemanWunsch::new(matrix), records)?
            }
            None => {
                let matrix = NucleotideMatrix::new()
                    .with_gap_penalties(alignment.gap_open, alignment.gap_extend);
                self.cluster(NeedlemanWunsch::new(matrix), records)?
            }
        };

        Ok(ClusteringResult {
            otus: clustering.otus,
            stats: RunStats {
                reads: read_count,
                records: record_count,
                alignments: clustering.stats.alignments,
                discarded: clustering.stats.discarded,
            },
        })
    }

    fn cluster<A: Aligner>(&self, aligner: A, records: Vec<AbundanceRecord>) -> AgcResult<Clustering> {
        let clustering = &self.config.clustering;
        GreedyClusterer::new(aligner)
            .with_identity_threshold(clustering.identity_threshold)
            .with_scope(clustering.comparison_scope)
            .cluster(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_plain_fasta(dir: &TempDir, records: &[(&str, usize)]) -> std::path::PathBuf {
        let path = dir.path().join("reads.fasta");
        let mut file = std::fs::File::create(&path).unwrap();
        let mut n = 0;
        for (seq, count) in records {
            for _ in 0..*count {
                writeln!(file, ">read_{}\n{}", n, seq).unwrap();
                n += 1;
            }
        }
        path
    }

    fn small_config() -> Config {
        let mut config = Config::default();
        config.clustering.min_seq_len = 5;
        config.clustering.min_count = 2;
        config
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.clustering.identity_threshold = 0.0;
        assert!(matches!(
            Pipeline::new(config),
            Err(AgcError::Configuration(_))
        ));
    }

    #[test]
    fn test_run_counts_each_stage() {
        let dir = TempDir::new().unwrap();
        let path = write_plain_fasta(
            &dir,
            &[("ACGTACGTAC", 4), ("TTTTGGGGCCCCAAAA", 3), ("GATTACAGATTACA", 1)],
        );

        let result = Pipeline::new(small_config()).unwrap().run(&path).unwrap();

        assert_eq!(result.stats.reads, 8);
        assert_eq!(result.stats.records, 2);
        assert_eq!(result.otus[0], AbundanceRecord::new("ACGTACGTAC".to_string(), 4));
        assert_eq!(result.otus.len(), 2);
        assert_eq!(result.stats.alignments, 1);
        assert_eq!(result.stats.discarded, 0);
    }

    #[test]
    fn test_nothing_above_min_count_is_empty_input() {
        let dir = TempDir::new().unwrap();
        let path = write_plain_fasta(&dir, &[("ACGTACGTAC", 1), ("GATTACAGATTACA", 1)]);

        let result = Pipeline::new(small_config()).unwrap().run(&path);
        assert!(matches!(result, Err(AgcError::EmptyInput(_))));
    }

    #[test]
    fn test_missing_matrix_fails_the_run() {
        let dir = TempDir::new().unwrap();
        let path = write_plain_fasta(&dir, &[("ACGTACGTAC", 3), ("GATTACAGATTACA", 3)]);
        let mut config = small_config();
        config.alignment.matrix = Some(dir.path().join("MATCH"));

        let result = Pipeline::new(config).unwrap().run(&path);
        assert!(matches!(result, Err(AgcError::AlignmentFailure(_))));
    }

    #[test]
    fn test_huge_gap_penalties_still_cluster() {
        let dir = TempDir::new().unwrap();
        let path = write_plain_fasta(&dir, &[("ACGTACGTAC", 3), ("TTTTGGGGCCCCAAAA", 2)]);
        let mut config = small_config();
        config.alignment.gap_open = 1_000_000_000;
        config.alignment.gap_extend = 1_000_000_000;

        let result = Pipeline::new(config).unwrap().run(&path).unwrap();
        assert_eq!(result.otus.len(), 2);
    }
}
