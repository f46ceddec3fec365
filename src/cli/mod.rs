use agc_core::{load_config, AgcResult, ComparisonScope, Config};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "agc",
    version,
    about = "Abundance greedy clustering of amplicon reads into OTUs",
    long_about = "agc dereplicates a gzip FASTA file of amplicon reads, keeps sequences seen \
                  often enough, and clusters them greedily by abundance using global alignment \
                  identity. Each OTU is written with the number of reads of its representative."
)]
pub struct Cli {
    /// Amplicon file (.fasta.gz)
    #[arg(short = 'i', long = "amplicon-file", value_name = "FILE")]
    pub amplicon_file: PathBuf,

    /// Minimum sequence length for dereplication [default: 400]
    #[arg(short = 's', long)]
    pub minseqlen: Option<usize>,

    /// Minimum count for dereplication [default: 10]
    #[arg(short = 'm', long)]
    pub mincount: Option<usize>,

    /// Chunk size for dereplication (reserved) [default: 100]
    #[arg(short = 'c', long)]
    pub chunk_size: Option<usize>,

    /// K-mer size for dereplication (reserved) [default: 8]
    #[arg(short = 'k', long)]
    pub kmer_size: Option<usize>,

    /// Percent identity at or above which a sequence joins an OTU [default: 97]
    #[arg(short = 't', long = "identity", value_name = "PERCENT")]
    pub identity_threshold: Option<f64>,

    /// OTUs a candidate is compared against [default: all]
    #[arg(long, value_enum)]
    pub scope: Option<ComparisonScope>,

    /// Gap opening penalty [default: 1]
    #[arg(long)]
    pub gap_open: Option<i32>,

    /// Gap extension penalty [default: 1]
    #[arg(long)]
    pub gap_extend: Option<i32>,

    /// Substitution matrix in NCBI format (built-in nucleotide matrix if omitted)
    #[arg(long, value_name = "FILE")]
    pub matrix: Option<PathBuf>,

    /// Output file
    #[arg(short = 'o', long = "output-file", default_value = "OTU.fasta")]
    pub output_file: PathBuf,

    /// TOML configuration file; command line options take precedence
    #[arg(long, value_name = "FILE", env = "AGC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Configuration file values overridden by any option given on the command line
    pub fn resolve_config(&self) -> AgcResult<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        let clustering = &mut config.clustering;
        if let Some(v) = self.minseqlen {
            clustering.min_seq_len = v;
        }
        if let Some(v) = self.mincount {
            clustering.min_count = v;
        }
        if let Some(v) = self.chunk_size {
            clustering.chunk_size = v;
        }
        if let Some(v) = self.kmer_size {
            clustering.kmer_size = v;
        }
        if let Some(v) = self.identity_threshold {
            clustering.identity_threshold = v;
        }
        if let Some(v) = self.scope {
            clustering.comparison_scope = v;
        }

        let alignment = &mut config.alignment;
        if let Some(v) = self.gap_open {
            alignment.gap_open = v;
        }
        if let Some(v) = self.gap_extend {
            alignment.gap_extend = v;
        }
        if let Some(path) = &self.matrix {
            alignment.matrix = Some(path.clone());
        }

        config.validate()?;
        Ok(config)
    }
}
