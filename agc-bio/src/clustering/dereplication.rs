/// Full-length dereplication of amplicon reads
use crate::formats::fasta::read_fasta;
use crate::sequence::AbundanceRecord;
use agc_core::AgcResult;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Collapse identical reads into counted records.
///
/// Records seen fewer than `min_count` times are dropped. The result is in
/// clustering order: count descending, ties broken by sequence ascending.
pub fn dereplicate<I>(reads: I, min_count: usize) -> Vec<AbundanceRecord>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut total = 0usize;
    for read in reads {
        *counts.entry(read).or_insert(0) += 1;
        total += 1;
    }
    let distinct = counts.len();

    let mut records: Vec<AbundanceRecord> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .map(|(sequence, count)| AbundanceRecord::new(sequence, count))
        .collect();
    records.sort_by(AbundanceRecord::abundance_order);

    debug!(
        "Dereplicated {} reads into {} distinct sequences",
        total, distinct
    );
    info!(
        "{} of {} distinct sequences occur at least {} times",
        records.len(),
        distinct,
        min_count
    );

    records
}

/// Dereplicated records of one amplicon file
#[derive(Debug, Clone, PartialEq)]
pub struct Dereplication {
    /// Reads passing the length filter
    pub reads: usize,
    /// Distinct sequences passing the count filter, in clustering order
    pub records: Vec<AbundanceRecord>,
}

/// Read every qualifying record of `path` and dereplicate them.
///
/// Reading is fully materialized since counts need the whole corpus.
pub fn dereplicate_fasta<P: AsRef<Path>>(
    path: P,
    min_seq_len: usize,
    min_count: usize,
) -> AgcResult<Dereplication> {
    let reads = read_fasta(path, min_seq_len)?.collect::<AgcResult<Vec<String>>>()?;
    let read_count = reads.len();
    info!(
        "Read {} sequences passing the {} nt length filter",
        read_count, min_seq_len
    );

    Ok(Dereplication {
        reads: read_count,
        records: dereplicate(reads, min_count),
    })
}
