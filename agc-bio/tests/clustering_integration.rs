/// Integration tests for dereplication and greedy OTU clustering
mod common;

use agc_bio::alignment::{identity, Aligner, AlignmentResult, NeedlemanWunsch, NucleotideMatrix};
use agc_bio::{dereplicate, dereplicate_fasta, AbundanceRecord, GreedyClusterer};
use agc_core::{AgcResult, ComparisonScope};
use common::{copies, mutate_every, random_dna, write_gz_fasta};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Aligner that reports every pair as a perfect match
struct IdenticalAligner;

impl Aligner for IdenticalAligner {
    fn align(&self, first: &[u8], _second: &[u8]) -> AgcResult<AlignmentResult> {
        Ok(AlignmentResult::new(first.len() as i32, first.to_vec(), first.to_vec()))
    }
}

fn nw() -> NeedlemanWunsch<NucleotideMatrix> {
    NeedlemanWunsch::new(NucleotideMatrix::new())
}

#[test]
fn test_dereplication_scenario_from_gz() {
    let dir = TempDir::new().unwrap();
    let seq_a = random_dna(60, 21);
    let seq_b = random_dna(60, 22);
    let seq_c = random_dna(60, 23);

    let mut corpus = copies(&seq_a, 50);
    corpus.extend(copies(&seq_b, 20));
    corpus.extend(copies(&seq_c, 5));
    // Too short to be read at all
    corpus.extend(copies("ACG", 30));
    let path = write_gz_fasta(dir.path(), "amplicon.fasta.gz", &corpus, 25);

    let dereplicated = dereplicate_fasta(&path, 5, 10).unwrap();

    assert_eq!(dereplicated.reads, 75);
    assert_eq!(
        dereplicated.records,
        vec![
            AbundanceRecord::new(seq_a.clone(), 50),
            AbundanceRecord::new(seq_b.clone(), 20),
        ]
    );
}

#[test]
fn test_identical_after_alignment_yields_single_otu() {
    let records = vec![
        AbundanceRecord::new(random_dna(60, 21), 50),
        AbundanceRecord::new(random_dna(60, 22), 20),
    ];

    let clustering = GreedyClusterer::new(IdenticalAligner)
        .with_identity_threshold(97.0)
        .cluster(records.clone())
        .unwrap();

    assert_eq!(clustering.otus, vec![records[0].clone()]);
}

#[test]
fn test_dissimilar_sequences_yield_otus_in_count_order() {
    let records = vec![
        AbundanceRecord::new(random_dna(120, 31), 50),
        AbundanceRecord::new(random_dna(120, 32), 20),
    ];

    let clustering = GreedyClusterer::new(nw()).cluster(records.clone()).unwrap();

    assert_eq!(clustering.otus, records);
    assert_eq!(clustering.stats.alignments, 1);
}

#[test]
fn test_otus_are_pairwise_below_threshold() {
    let mut reads = Vec::new();
    for family in 0..4u64 {
        let base = random_dna(150, 40 + family);
        for (variant, step) in [0usize, 150, 75, 10].iter().enumerate() {
            let seq = if *step == 0 { base.clone() } else { mutate_every(&base, *step) };
            let abundance = 40 - family as usize * 5 - variant * 2;
            reads.extend(std::iter::repeat(seq).take(abundance));
        }
    }

    let records = dereplicate(reads, 1);
    let top = records[0].clone();
    let clustering = GreedyClusterer::new(nw()).cluster(records).unwrap();

    assert_eq!(clustering.otus[0], top);
    let aligner = nw();
    for (i, a) in clustering.otus.iter().enumerate() {
        for b in &clustering.otus[i + 1..] {
            let result = aligner.align(b.as_bytes(), a.as_bytes()).unwrap();
            assert!(identity(&result).unwrap() < 97.0);
        }
    }
    // Each family keeps its base and the 90% variant
    assert_eq!(clustering.otus.len(), 8);
}

#[test]
fn test_last_scope_admits_near_duplicate_of_older_otu() {
    let seq_a = random_dna(200, 51);
    let seq_b = random_dna(200, 52);
    let near_a = mutate_every(&seq_a, 100); // 99% identical to seq_a

    let records = vec![
        AbundanceRecord::new(seq_a.clone(), 50),
        AbundanceRecord::new(seq_b.clone(), 40),
        AbundanceRecord::new(near_a.clone(), 30),
    ];

    let all = GreedyClusterer::new(nw())
        .with_scope(ComparisonScope::All)
        .cluster(records.clone())
        .unwrap();
    assert_eq!(all.otus.len(), 2);
    assert_eq!(all.stats.discarded, 1);

    // Only seq_b is consulted, so the near duplicate of seq_a survives
    let last = GreedyClusterer::new(nw())
        .with_scope(ComparisonScope::Last)
        .cluster(records)
        .unwrap();
    assert_eq!(last.otus.len(), 3);
    assert_eq!(last.otus[2].sequence, near_a);
}
