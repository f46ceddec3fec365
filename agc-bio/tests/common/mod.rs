//! Shared fixtures for agc-bio integration tests

#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `records` as a gzip FASTA file, wrapping bodies at `width`
pub fn write_gz_fasta(dir: &Path, name: &str, records: &[&str], width: usize) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).expect("Failed to create fixture");
    let mut encoder = GzEncoder::new(file, Compression::default());

    for (i, body) in records.iter().enumerate() {
        writeln!(encoder, ">read_{} sample=test", i + 1).unwrap();
        for line in body.as_bytes().chunks(width.max(1)) {
            encoder.write_all(line).unwrap();
            encoder.write_all(b"\n").unwrap();
        }
    }
    encoder.finish().expect("Failed to finish gzip stream");
    path
}

/// `n` copies of `body`
pub fn copies(body: &str, n: usize) -> Vec<&str> {
    std::iter::repeat(body).take(n).collect()
}

/// Deterministic pseudo-random nucleotide sequence
pub fn random_dna(length: usize, seed: u64) -> String {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..length)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            b"ACGT"[(state >> 62) as usize] as char
        })
        .collect()
}

/// Copy of `base` with every `step`-th base substituted
pub fn mutate_every(base: &str, step: usize) -> String {
    base.bytes()
        .enumerate()
        .map(|(i, b)| {
            if step > 0 && i % step == step - 1 {
                match b {
                    b'A' => 'C',
                    b'C' => 'G',
                    b'G' => 'T',
                    _ => 'A',
                }
            } else {
                b as char
            }
        })
        .collect()
}
