//! Shared fixtures for end-to-end agc tests

#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `(sequence, copies)` pairs as a gzip FASTA file wrapped at 60 columns
pub fn write_amplicons(dir: &Path, name: &str, amplicons: &[(&str, usize)]) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).expect("Failed to create fixture");
    let mut encoder = GzEncoder::new(file, Compression::default());

    let mut n = 0;
    for (sequence, copies) in amplicons {
        for _ in 0..*copies {
            n += 1;
            writeln!(encoder, ">read_{};size=1", n).unwrap();
            for line in sequence.as_bytes().chunks(60) {
                encoder.write_all(line).unwrap();
                encoder.write_all(b"\n").unwrap();
            }
        }
    }
    encoder.finish().expect("Failed to finish gzip stream");
    path
}

/// Deterministic pseudo-random nucleotide sequence
pub fn random_dna(length: usize, seed: u64) -> String {
    let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
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
            if i % step == step - 1 {
                match b {
                    b'A' => 'G',
                    b'G' => 'C',
                    b'C' => 'T',
                    _ => 'A',
                }
            } else {
                b as char
            }
        })
        .collect()
}
