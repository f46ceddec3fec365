/// Scoring matrices for sequence alignment
use agc_core::{AgcError, AgcResult};
use std::path::Path;

/// Gap penalties are positive magnitudes subtracted from the score.
/// A gap of length `n` costs `gap_open + gap_extend * (n - 1)`.
pub trait ScoringMatrix {
    fn score(&self, a: u8, b: u8) -> i32;
    fn gap_open(&self) -> i32;
    fn gap_extend(&self) -> i32;
}

/// Built-in nucleotide match/mismatch matrix
#[derive(Debug, Clone)]
pub struct NucleotideMatrix {
    match_score: i32,
    mismatch_score: i32,
    gap_open: i32,
    gap_extend: i32,
}

impl NucleotideMatrix {
    pub fn new() -> Self {
        Self {
            match_score: 1,
            mismatch_score: 0,
            gap_open: 1,
            gap_extend: 1,
        }
    }

    pub fn with_scores(mut self, match_score: i32, mismatch_score: i32) -> Self {
        self.match_score = match_score;
        self.mismatch_score = mismatch_score;
        self
    }

    pub fn with_gap_penalties(mut self, gap_open: i32, gap_extend: i32) -> Self {
        self.gap_open = gap_open;
        self.gap_extend = gap_extend;
        self
    }
}

impl Default for NucleotideMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringMatrix for NucleotideMatrix {
    fn score(&self, a: u8, b: u8) -> i32 {
        let a = a.to_ascii_uppercase();
        let b = b.to_ascii_uppercase();

        // N is an unknown base, it never counts as a match
        if a == b && a != b'N' {
            self.match_score
        } else {
            self.mismatch_score
        }
    }

    fn gap_open(&self) -> i32 {
        self.gap_open
    }

    fn gap_extend(&self) -> i32 {
        self.gap_extend
    }
}

/// Substitution matrix read from an NCBI/BLAST style text file:
///
/// ```text
/// # comment
///    A  T  G  C
/// A  5 -4 -4 -4
/// T -4  5 -4 -4
/// G -4 -4  5 -4
/// C -4 -4 -4  5
/// ```
#[derive(Debug, Clone)]
pub struct SubstitutionMatrix {
    symbols: Vec<u8>,
    scores: Vec<i32>,
    default_score: i32,
    gap_open: i32,
    gap_extend: i32,
}

const TABLE_SIZE: usize = 256;

impl SubstitutionMatrix {
    pub fn from_file<P: AsRef<Path>>(path: P) -> AgcResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AgcError::AlignmentFailure(format!(
                "scoring matrix {} does not exist",
                path.display()
            )));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> AgcResult<Self> {
        let mut lines = contents
            .lines()
            .enumerate()
            .map(|(n, line)| (n + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (_, header) = lines
            .next()
            .ok_or_else(|| AgcError::MatrixParse("matrix has no column header".to_string()))?;
        let columns = header
            .split_whitespace()
            .map(|token| Self::symbol(token, 0))
            .collect::<AgcResult<Vec<u8>>>()?;

        let mut symbols = Vec::new();
        let mut entries = Vec::new();

        for (line_no, line) in lines {
            let mut tokens = line.split_whitespace();
            // Lines are never empty after the filter above
            let row = match tokens.next() {
                Some(token) => Self::symbol(token, line_no)?,
                None => continue,
            };
            let values = tokens
                .map(|t| {
                    t.parse::<i32>().map_err(|_| {
                        AgcError::MatrixParse(format!("line {}: '{}' is not a score", line_no, t))
                    })
                })
                .collect::<AgcResult<Vec<i32>>>()?;

            if values.len() != columns.len() {
                return Err(AgcError::MatrixParse(format!(
                    "line {}: expected {} scores, found {}",
                    line_no,
                    columns.len(),
                    values.len()
                )));
            }

            symbols.push(row);
            for (&column, value) in columns.iter().zip(values) {
                entries.push((row, column, value));
            }
        }

        if symbols.is_empty() {
            return Err(AgcError::MatrixParse("matrix has no rows".to_string()));
        }

        let default_score = entries.iter().map(|&(_, _, v)| v).min().unwrap_or(0);
        let mut scores = vec![default_score; TABLE_SIZE * TABLE_SIZE];
        for (row, column, value) in entries {
            scores[row as usize * TABLE_SIZE + column as usize] = value;
        }

        Ok(Self {
            symbols,
            scores,
            default_score,
            gap_open: 1,
            gap_extend: 1,
        })
    }

    fn symbol(token: &str, line_no: usize) -> AgcResult<u8> {
        match token.as_bytes() {
            [b] if b.is_ascii_graphic() => Ok(b.to_ascii_uppercase()),
            _ => Err(AgcError::MatrixParse(format!(
                "line {}: '{}' is not a single-letter symbol",
                line_no.max(1),
                token
            ))),
        }
    }

    pub fn with_gap_penalties(mut self, gap_open: i32, gap_extend: i32) -> Self {
        self.gap_open = gap_open;
        self.gap_extend = gap_extend;
        self
    }

    /// Row symbols in file order
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Score used for symbols the matrix does not list
    pub fn default_score(&self) -> i32 {
        self.default_score
    }
}

impl ScoringMatrix for SubstitutionMatrix {
    fn score(&self, a: u8, b: u8) -> i32 {
        let a = a.to_ascii_uppercase() as usize;
        let b = b.to_ascii_uppercase() as usize;
        self.scores[a * TABLE_SIZE + b]
    }

    fn gap_open(&self) -> i32 {
        self.gap_open
    }

    fn gap_extend(&self) -> i32 {
        self.gap_extend
    }
}
