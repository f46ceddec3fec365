/// Needleman-Wunsch global alignment with affine gap penalties
use super::{Aligner, AlignmentResult, GAP};
use crate::alignment::scoring::ScoringMatrix;
use agc_core::{AgcError, AgcResult};

// Scores accumulate in i64 so that i32 penalties and substitution scores
// cannot overflow over a full-length alignment
type Score = i64;

// Far below any reachable score, with room left to subtract penalties
const NEG_INF: Score = i64::MIN / 4;

pub struct NeedlemanWunsch<S: ScoringMatrix> {
    scoring: S,
}

/// DP layer a cell's best path ends in
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// Both sequences consume a residue
    Match,
    /// Residue from the first sequence against a gap
    GapInSecond,
    /// Residue from the second sequence against a gap
    GapInFirst,
}

/// Score and traceback layers of size (rows + 1) x (cols + 1)
struct Layers {
    cols: usize,
    m: Vec<Score>,
    x: Vec<Score>,
    y: Vec<Score>,
    tb_m: Vec<State>,
    tb_x: Vec<State>,
    tb_y: Vec<State>,
}

impl Layers {
    fn new(rows: usize, cols: usize) -> Self {
        let size = (rows + 1) * (cols + 1);
        Self {
            cols: cols + 1,
            m: vec![NEG_INF; size],
            x: vec![NEG_INF; size],
            y: vec![NEG_INF; size],
            tb_m: vec![State::Match; size],
            tb_x: vec![State::GapInSecond; size],
            tb_y: vec![State::GapInFirst; size],
        }
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }
}

/// Best of three candidates, preferring earlier entries on ties
fn best(candidates: [(Score, State); 3]) -> (Score, State) {
    let mut winner = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.0 > winner.0 {
            winner = *candidate;
        }
    }
    winner
}

impl<S: ScoringMatrix> NeedlemanWunsch<S> {
    pub fn new(scoring: S) -> Self {
        Self { scoring }
    }

    pub fn align(&self, first: &[u8], second: &[u8]) -> AgcResult<AlignmentResult> {
        if first.is_empty() || second.is_empty() {
            return Err(AgcError::AlignmentFailure(format!(
                "cannot align an empty sequence (lengths {} and {})",
                first.len(),
                second.len()
            )));
        }

        let mut layers = Layers::new(first.len(), second.len());
        self.initialize(&mut layers, first.len(), second.len());
        self.fill(&mut layers, first, second);

        let end = layers.at(first.len(), second.len());
        let (score, state) = best([
            (layers.m[end], State::Match),
            (layers.x[end], State::GapInSecond),
            (layers.y[end], State::GapInFirst),
        ]);

        let (first_aligned, second_aligned) = self.traceback(&layers, first, second, state);
        let score = score.clamp(i32::MIN as Score, i32::MAX as Score) as i32;

        Ok(AlignmentResult::new(score, first_aligned, second_aligned))
    }

    fn gap_cost(&self, length: usize) -> Score {
        Score::from(self.scoring.gap_open())
            + Score::from(self.scoring.gap_extend()) * (length as Score - 1)
    }

    fn initialize(&self, layers: &mut Layers, rows: usize, cols: usize) {
        let origin = layers.at(0, 0);
        layers.m[origin] = 0;

        // Leading gaps are penalized like any other gap
        for i in 1..=rows {
            let idx = layers.at(i, 0);
            layers.x[idx] = -self.gap_cost(i);
            layers.tb_x[idx] = if i == 1 { State::Match } else { State::GapInSecond };
        }

        for j in 1..=cols {
            let idx = layers.at(0, j);
            layers.y[idx] = -self.gap_cost(j);
            layers.tb_y[idx] = if j == 1 { State::Match } else { State::GapInFirst };
        }
    }

    fn fill(&self, layers: &mut Layers, first: &[u8], second: &[u8]) {
        let open = Score::from(self.scoring.gap_open());
        let extend = Score::from(self.scoring.gap_extend());

        for i in 1..=first.len() {
            for j in 1..=second.len() {
                let here = layers.at(i, j);
                let diag = layers.at(i - 1, j - 1);
                let up = layers.at(i - 1, j);
                let left = layers.at(i, j - 1);

                let (score, from) = best([
                    (layers.m[diag], State::Match),
                    (layers.x[diag], State::GapInSecond),
                    (layers.y[diag], State::GapInFirst),
                ]);
                layers.m[here] = score + Score::from(self.scoring.score(first[i - 1], second[j - 1]));
                layers.tb_m[here] = from;

                let (score, from) = best([
                    (layers.m[up] - open, State::Match),
                    (layers.x[up] - extend, State::GapInSecond),
                    (layers.y[up] - open, State::GapInFirst),
                ]);
                layers.x[here] = score;
                layers.tb_x[here] = from;

                let (score, from) = best([
                    (layers.m[left] - open, State::Match),
                    (layers.x[left] - open, State::GapInSecond),
                    (layers.y[left] - extend, State::GapInFirst),
                ]);
                layers.y[here] = score;
                layers.tb_y[here] = from;
            }
        }
    }

    fn traceback(
        &self,
        layers: &Layers,
        first: &[u8],
        second: &[u8],
        mut state: State,
    ) -> (Vec<u8>, Vec<u8>) {
        let capacity = first.len() + second.len();
        let mut first_aligned = Vec::with_capacity(capacity);
        let mut second_aligned = Vec::with_capacity(capacity);

        let mut i = first.len();
        let mut j = second.len();

        while i > 0 || j > 0 {
            let idx = layers.at(i, j);
            match state {
                State::Match => {
                    first_aligned.push(first[i - 1]);
                    second_aligned.push(second[j - 1]);
                    state = layers.tb_m[idx];
                    i -= 1;
                    j -= 1;
                }
                State::GapInSecond => {
                    first_aligned.push(first[i - 1]);
                    second_aligned.push(GAP);
                    state = layers.tb_x[idx];
                    i -= 1;
                }
                State::GapInFirst => {
                    first_aligned.push(GAP);
                    second_aligned.push(second[j - 1]);
                    state = layers.tb_y[idx];
                    j -= 1;
                }
            }
        }

        first_aligned.reverse();
        second_aligned.reverse();

        (first_aligned, second_aligned)
    }
}

impl<S: ScoringMatrix> Aligner for NeedlemanWunsch<S> {
    fn align(&self, first: &[u8], second: &[u8]) -> AgcResult<AlignmentResult> {
        NeedlemanWunsch::align(self, first, second)
    }
}
