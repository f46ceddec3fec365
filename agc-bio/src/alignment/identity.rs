/// Percent identity of a pairwise alignment
use super::AlignmentResult;
use agc_core::{AgcError, AgcResult};

/// Percentage of columns where both rows carry the same symbol.
///
/// Rows of different length cannot come from a global alignment and are
/// rejected, as is an empty alignment.
pub fn identity(alignment: &AlignmentResult) -> AgcResult<f64> {
    percent_identity(&alignment.first, &alignment.second)
}

pub fn percent_identity(first: &[u8], second: &[u8]) -> AgcResult<f64> {
    if first.len() != second.len() {
        return Err(AgcError::InvalidAlignment(format!(
            "aligned rows differ in length ({} vs {})",
            first.len(),
            second.len()
        )));
    }
    if first.is_empty() {
        return Err(AgcError::InvalidAlignment("alignment is empty".to_string()));
    }

    let matches = first
        .iter()
        .zip(second.iter())
        .filter(|(a, b)| a == b)
        .count();

    Ok(100.0 * matches as f64 / first.len() as f64)
}
