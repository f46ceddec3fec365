use crate::sequence::AbundanceRecord;
use agc_core::{AgcError, AgcResult};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

/// Column width of wrapped sequence lines
pub const LINE_WIDTH: usize = 80;

const HEADER_PREFIX: &str = ">OTU_";
const OCCURRENCE_TAG: &str = "occurrence:";

/// Write OTUs as `>OTU_{i} occurrence:{count}` blocks, 1-based
pub fn write_otus<W: Write>(writer: &mut W, otus: &[AbundanceRecord]) -> AgcResult<()> {
    for (index, otu) in otus.iter().enumerate() {
        writeln!(writer, "{}{} {}{}", HEADER_PREFIX, index + 1, OCCURRENCE_TAG, otu.count)?;
        for line in otu.as_bytes().chunks(LINE_WIDTH) {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}

pub fn write_otu_file<P: AsRef<Path>>(path: P, otus: &[AbundanceRecord]) -> AgcResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_otus(&mut writer, otus)?;
    writer.flush()?;
    Ok(())
}

/// Parse OTU blocks back into records, in file order
pub fn read_otus<R: BufRead>(reader: R) -> AgcResult<Vec<AbundanceRecord>> {
    let mut otus: Vec<AbundanceRecord> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| AgcError::Decode(e.to_string()))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('>') {
            otus.push(AbundanceRecord::new(String::new(), parse_count(line, line_no + 1)?));
        } else {
            match otus.last_mut() {
                Some(otu) => otu.sequence.push_str(line),
                None => {
                    return Err(AgcError::Decode(format!(
                        "line {}: sequence before first OTU header",
                        line_no + 1
                    )))
                }
            }
        }
    }

    Ok(otus)
}

fn parse_count(header: &str, line_no: usize) -> AgcResult<usize> {
    header
        .strip_prefix(HEADER_PREFIX)
        .and_then(|rest| rest.split_once(' '))
        .and_then(|(_, tag)| tag.strip_prefix(OCCURRENCE_TAG))
        .and_then(|count| count.parse().ok())
        .ok_or_else(|| AgcError::Decode(format!("line {}: malformed OTU header '{}'", line_no, header)))
}
