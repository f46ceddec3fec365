use agc_core::{AgcError, AgcResult};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Open an amplicon file, decompressing gzip input on the fly.
///
/// Compression is detected from the stream header, not the file name.
pub fn open_for_reading<P: AsRef<Path>>(path: P) -> AgcResult<Box<dyn BufRead>> {
    let path = path.as_ref();

    if path.is_dir() {
        return Err(AgcError::InputIsDirectory(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(AgcError::InputNotFound(path.to_path_buf()));
    }

    let mut reader = BufReader::new(File::open(path)?);
    if is_gzip(&mut reader)? {
        debug!("{} is gzip compressed", path.display());
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

fn is_gzip<R: BufRead>(reader: &mut R) -> AgcResult<bool> {
    let header = reader.fill_buf()?;
    Ok(header.starts_with(&GZIP_MAGIC))
}

fn read_error(e: io::Error) -> AgcError {
    match e.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
            AgcError::Decode(e.to_string())
        }
        _ => AgcError::Io(e),
    }
}

/// Open `path` and stream the bodies of its FASTA records
pub fn read_fasta<P: AsRef<Path>>(path: P, min_seq_len: usize) -> AgcResult<SequenceReader> {
    let path = path.as_ref();
    debug!("Reading amplicons from {}", path.display());
    Ok(SequenceReader::new(open_for_reading(path)?, min_seq_len))
}

/// Single-pass iterator over FASTA record bodies.
///
/// Body lines are trimmed and concatenated. A record is yielded when its
/// body is longer than `min_seq_len`; the last record of the stream only
/// needs to reach `min_seq_len`. Records with an empty body are never
/// yielded. Input is expected to be record-delimited; body lines before the
/// first header are treated as one unnamed record. Undecodable input is a
/// `Decode` error, other read failures are `Io`. After an error the iterator
/// is exhausted.
pub struct SequenceReader {
    reader: Box<dyn BufRead>,
    min_seq_len: usize,
    line: String,
    body: String,
    finished: bool,
}

impl SequenceReader {
    pub fn new(reader: Box<dyn BufRead>, min_seq_len: usize) -> Self {
        Self {
            reader,
            min_seq_len,
            line: String::new(),
            body: String::new(),
            finished: false,
        }
    }

    fn take_body(&mut self) -> String {
        std::mem::take(&mut self.body)
    }
}

impl Iterator for SequenceReader {
    type Item = AgcResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    self.finished = true;
                    let body = self.take_body();
                    if !body.is_empty() && body.len() >= self.min_seq_len {
                        return Some(Ok(body));
                    }
                    return None;
                }
                Ok(_) => {
                    if self.line.starts_with('>') {
                        let body = self.take_body();
                        if body.len() > self.min_seq_len {
                            return Some(Ok(body));
                        }
                    } else {
                        self.body.push_str(self.line.trim());
                    }
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(read_error(e)));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for SequenceReader {}
