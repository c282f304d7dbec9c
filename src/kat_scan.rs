//! Streaming reader for `key = value` KAT files.
//!
//! The format has no record delimiter: a record ends when a key that is
//! already present in the current record shows up again. That line is
//! kept in a one-line pushback buffer and becomes the first line of the
//! next record, so the input never has to be seekable.

use std::collections::HashMap;
use std::io::{BufRead, Lines};

use tracing::debug;

use crate::kat_error::{KatError, Result};

/// Raw key/value pairs of one test case, values still hex-encoded.
pub type RawRecord = HashMap<String, String>;

const SEPARATOR: &str = " = ";

/// Lazily yields one [`RawRecord`] per test case. Stops after the first error.
pub struct KatScanner<R> {
    lines: Lines<R>,
    line_no: usize,
    pending: Option<(usize, String)>, // boundary line, replayed by the next scan
    done: bool,
}

impl<R: BufRead> KatScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            pending: None,
            done: false,
        }
    }

    fn next_line(&mut self) -> Option<Result<(usize, String)>> {
        if let Some(line) = self.pending.take() {
            return Some(Ok(line));
        }
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line.map(|l| (self.line_no, l)).map_err(KatError::from))
    }

    fn scan_record(&mut self) -> Result<Option<RawRecord>> {
        let mut record = RawRecord::new();
        let mut first_line = 0;

        while let Some(next) = self.next_line() {
            let (line_no, line) = next?;
            if line.trim().is_empty() {
                continue;
            }

            let (key, value) = split_key_value(&line, line_no)?;
            if record.contains_key(key) {
                debug!(first_line, fields = record.len(), "scanned KAT record");
                self.pending = Some((line_no, line));
                return Ok(Some(record));
            }

            if record.is_empty() {
                first_line = line_no;
            }
            let (key, value) = (key.to_owned(), value.to_owned());
            record.insert(key, value);
        }

        if record.is_empty() {
            return Ok(None);
        }
        debug!(first_line, fields = record.len(), "scanned final KAT record");
        Ok(Some(record))
    }
}

impl<R: BufRead> Iterator for KatScanner<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scan_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn split_key_value(line: &str, line_no: usize) -> Result<(&str, &str)> {
    let mut parts = line.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Ok((key, value)),
        _ => Err(KatError::MalformedLine {
            line: line_no,
            content: line.to_owned(),
        }),
    }
}

/// The seven hex fields of a hedged, pure-mode ML-DSA KAT record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KatInput {
    /// Key generation seed.
    pub xi: String,
    /// Signing randomness.
    pub rng: String,
    pub pk: String,
    /// Expanded secret key.
    pub sk: String,
    pub msg: String,
    /// Signature followed by the message.
    pub sm: String,
    pub ctx: String,
}

impl KatInput {
    /// Pick the known fields out of a raw record. Unknown keys (e.g. `count`) are ignored.
    pub fn from_record(record: &RawRecord) -> Result<Self> {
        let field = |name: &'static str| {
            record
                .get(name)
                .cloned()
                .ok_or(KatError::MissingField(name))
        };
        Ok(Self {
            xi: field("xi")?,
            rng: field("rng")?,
            pk: field("pk")?,
            sk: field("sk")?,
            msg: field("msg")?,
            sm: field("sm")?,
            ctx: field("ctx")?,
        })
    }
}

/// Iterator of [`KatInput`]s read from `reader`, ending at the first error.
pub fn stream_kats<R: BufRead>(reader: R) -> impl Iterator<Item = Result<KatInput>> {
    let mut failed = false;
    KatScanner::new(reader).map_while(move |record| {
        if failed {
            return None;
        }
        let input = record.and_then(|r| KatInput::from_record(&r));
        failed = input.is_err();
        Some(input)
    })
}
