//! Reading Medline (PubMed) citation exports.
//!
//! Medline records have no start or end markers; they are separated by blank
//! lines. Field lines look like `"{tag padded to 4}- {value}"` and long values
//! wrap onto continuation lines indented by exactly six spaces.
//!
//! There is no structural validation for this format. A truncated file simply
//! yields a shorter final record.

use std::borrow::Cow;
use std::io::BufRead;
use std::str::Lines;

use tracing::{debug, trace};

use crate::aggregate::RawField;
use crate::error::Result;
use crate::formats::{Format, FormatReader};
use crate::record::Record;

/// Separator between the padded tag and the value.
pub const TAG_SEPARATOR: &str = "- ";
/// Indentation that marks a continuation line.
pub const CONTINUATION_INDENT: &str = "      ";

const TAG_WIDTH: usize = 4;

/// Reader for Medline formatted citations.
///
/// # Examples
///
/// ```
/// use refmatch::MedlineReader;
///
/// let data = "PMID- 1\nTI  - First\n\nPMID- 2\nTI  - Second\n";
/// let records: Vec<_> = MedlineReader::new(data.as_bytes()).collect::<Result<_, _>>()?;
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].title(), Some("Second"));
/// # Ok::<(), refmatch::RefError>(())
/// ```
#[derive(Debug)]
pub struct MedlineReader<R: BufRead> {
    reader: R,
    line: String,
    records_read: usize,
    finished: bool,
}

impl<R: BufRead> MedlineReader<R> {
    /// Create a new Medline reader.
    pub fn new(reader: R) -> Self {
        MedlineReader {
            reader,
            line: String::new(),
            records_read: 0,
            finished: false,
        }
    }

    /// Number of records emitted so far.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Read a single Medline record.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`RefError::IoError`](crate::RefError::IoError) if the line
    /// source fails. The format itself has no structural errors.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        if self.finished {
            return Ok(None);
        }

        let block = self.next_block();
        match block {
            Ok(Some(raw)) => {
                self.records_read += 1;
                Ok(Some(Record::new(Format::Medline, raw)))
            },
            Ok(None) => {
                self.finished = true;
                debug!(records = self.records_read, "finished reading Medline input");
                Ok(None)
            },
            Err(e) => {
                self.finished = true;
                Err(e)
            },
        }
    }

    fn next_block(&mut self) -> Result<Option<String>> {
        let mut block = String::new();

        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                break;
            }

            if self.line.trim().is_empty() {
                if !block.is_empty() {
                    return Ok(Some(block));
                }
            } else {
                block.push_str(&self.line);
            }
        }

        Ok((!block.is_empty()).then_some(block))
    }
}

impl<R: BufRead + std::fmt::Debug> FormatReader for MedlineReader<R> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        MedlineReader::read_record(self)
    }

    fn records_read(&self) -> Option<usize> {
        Some(self.records_read)
    }
}

impl<R: BufRead> Iterator for MedlineReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

impl<R: BufRead> std::iter::FusedIterator for MedlineReader<R> {}

/// Iterator over the `(tag, value)` pairs of one Medline record.
///
/// Continuation lines are joined onto the pending value with a newline. A
/// field is emitted, with its value trimmed, when the next field starts or
/// the record ends. Lines that are neither fields nor continuations are
/// skipped.
#[derive(Debug, Clone)]
pub struct MedlineFields<'a> {
    lines: Lines<'a>,
    pending: Option<(&'a str, Cow<'a, str>)>,
}

impl<'a> MedlineFields<'a> {
    /// Extract fields from raw record text.
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        MedlineFields {
            lines: raw.lines(),
            pending: None,
        }
    }
}

impl<'a> Iterator for MedlineFields<'a> {
    type Item = RawField<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if let Some(rest) = line.strip_prefix(CONTINUATION_INDENT) {
                if let Some((_, value)) = self.pending.as_mut() {
                    let value = value.to_mut();
                    value.push('\n');
                    value.push_str(rest);
                }
                continue;
            }

            match line.split_once(TAG_SEPARATOR) {
                Some((tag, value)) if tag.chars().count() == TAG_WIDTH => {
                    // An all-blank tag closes the pending field without
                    // opening a new one.
                    let tag = tag.trim();
                    let next = (!tag.is_empty()).then(|| (tag, Cow::Borrowed(value)));
                    if let Some(done) = std::mem::replace(&mut self.pending, next) {
                        return Some(finish(done));
                    }
                },
                _ => trace!(line, "dropping malformed Medline line"),
            }
        }

        self.pending.take().map(finish)
    }
}

fn finish<'a>((tag, value): (&'a str, Cow<'a, str>)) -> RawField<'a> {
    let value = match value {
        Cow::Borrowed(value) => Cow::Borrowed(value.trim()),
        Cow::Owned(value) => Cow::Owned(value.trim().to_string()),
    };
    (tag, value)
}
