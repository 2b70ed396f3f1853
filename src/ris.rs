//! Reading RIS citation exports.
//!
//! A RIS record starts at a line beginning with `TY  - ` and ends at the next
//! line beginning with `ER  - `, both lines included in the record text. Lines
//! between records are ignored. Field lines have the shape
//! `"{2-char tag}  - {value}"`; anything else inside a record is dropped when
//! fields are extracted.
//!
//! # Examples
//!
//! ```
//! use refmatch::RisReader;
//!
//! let data = "TY  - JOUR\nTI  - First\nER  - \nTY  - JOUR\nTI  - Second\nER  - \n";
//! let mut reader = RisReader::new(data.as_bytes());
//!
//! while let Some(record) = reader.read_record()? {
//!     println!("Title: {:?}", record.title());
//! }
//! assert_eq!(reader.records_read(), 2);
//! # Ok::<(), refmatch::RefError>(())
//! ```

use std::borrow::Cow;
use std::io::BufRead;
use std::str::Lines;

use tracing::{debug, trace, warn};

use crate::aggregate::RawField;
use crate::error::{RefError, Result, StructuralErrorKind};
use crate::formats::{Format, FormatReader};
use crate::record::Record;

/// Prefix of the line that opens a record.
pub const RECORD_START: &str = "TY  - ";
/// Prefix of the line that closes a record.
pub const RECORD_END: &str = "ER  - ";
/// Separator between tag and value on a field line.
pub const FIELD_SEPARATOR: &str = "  - ";

const TAG_WIDTH: usize = 2;

/// Reader for RIS formatted citations.
///
/// `RisReader` pulls lines from any [`BufRead`] source, one at a time, and
/// emits one [`Record`] per `TY`..`ER` block. The first structural error ends
/// the stream; records returned before it stay valid.
#[derive(Debug)]
pub struct RisReader<R: BufRead> {
    reader: R,
    line: String,
    line_number: usize,
    records_read: usize,
    finished: bool,
}

impl<R: BufRead> RisReader<R> {
    /// Create a new RIS reader.
    pub fn new(reader: R) -> Self {
        RisReader {
            reader,
            line: String::new(),
            line_number: 0,
            records_read: 0,
            finished: false,
        }
    }

    /// Number of records emitted so far.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Read a single RIS record.
    ///
    /// Returns `Ok(Some(record))` if a record was read, `Ok(None)` at end of
    /// input or after an earlier error.
    ///
    /// # Errors
    ///
    /// Returns [`RefError::Structural`] if:
    /// - a `TY` line appears inside an open record
    /// - an `ER` line appears with no open record
    /// - the input ends inside an open record
    ///
    /// and [`RefError::IoError`] if the line source fails.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        if self.finished {
            return Ok(None);
        }

        match self.next_block() {
            Ok(Some(raw)) => {
                self.records_read += 1;
                Ok(Some(Record::new(Format::Ris, raw)))
            },
            Ok(None) => {
                self.finished = true;
                debug!(records = self.records_read, "finished reading RIS input");
                Ok(None)
            },
            Err(e) => {
                self.finished = true;
                warn!(records = self.records_read, error = %e, "aborting RIS input");
                Err(e)
            },
        }
    }

    /// Read lines until one complete record has been accumulated.
    fn next_block(&mut self) -> Result<Option<String>> {
        // Record text and the line that opened it
        let mut open: Option<(String, usize)> = None;

        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                break;
            }
            self.line_number += 1;

            if self.line.starts_with(RECORD_START) {
                if open.is_some() {
                    return Err(self.structural(StructuralErrorKind::NestedStart));
                }
                open = Some((self.line.clone(), self.line_number));
            } else if self.line.starts_with(RECORD_END) {
                let Some((mut text, _)) = open.take() else {
                    return Err(self.structural(StructuralErrorKind::UnmatchedEnd));
                };
                text.push_str(&self.line);
                return Ok(Some(text));
            } else if let Some((text, _)) = open.as_mut() {
                text.push_str(&self.line);
            } else {
                trace!(line = self.line_number, "skipping line outside a record");
            }
        }

        match open {
            Some((_, opened_at)) => Err(RefError::Structural {
                kind: StructuralErrorKind::UnterminatedRecord,
                line: opened_at,
            }),
            None => Ok(None),
        }
    }

    fn structural(&self, kind: StructuralErrorKind) -> RefError {
        RefError::Structural {
            kind,
            line: self.line_number,
        }
    }
}

impl<R: BufRead + std::fmt::Debug> FormatReader for RisReader<R> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        RisReader::read_record(self)
    }

    fn records_read(&self) -> Option<usize> {
        Some(self.records_read)
    }
}

impl<R: BufRead> Iterator for RisReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

impl<R: BufRead> std::iter::FusedIterator for RisReader<R> {}

/// Iterator over the `(tag, value)` pairs of one RIS record.
///
/// Each line is split on the first `"  - "`; the part before it is the tag
/// and is kept only when it is exactly two characters long. Lines without the
/// separator are skipped. Fields never span lines.
#[derive(Debug, Clone)]
pub struct RisFields<'a> {
    lines: Lines<'a>,
}

impl<'a> RisFields<'a> {
    /// Extract fields from raw record text.
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        RisFields { lines: raw.lines() }
    }
}

impl<'a> Iterator for RisFields<'a> {
    type Item = RawField<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            match line.split_once(FIELD_SEPARATOR) {
                Some((tag, value)) if tag.chars().count() == TAG_WIDTH => {
                    return Some((tag, Cow::Borrowed(value)));
                },
                _ => trace!(line, "dropping malformed RIS line"),
            }
        }
        None
    }
}
