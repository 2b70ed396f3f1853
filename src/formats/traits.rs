//! Reader trait shared by the citation formats.
//!
//! Every format reader pulls one record at a time from its line source, so a
//! caller can stop early simply by not asking for more.
//!
//! # Example
//!
//! ```
//! use refmatch::formats::{FormatReader, FormatReaderExt};
//! use refmatch::RisReader;
//!
//! let data = "TY  - JOUR\nTI  - A title\nER  - \n";
//! let mut reader = RisReader::new(data.as_bytes());
//!
//! let mut count = 0;
//! for result in reader.records() {
//!     let _record = result?;
//!     count += 1;
//! }
//! assert_eq!(count, 1);
//! # Ok::<(), refmatch::RefError>(())
//! ```

use crate::error::Result;
use crate::record::Record;

/// Trait for readers that produce citation records from a line source.
///
/// Implementations should:
/// - Return `Ok(None)` when the source is exhausted (not an error)
/// - Keep returning `Ok(None)` after an error has been reported
/// - Preserve the exact text of every record they emit
pub trait FormatReader: std::fmt::Debug {
    /// Read the next record from the source.
    ///
    /// Returns:
    /// - `Ok(Some(record))` if a record was read successfully
    /// - `Ok(None)` if the end of the source was reached
    /// - `Err(_)` if the input is structurally invalid or I/O fails
    ///
    /// # Errors
    ///
    /// Returns an error if the source is malformed or I/O fails. Records
    /// returned before the error remain valid.
    fn read_record(&mut self) -> Result<Option<Record>>;

    /// Read all remaining records into a vector.
    ///
    /// # Errors
    ///
    /// Returns an error if any record fails to read. On error, previously
    /// read records are discarded; use [`read_record`](Self::read_record) to
    /// keep them.
    fn read_all(&mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_record()? {
            records.push(record);
        }
        Ok(records)
    }

    /// Returns the number of records read so far.
    fn records_read(&self) -> Option<usize> {
        None
    }
}

/// Extension trait providing iterator-style access for format readers.
///
/// This trait is automatically implemented for all types implementing [`FormatReader`].
pub trait FormatReaderExt: FormatReader {
    /// Create an iterator over records from this reader.
    ///
    /// The iterator yields `Result<Record>` for each record and ends after
    /// the first error.
    fn records(&mut self) -> RecordIterator<'_, Self>
    where
        Self: Sized,
    {
        RecordIterator {
            reader: self,
            failed: false,
        }
    }
}

impl<T: FormatReader> FormatReaderExt for T {}

/// Iterator adapter for [`FormatReader`].
///
/// Created by the [`records`](FormatReaderExt::records) method.
#[derive(Debug)]
pub struct RecordIterator<'a, R: FormatReader> {
    reader: &'a mut R,
    failed: bool,
}

impl<R: FormatReader> Iterator for RecordIterator<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            },
        }
    }
}

impl<R: FormatReader> std::iter::FusedIterator for RecordIterator<'_, R> {}
