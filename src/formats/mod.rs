//! Citation format selection and per-format field tables.
//!
//! Two export formats are supported, and the set is closed:
//!
//! | Format | Reader | Delimiters |
//! |--------|--------|------------|
//! | RIS | [`RisReader`] | `TY  - ` opens, `ER  - ` closes |
//! | Medline / PubMed | [`MedlineReader`] | blank lines |
//!
//! Each format also carries a static [`FieldMap`] naming the synonym tags that
//! feed every semantic accessor on [`Record`](crate::Record). Adding a format
//! means adding a variant here, and the compiler then points at every place
//! that needs a table or a reader.
//!
//! # Usage
//!
//! ```
//! use refmatch::formats::{read_records, Format};
//!
//! let format: Format = "PubMed".parse()?;
//! let data = "PMID- 1\nTI  - First\n\nPMID- 2\nTI  - Second\n";
//!
//! let titles: Vec<String> = read_records(format, data.as_bytes())
//!     .map(|record| record.map(|r| r.title().unwrap_or_default().to_string()))
//!     .collect::<refmatch::Result<_>>()?;
//! assert_eq!(titles, vec!["First", "Second"]);
//! # Ok::<(), refmatch::RefError>(())
//! ```

mod traits;

pub use traits::{FormatReader, FormatReaderExt, RecordIterator};

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::aggregate::RawField;
use crate::error::{RefError, Result};
use crate::medline::{MedlineFields, MedlineReader};
use crate::record::Record;
use crate::ris::{RisFields, RisReader};

/// Supported citation formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Format {
    /// RIS tagged format (`.ris`)
    Ris,
    /// Medline / PubMed tagged format (`.nbib`, `.txt`)
    Medline,
}

impl Format {
    /// All supported formats.
    pub const ALL: [Format; 2] = [Format::Ris, Format::Medline];

    /// Look a format up by name.
    ///
    /// Accepts `RIS`, `Medline`, `PubMed` and `nbib`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`RefError::UnsupportedFormat`] for any other name.
    ///
    /// # Example
    ///
    /// ```
    /// use refmatch::formats::Format;
    ///
    /// assert_eq!(Format::from_name("ris").unwrap(), Format::Ris);
    /// assert_eq!(Format::from_name("PubMed").unwrap(), Format::Medline);
    /// assert!(Format::from_name("BibTeX").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ris" => Ok(Self::Ris),
            "medline" | "pubmed" | "nbib" => Ok(Self::Medline),
            _ => Err(RefError::UnsupportedFormat(name.to_string())),
        }
    }

    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    ///
    /// # Example
    ///
    /// ```
    /// use refmatch::formats::Format;
    ///
    /// assert_eq!(Format::from_extension("ris"), Some(Format::Ris));
    /// assert_eq!(Format::from_extension("nbib"), Some(Format::Medline));
    /// assert_eq!(Format::from_extension("bib"), None);
    /// ```
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "ris" => Some(Self::Ris),
            "nbib" | "txt" | "medline" => Some(Self::Medline),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Ris => "ris",
            Self::Medline => "nbib",
        }
    }

    /// Get the human-readable name for this format.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ris => "RIS",
            Self::Medline => "Medline",
        }
    }

    /// The synonym table used by the record accessors of this format.
    #[must_use]
    pub fn field_map(&self) -> &'static FieldMap {
        match self {
            Self::Ris => &RIS_FIELDS,
            Self::Medline => &MEDLINE_FIELDS,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Format {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Where the author list of a record comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorSource {
    /// Concatenate the values of every listed tag, in tag priority order.
    AllOf(&'static [&'static str]),
    /// Take the values of the first listed tag that is present.
    FirstOf(&'static [&'static str]),
}

/// Where the page range of a record comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource {
    /// Separate start and end page tags; a hyphenated start page supplies
    /// the end page when the end tag is missing.
    StartEnd {
        /// Start page tag.
        start: &'static str,
        /// End page tag.
        end: &'static str,
    },
    /// One tag holding the whole range, possibly followed by an annotation.
    Combined(&'static str),
}

/// Static synonym-priority table for one format.
///
/// Each list is ordered by priority: the first tag present wins, except
/// where the accessor explicitly concatenates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMap {
    /// Reference type (journal article, book, ...).
    pub reference_type: &'static [&'static str],
    /// Title.
    pub title: &'static [&'static str],
    /// Abstract; every value of the first present tag, newline-joined.
    pub abstract_text: &'static [&'static str],
    /// Authors.
    pub authors: AuthorSource,
    /// Journal names; all spellings are collected into a set.
    pub journal_names: &'static [&'static str],
    /// ISSN.
    pub issn: &'static [&'static str],
    /// Whether ISSN values carry a trailing annotation such as `(Print)`.
    pub issn_annotated: bool,
    /// Volume.
    pub volume: &'static [&'static str],
    /// Issue.
    pub issue: &'static [&'static str],
    /// Pages.
    pub pages: PageSource,
    /// Publication date; the year is its first four-digit run.
    pub date: &'static [&'static str],
    /// DOI candidates.
    pub doi: &'static [&'static str],
}

/// RIS field table.
pub static RIS_FIELDS: FieldMap = FieldMap {
    reference_type: &["TY"],
    title: &["TI", "T1"],
    abstract_text: &["AB", "N2"],
    authors: AuthorSource::AllOf(&["AU", "A1", "A2", "A3"]),
    journal_names: &["JA", "JO", "JF"],
    issn: &["SN"],
    issn_annotated: false,
    volume: &["VL"],
    issue: &["IS"],
    pages: PageSource::StartEnd {
        start: "SP",
        end: "EP",
    },
    date: &["PY", "Y1", "DA"],
    doi: &["DO"],
};

/// Medline field table.
pub static MEDLINE_FIELDS: FieldMap = FieldMap {
    reference_type: &["PT"],
    title: &["TI"],
    abstract_text: &["AB"],
    authors: AuthorSource::FirstOf(&["FAU", "AU"]),
    journal_names: &["JT", "TA"],
    issn: &["IS"],
    issn_annotated: true,
    volume: &["VI"],
    issue: &["IP"],
    pages: PageSource::Combined("PG"),
    date: &["DP"],
    doi: &["LID", "AID"],
};

/// A reader for a format chosen at runtime.
#[derive(Debug)]
pub enum RecordReader<R: BufRead> {
    /// RIS reader
    Ris(RisReader<R>),
    /// Medline reader
    Medline(MedlineReader<R>),
}

impl<R: BufRead> RecordReader<R> {
    /// Create a reader for `format` over `source`.
    pub fn new(format: Format, source: R) -> Self {
        match format {
            Format::Ris => Self::Ris(RisReader::new(source)),
            Format::Medline => Self::Medline(MedlineReader::new(source)),
        }
    }

    /// The format this reader parses.
    #[must_use]
    pub fn format(&self) -> Format {
        match self {
            Self::Ris(_) => Format::Ris,
            Self::Medline(_) => Format::Medline,
        }
    }

    /// Read the next record.
    ///
    /// # Errors
    ///
    /// Propagates the errors of the underlying reader.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        match self {
            Self::Ris(reader) => reader.read_record(),
            Self::Medline(reader) => reader.read_record(),
        }
    }
}

impl<R: BufRead + fmt::Debug> FormatReader for RecordReader<R> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        RecordReader::read_record(self)
    }

    fn records_read(&self) -> Option<usize> {
        Some(match self {
            Self::Ris(reader) => reader.records_read(),
            Self::Medline(reader) => reader.records_read(),
        })
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Lazily read the records of `source` in the given format.
pub fn read_records<R: BufRead>(format: Format, source: R) -> RecordReader<R> {
    RecordReader::new(format, source)
}

/// Raw field iterator for a format chosen at runtime.
#[derive(Debug, Clone)]
pub enum RawFields<'a> {
    /// RIS fields
    Ris(RisFields<'a>),
    /// Medline fields
    Medline(MedlineFields<'a>),
}

impl<'a> Iterator for RawFields<'a> {
    type Item = RawField<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Ris(fields) => fields.next(),
            Self::Medline(fields) => fields.next(),
        }
    }
}

/// Extract the raw `(tag, value)` pairs of one record block.
#[must_use]
pub fn parse_fields(raw: &str, format: Format) -> RawFields<'_> {
    match format {
        Format::Ris => RawFields::Ris(RisFields::new(raw)),
        Format::Medline => RawFields::Medline(MedlineFields::new(raw)),
    }
}
