#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # refmatch
//!
//! Parsing of RIS and Medline citation exports, and duplicate detection
//! between two citation collections.
//!
//! ## Pipeline
//!
//! ```text
//! lines -> reader -> raw record text -> (tag, value) pairs -> FieldAggregate
//!       -> accessors -> fingerprints -> DuplicateMatcher -> MatchPair
//! ```
//!
//! Readers are pull based: nothing is read until the caller asks for the next
//! record. Field aggregates and fingerprints are computed on first use and
//! cached on the [`Record`].
//!
//! ## Quick Start
//!
//! ```
//! use refmatch::{find_duplicates, read_records, Format};
//!
//! let ris = "TY  - JOUR\nTI  - Surgery by aliens\nAU  - Zoidberg J.A.\nER  - \n";
//! let medline = "PMID- 1\nTI  - Surgery by\n      aliens.\nFAU - Zoidberg, JA\n";
//!
//! let a: Vec<_> = read_records(Format::Ris, ris.as_bytes()).collect::<refmatch::Result<_>>()?;
//! let b: Vec<_> = read_records(Format::Medline, medline.as_bytes()).collect::<refmatch::Result<_>>()?;
//!
//! for pair in find_duplicates(&a, &b) {
//!     println!("{:?} duplicates {:?} ({})", pair.record.title(), pair.matched.title(), pair.kind);
//! }
//! # Ok::<(), refmatch::RefError>(())
//! ```
//!
//! ## Modules
//!
//! - [`ris`]: RIS record splitting and field extraction
//! - [`medline`]: Medline record splitting and field extraction
//! - [`formats`]: Format selection, per-format tag tables, reader traits
//! - [`aggregate`]: Tag to values multimap built from raw fields
//! - [`record`]: The [`Record`] type and its semantic accessors
//! - [`authors`]: Lastname guessing
//! - [`normalize`]: Page, ISSN, text and list normalization
//! - [`fingerprint`]: Location and title-authors comparison keys
//! - [`matcher`]: Duplicate matching between two collections
//! - [`comparison`]: Side-by-side field views of matched records
//! - [`error`]: Error types

pub mod aggregate;
pub mod authors;
pub mod comparison;
pub mod error;
pub mod fingerprint;
pub mod formats;
pub mod matcher;
pub mod medline;
pub mod normalize;
pub mod record;
pub mod ris;

pub use aggregate::FieldAggregate;
pub use comparison::{side_by_side, ComparedField, FieldComparison};
pub use error::{RefError, Result, StructuralErrorKind};
pub use fingerprint::{Fingerprint, FingerprintKind, IssnMode};
pub use formats::{
    parse_fields, read_records, Format, FormatReader, FormatReaderExt, RecordReader,
};
pub use matcher::{find_duplicates, DuplicateMatcher, MatchPair, MatchSummary};
pub use medline::MedlineReader;
pub use normalize::{
    normalize_issn, normalize_list_direction, normalize_page_range, normalize_text_value,
};
pub use record::{PageRange, Record};
pub use ris::RisReader;
