//! Citation record structures and semantic accessors.
//!
//! A [`Record`] owns the exact text of one record as cut out of the input by a
//! format reader. Everything else is derived from that text: the raw
//! `(tag, value)` pairs, the [`FieldAggregate`], the semantic accessors
//! (title, authors, pages, ...) and the two fingerprints.
//!
//! Records are write-once. The aggregate and the fingerprints are computed on
//! first use and cached in fill-once cells, so a record can be shared between
//! threads and still does the work only once.
//!
//! # Examples
//!
//! ```
//! use refmatch::{Format, Record};
//!
//! let raw = "TY  - JOUR\nTI  - A title\nAU  - Leela, T.\nSP  - 370-4\nER  - \n";
//! let record = Record::new(Format::Ris, raw);
//!
//! assert_eq!(record.title(), Some("A title"));
//! assert_eq!(record.authors(), Some(vec!["Leela, T."]));
//! assert_eq!(record.pages().start, Some("370"));
//! assert_eq!(record.pages().end, Some("4"));
//! ```

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use lazy_static::lazy_static;
use regex::Regex;

use crate::aggregate::FieldAggregate;
use crate::authors;
use crate::fingerprint::{self, Fingerprint};
use crate::formats::{parse_fields, AuthorSource, FieldMap, Format, PageSource, RawFields};
use crate::normalize::strip_page_annotation;

lazy_static! {
    static ref YEAR: Regex = Regex::new(r"\d{4}").unwrap();
}

/// Start and end page of a record, as written in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PageRange<'a> {
    /// First page
    pub start: Option<&'a str>,
    /// Last page, possibly abbreviated (`"4"` for `370-374`)
    pub end: Option<&'a str>,
}

impl<'a> PageRange<'a> {
    /// Build a range, splitting a hyphenated start when no end is given.
    #[must_use]
    pub fn from_parts(start: Option<&'a str>, end: Option<&'a str>) -> Self {
        match (start, end) {
            (Some(start), None) if !start.is_empty() => match start.split_once('-') {
                Some((start, end)) => PageRange {
                    start: Some(start),
                    end: Some(end),
                },
                None => PageRange {
                    start: Some(start),
                    end: None,
                },
            },
            (start, end) => PageRange { start, end },
        }
    }

    /// Whether no page information is present at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// One parsed citation record.
#[derive(Debug, Clone)]
pub struct Record {
    format: Format,
    raw: String,
    aggregate: OnceLock<FieldAggregate>,
    location: OnceLock<Option<Fingerprint>>,
    title_authors: OnceLock<Option<Fingerprint>>,
}

impl Record {
    /// Wrap the raw text of one record.
    ///
    /// Nothing is parsed until an accessor is called.
    pub fn new(format: Format, raw: impl Into<String>) -> Self {
        Record {
            format,
            raw: raw.into(),
            aggregate: OnceLock::new(),
            location: OnceLock::new(),
            title_authors: OnceLock::new(),
        }
    }

    /// The format the record was read in.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    /// The exact record text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Iterate over the raw `(tag, value)` pairs in record order.
    #[must_use]
    pub fn raw_fields(&self) -> RawFields<'_> {
        parse_fields(&self.raw, self.format)
    }

    /// All values grouped by tag.
    pub fn aggregate(&self) -> &FieldAggregate {
        self.aggregate
            .get_or_init(|| self.raw_fields().collect())
    }

    fn field_map(&self) -> &'static FieldMap {
        self.format.field_map()
    }

    /// The reference type, such as `JOUR` or `Journal Article`.
    #[must_use]
    pub fn reference_type(&self) -> Option<&str> {
        self.aggregate().first_value(self.field_map().reference_type)
    }

    /// The title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.aggregate().first_value(self.field_map().title)
    }

    /// The abstract.
    ///
    /// Some exports break an abstract into several fields; their values are
    /// joined with newlines.
    #[must_use]
    pub fn abstract_text(&self) -> Option<String> {
        self.aggregate()
            .first_nonempty_group(self.field_map().abstract_text)
            .map(|parts| parts.join("\n"))
    }

    /// The authors, in source order.
    #[must_use]
    pub fn authors(&self) -> Option<Vec<&str>> {
        let aggregate = self.aggregate();
        match self.field_map().authors {
            AuthorSource::AllOf(tags) => aggregate.all_values(tags),
            AuthorSource::FirstOf(tags) => aggregate
                .first_nonempty_group(tags)
                .map(|values| values.iter().map(String::as_str).collect()),
        }
    }

    /// The guessed family name of each author.
    ///
    /// See [`guess_lastname`](crate::authors::guess_lastname).
    #[must_use]
    pub fn authors_lastnames(&self) -> Option<Vec<&str>> {
        self.authors().map(authors::lastnames)
    }

    /// Every spelling of the journal name found in the record.
    ///
    /// A record may carry both abbreviated and full names. They are returned
    /// as a set, since only presence matters.
    #[must_use]
    pub fn journal_names(&self) -> Option<BTreeSet<&str>> {
        self.aggregate()
            .all_values(self.field_map().journal_names)
            .map(|names| names.into_iter().collect())
    }

    /// The ISSN, with any trailing annotation removed.
    #[must_use]
    pub fn issn(&self) -> Option<&str> {
        let map = self.field_map();
        let issn = self.aggregate().first_value(map.issn)?;
        if map.issn_annotated {
            Some(issn.split_whitespace().next().unwrap_or(issn))
        } else {
            Some(issn)
        }
    }

    /// The volume.
    #[must_use]
    pub fn volume(&self) -> Option<&str> {
        self.aggregate().first_value(self.field_map().volume)
    }

    /// The issue.
    #[must_use]
    pub fn issue(&self) -> Option<&str> {
        self.aggregate().first_value(self.field_map().issue)
    }

    /// The page range as written in the source.
    #[must_use]
    pub fn pages(&self) -> PageRange<'_> {
        let aggregate = self.aggregate();
        match self.field_map().pages {
            PageSource::StartEnd { start, end } => {
                let start = aggregate.first_value(&[start]);
                let end = aggregate.first_value(&[end]).filter(|end| !end.is_empty());
                PageRange::from_parts(start, end)
            },
            PageSource::Combined(tag) => {
                let pages = aggregate.first_value(&[tag]).map(strip_page_annotation);
                PageRange::from_parts(pages, None)
            },
        }
    }

    /// Shorthand for `pages().start`.
    #[must_use]
    pub fn start_page(&self) -> Option<&str> {
        self.pages().start
    }

    /// Shorthand for `pages().end`.
    #[must_use]
    pub fn end_page(&self) -> Option<&str> {
        self.pages().end
    }

    /// The publication year: the first four-digit run of the date field.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        let date = self.aggregate().first_value(self.field_map().date)?;
        YEAR.find(date).map(|found| found.as_str())
    }

    /// The DOI.
    ///
    /// Values carrying a bracketed type suffix are only accepted when it is
    /// `[doi]`, which is how Medline marks DOIs among other identifiers.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.aggregate()
            .all_values(self.field_map().doi)?
            .into_iter()
            .find_map(|value| {
                let value = value.trim();
                if let Some(doi) = value.strip_suffix("[doi]") {
                    Some(doi.trim_end())
                } else if value.ends_with(']') || value.is_empty() {
                    None
                } else {
                    Some(value)
                }
            })
    }

    /// Fingerprint over pages, volume, issue and ISSN.
    ///
    /// Computed once and cached. See
    /// [`location_fingerprint`](crate::fingerprint::location_fingerprint).
    pub fn location_fingerprint(&self) -> Option<&Fingerprint> {
        self.location
            .get_or_init(|| fingerprint::location_fingerprint(self))
            .as_ref()
    }

    /// Fingerprint over the title and the author lastnames.
    ///
    /// Computed once and cached. See
    /// [`title_authors_fingerprint`](crate::fingerprint::title_authors_fingerprint).
    pub fn title_authors_fingerprint(&self) -> Option<&Fingerprint> {
        self.title_authors
            .get_or_init(|| fingerprint::title_authors_fingerprint(self))
            .as_ref()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.format == other.format && self.raw == other.raw
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.format.hash(state);
        self.raw.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIS: &str = "TY  - JOUR\n\
TI  - A systematic review of alien surgeons\n\
T1  - Secondary title\n\
AB  - First part.\n\
AB  - Second part.\n\
AU  - Zoidberg J.A.\n\
A1  - Leela, T.\n\
AU  - Bender Bending Rodríguez\n\
JA  - J. Ear. Creat. Surg.\n\
JF  - Journal of Earth Creatures Surgery\n\
JO  - J. Ear. Creat. Surg.\n\
SN  - 9919-991X\n\
VL  - 23119\n\
IS  - 4\n\
SP  - 370\n\
EP  - 374\n\
PY  - 3016///\n\
DO  - 10.1000/alien.42\n\
ER  - \n";

    const MEDLINE: &str = "PMID- 123456\n\
OWN - NLM\n\
IS  - 9919-991X (Print)\n\
IS  - 9919-991X (Linking)\n\
VI  - 23119\n\
IP  - 4\n\
DP  - 3016 Apr\n\
TI  - A systematic review of the safety of performing surgery on human\n      subjects by alien surgeons.\n\
PG  - 370-4; discussion 375\n\
LID - S0000-0000(16)00000-0 [pii]\n\
LID - 10.1000/alien.42 [doi]\n\
AB  - Objective: With the increasing human population.\n\
FAU - Zoidberg, JA\n\
AU  - Zoidberg JA\n\
FAU - Leela, T\n\
AU  - Leela T\n\
PT  - Journal Article\n\
TA  - J Ear Creat Surg\n\
JT  - Journal of earth creatures surgery\n";

    fn ris() -> Record {
        Record::new(Format::Ris, RIS)
    }

    fn medline() -> Record {
        Record::new(Format::Medline, MEDLINE)
    }

    #[test]
    fn test_ris_accessors() {
        let r = ris();
        assert_eq!(r.reference_type(), Some("JOUR"));
        assert_eq!(r.title(), Some("A systematic review of alien surgeons"));
        assert_eq!(r.abstract_text().as_deref(), Some("First part.\nSecond part."));
        assert_eq!(
            r.authors(),
            Some(vec![
                "Zoidberg J.A.",
                "Bender Bending Rodríguez",
                "Leela, T."
            ])
        );
        assert_eq!(
            r.authors_lastnames(),
            Some(vec!["Zoidberg", "Rodríguez", "Leela"])
        );
        assert_eq!(
            r.journal_names(),
            Some(BTreeSet::from([
                "J. Ear. Creat. Surg.",
                "Journal of Earth Creatures Surgery"
            ]))
        );
        assert_eq!(r.issn(), Some("9919-991X"));
        assert_eq!(r.volume(), Some("23119"));
        assert_eq!(r.issue(), Some("4"));
        assert_eq!(
            r.pages(),
            PageRange {
                start: Some("370"),
                end: Some("374")
            }
        );
        assert_eq!(r.year(), Some("3016"));
        assert_eq!(r.doi(), Some("10.1000/alien.42"));
    }

    #[test]
    fn test_medline_accessors() {
        let r = medline();
        assert_eq!(r.reference_type(), Some("Journal Article"));
        assert_eq!(
            r.title(),
            Some("A systematic review of the safety of performing surgery on human\nsubjects by alien surgeons.")
        );
        assert_eq!(
            r.abstract_text().as_deref(),
            Some("Objective: With the increasing human population.")
        );
        assert_eq!(r.authors(), Some(vec!["Zoidberg, JA", "Leela, T"]));
        assert_eq!(r.authors_lastnames(), Some(vec!["Zoidberg", "Leela"]));
        assert_eq!(
            r.journal_names(),
            Some(BTreeSet::from([
                "J Ear Creat Surg",
                "Journal of earth creatures surgery"
            ]))
        );
        assert_eq!(r.issn(), Some("9919-991X"));
        assert_eq!(r.volume(), Some("23119"));
        assert_eq!(r.issue(), Some("4"));
        assert_eq!(r.start_page(), Some("370"));
        assert_eq!(r.end_page(), Some("4"));
        assert_eq!(r.year(), Some("3016"));
        assert_eq!(r.doi(), Some("10.1000/alien.42"));
    }

    #[test]
    fn test_medline_authors_fall_back_to_au() {
        let r = Record::new(Format::Medline, "PMID- 1\nAU  - Leela T\nAU  - Conrad H\n");
        assert_eq!(r.authors(), Some(vec!["Leela T", "Conrad H"]));
        assert_eq!(r.authors_lastnames(), Some(vec!["Leela", "Conrad"]));
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let r = Record::new(Format::Ris, "TY  - JOUR\nER  - \n");
        assert_eq!(r.title(), None);
        assert_eq!(r.abstract_text(), None);
        assert_eq!(r.authors(), None);
        assert_eq!(r.authors_lastnames(), None);
        assert_eq!(r.journal_names(), None);
        assert_eq!(r.issn(), None);
        assert!(r.pages().is_empty());
        assert_eq!(r.year(), None);
        assert_eq!(r.doi(), None);
    }

    #[test]
    fn test_ris_hyphenated_start_page() {
        let r = Record::new(Format::Ris, "TY  - JOUR\nSP  - 123-34\nER  - \n");
        assert_eq!(
            r.pages(),
            PageRange {
                start: Some("123"),
                end: Some("34")
            }
        );

        let r = Record::new(Format::Ris, "TY  - JOUR\nSP  - 123-34\nEP  - 140\nER  - \n");
        assert_eq!(r.pages().start, Some("123-34"));
        assert_eq!(r.pages().end, Some("140"));
    }

    #[test]
    fn test_medline_single_page() {
        let r = Record::new(Format::Medline, "PMID- 1\nPG  - e1234\n");
        assert_eq!(
            r.pages(),
            PageRange {
                start: Some("e1234"),
                end: None
            }
        );
    }

    #[test]
    fn test_page_range_from_parts() {
        assert_eq!(PageRange::from_parts(None, None), PageRange::default());
        assert_eq!(
            PageRange::from_parts(Some("12"), None),
            PageRange {
                start: Some("12"),
                end: None
            }
        );
        assert_eq!(
            PageRange::from_parts(Some("12-19"), None),
            PageRange {
                start: Some("12"),
                end: Some("19")
            }
        );
    }

    #[test]
    fn test_raw_fields_and_aggregate() {
        let r = ris();
        assert_eq!(r.raw_fields().count(), 19);
        assert_eq!(r.aggregate().get("AB").map(<[String]>::len), Some(2));
        assert_eq!(r.raw(), RIS);
        assert_eq!(r.format(), Format::Ris);
    }

    #[test]
    fn test_records_compare_by_text() {
        assert_eq!(ris(), ris());
        assert_ne!(ris(), medline());
        assert_ne!(ris(), Record::new(Format::Medline, RIS));
    }

    #[test]
    fn test_fingerprints_are_cached() {
        let r = ris();
        let first = r.location_fingerprint().map(|f| f as *const Fingerprint);
        let second = r.location_fingerprint().map(|f| f as *const Fingerprint);
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}
