//! Fingerprints used to detect duplicate citations.
//!
//! Two keys are derived from every record:
//!
//! - the **location** fingerprint, `"{pages}${volume}${issue}${issn}"`, where
//!   is the article printed
//! - the **title-authors** fingerprint, `"{lastnames}${title}"`, what is it
//!   called and who wrote it
//!
//! A key is absent when any of its inputs is missing. Both are pure functions
//! of a record's accessors; equal record text always gives equal keys. The
//! keys approximate identity and can be fooled by sloppy exports, so they are
//! kept separate from the accessor layer and tested on their own.

use std::fmt;

use serde::Serialize;

use crate::normalize::{
    normalize_issn, normalize_list_direction, normalize_page_range, normalize_text_value,
};
use crate::record::{PageRange, Record};

/// Separator between the components of a fingerprint.
pub const COMPONENT_SEPARATOR: char = '$';
/// Separator between lastnames in a title-authors fingerprint.
pub const LASTNAME_SEPARATOR: &str = ".";

/// An opaque comparison key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The key as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the fingerprint, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which fingerprint produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintKind {
    /// Pages, volume, issue and ISSN
    Location,
    /// Title and author lastnames
    TitleAuthors,
}

impl fmt::Display for FingerprintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location => f.write_str("location"),
            Self::TitleAuthors => f.write_str("title-authors"),
        }
    }
}

/// How the ISSN enters the location fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssnMode {
    /// Use the ISSN exactly as read from the record (default).
    ///
    /// Keys stay compatible with fingerprints computed by earlier releases.
    #[default]
    Literal,
    /// Map the ISSN through [`normalize_issn`] first, so deprecated and
    /// canonical ISSNs produce the same key.
    Canonical,
}

/// Build a location key from its parts.
///
/// Requires a start page, volume, issue and ISSN; returns `None` if any is
/// missing. Empty strings count as present.
///
/// # Examples
///
/// ```
/// use refmatch::fingerprint::location_key;
/// use refmatch::record::PageRange;
///
/// let pages = PageRange { start: Some("370"), end: Some("4") };
/// let key = location_key(pages, Some("23119"), Some("4"), Some("9919-991X"));
/// assert_eq!(key.unwrap().as_str(), "370-374$23119$4$9919-991X");
/// ```
#[must_use]
pub fn location_key(
    pages: PageRange<'_>,
    volume: Option<&str>,
    issue: Option<&str>,
    issn: Option<&str>,
) -> Option<Fingerprint> {
    let (volume, issue, issn) = (volume?, issue?, issn?);
    let pages = normalize_page_range(pages.start, pages.end)?;

    Some(Fingerprint(format!(
        "{pages}{sep}{volume}{sep}{issue}{sep}{issn}",
        sep = COMPONENT_SEPARATOR
    )))
}

/// Build a title-authors key from a title and author lastnames.
///
/// Lastnames are normalized and put into canonical direction, so a reversed
/// author list gives the same key. Returns `None` without a title or without
/// an author list.
///
/// # Examples
///
/// ```
/// use refmatch::fingerprint::title_authors_key;
///
/// let forward = title_authors_key(Some("On Robots"), Some(&["Leela", "Conrad"][..]));
/// let reversed = title_authors_key(Some("On robots."), Some(&["Conrad", "Leela"][..]));
/// assert_eq!(forward, reversed);
/// assert_eq!(forward.unwrap().as_str(), "conrad.leela$on robots");
/// ```
#[must_use]
pub fn title_authors_key(title: Option<&str>, lastnames: Option<&[&str]>) -> Option<Fingerprint> {
    let (title, lastnames) = (title?, lastnames?);

    let lastnames: Vec<String> = lastnames.iter().copied().map(normalize_text_value).collect();
    let lastnames = normalize_list_direction(lastnames).join(LASTNAME_SEPARATOR);
    let title = normalize_text_value(title);

    Some(Fingerprint(format!("{lastnames}{COMPONENT_SEPARATOR}{title}")))
}

/// The location fingerprint of a record, using the literal ISSN.
#[must_use]
pub fn location_fingerprint(record: &Record) -> Option<Fingerprint> {
    location_fingerprint_with(record, IssnMode::Literal)
}

/// The location fingerprint of a record with an explicit [`IssnMode`].
#[must_use]
pub fn location_fingerprint_with(record: &Record, mode: IssnMode) -> Option<Fingerprint> {
    let issn = match mode {
        IssnMode::Literal => record.issn(),
        IssnMode::Canonical => record.issn().map(normalize_issn),
    };
    location_key(record.pages(), record.volume(), record.issue(), issn)
}

/// The title-authors fingerprint of a record.
#[must_use]
pub fn title_authors_fingerprint(record: &Record) -> Option<Fingerprint> {
    let lastnames = record.authors_lastnames();
    title_authors_key(record.title(), lastnames.as_deref())
}
