//! Duplicate detection between two record collections.
//!
//! [`DuplicateMatcher`] indexes a fully loaded collection A by both
//! fingerprint kinds, then matches records of a second collection B against
//! it one at a time. B can be a slice or a stream.
//!
//! Two policies are fixed:
//!
//! - **Last write wins.** When two A records share a fingerprint, the later
//!   one owns the index entry and the earlier one cannot be found by that key.
//! - **Single use.** A matched A record is evicted from both indexes, so each
//!   A record pairs with at most one B record.
//!
//! # Examples
//!
//! ```
//! use refmatch::{read_records, DuplicateMatcher, Format};
//!
//! let a: Vec<_> = read_records(Format::Ris, "TY  - JOUR\nTI  - On robots\nAU  - Leela, T.\nER  - \n".as_bytes())
//!     .collect::<Result<_, _>>()?;
//! let b: Vec<_> = read_records(Format::Medline, "PMID- 1\nTI  - On Robots.\nFAU - Leela, Turanga\n".as_bytes())
//!     .collect::<Result<_, _>>()?;
//!
//! let mut matcher = DuplicateMatcher::new(&a);
//! let pairs: Vec<_> = matcher.find_matches(&b).collect();
//! assert_eq!(pairs.len(), 1);
//! # Ok::<(), refmatch::RefError>(())
//! ```

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::fingerprint::{location_fingerprint_with, Fingerprint, FingerprintKind, IssnMode};
use crate::record::Record;

/// A B record paired with the A record it duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPair<'a, 'b> {
    /// The record from the probing collection (B).
    pub record: &'b Record,
    /// The record from the indexed collection (A).
    pub matched: &'a Record,
    /// Which fingerprint produced the match.
    pub kind: FingerprintKind,
}

/// Totals for a completed match run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    /// Records in the indexed collection.
    pub indexed: usize,
    /// Records probed so far.
    pub probed: usize,
    /// Matches found on the location fingerprint.
    pub location_matches: usize,
    /// Matches found on the title-authors fingerprint.
    pub title_authors_matches: usize,
}

impl MatchSummary {
    /// Total number of matched pairs.
    #[must_use]
    pub fn total_matches(&self) -> usize {
        self.location_matches + self.title_authors_matches
    }
}

/// Matches records against an indexed collection.
#[derive(Debug)]
pub struct DuplicateMatcher<'a> {
    records: &'a [Record],
    issn_mode: IssnMode,
    by_location: HashMap<Fingerprint, usize>,
    by_title_authors: HashMap<Fingerprint, usize>,
    summary: MatchSummary,
}

impl<'a> DuplicateMatcher<'a> {
    /// Index `records` using the literal ISSN for location keys.
    #[must_use]
    pub fn new(records: &'a [Record]) -> Self {
        Self::with_issn_mode(records, IssnMode::default())
    }

    /// Index `records` with an explicit ISSN mode.
    ///
    /// The same mode is applied to records probed later.
    #[must_use]
    pub fn with_issn_mode(records: &'a [Record], issn_mode: IssnMode) -> Self {
        let mut matcher = DuplicateMatcher {
            records,
            issn_mode,
            by_location: HashMap::new(),
            by_title_authors: HashMap::new(),
            summary: MatchSummary {
                indexed: records.len(),
                ..MatchSummary::default()
            },
        };

        let mut unkeyed = 0;
        for (idx, record) in records.iter().enumerate() {
            let location = matcher.location_key(record);
            let title_authors = record.title_authors_fingerprint();
            if location.is_none() && title_authors.is_none() {
                unkeyed += 1;
            }

            if let Some(key) = location {
                if let Some(previous) = matcher.by_location.insert(key, idx) {
                    trace!(previous, replaced_by = idx, "location fingerprint collision");
                }
            }
            if let Some(key) = title_authors {
                if let Some(previous) = matcher.by_title_authors.insert(key.clone(), idx) {
                    trace!(previous, replaced_by = idx, "title-authors fingerprint collision");
                }
            }
        }

        debug!(
            records = records.len(),
            unkeyed,
            location_keys = matcher.by_location.len(),
            title_authors_keys = matcher.by_title_authors.len(),
            "indexed records for matching"
        );
        matcher
    }

    /// The ISSN mode used for location keys.
    #[must_use]
    pub fn issn_mode(&self) -> IssnMode {
        self.issn_mode
    }

    /// Number of A records that can still be matched by at least one key.
    #[must_use]
    pub fn remaining(&self) -> usize {
        let mut live: Vec<usize> = self
            .by_location
            .values()
            .chain(self.by_title_authors.values())
            .copied()
            .collect();
        live.sort_unstable();
        live.dedup();
        live.len()
    }

    /// Counts accumulated so far.
    #[must_use]
    pub fn summary(&self) -> MatchSummary {
        self.summary
    }

    /// Probe a single record.
    ///
    /// The location index is tried first, then the title-authors index. On a
    /// hit the A record is consumed and will not match again.
    pub fn match_record(&mut self, record: &Record) -> Option<(&'a Record, FingerprintKind)> {
        self.summary.probed += 1;

        let hit = self
            .location_key(record)
            .and_then(|key| self.by_location.get(&key).copied())
            .map(|idx| (idx, FingerprintKind::Location))
            .or_else(|| {
                record
                    .title_authors_fingerprint()
                    .and_then(|key| self.by_title_authors.get(key).copied())
                    .map(|idx| (idx, FingerprintKind::TitleAuthors))
            });

        let (idx, kind) = hit?;
        self.evict(idx);

        match kind {
            FingerprintKind::Location => self.summary.location_matches += 1,
            FingerprintKind::TitleAuthors => self.summary.title_authors_matches += 1,
        }
        debug!(indexed = idx, %kind, "matched record");
        let records = self.records;
        Some((&records[idx], kind))
    }

    /// Match every record of `records` in order, yielding only the hits.
    pub fn find_matches<'m, 'b, I>(&'m mut self, records: I) -> Matches<'m, 'a, I::IntoIter>
    where
        I: IntoIterator<Item = &'b Record>,
    {
        Matches {
            matcher: self,
            records: records.into_iter(),
        }
    }

    fn location_key(&self, record: &Record) -> Option<Fingerprint> {
        match self.issn_mode {
            IssnMode::Literal => record.location_fingerprint().cloned(),
            IssnMode::Canonical => location_fingerprint_with(record, IssnMode::Canonical),
        }
    }

    // Entries now owned by a later colliding record are left alone.
    fn evict(&mut self, idx: usize) {
        let records = self.records;
        let record = &records[idx];
        if let Some(key) = self.location_key(record) {
            if self.by_location.get(&key) == Some(&idx) {
                self.by_location.remove(&key);
            }
        }
        if let Some(key) = record.title_authors_fingerprint() {
            if self.by_title_authors.get(key) == Some(&idx) {
                self.by_title_authors.remove(key);
            }
        }
    }
}

/// Iterator returned by [`DuplicateMatcher::find_matches`].
#[derive(Debug)]
pub struct Matches<'m, 'a, I> {
    matcher: &'m mut DuplicateMatcher<'a>,
    records: I,
}

impl<'a, 'b, I> Iterator for Matches<'_, 'a, I>
where
    I: Iterator<Item = &'b Record>,
{
    type Item = MatchPair<'a, 'b>;

    fn next(&mut self) -> Option<Self::Item> {
        for record in self.records.by_ref() {
            if let Some((matched, kind)) = self.matcher.match_record(record) {
                return Some(MatchPair {
                    record,
                    matched,
                    kind,
                });
            }
        }
        debug!(summary = ?self.matcher.summary, "matching pass complete");
        None
    }
}

/// Find every B record that duplicates an A record.
///
/// Shorthand for building a [`DuplicateMatcher`] over `a` and collecting
/// [`DuplicateMatcher::find_matches`] over `b`.
#[must_use]
pub fn find_duplicates<'a, 'b>(a: &'a [Record], b: &'b [Record]) -> Vec<MatchPair<'a, 'b>> {
    DuplicateMatcher::new(a).find_matches(b).collect()
}
