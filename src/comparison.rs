//! Side-by-side views of matched records.
//!
//! Produces one [`FieldComparison`] per compared field so a caller can show
//! two matched records next to each other. Values are flattened to text:
//! missing values become empty strings, lists are joined with `"; "`.

use serde::Serialize;

use crate::matcher::MatchPair;
use crate::record::{PageRange, Record};

/// A field shown in a side-by-side comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparedField {
    /// Title
    Title,
    /// Authors, `"; "`-joined
    Authors,
    /// Abstract
    Abstract,
    /// Journal names, sorted and `"; "`-joined
    JournalNames,
    /// ISSN
    Issn,
    /// Volume
    Volume,
    /// Issue
    Issue,
    /// Page range
    Pages,
}

impl ComparedField {
    /// Every compared field, in display order.
    pub const ALL: [ComparedField; 8] = [
        ComparedField::Title,
        ComparedField::Authors,
        ComparedField::Abstract,
        ComparedField::JournalNames,
        ComparedField::Issn,
        ComparedField::Volume,
        ComparedField::Issue,
        ComparedField::Pages,
    ];

    /// The name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Authors => "authors",
            Self::Abstract => "abstract",
            Self::JournalNames => "journal_names",
            Self::Issn => "issn",
            Self::Volume => "volume",
            Self::Issue => "issue",
            Self::Pages => "pages",
        }
    }

    /// Render this field of `record` as text.
    #[must_use]
    pub fn render(self, record: &Record) -> String {
        match self {
            Self::Title => record.title().unwrap_or_default().to_string(),
            Self::Authors => record
                .authors()
                .map(|authors| authors.join(LIST_SEPARATOR))
                .unwrap_or_default(),
            Self::Abstract => record.abstract_text().unwrap_or_default(),
            Self::JournalNames => record
                .journal_names()
                .map(|names| names.into_iter().collect::<Vec<_>>().join(LIST_SEPARATOR))
                .unwrap_or_default(),
            Self::Issn => record.issn().unwrap_or_default().to_string(),
            Self::Volume => record.volume().unwrap_or_default().to_string(),
            Self::Issue => record.issue().unwrap_or_default().to_string(),
            Self::Pages => render_pages(record.pages()),
        }
    }
}

const LIST_SEPARATOR: &str = "; ";

/// One field of two records rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldComparison {
    /// Field name, see [`ComparedField::name`].
    pub field: &'static str,
    /// Value from the first record.
    pub first: String,
    /// Value from the second record.
    pub second: String,
}

impl FieldComparison {
    /// Whether both sides render to the same text.
    #[must_use]
    pub fn is_equal(&self) -> bool {
        self.first == self.second
    }
}

/// Compare two records field by field.
#[must_use]
pub fn side_by_side(first: &Record, second: &Record) -> Vec<FieldComparison> {
    ComparedField::ALL
        .iter()
        .map(|&field| FieldComparison {
            field: field.name(),
            first: field.render(first),
            second: field.render(second),
        })
        .collect()
}

/// Compare the two sides of a match, B record first.
#[must_use]
pub fn compare_pair(pair: &MatchPair<'_, '_>) -> Vec<FieldComparison> {
    side_by_side(pair.record, pair.matched)
}

/// Render comparisons as a JSON array.
///
/// # Errors
///
/// Returns the serializer error if encoding fails.
pub fn to_json(comparisons: &[FieldComparison]) -> serde_json::Result<String> {
    serde_json::to_string(comparisons)
}

fn render_pages(pages: PageRange<'_>) -> String {
    match (pages.start, pages.end) {
        (Some(start), Some(end)) => format!("{start}-{end}"),
        (Some(page), None) | (None, Some(page)) => page.to_string(),
        (None, None) => String::new(),
    }
}
