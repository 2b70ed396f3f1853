//! Normalization of fuzzy citation values.
//!
//! Different exports record the same citation with small differences: page
//! ranges are abbreviated (`370-4`), names carry diacritics in one source and
//! not in another, author lists are sometimes reversed. The functions here
//! reduce those values to a canonical form so they can be compared as keys.
//! None of them are meant for display.

use std::cmp::Ordering;
use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const ISSN_MAPPINGS: &str = include_str!("../data/issn_mappings.tsv");

lazy_static! {
    static ref ISSN_SYNONYMS: HashMap<&'static str, &'static str> = parse_issn_table(ISSN_MAPPINGS);
    static ref PAGE_ANNOTATION: Regex = Regex::new(r"[ ,;].*$").unwrap();
    static ref NON_WORD_RUN: Regex = Regex::new(r"[^a-zA-Z0-9\s]+").unwrap();
}

fn parse_issn_table(table: &'static str) -> HashMap<&'static str, &'static str> {
    table
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('\t'))
        .map(|(from, to)| (from.trim(), to.trim()))
        .collect()
}

/// Canonicalize a page range into `"{start}-{end}"`.
///
/// Returns `None` when there is no start page. A missing or empty end page
/// is taken from a hyphenated start (`"123-34"`), and an abbreviated end page
/// is left-extended with the leading digits of the start page.
///
/// # Examples
///
/// ```
/// use refmatch::normalize::normalize_page_range;
///
/// assert_eq!(normalize_page_range(Some("123"), Some("4")).as_deref(), Some("123-124"));
/// assert_eq!(normalize_page_range(Some("123-34"), None).as_deref(), Some("123-134"));
/// assert_eq!(normalize_page_range(Some("123"), None).as_deref(), Some("123-123"));
/// assert_eq!(normalize_page_range(None, Some("4")), None);
/// ```
#[must_use]
pub fn normalize_page_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    let start = start?;

    let (start, end) = match end {
        Some(end) if !end.is_empty() => (start, end),
        _ => start.split_once('-').unwrap_or((start, "")),
    };

    let start_len = start.chars().count();
    let end_len = end.chars().count();
    if end_len < start_len {
        let prefix: String = start.chars().take(start_len - end_len).collect();
        return Some(format!("{start}-{prefix}{end}"));
    }

    Some(format!("{start}-{end}"))
}

/// Cut the trailing annotation off a page value.
///
/// Everything from the first space, comma or semicolon onwards is dropped, so
/// `"370-4; discussion 375"` becomes `"370-4"`.
#[must_use]
pub fn strip_page_annotation(pages: &str) -> &str {
    match PAGE_ANNOTATION.find(pages) {
        Some(found) => &pages[..found.start()],
        None => pages,
    }
}

/// Map a deprecated or miswritten ISSN to its canonical form.
///
/// Unknown values are returned unchanged.
///
/// # Examples
///
/// ```
/// use refmatch::normalize::normalize_issn;
///
/// assert_eq!(normalize_issn("2151-4658"), "2151-464X");
/// assert_eq!(normalize_issn("1111-111Z"), "1111-111Z");
/// ```
#[must_use]
pub fn normalize_issn(issn: &str) -> &str {
    ISSN_SYNONYMS.get(issn).copied().unwrap_or(issn)
}

/// Remove diacritic marks by decomposing and dropping combining characters.
#[must_use]
pub fn remove_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Reduce free text to a comparison key.
///
/// Diacritics are removed and `&` becomes `and`. Each run of characters that
/// are neither ASCII alphanumeric nor whitespace becomes a single space, so
/// `"COVID-19"` and `"COVID 19"` normalize alike. Whitespace runs then
/// collapse to one space and the result is trimmed and lowercased.
///
/// # Examples
///
/// ```
/// use refmatch::normalize::normalize_text_value;
///
/// assert_eq!(normalize_text_value("Rodríguez"), "rodriguez");
/// assert_eq!(normalize_text_value("Smith-Jones"), "smith jones");
/// assert_eq!(
///     normalize_text_value("Testing: when is it safe to stop?"),
///     "testing when is it safe to stop"
/// );
/// ```
#[must_use]
pub fn normalize_text_value(text: &str) -> String {
    let text = remove_accents(text).replace('&', " and ");
    let spaced = NON_WORD_RUN.replace_all(&text, " ");

    spaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether a sequence is recorded in its reversed ("head-heavy") direction.
///
/// Index pairs are compared inward from both ends. At the first pair that
/// differs, the sequence is head-heavy if the head item is the greater one.
/// Sequences whose pairs are all equal, including palindromes, are not.
///
/// # Examples
///
/// ```
/// use refmatch::normalize::is_head_heavy;
///
/// assert!(!is_head_heavy(&[1, 2, 3, 4, 5, 6]));
/// assert!(is_head_heavy(&[5, 4, 3, 2, 1]));
/// assert!(!is_head_heavy(&[5, 4, 3, 4, 5]));
/// ```
#[must_use]
pub fn is_head_heavy<T: Ord>(items: &[T]) -> bool {
    let pairs = items.iter().zip(items.iter().rev()).take(items.len() / 2);
    for (head, tail) in pairs {
        match head.cmp(tail) {
            Ordering::Greater => return true,
            Ordering::Less => return false,
            Ordering::Equal => {},
        }
    }
    false
}

/// Put a sequence into its canonical direction.
///
/// A sequence and its exact reversal always normalize to the same value.
#[must_use]
pub fn normalize_list_direction<T: Ord>(mut items: Vec<T>) -> Vec<T> {
    if is_head_heavy(&items) {
        items.reverse();
    }
    items
}
