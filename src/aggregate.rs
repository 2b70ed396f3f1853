//! Tag to value aggregation for a single record.
//!
//! A [`FieldAggregate`] is built in one pass from the raw `(tag, value)` pairs
//! of a record and is read-only afterwards. Tags keep the order in which they
//! first appeared, and the values of each tag keep their order in the record.
//!
//! The lookup helpers take a priority-ordered list of synonym tags, which is
//! how per-format field tables express "title is `TI`, or `T1` if missing".

use std::borrow::Cow;

use indexmap::IndexMap;

/// One raw `(tag, value)` pair extracted from a record block.
pub type RawField<'a> = (&'a str, Cow<'a, str>);

/// Insertion-ordered mapping from tag to every value recorded under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAggregate {
    fields: IndexMap<String, Vec<String>>,
}

impl FieldAggregate {
    /// All values recorded under `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.fields.get(tag).map(Vec::as_slice)
    }

    /// Whether any value was recorded under `tag`.
    #[must_use]
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.fields.contains_key(tag)
    }

    /// Iterate over tags in first-seen order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate over `(tag, values)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(tag, values)| (tag.as_str(), values.as_slice()))
    }

    /// Number of distinct tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record had no recognizable fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The whole value list of the first tag in `tags` that has any values.
    #[must_use]
    pub fn first_nonempty_group(&self, tags: &[&str]) -> Option<&[String]> {
        tags.iter()
            .find_map(|tag| self.get(tag).filter(|values| !values.is_empty()))
    }

    /// The first value of [`first_nonempty_group`](Self::first_nonempty_group).
    #[must_use]
    pub fn first_value(&self, tags: &[&str]) -> Option<&str> {
        self.first_nonempty_group(tags)
            .and_then(<[String]>::first)
            .map(String::as_str)
    }

    /// Every value of every tag in `tags`.
    ///
    /// Values are ordered by the priority of their tag first, then by their
    /// order in the record. Returns `None` when nothing matched.
    #[must_use]
    pub fn all_values(&self, tags: &[&str]) -> Option<Vec<&str>> {
        let values: Vec<&str> = tags
            .iter()
            .filter_map(|tag| self.get(tag))
            .flatten()
            .map(String::as_str)
            .collect();
        (!values.is_empty()).then_some(values)
    }
}

impl<K, V> FromIterator<(K, V)> for FieldAggregate
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields: IndexMap<String, Vec<String>> = IndexMap::new();
        for (tag, value) in iter {
            fields.entry(tag.into()).or_default().push(value.into());
        }
        FieldAggregate { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FieldAggregate {
        [
            ("TY", "JOUR"),
            ("AU", "Zoidberg J.A."),
            ("A1", "Leela, T."),
            ("A1", "Bender Bending Rodríguez"),
            ("AU", "Conrad, H."),
            ("TI", "First title"),
            ("ER", ""),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_preserves_first_seen_order() {
        let aggregate = sample();
        let tags: Vec<&str> = aggregate.tags().collect();
        assert_eq!(tags, vec!["TY", "AU", "A1", "TI", "ER"]);
        assert_eq!(
            aggregate.get("AU"),
            Some(&["Zoidberg J.A.".to_string(), "Conrad, H.".to_string()][..])
        );
        assert_eq!(aggregate.len(), 5);
    }

    #[test]
    fn test_first_nonempty_group() {
        let aggregate = sample();
        assert_eq!(
            aggregate.first_nonempty_group(&["A2", "A1", "AU"]),
            Some(&["Leela, T.".to_string(), "Bender Bending Rodríguez".to_string()][..])
        );
        assert_eq!(aggregate.first_nonempty_group(&["A2", "A3"]), None);
    }

    #[test]
    fn test_first_value() {
        let aggregate = sample();
        assert_eq!(aggregate.first_value(&["AU", "A1"]), Some("Zoidberg J.A."));
        assert_eq!(aggregate.first_value(&["A2"]), None);
        assert_eq!(aggregate.first_value(&["ER"]), Some(""));
    }

    #[test]
    fn test_all_values_follows_tag_priority() {
        let aggregate = sample();
        assert_eq!(
            aggregate.all_values(&["A1", "AU"]),
            Some(vec![
                "Leela, T.",
                "Bender Bending Rodríguez",
                "Zoidberg J.A.",
                "Conrad, H."
            ])
        );
        assert_eq!(aggregate.all_values(&["A2", "A3"]), None);
    }

    #[test]
    fn test_from_raw_fields() {
        let raw: Vec<RawField<'_>> = vec![
            ("AB", Cow::Borrowed("first")),
            ("AB", Cow::Owned("second".to_string())),
        ];
        let aggregate: FieldAggregate = raw.into_iter().collect();
        assert_eq!(aggregate.all_values(&["AB"]), Some(vec!["first", "second"]));
    }

    #[test]
    fn test_empty_aggregate() {
        let aggregate = FieldAggregate::default();
        assert!(aggregate.is_empty());
        assert!(!aggregate.contains_tag("TI"));
        assert_eq!(aggregate.iter().count(), 0);
    }
}
