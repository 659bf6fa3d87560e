use std::collections::HashMap;

use arrayvec::ArrayVec;

/// Maximum number of identifiers returned by [`StudentIndex::search`].
pub const MAX_SUGGESTIONS: usize = 5;

/// Search terms shorter than this (in characters) yield no suggestions.
pub const MIN_SEARCH_LEN: usize = 3;

/// Identifier index over a dataset's records.
///
/// Keeps the identifiers in input order for substring search, plus a map from
/// identifier to the position of its first occurrence for exact lookup.
#[derive(Debug, Clone, Default)]
pub struct StudentIndex {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
}

impl StudentIndex {
    pub fn new<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = Self::default();
        for (pos, id) in ids.into_iter().enumerate() {
            let id = id.trim();
            index.positions.entry(id.to_owned()).or_insert(pos);
            index.ids.push(id.to_owned());
        }
        index
    }

    /// Returns the record position of `id`, compared after trimming whitespace.
    ///
    /// When an identifier occurs more than once, the first occurrence is returned.
    #[must_use]
    pub fn exact_match(&self, id: &str) -> Option<usize> {
        self.positions.get(id.trim()).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.exact_match(id).is_some()
    }

    /// Returns up to [`MAX_SUGGESTIONS`] identifiers containing `term`, in input order.
    ///
    /// The term is trimmed first; terms shorter than [`MIN_SEARCH_LEN`] characters match
    /// nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use examdash_dataset::lookup::StudentIndex;
    ///
    /// let index = StudentIndex::new(["100234", "200234", "300111"]);
    /// assert_eq!(index.search("0234").as_slice(), ["100234", "200234"]);
    /// assert!(index.search("02").is_empty());
    /// ```
    #[must_use]
    pub fn search(&self, term: &str) -> ArrayVec<&str, MAX_SUGGESTIONS> {
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_LEN {
            return ArrayVec::new();
        }
        self.ids
            .iter()
            .filter(|id| id.contains(term))
            .map(String::as_str)
            .take(MAX_SUGGESTIONS)
            .collect()
    }

    /// Number of distinct identifiers.
    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> StudentIndex {
        StudentIndex::new([
            "881001", "881002", "881003", "881004", "881005", "881006", "990001",
        ])
    }

    #[test]
    fn test_exact_match_trims() {
        let index = index();
        assert_eq!(index.exact_match("881003"), Some(2));
        assert_eq!(index.exact_match(" 881003 "), Some(2));
        assert_eq!(index.exact_match("88100"), None);
    }

    #[test]
    fn test_search_caps_results() {
        let index = index();
        let result = index.search("881");
        assert_eq!(
            result.as_slice(),
            ["881001", "881002", "881003", "881004", "881005"]
        );
    }

    #[test]
    fn test_search_matches_substring_not_prefix() {
        let index = index();
        assert_eq!(index.search("0001").as_slice(), ["990001"]);
    }

    #[test]
    fn test_short_term_yields_nothing_even_with_matches() {
        let index = index();
        assert!(index.search("88").is_empty());
        assert!(index.search("  8 ").is_empty());
        assert!(index.search("").is_empty());
    }

    #[test]
    fn test_search_no_match() {
        assert!(index().search("777").is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_first_position() {
        let index = StudentIndex::new(["a1", "b2", "a1"]);
        assert_eq!(index.exact_match("a1"), Some(0));
        assert_eq!(index.unique_count(), 2);
    }
}
