//! Free-text and facet filtering over catalog collections.
//!
//! A collection is narrowed by a case-insensitive substring query against the
//! text fields each entity exposes, AND-combined with exact-match facet
//! constraints. Filtering is stable (input order is kept) and never fails: a
//! query with no hits simply yields an empty vector.

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Facet value meaning "no constraint" (the first entry of every dropdown).
pub const ALL: &str = "all";

// ---------------------------------------------------------------------------
// Filterable
// ---------------------------------------------------------------------------

/// An entity that can be narrowed by [`filter`].
pub trait Filterable {
    /// Text fields matched against the free-text query. Tag collections are
    /// flattened into individual entries.
    fn text_fields(&self) -> Vec<&str>;

    /// The value of the named facet, or `None` if the entity has no such
    /// attribute.
    fn facet(&self, name: &str) -> Option<&str>;
}

// ---------------------------------------------------------------------------
// Facets
// ---------------------------------------------------------------------------

/// Facet constraints keyed by facet name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets(BTreeMap<String, String>);

impl Facets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    /// Insert only when a value was supplied (query-string helper).
    pub fn insert_opt(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    /// Constraints that actually restrict the result (everything but `all`).
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, value)| value.as_str() != ALL)
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// True if any of `fields` contains the lowercased `query`. An empty query
/// matches everything.
pub fn matches_text<'a>(fields: impl IntoIterator<Item = &'a str>, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// True if every active facet equals the item's attribute exactly.
pub fn matches_facets<T: Filterable>(item: &T, facets: &Facets) -> bool {
    facets
        .active()
        .all(|(name, value)| item.facet(name) == Some(value))
}

/// True if `item` satisfies both the text query and all facets.
pub fn matches<T: Filterable>(item: &T, query: &str, facets: &Facets) -> bool {
    matches_text(item.text_fields(), query) && matches_facets(item, facets)
}

/// Stable filter of `items` by `query` and `facets`.
pub fn filter<T: Filterable + Clone>(items: &[T], query: &str, facets: &Facets) -> Vec<T> {
    items
        .iter()
        .filter(|item| matches(*item, query, facets))
        .cloned()
        .collect()
}

/// Dropdown options for a facet: `all` followed by the distinct values in
/// first-seen order.
pub fn facet_options<T: Filterable>(items: &[T], name: &str) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for value in items.iter().filter_map(|item| item.facet(name)) {
        if !options.iter().any(|o| o == value) {
            options.push(value.to_string());
        }
    }
    options
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        title: &'static str,
        tags: Vec<&'static str>,
        kind: &'static str,
        level: Option<&'static str>,
    }

    impl Filterable for Item {
        fn text_fields(&self) -> Vec<&str> {
            let mut fields = vec![self.title];
            fields.extend(self.tags.iter().copied());
            fields
        }

        fn facet(&self, name: &str) -> Option<&str> {
            match name {
                "kind" => Some(self.kind),
                "level" => self.level,
                _ => None,
            }
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                title: "React Fundamentals Quiz",
                tags: vec!["Frontend"],
                kind: "React",
                level: Some("Easy"),
            },
            Item {
                title: "Database Design",
                tags: vec!["SQL"],
                kind: "Database",
                level: Some("Hard"),
            },
            Item {
                title: "CSS Grid",
                tags: vec!["Layout", "Frontend"],
                kind: "CSS",
                level: None,
            },
        ]
    }

    #[test]
    fn empty_query_matches_everything() {
        let all = items();
        assert_eq!(filter(&all, "", &Facets::new()), all);
    }

    #[test]
    fn query_is_case_insensitive() {
        let hits = filter(&items(), "rEaCt", &Facets::new());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "React Fundamentals Quiz");
    }

    #[test]
    fn query_matches_tag_elements() {
        let hits = filter(&items(), "frontend", &Facets::new());
        let titles: Vec<_> = hits.iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["React Fundamentals Quiz", "CSS Grid"]);
    }

    #[test]
    fn all_facet_imposes_nothing() {
        let facets = Facets::new().with("kind", ALL);
        assert_eq!(filter(&items(), "", &facets).len(), 3);
    }

    #[test]
    fn facets_combine_with_and() {
        let facets = Facets::new().with("kind", "React").with("level", "Hard");
        assert!(filter(&items(), "", &facets).is_empty());

        let facets = Facets::new().with("kind", "Database").with("level", "Hard");
        assert_eq!(filter(&items(), "design", &facets).len(), 1);
    }

    #[test]
    fn facet_match_is_exact() {
        let facets = Facets::new().with("kind", "react");
        assert!(filter(&items(), "", &facets).is_empty());
    }

    #[test]
    fn missing_attribute_never_matches_active_facet() {
        let facets = Facets::new().with("level", "Easy");
        let hits = filter(&items(), "", &facets);
        assert_eq!(hits.len(), 1);
        assert!(hits.iter().all(|i| i.level.is_some()));
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(filter(&items(), "kubernetes", &Facets::new()).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let facets = Facets::new().with("kind", "CSS");
        let once = filter(&items(), "grid", &facets);
        let twice = filter(&once, "grid", &facets);
        assert_eq!(once, twice);
    }

    #[test]
    fn facet_options_are_distinct_in_first_seen_order() {
        let mut all = items();
        all.push(all[0].clone());
        assert_eq!(
            facet_options(&all, "kind"),
            vec!["all", "React", "Database", "CSS"]
        );
    }
}
