//! Multi-tier relevance scoring for catalogue items.
//!
//! The score ladder, highest first:
//! - exact name match, exact specification match
//! - prefix match on any field (penalized by the unmatched suffix length)
//! - interior substring match on any field (penalized by position)
//! - fuzzy match on the name field only, via edit distance over a short
//!   prefix window
//!
//! Scores are `i32` because the interior tier subtracts the match position
//! without a floor: a match deep inside a long field legitimately produces
//! a negative score, which still participates in the cross-field maximum.

use unicode_segmentation::UnicodeSegmentation;

use crate::fuzzy::{levenshtein_distance, prefix_window};
use crate::item::CatalogItem;

const SCORE_EXACT_NAME: i32 = 120;
const SCORE_EXACT_SPECIFICATION: i32 = 110;
const SCORE_PREFIX_BASE: i32 = 90;
const PREFIX_SUFFIX_PENALTY_CAP: i32 = 10;
const SCORE_INTERIOR_BASE: i32 = 70;
const SCORE_FUZZY_BASE: i32 = 60;
const FUZZY_DISTANCE_PENALTY: i32 = 8;
const FUZZY_MIN_QUERY_LEN: usize = 3;
const FUZZY_WINDOW_SLACK: usize = 3;

/// Score an item's relevance against a query.
///
/// Pure and deterministic. The query is trimmed and matching is
/// case-insensitive; lengths and positions are measured in grapheme
/// clusters. An empty query, or an item missing both name and
/// specification, scores 0. A result of 0 or less means "no match" for
/// suggestion purposes.
pub fn score<T: CatalogItem + ?Sized>(query: &str, item: &T) -> i32 {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 0;
    }

    let name = item.name().map(str::to_lowercase);
    let specification = item.specification().map(str::to_lowercase);
    if name.is_none() && specification.is_none() {
        return 0;
    }
    let category = item.category().map(str::to_lowercase);

    if name.as_deref() == Some(query.as_str()) {
        return SCORE_EXACT_NAME;
    }
    if specification.as_deref() == Some(query.as_str()) {
        return SCORE_EXACT_SPECIFICATION;
    }

    let query_len = query.graphemes(true).count();
    [
        name.as_deref()
            .and_then(|f| field_score(f, &query, query_len, true)),
        specification
            .as_deref()
            .and_then(|f| field_score(f, &query, query_len, false)),
        category
            .as_deref()
            .and_then(|f| field_score(f, &query, query_len, false)),
    ]
    .into_iter()
    .flatten()
    .max()
    .unwrap_or(0)
}

/// Case-insensitive substring containment across the three fields.
///
/// This is the broad filter signal: cheaper and more permissive than
/// [`score`]. An empty query is contained in any field that exists at all.
pub fn contains_query<T: CatalogItem + ?Sized>(query: &str, item: &T) -> bool {
    let query = query.trim().to_lowercase();
    [item.name(), item.specification(), item.category()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Score a single lowercased field; `None` when the field does not match.
fn field_score(field: &str, query: &str, query_len: usize, fuzzy: bool) -> Option<i32> {
    match field.find(query) {
        Some(0) => {
            let field_len = field.graphemes(true).count() as i32;
            let suffix_len = (field_len - query_len as i32).min(PREFIX_SUFFIX_PENALTY_CAP);
            Some(SCORE_PREFIX_BASE - suffix_len)
        }
        Some(byte_pos) => {
            let position = field[..byte_pos].graphemes(true).count() as i32;
            Some(SCORE_INTERIOR_BASE - position)
        }
        None if fuzzy && query_len >= FUZZY_MIN_QUERY_LEN => {
            // Distance against a short prefix of the field keeps the DP
            // bounded; name is the only field worth the cost.
            let window = prefix_window(field, query_len + FUZZY_WINDOW_SLACK);
            let distance = levenshtein_distance(window, query) as i32;
            Some(SCORE_FUZZY_BASE - distance * FUZZY_DISTANCE_PENALTY)
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Default)]
    struct TestItem {
        name: Option<String>,
        specification: Option<String>,
        category: Option<String>,
    }

    impl CatalogItem for TestItem {
        fn name(&self) -> Option<&str> {
            self.name.as_deref()
        }

        fn specification(&self) -> Option<&str> {
            self.specification.as_deref()
        }

        fn category(&self) -> Option<&str> {
            self.category.as_deref()
        }
    }

    fn named(name: &str) -> TestItem {
        TestItem {
            name: Some(name.to_string()),
            ..TestItem::default()
        }
    }

    #[test]
    fn test_empty_query_scores_zero() {
        assert_eq!(score("", &named("Kompor Gas")), 0);
        assert_eq!(score("   ", &named("Kompor Gas")), 0);
    }

    #[test]
    fn test_item_without_matchable_fields_scores_zero() {
        let item = TestItem {
            category: Some("elektronik".to_string()),
            ..TestItem::default()
        };
        assert_eq!(score("elektronik", &item), 0);
    }

    #[test]
    fn test_exact_name_match() {
        assert_eq!(score("kompor listrik", &named("Kompor Listrik")), 120);
        assert_eq!(score("KOMPOR LISTRIK", &named("kompor listrik")), 120);
    }

    #[test]
    fn test_exact_specification_match() {
        let item = TestItem {
            name: Some("Kompor Gas".to_string()),
            specification: Some("2 tungku api biru".to_string()),
            ..TestItem::default()
        };
        assert_eq!(score("2 Tungku Api Biru", &item), 110);
    }

    #[test]
    fn test_prefix_match_penalizes_suffix_length() {
        // 14 graphemes - 6 query graphemes = 8 left over
        assert_eq!(score("kompor", &named("Kompor Listrik")), 82);
        // 19 - 6 = 13, capped at 10
        assert_eq!(score("kompor", &named("Kompor Gas 2 Tungku")), 80);
    }

    #[test]
    fn test_interior_match_penalizes_position() {
        assert_eq!(score("kompor", &named("Gas Kompor")), 66);
    }

    #[test]
    fn test_prefix_beats_interior_at_equal_field_length() {
        let prefix = score("kompor", &named("Kompor Gas"));
        let interior = score("kompor", &named("Gas Kompor"));
        assert!(prefix > interior);
    }

    #[test]
    fn test_interior_match_can_go_negative() {
        let name = format!("{}beras", "x".repeat(80));
        assert_eq!(score("beras", &named(&name)), 70 - 80);
    }

    #[test]
    fn test_fuzzy_match_on_name() {
        // No substring match; window is the first 8 graphemes, "kompor g",
        // at edit distance 3 from the query
        assert_eq!(score("kompr", &named("Kompor Gas")), 60 - 3 * 8);
    }

    #[test]
    fn test_fuzzy_requires_three_graphemes() {
        // "kp" matches nothing and is too short for the fuzzy branch
        assert_eq!(score("kp", &named("kompor")), 0);
    }

    #[test]
    fn test_fuzzy_skips_specification_and_category() {
        let item = TestItem {
            name: Some("Rak Besi".to_string()),
            specification: Some("kompor".to_string()),
            category: Some("kompor".to_string()),
        };
        // "kompr" is a near miss on specification and category, but only
        // the name field is fuzzy-matched, and the name is far away
        let got = score("kompr", &item);
        assert_eq!(got, 60 - 8 * levenshtein_distance("rak besi", "kompr") as i32);
    }

    #[test]
    fn test_best_field_wins() {
        let item = TestItem {
            name: Some("Oven Tanam".to_string()),
            specification: Some("kompor tanam".to_string()),
            category: Some("dapur kompor".to_string()),
        };
        // specification prefix (90 - min(10, 12 - 6) = 84) beats the
        // category interior match (70 - 6 = 64)
        assert_eq!(score("kompor", &item), 84);
    }

    #[test]
    fn test_category_prefix_match() {
        let item = TestItem {
            name: Some("Wajan 30cm".to_string()),
            category: Some("peralatan dapur".to_string()),
            ..TestItem::default()
        };
        assert_eq!(score("peralatan", &item), 90 - 6);
    }

    #[test]
    fn test_contains_query() {
        let item = TestItem {
            name: Some("Kompor Gas 2 Tungku".to_string()),
            category: Some("dapur".to_string()),
            ..TestItem::default()
        };
        assert!(contains_query("gas 2", &item));
        assert!(contains_query("DAPUR", &item));
        assert!(!contains_query("listrik", &item));
    }

    #[test]
    fn test_contains_query_empty_string_edge() {
        // The empty string is contained in any present field, but an item
        // with no fields at all contains nothing
        assert!(contains_query("", &named("Oven Tanam")));
        assert!(!contains_query("", &TestItem::default()));
    }

    proptest! {
        #[test]
        fn prop_empty_query_always_scores_zero(
            name in proptest::option::of(".*"),
            specification in proptest::option::of(".*"),
            category in proptest::option::of(".*"),
        ) {
            let item = TestItem { name, specification, category };
            prop_assert_eq!(score("", &item), 0);
        }

        #[test]
        fn prop_exact_name_scores_highest_tier(name in "[a-zA-Z][a-zA-Z0-9 ]{0,18}[a-zA-Z0-9]") {
            let item = named(&name);
            prop_assert_eq!(score(&name.to_uppercase(), &item), 120);
        }

        #[test]
        fn prop_score_never_exceeds_exact_tier(
            query in "[a-z0-9 ]{0,12}",
            name in "[a-zA-Z0-9 ]{0,24}",
        ) {
            prop_assert!(score(&query, &named(&name)) <= 120);
        }
    }
}
