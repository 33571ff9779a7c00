//! Property-based tests for bookmark validation.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Title and description truncation always lands on the exact limit
//! - Keyword lists come out lowercase, unique, and first-seen ordered
//! - Valid bookmarks survive a row roundtrip unchanged

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use ebm::models::BookmarkInput;
use ebm::{Bookmark, Lookups};
use proptest::prelude::*;

fn bookmark(input: &BookmarkInput) -> Bookmark {
    Bookmark::new(input, &Lookups::default()).expect("input should validate")
}

proptest! {
    /// Property: titles at or over the limit are truncated to exactly 60
    /// characters ending in an ellipsis.
    #[test]
    fn prop_long_titles_truncate_to_the_limit(title in "[A-Za-z][A-Za-z ]{59,199}") {
        let input = BookmarkInput::new(&title, "http://test-rr.de", "test");
        let result = bookmark(&input);
        prop_assert_eq!(result.title.chars().count(), 60);
        prop_assert!(result.title.ends_with("..."));
        prop_assert!(title.starts_with(result.title.trim_end_matches("...")));
    }

    /// Property: titles under the limit pass through unchanged.
    #[test]
    fn prop_short_titles_are_preserved(title in "[A-Za-z][A-Za-z ]{0,58}") {
        let input = BookmarkInput::new(&title, "http://test-rr.de", "test");
        prop_assert_eq!(bookmark(&input).title, title);
    }

    /// Property: descriptions at or over the limit are truncated to exactly
    /// 300 characters ending in an ellipsis.
    #[test]
    fn prop_long_descriptions_truncate_to_the_limit(
        description in "[A-Za-z][A-Za-z ]{299,499}",
    ) {
        let input = BookmarkInput::new("Test", "http://test-rr.de", "test")
            .with_description(&description);
        let result = bookmark(&input);
        let stored = result.description.expect("description should survive");
        prop_assert_eq!(stored.chars().count(), 300);
        prop_assert!(stored.ends_with("..."));
    }

    /// Property: keywords come out lowercase and free of duplicates, and
    /// the first occurrence decides the position.
    #[test]
    fn prop_keywords_are_lowercase_and_unique(
        tokens in prop::collection::vec("[a-zA-Z]{1,8}", 1..10),
    ) {
        let raw = tokens.join(";");
        let input = BookmarkInput::new("Test", "http://test-rr.de", &raw);
        let result = bookmark(&input);

        let mut seen = std::collections::HashSet::new();
        for keyword in &result.keywords {
            prop_assert_eq!(keyword.clone(), keyword.to_lowercase());
            prop_assert!(seen.insert(keyword.clone()), "duplicate keyword {}", keyword);
        }
        let expected_first = tokens[0].to_lowercase();
        prop_assert_eq!(&result.keywords[0], &expected_first);
    }

    /// Property: a valid bookmark rendered to a row and rebuilt from that
    /// row validates to the same bookmark.
    #[test]
    fn prop_row_roundtrip_is_stable(
        title in "[A-Za-z][A-Za-z ]{0,50}",
        tokens in prop::collection::vec("[a-z]{1,8}", 1..5),
    ) {
        let input = BookmarkInput::new(&title, "http://test-rr.de", &tokens.join(";"))
            .with_state("published");
        let first = bookmark(&input);

        let row = first.to_row();
        let rebuilt = bookmark(&BookmarkInput::from_row(&row));
        prop_assert_eq!(first, rebuilt);
    }
}
