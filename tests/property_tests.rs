//! Property-based tests for file name generation.

use esx_photos::planner::numbered_file_names;
use esx_photos::slugify;
use proptest::prelude::*;
use regex::Regex;

fn ascii_slug_shape() -> Regex {
    Regex::new(r"^[A-Za-z0-9_]*(-[A-Za-z0-9_]+)*$").unwrap()
}

proptest! {
    /// ASCII slugs only ever contain word characters joined by single hyphens.
    #[test]
    fn prop_ascii_slug_shape(input in "\\PC{0,40}") {
        let slug = slugify(&input, false);
        prop_assert!(
            ascii_slug_shape().is_match(&slug),
            "{:?} produced {:?}", input, slug
        );
    }

    /// Slugifying a slug changes nothing.
    #[test]
    fn prop_slugify_idempotent(input in "\\PC{0,40}") {
        let once = slugify(&input, false);
        prop_assert_eq!(slugify(&once, false), once);
    }

    /// Same in unicode mode, over precomposed letters and punctuation.
    #[test]
    fn prop_unicode_slugify_idempotent(input in "[a-zA-Z0-9éüßøÅ汉字 _.,!-]{0,30}") {
        let once = slugify(&input, true);
        prop_assert_eq!(slugify(&once, true), once);
    }

    /// Any run of spaces and hyphens between words becomes one hyphen.
    #[test]
    fn prop_separator_runs_collapse(
        left in "[A-Za-z0-9]{1,10}",
        right in "[A-Za-z0-9]{1,10}",
        separator in "[ \\t-]{1,6}"
    ) {
        let slug = slugify(&format!("{left}{separator}{right}"), false);
        prop_assert_eq!(slug, format!("{left}-{right}"));
    }

    /// Leading and trailing separators never survive.
    #[test]
    fn prop_no_edge_separators(input in "[ _-]{0,3}[a-z]{1,8}[ _-]{0,3}") {
        let slug = slugify(&input, false);
        prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        prop_assert!(!slug.starts_with('_') && !slug.ends_with('_'));
    }

    /// Numbered names are distinct and one per image.
    #[test]
    fn prop_numbered_names_unique(count in 0usize..50) {
        let names = numbered_file_names("AP-1", count, "png");
        prop_assert_eq!(names.len(), count);

        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), count);
    }
}
