//! Slug generation for directory and file names derived from free text.

use deunicode::deunicode_with_tofu;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static RE_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("Invalid regex"));

static RE_SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("Invalid regex"));

/// Turn free text into a single path segment.
///
/// Pipeline:
/// 1. Transliterate to ASCII via deunicode, or NFKC-compose when
///    `allow_unicode` is set
/// 2. Drop everything that is not a word character, whitespace or hyphen
/// 3. Collapse whitespace/hyphen runs into one hyphen
/// 4. Trim leading and trailing hyphens and underscores
///
/// Case is preserved. The result may be empty.
pub fn slugify(value: &str, allow_unicode: bool) -> String {
    let normalized = if allow_unicode {
        value.nfkc().collect::<String>()
    } else {
        deunicode_with_tofu(value, "")
    };

    let stripped = RE_DISALLOWED.replace_all(&normalized, "");
    let collapsed = RE_SEPARATOR_RUN.replace_all(&stripped, "-");

    collapsed
        .trim_matches(|c| c == '-' || c == '_')
        .to_string()
}
