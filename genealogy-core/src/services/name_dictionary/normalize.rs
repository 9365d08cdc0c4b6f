use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z]").unwrap());

/// Key used to index a sibling pool: trimmed and lower-cased.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Lower-cased English name with everything but `a-z` removed.
pub fn alpha_only(name: &str) -> String {
    NON_ALPHA.replace_all(&name.to_lowercase(), "").into_owned()
}

/// True when every char of `needle` appears in `haystack` in order.
/// A plain substring is the contiguous case.
pub fn contains_in_order(haystack: &str, needle: &str) -> bool {
    if haystack.contains(needle) {
        return true;
    }

    let mut rest = haystack.chars();
    needle.chars().all(|c| rest.any(|h| h == c))
}
