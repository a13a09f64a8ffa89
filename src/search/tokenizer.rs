use super::query::Fuzziness;
use regex::Regex;
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("token pattern is valid"));

/// Splits text into lowercase alphanumeric terms, in order, duplicates kept.
///
/// Mirrors a standard analyzer closely enough for the in-memory backend:
/// punctuation separates terms and case is ignored.
pub fn analyze(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// True if any analyzed term of `query` is also a term of `text`.
pub fn matches_any_term(text: &str, query: &str) -> bool {
    let terms = analyze(text);
    analyze(query).iter().any(|q| terms.contains(q))
}

/// Case-insensitive raw substring test, no analysis.
pub fn contains_ignore_case(text: &str, needle: &str) -> bool {
    text.to_lowercase().contains(&needle.to_lowercase())
}

/// True if any analyzed term of `query` is within its allowed edit distance of
/// a term of `text`. Adjacent transpositions count as a single edit.
pub fn fuzzy_matches_any_term(text: &str, query: &str, fuzziness: Fuzziness) -> bool {
    let terms = analyze(text);
    analyze(query).iter().any(|q| {
        let max_edits = fuzziness.max_edits(q);
        terms
            .iter()
            .any(|term| strsim::osa_distance(q, term) <= max_edits)
    })
}
