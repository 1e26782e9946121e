use once_cell::sync::Lazy;
use regex::Regex;

static CONTRACTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"what's", "what is "),
        (r"'s", " "),
        (r"'ve", " have "),
        (r"can't", "cannot "),
        (r"n't", " not "),
        (r"i'm", "i am "),
        (r"'re", " are "),
        (r"'d", " would "),
        (r"'ll", " will "),
        (r"'scuse", " excuse "),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("valid contraction regex"),
            replacement,
        )
    })
    .collect()
});
// Letters, numbers and `_` only; combining marks are separators.
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_]").expect("valid non-word regex"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Lowercases, expands English contractions, replaces non-word characters
/// with spaces and collapses whitespace. Total on any input.
pub fn normalize(text: &str) -> String {
    let mut cleaned = text.to_lowercase();
    for (pattern, replacement) in CONTRACTIONS.iter() {
        cleaned = pattern.replace_all(&cleaned, *replacement).into_owned();
    }
    let cleaned = NON_WORD.replace_all(&cleaned, " ");
    WHITESPACE.replace_all(&cleaned, " ").trim().to_string()
}

pub fn truncate_tokens(normalized: &str, max_tokens: usize) -> &str {
    match normalized.match_indices(' ').nth(max_tokens.saturating_sub(1)) {
        Some((idx, _)) if max_tokens > 0 => &normalized[..idx],
        Some(_) => "",
        None if max_tokens == 0 => "",
        None => normalized,
    }
}
