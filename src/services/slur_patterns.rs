use once_cell::sync::Lazy;
use regex::Regex;

// Run against raw input so the substitution characters are still visible.
static SLUR_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        (
            "n_word_er",
            r"(?i)n+[\s._-]*[i!1l|]+[\s._-]*(?:[g9@6][\s._-]*){2,}[e3]+[\s._-]*[r]+[s5z$]*",
        ),
        (
            "n_word_a",
            r"(?i)n+[\s._-]*[i!1l|]+[\s._-]*(?:[g9@6][\s._-]*){2,}(?:[a@4]+[h]*|[u]+[h]+)[s5z$]*(?:[^a-z]|$)",
        ),
        (
            "f_slur",
            r"(?i)f+[\s._-]*[a@4]+[\s._-]*(?:[g9@6][\s._-]*){2,}(?:[o0]+[t7]+|[e3]+[t7]+|[i!1l]+[t7]+)[s5z$]*",
        ),
        ("k_slur", r"(?i)\bk+[i!1l|y]+k+[e3]+[s5z$]*\b"),
        ("c_slur", r"(?i)\bch+[i!1l|]+n+k+[s5z$]*\b"),
    ]
    .into_iter()
    .map(|(name, pattern)| {
        let regex = Regex::new(pattern).unwrap_or_else(|e| panic!("bad slur pattern {name}: {e}"));
        (name, regex)
    })
    .collect()
});

/// Name of the first pattern matching `text`, if any.
pub fn find_slur(text: &str) -> Option<&'static str> {
    SLUR_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(text))
        .map(|(name, _)| *name)
}
