use std::collections::BTreeSet;

const BANNED_WORDS: &str = include_str!("../data/banned_words.txt");
const BANNED_SUBSTRINGS: &str = include_str!("../data/banned_substrings.txt");

pub const MIN_TERM_LENGTH: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct BannedTermSet {
    words: BTreeSet<String>,
    substrings: BTreeSet<String>,
}

impl BannedTermSet {
    pub fn new<W, S>(words: W, substrings: S) -> Self
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            words: collect_terms(words),
            substrings: collect_terms(substrings),
        }
    }

    /// The lists shipped in `src/data`.
    pub fn builtin() -> Self {
        Self::from_lists(BANNED_WORDS, BANNED_SUBSTRINGS)
    }

    /// Parses newline separated lists. Blank lines and `#` comments are skipped.
    pub fn from_lists(words: &str, substrings: &str) -> Self {
        Self::new(list_entries(words), list_entries(substrings))
    }

    /// Words long enough to be matched without drowning in false positives.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words
            .iter()
            .map(String::as_str)
            .filter(|w| w.chars().count() >= MIN_TERM_LENGTH)
    }

    pub fn substrings(&self) -> impl Iterator<Item = &str> {
        self.substrings.iter().map(String::as_str)
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}

fn list_entries(list: &str) -> impl Iterator<Item = &str> {
    list.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

fn collect_terms<I>(terms: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    terms
        .into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists_load() {
        let terms = BannedTermSet::builtin();
        assert!(terms.word_count() > 0);
        assert!(terms.words().any(|w| w == "faggot"));
        assert!(terms.substrings().any(|s| s == "nigger"));
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let set = BannedTermSet::from_lists("# heading\n\nbadword\n  other  \n", "");
        let words: Vec<&str> = set.words().collect();
        assert_eq!(words, vec!["badword", "other"]);
    }

    #[test]
    fn test_short_words_skipped_and_terms_lowercased() {
        let set = BannedTermSet::new(["ab", "ABC", "Loud"], Vec::<String>::new());
        let words: Vec<&str> = set.words().collect();
        assert_eq!(words, vec!["abc", "loud"]);
    }
}
