use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::models::field::FieldType;
use crate::models::validation::{CharacterCountInfo, ValidationResult};
use crate::services::banned_terms::{BannedTermSet, MIN_TERM_LENGTH};
use crate::services::levenshtein::distance;
use crate::services::normalizer::normalize;
use crate::services::slur_patterns::find_slur;
use crate::services::variations::{generate_variations, spaced};
use crate::utils::validation::{ContentViolation, check_length};

const RECONSTRUCTION_MIN_LENGTH: usize = 4;

pub struct FieldFilterConfig {
    pub min_length: usize,
    pub max_length: usize,
    pub allowed_chars: Option<Regex>,
    pub char_description: Option<&'static str>,
    pub check_bad_words: bool,
    pub similarity_threshold: f64,
    pub field_name: &'static str,
}

static FIELD_CONFIGS: Lazy<HashMap<FieldType, FieldFilterConfig>> = Lazy::new(|| {
    let free_text = |max_length: usize, field_name: &'static str| FieldFilterConfig {
        min_length: 0,
        max_length,
        allowed_chars: None,
        char_description: None,
        check_bad_words: true,
        similarity_threshold: 0.2,
        field_name,
    };

    HashMap::from([
        (
            FieldType::Username,
            FieldFilterConfig {
                min_length: 3,
                max_length: 20,
                allowed_chars: Some(Regex::new(r"^[a-zA-Z0-9 _\-.,~*]+$").unwrap()),
                char_description: Some(
                    "Only letters, numbers, spaces and the characters _ - . , ~ * are allowed.",
                ),
                check_bad_words: true,
                similarity_threshold: 0.15,
                field_name: "Username",
            },
        ),
        (FieldType::Bio, free_text(150, "Bio")),
        (FieldType::Notes, free_text(200, "Notes")),
        (
            FieldType::ProgressBar,
            FieldFilterConfig {
                min_length: 1,
                ..free_text(30, "Progress bar name")
            },
        ),
        (FieldType::General, free_text(1000, "Input")),
    ])
});

// Every variant has an entry; unknown tags already became General in FieldType::parse.
pub fn field_config(field_type: FieldType) -> &'static FieldFilterConfig {
    &FIELD_CONFIGS[&field_type]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Whole-token matching with a distance-1 fuzzy fallback.
    #[default]
    Conservative,
    /// Substring matching of variations plus a length-relative distance threshold.
    Lenient,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &str {
        match self {
            MatchPolicy::Conservative => "conservative",
            MatchPolicy::Lenient => "lenient",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Some(MatchPolicy::Conservative),
            "lenient" => Some(MatchPolicy::Lenient),
            _ => None,
        }
    }
}

/// Which check fired. Only ever logged; users get a generic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    SlurPattern(&'static str),
    Substring(String),
    Word(String),
    SpacedWord(String),
    Variation(String),
    Reconstruction(String),
    Fuzzy(String),
}

struct BannedWord {
    word: String,
    spaced: String,
    variations: Vec<String>,
}

pub struct ContentFilter {
    words: Vec<BannedWord>,
    substrings: Vec<String>,
    policy: MatchPolicy,
}

static DEFAULT_FILTER: Lazy<ContentFilter> =
    Lazy::new(|| ContentFilter::new(&BannedTermSet::builtin(), MatchPolicy::default()));

impl ContentFilter {
    pub fn new(terms: &BannedTermSet, policy: MatchPolicy) -> Self {
        let words = terms
            .words()
            .map(|word| BannedWord {
                word: word.to_string(),
                spaced: spaced(word),
                variations: generate_variations(word).into_iter().collect(),
            })
            .collect();

        let substrings = terms
            .substrings()
            .map(normalize)
            .filter(|s| s.chars().count() >= MIN_TERM_LENGTH)
            .collect();

        Self {
            words,
            substrings,
            policy,
        }
    }

    pub fn builtin() -> &'static ContentFilter {
        &DEFAULT_FILTER
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn contains_banned_content(&self, text: &str, similarity_threshold: f64) -> bool {
        self.find_banned_content(text, similarity_threshold).is_some()
    }

    pub fn find_banned_content(&self, text: &str, similarity_threshold: f64) -> Option<MatchRule> {
        if let Some(name) = find_slur(text) {
            return Some(MatchRule::SlurPattern(name));
        }

        let normalized = normalize(text);
        if normalized.is_empty() {
            return None;
        }

        if let Some(hit) = self.substrings.iter().find(|s| normalized.contains(s.as_str())) {
            return Some(MatchRule::Substring(hit.clone()));
        }

        match self.policy {
            MatchPolicy::Conservative => self.match_conservative(&normalized),
            MatchPolicy::Lenient => self.match_lenient(&normalized, similarity_threshold),
        }
    }

    fn match_conservative(&self, normalized: &str) -> Option<MatchRule> {
        for banned in &self.words {
            let word = banned.word.as_str();

            if contains_phrase(normalized, word) {
                return Some(MatchRule::Word(banned.word.clone()));
            }

            if contains_phrase(normalized, &banned.spaced) {
                return Some(MatchRule::SpacedWord(banned.word.clone()));
            }

            if banned
                .variations
                .iter()
                .any(|v| contains_phrase(normalized, v))
            {
                return Some(MatchRule::Variation(banned.word.clone()));
            }

            if word.chars().count() >= RECONSTRUCTION_MIN_LENGTH
                && is_spaced_reconstruction(normalized, word)
            {
                return Some(MatchRule::Reconstruction(banned.word.clone()));
            }

            if is_near_miss(normalized, word) {
                return Some(MatchRule::Fuzzy(banned.word.clone()));
            }
        }

        None
    }

    fn match_lenient(&self, normalized: &str, similarity_threshold: f64) -> Option<MatchRule> {
        for banned in &self.words {
            if banned
                .variations
                .iter()
                .any(|v| normalized.contains(v.as_str()))
            {
                return Some(MatchRule::Variation(banned.word.clone()));
            }

            let max_distance =
                (banned.word.chars().count() as f64 * similarity_threshold).floor() as usize;
            if max_distance >= 1
                && normalized
                    .split(' ')
                    .any(|token| distance(token, &banned.word) <= max_distance)
            {
                return Some(MatchRule::Fuzzy(banned.word.clone()));
            }
        }

        None
    }

    pub fn validate<'a>(
        &self,
        text: impl Into<Option<&'a str>>,
        field_type: FieldType,
    ) -> ValidationResult {
        self.check(text.into().unwrap_or_default(), field_type).into()
    }

    pub fn check(&self, text: &str, field_type: FieldType) -> Result<(), ContentViolation> {
        let config = field_config(field_type);

        check_length(config.field_name, text, config.min_length, config.max_length)?;

        if let Some(allowed) = &config.allowed_chars
            && !allowed.is_match(text)
        {
            return Err(ContentViolation::InvalidCharacters {
                field: config.field_name.to_string(),
                description: config.char_description.map(str::to_string),
            });
        }

        if config.check_bad_words
            && let Some(rule) = self.find_banned_content(text, config.similarity_threshold)
        {
            tracing::debug!(
                "Rejected {} input ({:?} policy): {:?}",
                field_type.as_str(),
                self.policy,
                rule
            );
            return Err(ContentViolation::BannedContent {
                field: config.field_name.to_string(),
            });
        }

        Ok(())
    }
}

/// Phrase appears bounded by spaces or the ends of the text.
fn contains_phrase(text: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    format!(" {} ", text).contains(&format!(" {} ", phrase))
}

fn is_near_miss(normalized: &str, word: &str) -> bool {
    let length_gap = normalized.chars().count().abs_diff(word.chars().count());
    length_gap <= 1
        && !normalized.contains(word)
        && !word.contains(normalized)
        && distance(normalized, word) <= 1
}

/// Catches "ni g er", "fu ck" and similar splits of `word` across tokens.
fn is_spaced_reconstruction(normalized: &str, word: &str) -> bool {
    let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();

    if tokens.concat() == word {
        return true;
    }

    if tokens.windows(2).any(|pair| pair.concat() == word)
        || tokens.windows(3).any(|triple| triple.concat() == word)
    {
        return true;
    }

    if tokens.len() < 3 {
        return false;
    }

    let first = tokens[0];
    let last = tokens[tokens.len() - 1];
    if !word.starts_with(first)
        || !word.ends_with(last)
        || first.len() + last.len() >= word.len()
    {
        return false;
    }

    let expected_middle = &word[first.len()..word.len() - last.len()];
    let middle = tokens[1..tokens.len() - 1].concat();

    middle == expected_middle
        || expected_middle.contains(middle.as_str())
        || middle.contains(expected_middle)
}

pub fn contains_banned_content(text: &str, similarity_threshold: f64) -> bool {
    ContentFilter::builtin().contains_banned_content(text, similarity_threshold)
}

pub fn validate_content<'a>(
    text: impl Into<Option<&'a str>>,
    field_type: FieldType,
) -> ValidationResult {
    ContentFilter::builtin().validate(text, field_type)
}

pub fn character_count(text: &str, field_type: FieldType) -> CharacterCountInfo {
    let max = field_config(field_type).max_length;
    let current = text.chars().count();

    CharacterCountInfo {
        current,
        remaining: max.saturating_sub(current),
        max,
        is_over_limit: current > max,
        percentage: (current as f64 / max as f64 * 100.0).round(),
    }
}
