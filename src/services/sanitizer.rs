use ammonia::Builder;
use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};
use unicode_normalization::UnicodeNormalization;

use crate::models::field::SanitizeField;
use crate::models::validation::{BatchSanitizationResult, SanitizationResult};
use crate::utils::validation::ContentViolation;

pub struct SanitizationRule {
    pub min_length: usize,
    pub max_length: usize,
    pub allowed_chars: Option<Regex>,
    pub trim: bool,
    pub normalize: bool,
    pub lowercase: bool,
    pub allow_html: bool,
    pub label: &'static str,
}

impl SanitizationRule {
    fn plain(max_length: usize, label: &'static str) -> Self {
        Self {
            min_length: 0,
            max_length,
            allowed_chars: None,
            trim: true,
            normalize: true,
            lowercase: false,
            allow_html: false,
            label,
        }
    }

    fn with_pattern(mut self, pattern: &str) -> Self {
        self.allowed_chars = Some(Regex::new(pattern).unwrap());
        self
    }
}

static RULES: Lazy<HashMap<SanitizeField, SanitizationRule>> = Lazy::new(|| {
    HashMap::from([
        (
            SanitizeField::Username,
            SanitizationRule {
                min_length: 3,
                ..SanitizationRule::plain(20, "Username")
            }
            .with_pattern(r"^[a-zA-Z0-9 _\-.,~*]+$"),
        ),
        (
            SanitizeField::Email,
            SanitizationRule {
                min_length: 5,
                lowercase: true,
                ..SanitizationRule::plain(254, "Email")
            }
            .with_pattern(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}$"),
        ),
        (SanitizeField::Bio, SanitizationRule::plain(150, "Bio")),
        (
            SanitizeField::Location,
            SanitizationRule::plain(50, "Location").with_pattern(r"^[\p{L}\p{M}\s,.'\-]*$"),
        ),
        (
            SanitizeField::Gender,
            SanitizationRule::plain(20, "Gender").with_pattern(r"^[\p{L}\s\-]*$"),
        ),
        (
            SanitizeField::SwitchFriendCode,
            SanitizationRule::plain(17, "Switch friend code")
                .with_pattern(r"^(?:SW-\d{4}-\d{4}-\d{4})?$"),
        ),
        (
            SanitizeField::ProfileTrainer,
            SanitizationRule::plain(50, "Profile trainer").with_pattern(r"^[a-zA-Z0-9_\-.]*$"),
        ),
        (SanitizeField::Notes, SanitizationRule::plain(200, "Notes")),
        (SanitizeField::General, SanitizationRule::plain(1000, "Input")),
    ])
});

static INJECTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)<script[^>]*>[\s\S]*?</script\s*>",
        r"(?i)<script",
        r"(?i)javascript\s*:",
        r#"(?i)\bon[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]*)"#,
        r"(?i)<\s*/?\s*(?:iframe|object|embed|link|meta|style|form|input|button|select|textarea)\b[^>]*>?",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static HTML_STRIPPER: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::default();
    builder
        .tags(HashSet::new())
        .generic_attributes(HashSet::new())
        .link_rel(None);
    builder
});

// Every variant has an entry.
pub fn rule_for(field: SanitizeField) -> &'static SanitizationRule {
    &RULES[&field]
}

/// Text content of `input` with all markup removed and entities decoded.
pub fn strip_html(input: &str) -> String {
    let cleaned = HTML_STRIPPER.clean(input).to_string();
    decode_html_entities(&cleaned).into_owned()
}

pub fn sanitize_input(input: &str, field: SanitizeField) -> SanitizationResult {
    let rule = rule_for(field);
    let field_name = rule.label.to_string();

    let mut sanitized = if rule.trim {
        input.trim().to_string()
    } else {
        input.to_string()
    };

    if rule.normalize {
        sanitized = sanitized.nfc().collect();
    }

    if rule.lowercase {
        sanitized = sanitized.to_lowercase();
    }

    if !rule.allow_html {
        sanitized = strip_html(&sanitized);
    }

    let length = sanitized.chars().count();
    if length > rule.max_length {
        tracing::debug!(
            "Truncating {} input from {} to {} characters",
            field.as_str(),
            length,
            rule.max_length
        );
        sanitized = sanitized.chars().take(rule.max_length).collect();
        return SanitizationResult::invalid(
            sanitized,
            ContentViolation::TooLong {
                field: field_name,
                max: rule.max_length,
            },
        );
    }

    if length < rule.min_length {
        return SanitizationResult::invalid(
            sanitized,
            ContentViolation::TooShort {
                field: field_name,
                min: rule.min_length,
            },
        );
    }

    if let Some(allowed) = &rule.allowed_chars
        && !allowed.is_match(&sanitized)
    {
        return SanitizationResult::invalid(
            sanitized,
            ContentViolation::InvalidCharacters {
                field: field_name,
                description: None,
            },
        );
    }

    // Raw input catches markup the HTML pass removed; the sanitized value catches decoded entities.
    if let Some(pattern) = INJECTION_PATTERNS
        .iter()
        .find(|p| p.is_match(input) || p.is_match(&sanitized))
    {
        tracing::warn!(
            "Stripped injection pattern from {} input: {}",
            field.as_str(),
            pattern.as_str()
        );
        sanitized = pattern.replace_all(&sanitized, "").into_owned();
        return SanitizationResult::invalid(
            sanitized,
            ContentViolation::DangerousContent { field: field_name },
        );
    }

    SanitizationResult::valid(sanitized)
}

/// Sanitizes every entry, taking the field type from the entry's name.
pub fn sanitize_batch<K, V>(inputs: impl IntoIterator<Item = (K, V)>) -> BatchSanitizationResult
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut sanitized = BTreeMap::new();
    let mut errors = BTreeMap::new();

    for (name, value) in inputs {
        let name = name.as_ref();
        let result = sanitize_input(value.as_ref(), SanitizeField::parse(name));
        if let Some(error) = result.error {
            errors.insert(name.to_string(), error);
        }
        sanitized.insert(name.to_string(), result.sanitized);
    }

    BatchSanitizationResult {
        is_valid: errors.is_empty(),
        sanitized,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_is_stripped_and_flagged() {
        let result = sanitize_input("<script>alert(1)</script>hello", SanitizeField::General);
        assert!(!result.is_valid);
        assert!(!result.sanitized.contains("<script"));
        assert_eq!(result.sanitized, "hello");
        assert_eq!(
            result.error.as_deref(),
            Some("Input contains potentially dangerous content")
        );
    }

    #[test]
    fn test_markup_removed_text_kept() {
        let result = sanitize_input("  <b>Gym</b> <i>leader</i>  ", SanitizeField::Bio);
        assert!(result.is_valid);
        assert_eq!(result.sanitized, "Gym leader");
    }

    #[test]
    fn test_plain_text_symbols_not_escaped() {
        let result = sanitize_input("Pikachu & Eevee <3", SanitizeField::Bio);
        assert!(result.is_valid);
        assert_eq!(result.sanitized, "Pikachu & Eevee <3");
        assert_eq!(strip_html("Fire > Grass"), "Fire > Grass");
    }

    #[test]
    fn test_length_counts_decoded_text() {
        let bio = format!("{}&", "a".repeat(149));
        let result = sanitize_input(&bio, SanitizeField::Bio);
        assert!(result.is_valid, "{:?}", result.error);
        assert_eq!(result.sanitized, bio);
    }

    #[test]
    fn test_escaped_script_flagged_after_decoding() {
        let result = sanitize_input("&lt;script&gt;alert(1)&lt;/script&gt;", SanitizeField::Bio);
        assert!(!result.is_valid);
        assert!(!result.sanitized.contains("<script"));
    }

    #[test]
    fn test_username_rejects_tabs_and_newlines() {
        assert!(sanitize_input("Ash Ketchum", SanitizeField::Username).is_valid);
        assert!(!sanitize_input("Ash\tKetchum", SanitizeField::Username).is_valid);
        assert!(!sanitize_input("Ash\nKetchum", SanitizeField::Username).is_valid);
    }

    #[test]
    fn test_event_handler_attribute_flagged() {
        let result = sanitize_input(r#"<img src=x onerror="alert(1)">hi"#, SanitizeField::Bio);
        assert!(!result.is_valid);
        assert!(!result.sanitized.contains("onerror"));
    }

    #[test]
    fn test_javascript_url_flagged() {
        let result = sanitize_input("javascript:alert(1)", SanitizeField::Notes);
        assert!(!result.is_valid);
        assert!(!result.sanitized.to_lowercase().contains("javascript:"));
    }

    #[test]
    fn test_dangerous_tags_flagged() {
        for input in [
            "<iframe src=evil></iframe>",
            "<form action=x>",
            "<meta http-equiv=refresh>",
        ] {
            assert!(!sanitize_input(input, SanitizeField::Bio).is_valid, "{}", input);
        }
    }

    #[test]
    fn test_too_long_is_truncated() {
        let result = sanitize_input(&"a".repeat(25), SanitizeField::Username);
        assert!(!result.is_valid);
        assert_eq!(result.sanitized, "a".repeat(20));
        assert_eq!(
            result.error.as_deref(),
            Some("Username must be no more than 20 characters long")
        );
    }

    #[test]
    fn test_too_short() {
        let result = sanitize_input("  ab ", SanitizeField::Username);
        assert!(!result.is_valid);
        assert_eq!(result.sanitized, "ab");
        assert_eq!(
            result.error.as_deref(),
            Some("Username must be at least 3 characters long")
        );
    }

    #[test]
    fn test_email_lowercased_and_checked() {
        let result = sanitize_input(" Ash.Ketchum@Pallet.Town ", SanitizeField::Email);
        assert!(result.is_valid);
        assert_eq!(result.sanitized, "ash.ketchum@pallet.town");

        let result = sanitize_input("not-an-email", SanitizeField::Email);
        assert_eq!(
            result.error.as_deref(),
            Some("Email contains invalid characters")
        );
    }

    #[test]
    fn test_friend_code_format() {
        assert!(sanitize_input("SW-1234-5678-9012", SanitizeField::SwitchFriendCode).is_valid);
        assert!(sanitize_input("", SanitizeField::SwitchFriendCode).is_valid);
        assert!(!sanitize_input("SW-12-34", SanitizeField::SwitchFriendCode).is_valid);
    }

    #[test]
    fn test_location_allows_accents() {
        assert!(sanitize_input("Pallet Town, Kanto", SanitizeField::Location).is_valid);
        assert!(sanitize_input("Île-de-France", SanitizeField::Location).is_valid);
        assert!(!sanitize_input("Route 1", SanitizeField::Location).is_valid);
    }

    #[test]
    fn test_nfc_normalization() {
        let decomposed = "Pok\u{0065}\u{0301}mon fan";
        let result = sanitize_input(decomposed, SanitizeField::Bio);
        assert_eq!(result.sanitized, "Pok\u{00e9}mon fan");
    }

    #[test]
    fn test_batch_aggregates_errors() {
        let result = sanitize_batch([
            ("username", "Misty"),
            ("bio", "<b>Water</b> types only"),
            ("switchFriendCode", "nope"),
        ]);
        assert!(!result.is_valid);
        assert_eq!(result.sanitized["username"], "Misty");
        assert_eq!(result.sanitized["bio"], "Water types only");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors["switchFriendCode"],
            "Switch friend code contains invalid characters"
        );
    }

    #[test]
    fn test_batch_all_valid() {
        let result = sanitize_batch([("notes", "Caught at Route 22"), ("gender", "Non-binary")]);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_rule_bounds() {
        for field in [
            SanitizeField::Username,
            SanitizeField::Email,
            SanitizeField::Bio,
            SanitizeField::Location,
            SanitizeField::Gender,
            SanitizeField::SwitchFriendCode,
            SanitizeField::ProfileTrainer,
            SanitizeField::Notes,
            SanitizeField::General,
        ] {
            let rule = rule_for(field);
            assert!(rule.min_length <= rule.max_length);
        }
    }
}
