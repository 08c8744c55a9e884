use std::collections::HashSet;

const LEET_MAP: &[(char, &[char])] = &[
    ('a', &['@', '4']),
    ('i', &['!', '1']),
    ('e', &['3']),
    ('s', &['5', '$']),
    ('t', &['7']),
    ('o', &['0']),
];

/// "abc" -> "a b c"
pub fn spaced(word: &str) -> String {
    let chars: Vec<String> = word.chars().map(String::from).collect();
    chars.join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Disguised spellings of a lowercase banned word. Each leet substitution replaces every
/// occurrence of one letter; substitutions are never combined.
pub fn generate_variations(word: &str) -> HashSet<String> {
    let mut variations = HashSet::new();
    variations.insert(word.to_string());
    variations.insert(spaced(word));
    variations.insert(word.to_uppercase());
    variations.insert(capitalize(word));

    for (letter, replacements) in LEET_MAP {
        if !word.contains(*letter) {
            continue;
        }
        for replacement in *replacements {
            variations.insert(word.replace(*letter, &replacement.to_string()));
        }
    }

    variations
}
