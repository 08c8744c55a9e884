use itertools::Itertools;

// Applied in order; later pairs see the output of earlier ones.
const SUBSTITUTIONS: &[(&[char], char)] = &[
    (&['@', '4'], 'a'),
    (&['!', '1'], 'i'),
    (&['3'], 'e'),
    (&['5', '$'], 's'),
    (&['7'], 't'),
    (&['0'], 'o'),
    (&['8'], 'b'),
    (&['6'], 'g'),
    (&['2'], 'z'),
    (&['9'], 'g'),
];

const MIN_REPEAT_RUN: usize = 3;

/// Canonical lowercase form used for matching: leetspeak undone, punctuation dropped,
/// whitespace and runs of three or more identical characters collapsed.
pub fn normalize(text: &str) -> String {
    let mut current = text.to_lowercase();

    for (from, to) in SUBSTITUTIONS {
        current = current
            .chars()
            .map(|c| if from.contains(&c) { *to } else { c })
            .collect();
    }

    let stripped: String = current
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    let spaced = stripped.split_whitespace().join(" ");

    collapse_repeats(&spaced).trim().to_string()
}

fn collapse_repeats(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (count, c) in text.chars().dedup_with_count() {
        let keep = if count >= MIN_REPEAT_RUN { 1 } else { count };
        out.extend(std::iter::repeat_n(c, keep));
    }
    out
}
