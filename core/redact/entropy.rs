use std::collections::HashMap;

/// Shannon entropy of `s` in bits per character.
pub fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for ch in s.chars() {
        *counts.entry(ch).or_insert(0) += 1;
    }

    let len = s.chars().count() as f64;
    counts
        .values()
        .map(|count| {
            let p = *count as f64 / len;
            -(p * p.log2())
        })
        .sum()
}

/// Mixed-case alphanumerics with at least one digit: the usual shape of
/// generated keys, and rare in identifiers or prose.
pub fn has_key_shape(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token.chars().any(|c| c.is_ascii_uppercase())
        && token.chars().any(|c| c.is_ascii_lowercase())
}

/// Below this mean word length a token reads as generated rather than named.
const MIN_MEAN_WORD_LEN: f64 = 3.0;

/// Whether `token` reads like an identifier or path: split on separators,
/// case humps and letter/digit changes, the pieces average at least three
/// characters. Generated keys break into runs of one or two.
pub fn looks_like_identifier(token: &str) -> bool {
    let words: Vec<usize> = token
        .split(|c: char| !c.is_ascii_alphanumeric())
        .flat_map(word_lengths)
        .collect();
    if words.is_empty() {
        return false;
    }
    let total: usize = words.iter().sum();
    total as f64 / words.len() as f64 >= MIN_MEAN_WORD_LEN
}

fn word_lengths(segment: &str) -> Vec<usize> {
    let bytes = segment.as_bytes();
    let mut lengths = Vec::new();
    let mut start = 0;
    for i in 1..bytes.len() {
        let (prev, cur) = (bytes[i - 1], bytes[i]);
        let next_is_lower = bytes.get(i + 1).is_some_and(|b| b.is_ascii_lowercase());
        // `HTTPServer` splits as `HTTP` + `Server`.
        let boundary = prev.is_ascii_digit() != cur.is_ascii_digit()
            || (prev.is_ascii_lowercase() && cur.is_ascii_uppercase())
            || (prev.is_ascii_uppercase() && cur.is_ascii_uppercase() && next_is_lower);
        if boundary {
            lengths.push(i - start);
            start = i;
        }
    }
    if start < bytes.len() {
        lengths.push(bytes.len() - start);
    }
    lengths
}
