pub mod entropy;
pub mod rules;

use crate::defaults::SECRET_PLACEHOLDER;
use crate::ignore_map::IgnoreMap;
use entropy::{has_key_shape, looks_like_identifier, shannon_entropy};
use once_cell::sync::Lazy;
use regex::Regex;
use rules::{is_safe_value, secret_rules};

const DEEP_MIN_LEN: usize = 24;
const DEEP_ENTROPY_THRESHOLD: f64 = 4.5;

static CANDIDATE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b[A-Za-z0-9+/=_\-]{{{},}}\b", DEEP_MIN_LEN))
        .expect("candidate token pattern must compile")
});

/// Text after secret protection plus how many substitutions were made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redacted {
    pub content: String,
    pub count: usize,
}

/// Applies, in order: the ignore map's literal redaction table, the built-in
/// secret rules, and (with deep inspection) the high-entropy token heuristic.
#[derive(Debug, Clone, Copy)]
pub struct Redactor<'a> {
    ignore_map: &'a IgnoreMap,
    deep_inspection: bool,
}

impl<'a> Redactor<'a> {
    pub fn new(ignore_map: &'a IgnoreMap, deep_inspection: bool) -> Self {
        Self {
            ignore_map,
            deep_inspection,
        }
    }

    pub fn redact(&self, text: &str) -> Redacted {
        let (mut content, mut count) = self.ignore_map.obscure_counted(text);

        for rule in secret_rules() {
            let mut hits = 0usize;
            let replaced = rule
                .pattern
                .replace_all(&content, |caps: &regex::Captures<'_>| {
                    hits += 1;
                    let mut expanded = String::new();
                    caps.expand(rule.replacement, &mut expanded);
                    expanded
                });
            if hits > 0 {
                log::trace!("Secret rule '{}' matched {} times", rule.name, hits);
                content = replaced.into_owned();
                count += hits;
            }
        }

        if self.deep_inspection {
            let (deep, hits) = redact_high_entropy(&content);
            if hits > 0 {
                log::trace!("Deep inspection redacted {} tokens", hits);
                content = deep;
                count += hits;
            }
        }

        Redacted { content, count }
    }
}

fn redact_high_entropy(text: &str) -> (String, usize) {
    let mut count = 0usize;
    let out = CANDIDATE_TOKEN.replace_all(text, |caps: &regex::Captures<'_>| {
        let token = &caps[0];
        if looks_like_secret(token) {
            count += 1;
            SECRET_PLACEHOLDER.to_string()
        } else {
            token.to_string()
        }
    });
    (out.into_owned(), count)
}

fn looks_like_secret(token: &str) -> bool {
    has_key_shape(token)
        && !is_safe_value(token)
        && !looks_like_identifier(token)
        && shannon_entropy(token) >= DEEP_ENTROPY_THRESHOLD
}
