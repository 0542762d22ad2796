//! Wildcard matching for file and directory names.
//!
//! Only `*` is special. A pattern without `*` matches by exact equality;
//! with `*`, the literal fragments between wildcards must appear in order,
//! anchored to the start/end of the name unless the pattern begins/ends
//! with `*`. Matching is case-sensitive.

use std::collections::BTreeSet;
use std::path::{Component, Path};

/// Returns true if `name` satisfies `pattern`.
pub fn matches(name: &str, pattern: &str) -> bool {
    if !pattern.contains('*') {
        return name == pattern;
    }

    let fragments: Vec<&str> = pattern.split('*').collect();
    // split on at least one '*' always yields >= 2 fragments
    let first = fragments[0];
    let last = fragments[fragments.len() - 1];
    let middle = &fragments[1..fragments.len() - 1];

    if name.len() < first.len() + last.len() {
        return false;
    }
    if !name.starts_with(first) || !name.ends_with(last) {
        return false;
    }

    let mut rest = &name[first.len()..name.len() - last.len()];
    for fragment in middle.iter().filter(|f| !f.is_empty()) {
        match rest.find(fragment) {
            Some(idx) => rest = &rest[idx + fragment.len()..],
            None => return false,
        }
    }
    true
}

/// Returns true if any pattern in `patterns` matches `name`.
pub fn matches_any<'a, I>(name: &str, patterns: I) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    patterns.into_iter().any(|p| matches(name, p))
}

pub fn has_wildcard(expr: &str) -> bool {
    expr.contains('*')
}

/// An unordered, deduplicated set of name patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: BTreeSet<String>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        let trimmed = pattern.trim();
        if !trimmed.is_empty() {
            self.patterns.insert(trimmed.to_string());
        }
    }

    pub fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for p in patterns {
            self.insert(p);
        }
    }

    pub fn union(&self, other: &PatternSet) -> PatternSet {
        PatternSet {
            patterns: self.patterns.union(&other.patterns).cloned().collect(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        matches_any(name, &self.patterns)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.patterns.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for PatternSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = PatternSet::new();
        set.extend(iter);
        set
    }
}

/// Matches a relative path component by component against pattern segments.
/// `**` consumes zero or more components; every other segment is matched
/// against one component with [`matches`].
pub fn matches_segments(relative: &Path, segments: &[String]) -> bool {
    let components: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    match_segments_from(&components, segments)
}

fn match_segments_from(components: &[String], segments: &[String]) -> bool {
    match segments.split_first() {
        None => components.is_empty(),
        Some((seg, rest)) if seg == "**" => {
            (0..=components.len()).any(|skip| match_segments_from(&components[skip..], rest))
        }
        Some((seg, rest)) => match components.split_first() {
            Some((comp, comp_rest)) => matches(comp, seg) && match_segments_from(comp_rest, rest),
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn literal_pattern_requires_equality() {
        assert!(matches("main.rs", "main.rs"));
        assert!(!matches("main.rs", "main"));
        assert!(!matches("xmain.rs", "main.rs"));
        assert!(!matches("Main.rs", "main.rs"));
    }

    #[test]
    fn wildcard_anchors_to_boundaries() {
        assert!(matches("main.rs", "*.rs"));
        assert!(!matches("main.rs.bak", "*.rs"));
        assert!(matches("test_config.toml", "test_*"));
        assert!(!matches("my_test_config", "test_*"));
        assert!(matches("anything", "*"));
        assert!(matches("", "*"));
    }

    #[test]
    fn middle_fragments_must_appear_in_order() {
        assert!(matches("a-b-c.txt", "a*b*c*"));
        assert!(!matches("a-c-b.txt", "a*b*c.txt"));
        assert!(matches("abc", "a**c"));
    }

    #[test]
    fn prefix_and_suffix_do_not_overlap() {
        assert!(!matches("ab", "ab*b"));
        assert!(matches("abb", "ab*b"));
    }

    #[test]
    fn pattern_set_dedupes_and_ignores_blank() {
        let set: PatternSet = ["*.log", "*.log", "  ", "target"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.matches("debug.log"));
        assert!(set.matches("target"));
        assert!(!set.matches("src"));
    }

    #[test]
    fn segments_support_double_star() {
        let segs = |s: &str| s.split('/').map(String::from).collect::<Vec<_>>();
        assert!(matches_segments(&PathBuf::from("a/b/c.rs"), &segs("**/*.rs")));
        assert!(matches_segments(&PathBuf::from("c.rs"), &segs("**/*.rs")));
        assert!(matches_segments(&PathBuf::from("a/c.rs"), &segs("*/c.rs")));
        assert!(!matches_segments(&PathBuf::from("a/b/c.rs"), &segs("*/c.rs")));
        assert!(!matches_segments(&PathBuf::from("a/b/c.txt"), &segs("**/*.rs")));
    }
}
