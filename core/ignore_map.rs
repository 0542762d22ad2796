use crate::config::conignore;
use crate::defaults::CONIGNORE_FILENAME;
use crate::error::{AppError, Result};
use crate::pattern::PatternSet;
use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

/// Effective ignore and redaction policy for one invocation.
///
/// Built by union: merging never drops or overrides a pattern, and a
/// redaction token mapped to two different replacements is rejected.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMap {
    ignore_files: PatternSet,
    ignore_directories: PatternSet,
    obscure_values: BTreeMap<String, String>,
    compiled: OnceCell<Option<Regex>>,
}

impl PartialEq for IgnoreMap {
    fn eq(&self, other: &Self) -> bool {
        self.ignore_files == other.ignore_files
            && self.ignore_directories == other.ignore_directories
            && self.obscure_values == other.obscure_values
    }
}

impl Eq for IgnoreMap {}

impl IgnoreMap {
    pub fn new<F, D, O>(ignore_files: F, ignore_directories: D, obscure_values: O) -> Result<Self>
    where
        F: IntoIterator,
        F::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
        O: IntoIterator<Item = (String, String)>,
    {
        let mut map = IgnoreMap {
            ignore_files: ignore_files.into_iter().collect(),
            ignore_directories: ignore_directories.into_iter().collect(),
            ..IgnoreMap::default()
        };
        for (token, replacement) in obscure_values {
            map.insert_obscure(token, replacement)?;
        }
        Ok(map)
    }

    fn insert_obscure(&mut self, token: String, replacement: String) -> Result<()> {
        if token.is_empty() {
            log::trace!("Ignoring empty redaction token");
            return Ok(());
        }
        match self.obscure_values.get(&token) {
            Some(existing) if *existing != replacement => Err(AppError::AmbiguousRedaction {
                token,
                existing: existing.clone(),
                incoming: replacement,
            }),
            Some(_) => Ok(()),
            None => {
                self.obscure_values.insert(token, replacement);
                self.compiled = OnceCell::new();
                Ok(())
            }
        }
    }

    /// Union of two maps. Fails only on a conflicting redaction entry.
    pub fn union(&self, other: &IgnoreMap) -> Result<IgnoreMap> {
        let mut merged = IgnoreMap {
            ignore_files: self.ignore_files.union(&other.ignore_files),
            ignore_directories: self.ignore_directories.union(&other.ignore_directories),
            obscure_values: self.obscure_values.clone(),
            compiled: OnceCell::new(),
        };
        for (token, replacement) in &other.obscure_values {
            merged.insert_obscure(token.clone(), replacement.clone())?;
        }
        Ok(merged)
    }

    pub fn merge<'a, I>(sources: I) -> Result<IgnoreMap>
    where
        I: IntoIterator<Item = &'a IgnoreMap>,
    {
        sources
            .into_iter()
            .try_fold(IgnoreMap::default(), |acc, source| acc.union(source))
    }

    /// Builds the effective map for `root`: the project `.conignore` (when
    /// present and parsable) unioned with the CLI-supplied rules. A missing
    /// or malformed `.conignore` degrades to the CLI rules alone.
    pub fn load_for_root(root: &Path, cli_rules: &IgnoreMap) -> Result<IgnoreMap> {
        let conignore_path = root.join(CONIGNORE_FILENAME);
        if !conignore_path.is_file() {
            log::debug!(
                "No {} at {}, using CLI ignore rules only",
                CONIGNORE_FILENAME,
                root.display()
            );
            return Ok(cli_rules.clone());
        }
        match conignore::parse_file(&conignore_path) {
            Ok(project_rules) => {
                log::debug!("Merging ignore rules from {}", conignore_path.display());
                project_rules.union(cli_rules)
            }
            Err(e) => {
                log::warn!(
                    "Could not parse {}: {}. Falling back to CLI ignore rules.",
                    conignore_path.display(),
                    e
                );
                // Redaction from an unreadable project file cannot be trusted.
                IgnoreMap::new(
                    cli_rules.ignore_files.iter().cloned(),
                    cli_rules.ignore_directories.iter().cloned(),
                    Vec::new(),
                )
            }
        }
    }

    pub fn ignore_files(&self) -> &PatternSet {
        &self.ignore_files
    }

    pub fn ignore_directories(&self) -> &PatternSet {
        &self.ignore_directories
    }

    pub fn obscure_values(&self) -> &BTreeMap<String, String> {
        &self.obscure_values
    }

    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.ignore_files.matches(file_name)
    }

    pub fn is_ignored_dir(&self, dir_name: &str) -> bool {
        self.ignore_directories.matches(dir_name)
    }

    pub fn obscure(&self, text: &str) -> String {
        self.obscure_counted(text).0
    }

    /// Single-pass substitution of every registered token, preferring the
    /// longest token where several match at the same position. Returns the
    /// rewritten text and the number of substitutions.
    pub fn obscure_counted(&self, text: &str) -> (String, usize) {
        let Some(regex) = self.compiled_tokens() else {
            return (text.to_string(), 0);
        };
        let mut count = 0usize;
        let replaced = regex.replace_all(text, |caps: &regex::Captures| {
            count += 1;
            self.obscure_values
                .get(&caps[0])
                .cloned()
                .unwrap_or_default()
        });
        (replaced.into_owned(), count)
    }

    fn compiled_tokens(&self) -> Option<&Regex> {
        self.compiled
            .get_or_init(|| {
                if self.obscure_values.is_empty() {
                    return None;
                }
                let mut tokens: Vec<&String> = self.obscure_values.keys().collect();
                tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
                let alternation = tokens
                    .iter()
                    .map(|t| regex::escape(t))
                    .collect::<Vec<_>>()
                    .join("|");
                match Regex::new(&alternation) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        log::error!("Failed to compile redaction table: {}", e);
                        None
                    }
                }
            })
            .as_ref()
    }
}
