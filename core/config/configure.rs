use crate::config::{parse_toml, read_config_file};
use crate::error::{AppError, Result};
use serde::Deserialize;
use std::path::Path;

/// How a filter picks text out of its target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetSelector {
    /// Lines strictly between the first `start` sentinel and the next `end`.
    Markers { start: String, end: String },
    /// Inclusive, 1-indexed.
    Lines { start: usize, end: usize },
    Whole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub file: String,
    pub selector: SnippetSelector,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigureConfig {
    pub filters: Vec<Filter>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfigure {
    #[serde(default, rename = "filter")]
    filters: Vec<RawFilter>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFilter {
    file: String,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    lines: Option<[usize; 2]>,
    #[serde(default)]
    label: Option<String>,
}

impl ConfigureConfig {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = read_config_file(path)?;
        Self::parse_str(&content, path)
    }

    pub fn parse_str(content: &str, origin: &Path) -> Result<Self> {
        let raw: RawConfigure = parse_toml(content, origin)?;
        let filters = raw
            .filters
            .into_iter()
            .enumerate()
            .map(|(idx, f)| f.into_filter(idx + 1, origin))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("Parsed {} filters from {}", filters.len(), origin.display());
        Ok(Self { filters })
    }
}

impl RawFilter {
    fn into_filter(self, position: usize, origin: &Path) -> Result<Filter> {
        let invalid = |msg: &str| {
            AppError::config(
                origin.display().to_string(),
                format!("filter #{} ({}): {}", position, self.file, msg),
            )
        };
        if self.file.trim().is_empty() {
            return Err(invalid("'file' must not be empty"));
        }
        let selector = match (&self.start, &self.end, self.lines) {
            (Some(_), Some(_), Some(_)) => {
                return Err(invalid("use either start/end markers or 'lines', not both"));
            }
            (Some(start), Some(end), None) => SnippetSelector::Markers {
                start: start.clone(),
                end: end.clone(),
            },
            (Some(_), None, _) | (None, Some(_), _) => {
                return Err(invalid("markers need both 'start' and 'end'"));
            }
            (None, None, Some([start, end])) => {
                if start == 0 || end < start {
                    return Err(invalid("'lines' must be [start, end] with 1 <= start <= end"));
                }
                SnippetSelector::Lines { start, end }
            }
            (None, None, None) => SnippetSelector::Whole,
        };
        Ok(Filter {
            file: self.file.trim().to_string(),
            selector,
            label: self.label.filter(|l| !l.trim().is_empty()),
        })
    }
}
