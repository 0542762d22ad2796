// .conselect grammar: one path expression per line, resolved against the
// root in file order. `*` matches within a path component, `**` spans
// components. A leading `!` drops earlier selections matching the expression.

use crate::config::{read_config_file, significant};
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectEntry {
    pub expr: String,
    pub exclude: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConselectConfig {
    pub entries: Vec<SelectEntry>,
}

impl ConselectConfig {
    pub fn new<I, S>(exprs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = exprs
            .into_iter()
            .filter_map(|e| parse_line(e.as_ref()))
            .collect();
        Self { entries }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = read_config_file(path)?;
        let config = Self::parse_str(&content);
        log::debug!(
            "Parsed {} selection entries from {}",
            config.entries.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn parse_str(content: &str) -> Self {
        Self::new(content.lines())
    }
}

fn parse_line(raw: &str) -> Option<SelectEntry> {
    let line = significant(raw)?;
    match line.strip_prefix('!') {
        Some(rest) if !rest.trim().is_empty() => Some(SelectEntry {
            expr: rest.trim().to_string(),
            exclude: true,
        }),
        Some(_) => None,
        None => Some(SelectEntry {
            expr: line.to_string(),
            exclude: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declaration_order_and_exclusions() {
        let cfg = ConselectConfig::parse_str("# files\nsrc/main.rs\n\nsrc/**/*.rs\n!src/gen.rs\n!\n");
        let exprs: Vec<(&str, bool)> = cfg
            .entries
            .iter()
            .map(|e| (e.expr.as_str(), e.exclude))
            .collect();
        assert_eq!(
            exprs,
            vec![
                ("src/main.rs", false),
                ("src/**/*.rs", false),
                ("src/gen.rs", true)
            ]
        );
    }
}
