use crate::config::{parse_toml, read_config_file};
use crate::defaults::DEFAULT_ANY_OUTPUT;
use crate::error::{AppError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One independent scan+render job from a `.conany` file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderBlock {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl RenderBlock {
    pub fn output_name(&self) -> &str {
        self.output
            .as_deref()
            .filter(|o| !o.trim().is_empty())
            .unwrap_or(DEFAULT_ANY_OUTPUT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConAnyConfig {
    /// Directory holding the config file; default base for every block.
    pub config_dir: PathBuf,
    pub blocks: Vec<RenderBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConAny {
    #[serde(default, rename = "render")]
    blocks: Vec<RenderBlock>,
}

impl ConAnyConfig {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = read_config_file(path)?;
        let absolute = path
            .canonicalize()
            .map_err(|e| AppError::path(path, format!("cannot be resolved: {}", e)))?;
        let config_dir = absolute
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| AppError::path(&absolute, "has no parent directory"))?;
        Self::parse_str(&content, &absolute, config_dir)
    }

    pub fn parse_str(content: &str, origin: &Path, config_dir: PathBuf) -> Result<Self> {
        let raw: RawConAny = parse_toml(content, origin)?;
        for (idx, block) in raw.blocks.iter().enumerate() {
            if block.include.iter().all(|i| i.trim().is_empty()) {
                return Err(AppError::config(
                    origin.display().to_string(),
                    format!(
                        "render block #{} ({}) has no 'include' entries",
                        idx + 1,
                        block.output_name()
                    ),
                ));
            }
        }
        log::debug!(
            "Parsed {} render blocks from {}",
            raw.blocks.len(),
            origin.display()
        );
        Ok(Self {
            config_dir,
            blocks: raw.blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_blocks_with_defaults() {
        let cfg = ConAnyConfig::parse_str(
            r#"
[[render]]
output = "api.txt"
base = "../svc"
context = "Service API"
include = ["src/*.rs", "README.md"]
exclude = ["*_test.rs"]

[[render]]
include = ["docs/**"]
"#,
            Path::new("/proj/.conany"),
            PathBuf::from("/proj"),
        )
        .unwrap();
        assert_eq!(cfg.blocks.len(), 2);
        assert_eq!(cfg.blocks[0].output_name(), "api.txt");
        assert_eq!(cfg.blocks[0].context.as_deref(), Some("Service API"));
        assert_eq!(cfg.blocks[1].output_name(), "any.txt");
        assert!(cfg.blocks[1].base.is_none());
    }

    #[test]
    fn rejects_block_without_includes() {
        let err = ConAnyConfig::parse_str(
            "[[render]]\noutput = \"x.txt\"\n",
            Path::new(".conany"),
            PathBuf::from("."),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }
}
