use crate::error::{AppError, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod conany;
pub mod conignore;
pub mod configure;
pub mod conselect;

pub use conany::{ConAnyConfig, RenderBlock};
pub use configure::{ConfigureConfig, Filter, SnippetSelector};
pub use conselect::{ConselectConfig, SelectEntry};

pub const ROOT_ENV_VAR: &str = "CON_ROOT";

/// Resolves the invocation root: explicit path, then `CON_ROOT`, then the
/// current directory. `~` is expanded and the result canonicalised.
pub fn determine_root(cli_root: Option<&PathBuf>) -> Result<PathBuf> {
    let path_str_opt = cli_root
        .map(|p| p.to_string_lossy().to_string())
        .or_else(|| env::var(ROOT_ENV_VAR).ok().filter(|s| !s.is_empty()));

    let path_to_resolve = match path_str_opt {
        Some(p_str) => expand_path(&p_str),
        None => env::current_dir().map_err(AppError::Io)?,
    };

    let canonical = path_to_resolve
        .canonicalize()
        .map_err(|e| AppError::path(&path_to_resolve, format!("cannot be resolved: {}", e)))?;
    if !canonical.is_dir() {
        return Err(AppError::path(canonical, "is not a directory"));
    }
    Ok(canonical)
}

pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Joins `raw` onto `base` unless it is already absolute (after `~` expansion).
pub fn resolve_against(base: &Path, raw: &str) -> PathBuf {
    let expanded = expand_path(raw);
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

pub(crate) fn read_config_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(AppError::path(path, "configuration file not found"));
    }
    log::info!("Loading configuration from: {}", path.display());
    fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn parse_toml<T: serde::de::DeserializeOwned>(content: &str, origin: &Path) -> Result<T> {
    toml::from_str::<T>(content).map_err(|e| {
        AppError::TomlParse(format!(
            "Error parsing '{}': {}. Check TOML syntax and structure.",
            origin.display(),
            e
        ))
    })
}

/// Trims a line of the line-oriented grammars. Returns `None` for blank lines
/// and whole-line `#` comments; a `#` later in the line is part of the entry.
pub(crate) fn significant(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}
