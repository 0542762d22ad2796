// .conignore grammar:
//
//   # comment
//   *.log              <- file-name pattern ([files] is the default section)
//   build/             <- trailing slash makes it a directory pattern
//   [directories]
//   node_modules
//   [obscure]
//   sk-live-123=[API_KEY]
//   hunter2=           <- empty replacement uses the default placeholder

use crate::config::{read_config_file, significant};
use crate::defaults::DEFAULT_PLACEHOLDER;
use crate::error::{AppError, Result};
use crate::ignore_map::IgnoreMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Files,
    Directories,
    Obscure,
}

pub fn parse_file(path: &Path) -> Result<IgnoreMap> {
    let content = read_config_file(path)?;
    parse_str(&content, &path.display().to_string())
}

pub fn parse_str(content: &str, origin: &str) -> Result<IgnoreMap> {
    let mut section = Section::Files;
    let mut files = Vec::new();
    let mut directories = Vec::new();
    let mut obscure = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let Some(line) = significant(raw) else {
            continue;
        };
        let line_no = idx + 1;

        if line.starts_with('[') && line.ends_with(']') {
            section = match line[1..line.len() - 1].trim().to_ascii_lowercase().as_str() {
                "files" | "file" => Section::Files,
                "directories" | "dirs" | "directory" => Section::Directories,
                "obscure" | "redact" => Section::Obscure,
                other => {
                    return Err(AppError::config(
                        origin,
                        format!("line {}: unknown section '[{}]'", line_no, other),
                    ));
                }
            };
            continue;
        }

        match section {
            Section::Files => match line.strip_suffix('/') {
                Some(dir) if !dir.is_empty() => directories.push(dir.to_string()),
                _ => files.push(line.to_string()),
            },
            Section::Directories => directories.push(line.trim_end_matches('/').to_string()),
            Section::Obscure => {
                let (token, replacement) = line.split_once('=').ok_or_else(|| {
                    AppError::config(
                        origin,
                        format!(
                            "line {}: expected 'token=replacement' in [obscure], got '{}'",
                            line_no, line
                        ),
                    )
                })?;
                let token = token.trim();
                if token.is_empty() {
                    return Err(AppError::config(
                        origin,
                        format!("line {}: empty redaction token", line_no),
                    ));
                }
                let replacement = match replacement.trim() {
                    "" => DEFAULT_PLACEHOLDER,
                    r => r,
                };
                obscure.push((token.to_string(), replacement.to_string()));
            }
        }
    }

    log::debug!(
        "Parsed {}: {} file patterns, {} directory patterns, {} redactions",
        origin,
        files.len(),
        directories.len(),
        obscure.len()
    );
    IgnoreMap::new(files, directories, obscure)
}
