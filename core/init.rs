use crate::defaults::{CONANY_FILENAME, CONFIGURE_FILENAME, CONIGNORE_FILENAME, CONSELECT_FILENAME};
use crate::error::{AppError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    Conignore,
    Conselect,
    Configure,
    ConAny,
}

impl ConfigKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ConfigKind::Conignore => CONIGNORE_FILENAME,
            ConfigKind::Conselect => CONSELECT_FILENAME,
            ConfigKind::Configure => CONFIGURE_FILENAME,
            ConfigKind::ConAny => CONANY_FILENAME,
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            ConfigKind::Conignore => CONIGNORE_TEMPLATE,
            ConfigKind::Conselect => CONSELECT_TEMPLATE,
            ConfigKind::Configure => CONFIGURE_TEMPLATE,
            ConfigKind::ConAny => CONANY_TEMPLATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    Overwritten(PathBuf),
    AlreadyExists(PathBuf),
}

/// Writes the template for `kind` into `dir`. An existing file is left alone
/// unless `force` is set.
pub fn initialize(dir: &Path, kind: ConfigKind, force: bool) -> Result<InitOutcome> {
    if !dir.is_dir() {
        return Err(AppError::path(dir, "is not a directory"));
    }
    let path = dir.join(kind.file_name());
    let existed = path.exists();
    if existed && !force {
        log::debug!("{} already exists, not overwriting", path.display());
        return Ok(InitOutcome::AlreadyExists(path));
    }
    fs::write(&path, kind.template()).map_err(|e| AppError::FileWrite {
        path: path.clone(),
        source: e,
    })?;
    log::info!("Wrote template {}", path.display());
    Ok(if existed {
        InitOutcome::Overwritten(path)
    } else {
        InitOutcome::Created(path)
    })
}

const CONIGNORE_TEMPLATE: &str = r#"# .conignore
# File-name patterns go under [files]; `*` is the only wildcard.
# A pattern ending in `/` names a directory.

[files]
*.lock
*.log

[directories]
target
node_modules
.git

# token=replacement; an empty replacement means [REDACTED].
[obscure]
"#;

const CONSELECT_TEMPLATE: &str = r#"# .conselect
# One path per line, relative to this directory, in output order.
# `*` stays within a directory, `**` recurses, `!` drops earlier matches.

# README.md
# src/*.rs
# src/**/mod.rs
# !src/generated.rs
"#;

const CONFIGURE_TEMPLATE: &str = r#"# .configure
# Each [[filter]] picks text from one file: either a marker pair
# (lines strictly between them) or an inclusive 1-indexed line range.
# Without either, the whole file is used.

# [[filter]]
# file = "src/lib.rs"
# start = "// BEGIN api"
# end = "// END api"
# label = "Public API"

# [[filter]]
# file = "src/main.rs"
# lines = [1, 40]
"#;

const CONANY_TEMPLATE: &str = r#"# .conany
# Each [[render]] block is an independent job. Paths are relative to the
# directory holding this file unless absolute.

# [[render]]
# output = "any.txt"
# base = "."
# context = "What this bundle is for"
# include = ["src/**/*.rs", "README.md"]
# exclude = ["*_test.rs", "src/generated/"]
"#;
