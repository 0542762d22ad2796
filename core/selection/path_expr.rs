// Path expressions as used by .conselect lines and .conany includes.
// Leading components without `*` form a literal base; the rest are matched
// component-wise. Without `**` the match depth is fixed by the number of
// pattern components.

use super::ResolveContext;
use crate::config::expand_path;
use crate::diagnostics::SkipReason;
use crate::error::Result;
use crate::pattern::{has_wildcard, matches_segments};
use crate::reference::FileReference;
use crate::scanner::Scanner;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathExpr {
    raw: String,
    /// Directory the expression was written relative to.
    origin: PathBuf,
    base: PathBuf,
    segments: Vec<String>,
}

#[derive(Debug)]
pub(crate) enum Expansion {
    Files(Vec<FileReference>),
    Skipped(SkipReason),
}

impl PathExpr {
    pub(crate) fn parse(base_dir: &Path, raw: &str) -> Self {
        let raw = raw.trim();
        let expanded = expand_path(raw);
        let mut base = if expanded.is_absolute() {
            PathBuf::new()
        } else {
            base_dir.to_path_buf()
        };
        let mut segments: Vec<String> = Vec::new();

        for component in expanded.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(part) if segments.is_empty() => {
                    let part_str = part.to_string_lossy();
                    if has_wildcard(&part_str) {
                        segments.push(part_str.into_owned());
                    } else {
                        base.push(part);
                    }
                }
                Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
                other if segments.is_empty() => base.push(other.as_os_str()),
                other => segments.push(other.as_os_str().to_string_lossy().into_owned()),
            }
        }

        Self {
            raw: raw.to_string(),
            origin: base_dir.to_path_buf(),
            base,
            segments,
        }
    }

    pub(crate) fn raw(&self) -> &str {
        &self.raw
    }

    pub(crate) fn is_literal(&self) -> bool {
        self.segments.is_empty()
    }

    fn is_recursive(&self) -> bool {
        self.segments.iter().any(|s| s == "**")
    }

    fn scan_depth(&self, context_depth: Option<usize>) -> Option<usize> {
        if self.is_recursive() {
            context_depth
        } else {
            Some(self.segments.len().saturating_sub(1))
        }
    }

    /// Resolves the expression to files. Misses come back as a skip reason,
    /// never as an error.
    pub(crate) fn expand(&self, ctx: &ResolveContext<'_>, display_root: &Path) -> Result<Expansion> {
        if !self.base.exists() {
            return Ok(Expansion::Skipped(SkipReason::NotFound));
        }
        let base = match self.base.canonicalize() {
            Ok(p) => p,
            Err(e) => return Ok(Expansion::Skipped(SkipReason::Unreadable(e.to_string()))),
        };
        if self.under_excluded_dir(&base, ctx) {
            log::trace!("'{}' lies under an excluded directory", self.raw);
            return Ok(Expansion::Skipped(SkipReason::Ignored));
        }

        if self.is_literal() {
            return self.expand_literal(base, ctx, display_root);
        }
        if !base.is_dir() {
            return Ok(Expansion::Skipped(SkipReason::NotFound));
        }

        let candidates = self
            .scanner(base.clone(), ctx, display_root)
            .max_depth(self.scan_depth(ctx.max_depth))
            .scan()?;
        let files: Vec<FileReference> = candidates
            .into_iter()
            .filter(|f| {
                f.path()
                    .strip_prefix(&base)
                    .map(|rel| matches_segments(rel, &self.segments))
                    .unwrap_or(false)
            })
            .collect();
        Ok(non_empty(files))
    }

    fn expand_literal(
        &self,
        path: PathBuf,
        ctx: &ResolveContext<'_>,
        display_root: &Path,
    ) -> Result<Expansion> {
        if path.is_dir() {
            let files = self
                .scanner(path, ctx, display_root)
                .max_depth(ctx.max_depth)
                .scan()?;
            return Ok(non_empty(files));
        }
        if !path.is_file() {
            return Ok(Expansion::Skipped(SkipReason::NotAFile));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if ctx.excludes_name(&name) {
            return Ok(Expansion::Skipped(SkipReason::Ignored));
        }
        Ok(Expansion::Files(vec![FileReference::new(
            path,
            display_root.to_path_buf(),
        )]))
    }

    /// The scanner never prunes its own starting directory, so the literal
    /// part of the expression is checked here.
    fn under_excluded_dir(&self, base: &Path, ctx: &ResolveContext<'_>) -> bool {
        let origin = self
            .origin
            .canonicalize()
            .unwrap_or_else(|_| self.origin.clone());
        let dir = if base.is_dir() { Some(base) } else { base.parent() };
        dir.is_some_and(|d| ctx.crosses_excluded_dir(&origin, d))
    }

    fn scanner<'a>(
        &self,
        dir: PathBuf,
        ctx: &ResolveContext<'a>,
        display_root: &Path,
    ) -> Scanner<'a> {
        Scanner::new(dir, ctx.ignore_map)
            .display_root(display_root.to_path_buf())
            .include_dotfiles(ctx.include_dotfiles)
            .ignore_static_defaults(ctx.ignore_static_defaults)
    }

    /// Whether an absolute, canonical file path falls under this expression.
    /// Literal directories cover everything beneath them.
    pub(crate) fn covers(&self, path: &Path) -> bool {
        let base = self
            .base
            .canonicalize()
            .unwrap_or_else(|_| self.base.clone());
        if self.is_literal() {
            return path.starts_with(&base);
        }
        path.strip_prefix(&base)
            .map(|rel| matches_segments(rel, &self.segments))
            .unwrap_or(false)
    }
}

fn non_empty(files: Vec<FileReference>) -> Expansion {
    if files.is_empty() {
        Expansion::Skipped(SkipReason::NoMatch)
    } else {
        Expansion::Files(files)
    }
}
