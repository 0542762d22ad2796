use super::ResolveContext;
use crate::config::resolve_against;
use crate::error::Result;
use crate::pattern::PatternSet;
use crate::reference::FileReference;
use crate::scanner::Scanner;
use indexmap::IndexSet;
use std::path::PathBuf;

/// Default strategy: walk one or more directories under name-pattern rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Directories to walk, relative to the root. Empty means the root itself.
    pub directories: Vec<String>,
    pub include_files: PatternSet,
    pub exclude_files: PatternSet,
    pub exclude_dirs: PatternSet,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            include_files: ["*"].into_iter().collect(),
            exclude_files: PatternSet::new(),
            exclude_dirs: PatternSet::new(),
        }
    }
}

impl ScanConfig {
    pub fn scan_roots(&self, root: &std::path::Path) -> Vec<PathBuf> {
        if self.directories.is_empty() {
            vec![root.to_path_buf()]
        } else {
            self.directories
                .iter()
                .map(|d| resolve_against(root, d))
                .collect()
        }
    }

    /// A scanner for `dir` carrying this config's patterns and the context's policy.
    pub fn scanner<'a>(&self, dir: PathBuf, ctx: &ResolveContext<'a>) -> Scanner<'a> {
        Scanner::new(dir, ctx.ignore_map)
            .display_root(ctx.root.clone())
            .max_depth(ctx.max_depth)
            .include_dotfiles(ctx.include_dotfiles)
            .ignore_static_defaults(ctx.ignore_static_defaults)
            .include_files(self.include_files.clone())
            .exclude_files(self.exclude_files.clone())
            .exclude_dirs(self.exclude_dirs.clone())
    }

    /// Files from every scan root in order; a file reached twice keeps its
    /// first position.
    pub fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<Vec<FileReference>> {
        let mut seen: IndexSet<FileReference> = IndexSet::new();
        for dir in self.scan_roots(&ctx.root) {
            for file in self.scanner(dir, ctx).scan()? {
                seen.insert(file);
            }
        }
        log::debug!("Scan resolved {} files", seen.len());
        Ok(seen.into_iter().collect())
    }
}
