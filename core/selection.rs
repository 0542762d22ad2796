//! The four ways of choosing what gets concatenated, behind one resolution
//! contract. Zero matches is never an error here; callers see an empty set.

pub mod conany;
pub mod configure;
pub mod conselect;
pub(crate) mod path_expr;
pub mod scan;

use crate::config::{ConAnyConfig, ConfigureConfig, ConselectConfig, resolve_against};
use crate::defaults::{
    DEFAULT_CONFIGURE_OUTPUT, DEFAULT_SCAN_OUTPUT, DEFAULT_SELECT_OUTPUT, static_defaults,
};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::ignore_map::IgnoreMap;
use crate::reference::{FileReference, Snippet};
use std::path::{Component, Path, PathBuf};

pub use scan::ScanConfig;

/// Policy shared by every resolver for one invocation.
#[derive(Debug, Clone)]
pub struct ResolveContext<'a> {
    /// Canonical invocation root.
    pub root: PathBuf,
    pub max_depth: Option<usize>,
    pub include_dotfiles: bool,
    pub ignore_map: &'a IgnoreMap,
    pub ignore_static_defaults: bool,
    pub verbose: bool,
}

impl<'a> ResolveContext<'a> {
    pub fn new(root: PathBuf, ignore_map: &'a IgnoreMap) -> Self {
        Self {
            root,
            max_depth: None,
            include_dotfiles: false,
            ignore_map,
            ignore_static_defaults: true,
            verbose: false,
        }
    }

    /// Name-level exclusion applied to explicitly named files.
    pub(crate) fn excludes_name(&self, name: &str) -> bool {
        self.ignore_map.is_ignored(name)
            || (self.ignore_static_defaults && static_defaults().denies_file(name))
    }

    pub(crate) fn excludes_dir(&self, name: &str) -> bool {
        self.ignore_map.is_ignored_dir(name)
            || (self.ignore_static_defaults && static_defaults().denies_dir(name))
    }

    /// True when `dir`, or any directory between `origin` and `dir`, is
    /// excluded. A `dir` outside `origin` is checked along its whole path.
    pub(crate) fn crosses_excluded_dir(&self, origin: &Path, dir: &Path) -> bool {
        let relative = dir.strip_prefix(origin).unwrap_or(dir);
        relative.components().any(|c| match c {
            Component::Normal(part) => self.excludes_dir(&part.to_string_lossy()),
            _ => false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSet {
    Files(Vec<FileReference>),
    Snippets(Vec<Snippet>),
}

impl ResolvedSet {
    pub fn len(&self) -> usize {
        match self {
            ResolvedSet::Files(f) => f.len(),
            ResolvedSet::Snippets(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One render unit: a resolved set and where it goes. Every strategy but
/// ConAny yields exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedJob {
    pub name: String,
    pub output: PathBuf,
    pub context: Option<String>,
    /// Overrides the render options' path display (ConAny headers are absolute).
    pub relative_paths: Option<bool>,
    pub set: ResolvedSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Scan(ScanConfig),
    Conselect(ConselectConfig),
    Configure(ConfigureConfig),
    ConAny(ConAnyConfig),
}

impl Selection {
    pub fn kind(&self) -> &'static str {
        match self {
            Selection::Scan(_) => "scan",
            Selection::Conselect(_) => "select",
            Selection::Configure(_) => "figure",
            Selection::ConAny(_) => "any",
        }
    }

    pub fn default_output(&self) -> Option<&'static str> {
        match self {
            Selection::Scan(_) => Some(DEFAULT_SCAN_OUTPUT),
            Selection::Conselect(_) => Some(DEFAULT_SELECT_OUTPUT),
            Selection::Configure(_) => Some(DEFAULT_CONFIGURE_OUTPUT),
            Selection::ConAny(_) => None,
        }
    }

    /// Resolves into render jobs. `output_name` overrides the default output
    /// file of single-job strategies and is resolved against the root.
    pub fn resolve(
        &self,
        ctx: &ResolveContext<'_>,
        output_name: Option<&str>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<ResolvedJob>> {
        log::debug!("Resolving '{}' selection under {}", self.kind(), ctx.root.display());
        let single = |set: ResolvedSet| -> Vec<ResolvedJob> {
            let name = output_name
                .or(self.default_output())
                .unwrap_or(DEFAULT_SCAN_OUTPUT);
            vec![ResolvedJob {
                name: self.kind().to_string(),
                output: output_path(&ctx.root, name),
                context: None,
                relative_paths: None,
                set,
            }]
        };
        let jobs = match self {
            Selection::Scan(cfg) => single(ResolvedSet::Files(cfg.resolve(ctx)?)),
            Selection::Conselect(cfg) => {
                single(ResolvedSet::Files(conselect::resolve(cfg, ctx, diagnostics)?))
            }
            Selection::Configure(cfg) => {
                single(ResolvedSet::Snippets(configure::resolve(cfg, ctx, diagnostics)?))
            }
            Selection::ConAny(cfg) => conany::resolve(cfg, ctx, diagnostics)?,
        };
        Ok(jobs.into_iter().map(without_own_output).collect())
    }
}

pub(crate) fn output_path(base: &Path, name: &str) -> PathBuf {
    resolve_against(base, name)
}

/// A previous run's output must not be fed back into the next one.
fn without_own_output(mut job: ResolvedJob) -> ResolvedJob {
    if let ResolvedSet::Files(files) = &mut job.set {
        let output = &job.output;
        files.retain(|f| f.path() != output.as_path());
    }
    job
}
