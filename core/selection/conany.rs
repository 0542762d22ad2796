use super::path_expr::{Expansion, PathExpr};
use super::{ResolveContext, ResolvedJob, ResolvedSet, output_path};
use crate::config::{ConAnyConfig, RenderBlock, resolve_against};
use crate::diagnostics::{Diagnostics, SkipReason};
use crate::error::{AppError, Result};
use crate::pattern::PatternSet;
use crate::reference::FileReference;
use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexSet;
use std::path::{Component, Path, PathBuf};

/// Block-local exclusions: plain patterns match any component name of the
/// base-relative path, patterns with `/` are globs over the whole path.
struct BlockExcludes {
    names: PatternSet,
    globs: GlobSet,
}

impl BlockExcludes {
    fn build(patterns: &[String]) -> Result<Self> {
        let mut names = PatternSet::new();
        let mut builder = GlobSetBuilder::new();
        for raw in patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
            if raw.contains('/') {
                let mut processed = raw.trim_start_matches("./").to_string();
                if processed.ends_with('/') {
                    processed.push_str("**");
                }
                let glob = Glob::new(&processed).map_err(|e| {
                    AppError::Glob(format!(
                        "Invalid exclude pattern \"{}\" (processed as \"{}\"): {}",
                        raw, processed, e
                    ))
                })?;
                log::trace!("Adding block exclude glob: {}", processed);
                builder.add(glob);
            } else {
                names.insert(raw);
            }
        }
        Ok(Self {
            names,
            globs: builder.build()?,
        })
    }

    fn excludes(&self, relative: &Path) -> bool {
        if self.globs.is_match(relative) {
            return true;
        }
        relative.components().any(|c| match c {
            Component::Normal(name) => self.names.matches(&name.to_string_lossy()),
            _ => false,
        })
    }
}

/// Each block is resolved on its own; nothing resolved for one block is
/// visible to another. Blocks without matches still produce a job (with an
/// empty set) so callers can report them.
pub fn resolve(
    config: &ConAnyConfig,
    ctx: &ResolveContext<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<ResolvedJob>> {
    let mut jobs = Vec::with_capacity(config.blocks.len());
    for block in &config.blocks {
        let files = resolve_block(block, &config.config_dir, ctx, diagnostics)?;
        let output_name = block.output_name();
        if files.is_empty() {
            diagnostics.skip(format!("block '{}'", output_name), SkipReason::EmptyBlock);
        }
        jobs.push(ResolvedJob {
            name: output_name.to_string(),
            output: output_path(&config.config_dir, output_name),
            context: block.context.clone(),
            relative_paths: Some(false),
            set: ResolvedSet::Files(files),
        });
    }
    Ok(jobs)
}

fn resolve_block(
    block: &RenderBlock,
    config_dir: &Path,
    ctx: &ResolveContext<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<FileReference>> {
    let base: PathBuf = match &block.base {
        Some(raw) => resolve_against(config_dir, raw),
        None => config_dir.to_path_buf(),
    };
    let base = match base.canonicalize() {
        Ok(b) if b.is_dir() => b,
        _ => {
            diagnostics.skip(
                format!("{} (base {})", block.output_name(), base.display()),
                SkipReason::NotFound,
            );
            return Ok(Vec::new());
        }
    };
    let excludes = BlockExcludes::build(&block.exclude)?;
    log::debug!(
        "Resolving block '{}' from base {}",
        block.output_name(),
        base.display()
    );

    let mut selected: IndexSet<FileReference> = IndexSet::new();
    for include in block.include.iter().filter(|i| !i.trim().is_empty()) {
        let expr = PathExpr::parse(&base, include);
        match expr.expand(ctx, &base)? {
            Expansion::Files(files) => {
                let mut kept = 0usize;
                for file in files {
                    let relative =
                        pathdiff::diff_paths(file.path(), &base).unwrap_or_else(|| file.path().to_path_buf());
                    if excludes.excludes(&relative) {
                        log::trace!("Block exclude dropped {}", file.path().display());
                        continue;
                    }
                    kept += 1;
                    selected.insert(file);
                }
                diagnostics.note(format!(
                    "{} -> {} matched {} file(s)",
                    block.output_name(),
                    expr.raw(),
                    kept
                ));
            }
            Expansion::Skipped(reason) => {
                diagnostics.skip(format!("{}: {}", block.output_name(), expr.raw()), reason)
            }
        }
    }
    Ok(selected.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ignore_map::IgnoreMap;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, format!("{}\n", rel)).unwrap();
    }

    #[test]
    fn blocks_resolve_independently_against_config_dir() {
        let tmp = TempDir::new().unwrap();
        let top = tmp.path().canonicalize().unwrap();
        let cfg_dir = top.join("docs");
        write(&top, "svc/src/api.rs");
        write(&top, "svc/src/api_test.rs");
        write(&top, "svc/target/gen.rs");
        write(&top, "docs/guide.md");

        let cfg = ConAnyConfig::parse_str(
            r#"
[[render]]
output = "api.txt"
base = "../svc"
context = "Service API"
include = ["src/*.rs", "target/**"]
exclude = ["*_test.rs", "target/"]

[[render]]
include = ["*.md", "missing.md"]

[[render]]
output = "none.txt"
include = ["*.go"]
"#,
            &cfg_dir.join(".conany"),
            cfg_dir.clone(),
        )
        .unwrap();

        let map = IgnoreMap::default();
        let ctx = ResolveContext::new(top.clone(), &map);
        let mut diags = Diagnostics::new(false);
        let jobs = resolve(&cfg, &ctx, &mut diags).unwrap();
        assert_eq!(jobs.len(), 3);

        assert_eq!(jobs[0].output, cfg_dir.join("api.txt"));
        assert_eq!(jobs[0].context.as_deref(), Some("Service API"));
        assert_eq!(jobs[0].relative_paths, Some(false));
        match &jobs[0].set {
            ResolvedSet::Files(files) => {
                assert_eq!(files.len(), 1);
                assert_eq!(files[0].path(), top.join("svc/src/api.rs"));
            }
            other => panic!("unexpected set: {other:?}"),
        }

        assert_eq!(jobs[1].output, cfg_dir.join("any.txt"));
        assert_eq!(jobs[1].set.len(), 1);
        assert!(jobs[2].set.is_empty());

        let reasons: Vec<&SkipReason> = diags.items().iter().map(|d| &d.reason).collect();
        assert!(reasons.contains(&&SkipReason::NotFound));
        assert!(reasons.contains(&&SkipReason::EmptyBlock));
    }

    #[test]
    fn includes_inside_denied_directories_resolve_to_nothing() {
        let tmp = TempDir::new().unwrap();
        let top = tmp.path().canonicalize().unwrap();
        write(&top, ".kube/config");
        write(&top, "build/out.rs");
        let cfg = ConAnyConfig::parse_str(
            "[[render]]\ninclude = [\".kube/*\", \"build/*.rs\"]\n",
            &top.join(".conany"),
            top.clone(),
        )
        .unwrap();

        let map = IgnoreMap::new(Vec::<String>::new(), ["build"], Vec::new()).unwrap();
        let ctx = ResolveContext::new(top, &map);
        let mut diags = Diagnostics::new(false);
        let jobs = resolve(&cfg, &ctx, &mut diags).unwrap();
        assert!(jobs[0].set.is_empty());
        let ignored = diags
            .items()
            .iter()
            .filter(|d| d.reason == SkipReason::Ignored)
            .count();
        assert_eq!(ignored, 2);
    }

    #[test]
    fn invalid_exclude_glob_is_an_error() {
        assert!(matches!(
            BlockExcludes::build(&["src/[".to_string()]),
            Err(AppError::Glob(_))
        ));
    }
}
