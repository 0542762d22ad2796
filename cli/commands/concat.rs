use super::RunStatus;
use crate::cli_args::{AnyArgs, ConcatArgs, FigureArgs, RenderOpts, ScopeOpts, SelectArgs};
use crate::clipboard::SystemClipboard;
use crate::output;
use anyhow::{Context, Result};
use concat_core::config::resolve_against;
use concat_core::defaults::{CONANY_FILENAME, CONFIGURE_FILENAME, CONSELECT_FILENAME};
use concat_core::{
    ClipboardSink, ConAnyConfig, ConfigureConfig, ConselectConfig, IgnoreMap, LineLimit,
    PatternSet, Pipeline, RenderOptions, ResolveContext, ScanConfig, Selection,
};
use std::path::{Path, PathBuf};

pub fn handle_concat_command(args: ConcatArgs, root: &Path, quiet: bool) -> Result<RunStatus> {
    let selection = Selection::Scan(ScanConfig {
        directories: args.directories,
        include_files: args.include_files.into_iter().collect(),
        // Exclusions travel in the ignore map so every strategy sees them.
        exclude_files: PatternSet::new(),
        exclude_dirs: PatternSet::new(),
    });
    run_selection(&selection, root, &args.scope, &args.render, quiet)
}

pub fn handle_select_command(args: SelectArgs, root: &Path, quiet: bool) -> Result<RunStatus> {
    let path = config_path(root, args.select_file.as_ref(), CONSELECT_FILENAME);
    let config = ConselectConfig::load_from_path(&path)
        .context("No usable selection file (try `con init select`)")?;
    log::debug!("{} selection entries loaded", config.entries.len());
    run_selection(&Selection::Conselect(config), root, &args.scope, &args.render, quiet)
}

pub fn handle_figure_command(args: FigureArgs, root: &Path, quiet: bool) -> Result<RunStatus> {
    let path = config_path(root, args.figure_file.as_ref(), CONFIGURE_FILENAME);
    let config = ConfigureConfig::load_from_path(&path)
        .context("No usable snippet file (try `con init figure`)")?;
    log::debug!("{} filters loaded", config.filters.len());
    run_selection(&Selection::Configure(config), root, &args.scope, &args.render, quiet)
}

pub fn handle_any_command(args: AnyArgs, root: &Path, quiet: bool) -> Result<RunStatus> {
    let path = config_path(root, args.config_path.as_ref(), CONANY_FILENAME);
    let config = ConAnyConfig::load_from_path(&path)
        .context("No usable block file (try `con init any`)")?;
    if config.blocks.is_empty() {
        log::warn!("{} defines no [[render]] blocks", path.display());
    }
    run_selection(&Selection::ConAny(config), root, &args.scope, &args.render, quiet)
}

fn config_path(root: &Path, explicit: Option<&PathBuf>, default_name: &str) -> PathBuf {
    match explicit {
        Some(p) => resolve_against(root, &p.to_string_lossy()),
        None => root.join(default_name),
    }
}

/// Project `.conignore` merged with the command-line exclusions.
pub(crate) fn load_ignore_map(root: &Path, scope: &ScopeOpts) -> Result<IgnoreMap> {
    let cli_rules = IgnoreMap::new(
        scope.exclude_files.iter().cloned(),
        scope.exclude_dirs.iter().cloned(),
        Vec::new(),
    )?;
    let map = IgnoreMap::load_for_root(root, &cli_rules)
        .context("Failed to build ignore rules")?;
    log::debug!(
        "Ignore rules: {} file patterns, {} directory patterns, {} redaction tokens",
        map.ignore_files().len(),
        map.ignore_directories().len(),
        map.obscure_values().len()
    );
    Ok(map)
}

fn render_options(render: &RenderOpts) -> RenderOptions {
    RenderOptions {
        delimiter_style: render.delimiter_style,
        delimiter_closure: render.delimiter_closure,
        line_limit: LineLimit::from_flag(render.line_limit),
        trim_blank_lines: !render.keep_blank_edges,
        relative_paths: render.relative_paths,
        raw_output: render.raw_output,
        allow_secrets: render.allow_secrets,
        deep_secret_inspection: !render.no_deep_inspect,
        copy_to_clipboard: render.copy_to_clipboard,
        verbose: render.verbose_output,
    }
}

fn run_selection(
    selection: &Selection,
    root: &Path,
    scope: &ScopeOpts,
    render: &RenderOpts,
    quiet: bool,
) -> Result<RunStatus> {
    let ignore_map = load_ignore_map(root, scope)?;

    let mut ctx = ResolveContext::new(root.to_path_buf(), &ignore_map);
    ctx.max_depth = scope.max_depth();
    ctx.include_dotfiles = scope.include_dotfiles;
    ctx.ignore_static_defaults = !scope.exclude_static_ignores;
    ctx.verbose = render.verbose_output;

    let options = render_options(render);
    if options.allow_secrets {
        log::warn!("Secret redaction is disabled for this run");
    }
    let clipboard = SystemClipboard;
    let sink: Option<&dyn ClipboardSink> = if options.copy_to_clipboard {
        Some(&clipboard)
    } else {
        None
    };

    let report = Pipeline::new(ctx, &options)
        .output_name(render.output_file_name.clone())
        .clipboard(sink)
        .run(selection)
        .with_context(|| format!("'{}' concatenation failed", selection.kind()))?;

    if !quiet {
        output::print_run_report(&report, selection, render.verbose_output);
    }
    Ok(if report.is_empty() {
        RunStatus::NoMatches
    } else {
        RunStatus::Written
    })
}
