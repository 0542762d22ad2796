use super::concat::load_ignore_map;
use crate::cli_args::TreeArgs;
use crate::clipboard::SystemClipboard;
use anyhow::{Context, Result};
use colored::*;
use concat_core::config::resolve_against;
use concat_core::{AppError, ClipboardSink, FileTreeMaker, PatternSet, Scanner};
use std::fs;
use std::path::Path;

pub fn handle_tree_command(args: TreeArgs, root: &Path, quiet: bool) -> Result<()> {
    let ignore_map = load_ignore_map(root, &args.scope)?;
    let dir = match &args.directory {
        Some(d) => resolve_against(root, d),
        None => root.to_path_buf(),
    };
    let output = resolve_against(root, &args.output_file_name);

    let include: PatternSet = args.include_files.iter().cloned().collect();
    let mut entries = Scanner::new(&dir, &ignore_map)
        .max_depth(args.scope.max_depth())
        .include_files(include)
        .include_dotfiles(args.scope.include_dotfiles)
        .include_empty(args.include_empty)
        .ignore_static_defaults(!args.scope.exclude_static_ignores)
        .scan_entries()
        .with_context(|| format!("Failed to scan {}", dir.display()))?;
    entries.retain(|e| e.reference().path() != output.as_path());
    log::debug!("Tree has {} entries", entries.len());

    let tree = FileTreeMaker::new(&dir, entries)
        .trailing_slash(!args.no_trailing_slash)
        .generate();

    if args.clean {
        SystemClipboard.copy(&tree)?;
        if !quiet {
            println!("{} {}", "✅".green(), "Tree copied to clipboard".green().bold());
        }
        return Ok(());
    }

    fs::write(&output, &tree).map_err(|e| AppError::FileWrite {
        path: output.clone(),
        source: e,
    })?;
    if args.copy_to_clipboard {
        if let Err(e) = SystemClipboard.copy(&tree) {
            log::warn!("Tree written but not copied to clipboard: {}", e);
        }
    }
    if !quiet {
        println!("{} {}", "✅".green(), "Tree ok".green().bold());
        println!("   source: {}", output.display().to_string().blue());
    }
    Ok(())
}
