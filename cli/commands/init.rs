use crate::cli_args::InitArgs;
use anyhow::{Context, Result};
use colored::*;
use concat_core::{ConfigKind, InitOutcome, initialize};
use std::path::Path;

pub fn handle_init_command(args: InitArgs, root: &Path, quiet: bool) -> Result<()> {
    let kind: ConfigKind = args.kind.into();
    let outcome = initialize(root, kind, args.force)
        .with_context(|| format!("Failed to initialize {}", kind.file_name()))?;
    if quiet {
        return Ok(());
    }
    match outcome {
        InitOutcome::Created(path) => {
            println!("{} Created {}", "✅".green(), path.display().to_string().blue());
        }
        InitOutcome::Overwritten(path) => {
            println!("{} Overwrote {}", "✅".green(), path.display().to_string().blue());
        }
        InitOutcome::AlreadyExists(path) => {
            eprintln!(
                "{} {} already exists (use --force to overwrite)",
                "Warning:".yellow().bold(),
                path.display()
            );
        }
    }
    Ok(())
}
