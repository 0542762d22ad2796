mod cli_args;
mod clipboard;
mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli_args::{Cli, Commands};
use colored::*;
use commands::RunStatus;
use concat_core::{AppError, determine_root};
use std::process;

/// Exit code when every selection came back empty.
const EXIT_NO_MATCHES: i32 = 3;

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);

    let quiet = cli_args.quiet;

    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args, quiet) {
        Ok(RunStatus::Written) => {
            log::info!("Application finished successfully.");
            0
        }
        Ok(RunStatus::NoMatches) => {
            log::info!("Nothing matched; no output written.");
            EXIT_NO_MATCHES
        }
        Err(e) => {
            let exit_code = match e.downcast_ref::<AppError>() {
                Some(AppError::Config { .. }) => 1,
                Some(AppError::TomlParse(_)) => 1,
                Some(AppError::AmbiguousRedaction { .. }) => 1,
                Some(AppError::Glob(_)) => 1,
                Some(AppError::Path { .. }) => 2,
                Some(AppError::Io(_)) => 2,
                Some(AppError::FileRead { .. }) => 2,
                Some(AppError::FileWrite { .. }) => 2,
                Some(AppError::OutputPath { .. }) => 2,
                Some(AppError::WalkDir(_)) => 2,
                Some(AppError::Clipboard(_)) => 2,
                Some(_) => 1,
                None => 1,
            };

            if !quiet || exit_code == 1 {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
            } else {
                log::error!("Application failed: {:#}", e);
            }

            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli, quiet: bool) -> Result<RunStatus> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(RunStatus::Written);
    };

    let root = determine_root(cli.root.as_ref()).context("Failed to determine project root")?;
    log::info!("Project root determined: {}", root.display());

    match command {
        Commands::Concat(args) => {
            log::debug!("Executing 'concat' command...");
            commands::concat::handle_concat_command(args, &root, quiet)
        }
        Commands::Select(args) => {
            log::debug!("Executing 'select' command...");
            commands::concat::handle_select_command(args, &root, quiet)
        }
        Commands::Figure(args) => {
            log::debug!("Executing 'figure' command...");
            commands::concat::handle_figure_command(args, &root, quiet)
        }
        Commands::Any(args) => {
            log::debug!("Executing 'any' command...");
            commands::concat::handle_any_command(args, &root, quiet)
        }
        Commands::Tree(args) => {
            log::debug!("Executing 'tree' command...");
            commands::tree::handle_tree_command(args, &root, quiet)?;
            Ok(RunStatus::Written)
        }
        Commands::Init(args) => {
            log::debug!("Executing 'init' command...");
            commands::init::handle_init_command(args, &root, quiet)?;
            Ok(RunStatus::Written)
        }
    }
}
