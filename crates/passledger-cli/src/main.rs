//! PassLedger CLI - a local, encrypted password vault
//!
//! This is the command-line interface for PassLedger. It provides a
//! user-friendly interface to the core library functionality.

mod app;
mod cli;
mod clipboard;
mod commands;
mod config;
mod constants;
mod errors;
mod generator;
mod helpers;
mod output;
mod ui;

use clap::{CommandFactory, Parser};
use passledger_core::VaultError;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::entries::{
    handle_add, handle_edit, handle_export, handle_import, handle_list, handle_remove,
    handle_search, handle_show,
};
use crate::commands::generate::handle_generate;
use crate::commands::groups::handle_group;
use crate::commands::init::handle_init;
use crate::commands::maintenance::{handle_backup, handle_check};
use crate::commands::misc::handle_completions;
use crate::constants::{env_vars, exit_codes};
use crate::errors::{exit_code_for, CliError};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        std::process::exit(report(err));
    }
}

/// Print the error (with a hint for known vault errors) and pick the exit code.
fn report(err: anyhow::Error) -> i32 {
    let code = exit_code_for(&err);
    match err.downcast::<VaultError>() {
        Ok(vault_err) if code != exit_codes::GENERAL => CliError::from(vault_err).exit(),
        Ok(vault_err) => eprintln!("Error: {}", vault_err),
        Err(err) => eprintln!("Error: {:#}", err),
    }
    code
}

/// Log to stderr. `PASSLEDGER_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(env_vars::LOG).unwrap_or_else(|_| {
        EnvFilter::new(format!("passledger_core={level},passledger={level}"))
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli);

    match &cli.command {
        Some(Commands::Init(args)) => handle_init(&ctx, args),
        Some(Commands::Add(args)) => handle_add(&ctx, args),
        Some(Commands::Edit(args)) => handle_edit(&ctx, args),
        Some(Commands::List(args)) => handle_list(&ctx, args),
        Some(Commands::Search(args)) => handle_search(&ctx, args),
        Some(Commands::Show(args)) => handle_show(&ctx, args),
        Some(Commands::Rm(args)) => handle_remove(&ctx, args),
        Some(Commands::Group(command)) => handle_group(&ctx, command),
        Some(Commands::Generate(args)) => handle_generate(args),
        Some(Commands::Export(args)) => handle_export(&ctx, args),
        Some(Commands::Import(args)) => handle_import(&ctx, args),
        Some(Commands::Check) => handle_check(&ctx),
        Some(Commands::Backup(args)) => handle_backup(&ctx, args),
        Some(Commands::Completions(args)) => handle_completions(args.shell),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
