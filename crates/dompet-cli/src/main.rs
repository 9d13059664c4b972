//! Dompet CLI - a local, single-user personal finance ledger
//!
//! This is the command-line interface for Dompet. It parses arguments,
//! loads the config and hands off to the command handlers.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod helpers;
mod output;
mod ui;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use app::{exit_code_for, AppContext, CliError};
use cli::{Cli, Commands};
use constants::LOG_ENV;
use ui::{print_error, UiContext};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        let ui = UiContext::from_env(false, None, cli.no_color, cli.ascii);
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => print_error(&ui, cli_err.message(), cli_err.hint()),
            None => print_error(&ui, &format!("{:#}", err), None),
        }
        std::process::exit(exit_code_for(&err));
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let Some(ref command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };
    if let Commands::Completions(args) = command {
        return commands::handle_completions(args.shell);
    }

    let ctx = AppContext::new(cli)?;
    match command {
        Commands::Init(args) => commands::handle_init(&ctx, args),
        Commands::Add(args) => commands::handle_add(&ctx, args),
        Commands::List(args) => commands::handle_list(&ctx, args),
        Commands::Show(args) => commands::handle_show(&ctx, args),
        Commands::Edit(args) => commands::handle_edit(&ctx, args),
        Commands::Delete(args) => commands::handle_delete(&ctx, args),
        Commands::Category(args) => commands::handle_category(&ctx, args),
        Commands::Budget(args) => commands::handle_budget(&ctx, args),
        Commands::Summary(args) => commands::handle_summary(&ctx, args),
        Commands::Stats(args) => commands::handle_stats(&ctx, args),
        Commands::Receipt(args) => commands::handle_receipt(&ctx, args),
        Commands::Backup(args) => commands::handle_backup(&ctx, args),
        Commands::Completions(args) => commands::handle_completions(args.shell),
    }
}
