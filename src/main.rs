// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;

/// Exit status for an operator-cancelled run (128 + SIGINT)
const EXIT_CANCELLED: u8 = 130;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init {
            components_dir,
            icon_library,
            force,
        } => commands::cmd_init(&cli.cwd, &components_dir, &icon_library, force),
        Commands::Add {
            components,
            yes,
            overwrite,
            dry_run,
        } => commands::cmd_add(&cli.library, &cli.cwd, &components, yes, overwrite, dry_run),
        Commands::List => commands::cmd_list(&cli.library, &cli.cwd),
        Commands::Deps { component, json } => commands::cmd_deps(&cli.library, &component, json),
        Commands::Diff { component } => commands::cmd_diff(&cli.library, &cli.cwd, &component),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if matches!(e.downcast_ref::<solder::Error>(), Some(solder::Error::Cancelled)) {
                eprintln!("Cancelled.");
                return ExitCode::from(EXIT_CANCELLED);
            }
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
