//! cardforge - fetch, normalize and synthesize playing-card SVG decks.

mod cli;
mod config;
mod core;
mod fetch;
mod logger;
mod svg;
mod utils;

use std::process::ExitCode;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::CardforgeConfig;

fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return Ok(if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let validate_verbose = matches!(&cli.command, Commands::Validate { args } if args.verbose);
    logger::set_verbose(cli.verbose || validate_verbose);

    let config = CardforgeConfig::load(&cli)?;

    match &cli.command {
        Commands::Atlasnye { args } => cli::atlasnye::run(&config, args)?,
        Commands::Brescia { args } => cli::brescia::run(&config, args)?,
        Commands::BresciaExtras => cli::brescia::run_extras(&config)?,
        Commands::Htdebeer { input } => cli::htdebeer::run(&config, input.as_deref())?,
        Commands::Ddl { args } => cli::ddl::run(&config, args)?,
        Commands::DdlExtras => cli::ddl::run_extras(&config)?,
        Commands::Validate { args } => return cli::validate::validate_dir(args, &config),
    }
    Ok(ExitCode::SUCCESS)
}
