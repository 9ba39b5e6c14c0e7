// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! DataCat command-line entry point

mod cli;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = match (cli.log_level, cli.verbose) {
        (Some(level), _) => level.to_level_filter(),
        (None, true) => log::LevelFilter::Debug,
        (None, false) => log::LevelFilter::Warn,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Version = cli.command {
        cli::handle_version();
        return Ok(());
    }

    let (store, report) = cli::load_catalog(&cli.source, cli.config.as_deref())?;
    log::debug!("Catalog ready with {} dataset(s)", store.len());

    match cli.command {
        Commands::Version => Ok(()),
        Commands::List { sort, output } => cli::handle_list(&store, sort, output),
        Commands::Show { name, output } => cli::handle_show(&store, &name, output),
        Commands::Filter {
            use_case,
            min_rows,
            max_size_bytes,
            from,
            to,
            output,
        } => {
            let range = from.zip(to);
            cli::handle_filter(&store, use_case, min_rows, max_size_bytes, range, output)
        }
        Commands::Report { output } => cli::handle_report(&report, output),
    }
}
