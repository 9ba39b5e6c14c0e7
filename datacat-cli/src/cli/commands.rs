// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command definitions for DataCat

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use datacat::SortKey;
use std::path::PathBuf;

/// Log level options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only errors
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warnings, and errors
    Info,
    /// Debug messages and above (verbose)
    Debug,
    /// All messages including trace (very verbose)
    Trace,
    /// Disable all logging
    Off,
}

impl LogLevel {
    /// Convert to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// DataCat CLI - dataset metadata catalog
#[derive(Parser)]
#[command(name = "datacat")]
#[command(about = "DataCat - query a catalog of dataset metadata")]
#[command(version)]
pub struct Cli {
    /// Catalog source: a markdown overview table (.md) or JSON rows (.json)
    #[arg(short = 's', long = "source", global = true, default_value = "data_overview.md")]
    pub source: PathBuf,

    /// Loader configuration file (JSON)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace, off)
    #[arg(short = 'l', long = "log-level", global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Verbose mode (equivalent to --log-level debug)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show detailed version information
    Version,

    /// List every dataset in the catalog
    List {
        /// Sort by name, rows, size or start (default: source order)
        #[arg(long)]
        sort: Option<SortKey>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// Show one dataset
    Show {
        /// Dataset name
        name: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// List datasets matching every given option
    Filter {
        /// Exact use-case tag
        #[arg(long)]
        use_case: Option<String>,

        /// Minimum row count (inclusive)
        #[arg(long)]
        min_rows: Option<u64>,

        /// Maximum size in bytes (inclusive)
        #[arg(long)]
        max_size_bytes: Option<u64>,

        /// Start of a date range the coverage must overlap
        #[arg(long, requires = "to", value_parser = parse_date_arg)]
        from: Option<DateTime<Utc>>,

        /// End of a date range the coverage must overlap
        #[arg(long, requires = "from", value_parser = parse_date_arg)]
        to: Option<DateTime<Utc>>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// Show the load report for the source
    Report {
        /// Output format (table or json)
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },
}

fn parse_date_arg(s: &str) -> Result<DateTime<Utc>, String> {
    datacat::load::normalize::parse_timestamp(s).map_err(|e| e.to_string())
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_command() {
        let cli = Cli::try_parse_from([
            "datacat",
            "--source",
            "overview.md",
            "filter",
            "--min-rows",
            "1000000",
            "--from",
            "2020-01-01",
            "--to",
            "2020-12-31",
            "-o",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.source, PathBuf::from("overview.md"));
        match cli.command {
            Commands::Filter {
                min_rows,
                from,
                to,
                output,
                use_case,
                ..
            } => {
                assert_eq!(min_rows, Some(1_000_000));
                assert!(from.is_some() && to.is_some());
                assert_eq!(output, OutputFormat::Json);
                assert_eq!(use_case, None);
            }
            _ => panic!("expected filter command"),
        }
    }

    #[test]
    fn test_from_requires_to() {
        let result = Cli::try_parse_from(["datacat", "filter", "--from", "2020-01-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_date_rejected() {
        let result = Cli::try_parse_from([
            "datacat", "filter", "--from", "soon", "--to", "later",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_sort_key() {
        let cli = Cli::try_parse_from(["datacat", "list", "--sort", "rows"]).unwrap();
        match cli.command {
            Commands::List { sort, output } => {
                assert_eq!(sort, Some(SortKey::RowCount));
                assert_eq!(output, OutputFormat::Table);
            }
            _ => panic!("expected list command"),
        }
    }
}
