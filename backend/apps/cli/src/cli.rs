//! Command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "vendor-check",
    version,
    about = "Run background checks on vendors"
)]
pub struct Cli {
    /// Vendor to check; prompted for when omitted
    pub vendor: Option<String>,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, env = "LOG_FILE", global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the web
    Search {
        query: String,

        /// Number of results
        #[arg(short = 'n', long, default_value_t = search::DEFAULT_RESULTS,
              value_parser = clap::value_parser!(u8).range(1..=search::MAX_RESULTS as i64))]
        count: u8,
    },

    /// Query public records
    Records {
        #[command(subcommand)]
        command: RecordsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum RecordsCommand {
    /// Business registration details
    Registration {
        name: String,

        /// State of registration
        #[arg(long)]
        state: Option<String>,
    },

    /// Legal actions filed against the business
    Legal {
        name: String,

        #[arg(long)]
        jurisdiction: Option<String>,

        /// How many years to look back (1-10)
        #[arg(long, default_value_t = 5)]
        years_back: u32,
    },

    /// Licenses and permits
    Licenses {
        name: String,

        /// License type to include; repeatable
        #[arg(long = "type", value_name = "TYPE")]
        license_types: Vec<String>,
    },
}
