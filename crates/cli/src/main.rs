//! AssetBook CLI - Main entry point

use assetbook_cli::{commands, EngineOptions};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "assetbook")]
#[command(about = "AssetBook - Fixed asset depreciation schedules", long_about = None)]
struct Cli {
    /// Engine config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Currency code; sets rounding precision to its minor units
    #[arg(long, global = true)]
    currency: Option<String>,

    /// Decimal places for rounding (overrides --currency)
    #[arg(long, global = true)]
    precision: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a full depreciation schedule
    Calculate {
        /// Request file, or - for stdin
        input: PathBuf,
        /// Override the request's method (e.g. straight-line)
        #[arg(long)]
        method: Option<String>,
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
    },

    /// Project book value between two year-ends
    Project {
        /// Request file, or - for stdin
        input: PathBuf,
        /// Years already in service
        #[arg(long, default_value = "0")]
        from: u32,
        /// Target year
        #[arg(long)]
        to: u32,
    },

    /// Summarize a portfolio of assets
    Summary {
        /// Portfolio file: JSON array of { request, yearsInService }
        portfolio: PathBuf,
        /// Also list assets with at most this many years left
        #[arg(long)]
        nearing_end: Option<u32>,
    },

    /// Print the content fingerprint of a request
    Fingerprint {
        /// Request file, or - for stdin
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let engine = EngineOptions {
        config: cli.config,
        currency: cli.currency,
        precision: cli.precision,
    }
    .build()?;

    match cli.command {
        Commands::Calculate {
            input,
            method,
            format,
        } => {
            let result = commands::calculate(&engine, &input, method.as_deref())?;
            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                Format::Table => print!("{}", commands::render_table(&result)),
            }
        }

        Commands::Project { input, from, to } => {
            let projection = commands::project(&engine, &input, from, to)?;
            println!("{}", serde_json::to_string_pretty(&projection)?);
        }

        Commands::Summary {
            portfolio,
            nearing_end,
        } => {
            let report = commands::summary(&engine, &portfolio, nearing_end)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Fingerprint { input } => {
            println!("{}", commands::fingerprint(&input)?);
        }
    }

    Ok(())
}
