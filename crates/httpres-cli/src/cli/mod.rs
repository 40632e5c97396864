//! CLI for httpres.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use httpres_core::config;
use httpres_core::TimestampMode;
use std::path::PathBuf;

use commands::{run_alike, run_config, run_fetch, run_inspect};

/// Top-level CLI for httpres.
#[derive(Debug, Parser)]
#[command(name = "httpres")]
#[command(about = "httpres: fetch HTTP references as resources with provenance", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch one or more references (URL or @saved-reference.json).
    Fetch(FetchArgs),

    /// Print whether two references build the same request.
    Alike {
        /// First reference.
        a: String,
        /// Second reference.
        b: String,
    },

    /// Show the URL, source request and recorded response headers of a reference.
    Inspect {
        /// URL or @saved-reference.json.
        reference: String,
    },

    /// Show the config file path and the effective configuration.
    Config,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// References to fetch: http(s) URLs or @path to a saved reference. Several are fetched concurrently.
    #[arg(required = true, value_name = "REF")]
    pub refs: Vec<String>,

    /// HTTP method (default GET).
    #[arg(short = 'X', long)]
    pub method: Option<String>,

    /// Request header as "Name: value". Repeatable.
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Request body.
    #[arg(long)]
    pub data: Option<String>,

    /// Follow redirects.
    #[arg(long)]
    pub follow: bool,

    /// Total transfer timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Timestamp mode for this call: "server" or "client" (default from config).
    #[arg(long)]
    pub timestamp: Option<TimestampMode>,

    /// Write the body here instead of stdout (single reference only).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Save the resolved reference as JSON for later re-fetch (single reference only).
    #[arg(long, value_name = "FILE")]
    pub save_ref: Option<PathBuf>,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch(args) => run_fetch(&cfg, args).await?,
            CliCommand::Alike { a, b } => run_alike(&a, &b)?,
            CliCommand::Inspect { reference } => run_inspect(&reference)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}
