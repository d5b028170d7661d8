//! Command-line entry point for the DiseaseDx bulk downloader.
//!
//! Thin shell over the library: parses flags, initializes logging, runs one
//! pipeline. Per-item failures never affect the exit code; only client
//! construction and catalog errors are fatal.

use clap::{Args, Parser, Subcommand};
use diseasedx_dl::{BulkDownloader, Config, RecordKind};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "diseasedx-dl",
    version,
    about = "Bulk disease and gene record downloader for the DiseaseDx open API"
)]
struct Cli {
    /// Show per-request progress information
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Download the disease catalog and every disease record
    Disease(FetchArgs),
    /// Download the gene catalog and every gene record
    Gene(GeneArgs),
}

#[derive(Debug, Args)]
struct FetchArgs {
    /// Catalog file path (default: data/diseaselist.json or data/genelist.json)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output directory (default: data/disease or data/gene)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Maximum concurrent detail fetches
    #[arg(long, default_value_t = 3)]
    concurrency: usize,

    /// Reuse the existing catalog file instead of fetching a fresh one
    #[arg(long)]
    skip_list: bool,

    /// API base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Debug, Args)]
struct GeneArgs {
    #[command(flatten)]
    fetch: FetchArgs,

    /// Record version override (default: the version carried by each entry)
    #[arg(long)]
    version: Option<String>,
}

#[tokio::main]
async fn main() -> diseasedx_dl::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (kind, args, version_override) = match cli.command {
        Command::Disease(args) => (RecordKind::Disease, args, None),
        Command::Gene(args) => (RecordKind::Gene, args.fetch, args.version),
    };

    let mut config = Config::for_kind(kind);
    if let Some(catalog) = args.catalog {
        config.fetch.catalog_file = catalog;
    }
    if let Some(output) = args.output {
        config.fetch.output_dir = output;
    }
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }
    config.fetch.concurrent_fetches = args.concurrency;
    config.fetch.version_override = version_override;

    let downloader = BulkDownloader::new(config)?;
    let summary = if args.skip_list {
        downloader.download_from_file(kind).await?
    } else {
        downloader.run(kind).await?
    };

    println!("Processed {} {} records", summary.processed(), kind);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "diseasedx_dl=debug,info"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
