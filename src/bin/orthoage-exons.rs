//! Merge collapsed UTR and non-UTR exon sets into one labeled BED file.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use orthoage::exons::{relabel_exons, ExonInputs};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Relabel `bedtools merge` outputs as coding / UTR / other exons.
#[derive(Parser, Debug)]
#[command(name = "orthoage-exons", version)]
struct Cli {
    /// Merged exons overlapping UTRs.
    #[arg(long, default_value = "UTRexons_collapsed.txt")]
    utr: PathBuf,
    /// Merged exons without UTR overlap.
    #[arg(long, default_value = "nonUTRexons_collapsed.txt")]
    non_utr: PathBuf,
    /// BED5 file to write.
    #[arg(short, long, default_value = "exons_collapsed.bed")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::UnknownArgument) => {
            println!("wrong number of arguments");
            println!("{}", Cli::command().render_usage());
            return Ok(());
        }
        Err(err) => err.exit(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let start = Instant::now();
    let inputs = ExonInputs {
        utr: cli.utr,
        non_utr: cli.non_utr,
    };
    let stats = relabel_exons(&inputs, &cli.output)
        .with_context(|| format!("failed to relabel exons into {}", cli.output.display()))?;
    info!(
        coding = stats.coding,
        utr = stats.utr,
        other = stats.other,
        "exon labels"
    );
    info!("elapsed time: {:.3?}", start.elapsed());

    Ok(())
}
