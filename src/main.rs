use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use orthoage::ortholog::run_age_pipeline;
use orthoage::{SpeciesEntry, SpeciesPreset, SpeciesTable};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Label ortholog clusters (one tab-separated row of gene ids each) by evolutionary age.
#[derive(Parser, Debug)]
#[command(name = "orthoage", version)]
struct Cli {
    /// Cluster file, e.g. an MCL dump with one cluster per line.
    input: PathBuf,
    /// Age table to write.
    output: PathBuf,
    /// Gene identifier convention.
    #[arg(long, value_enum, default_value_t = SpeciesPreset::Ensembl)]
    preset: SpeciesPreset,
    /// Custom species group as NAME=FRAGMENT, repeated in outgroup-first order.
    /// Replaces the preset when given.
    #[arg(long = "species", value_name = "NAME=FRAGMENT")]
    species: Vec<SpeciesEntry>,
}

/// Parse failures that mean the positional arguments are missing or in excess.
fn is_argument_mismatch(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::MissingRequiredArgument
            | ErrorKind::UnknownArgument
            | ErrorKind::TooManyValues
            | ErrorKind::WrongNumberOfValues
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if is_argument_mismatch(err.kind()) => {
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
    let table = if cli.species.is_empty() {
        SpeciesTable::preset(cli.preset)
    } else {
        SpeciesTable::new(cli.species).context("invalid --species table")?
    };
    let names: Vec<_> = table.names().collect();
    info!("species order: {}", names.join(", "));

    let stats = run_age_pipeline(&cli.input, &cli.output, &table).with_context(|| {
        format!(
            "failed to classify clusters from {} into {}",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    for (age, count) in &stats.ages {
        info!("{age}\t{count}");
    }
    info!("elapsed time: {:.3?}", start.elapsed());

    Ok(())
}
