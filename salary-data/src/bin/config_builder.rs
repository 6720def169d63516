use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use salary_data::{SlabTableLoader, to_toml_string};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Build a TOML tax configuration from a slab CSV file.
///
/// The CSV file should have the following columns:
/// - regime: `old` or `new`
/// - upper_bound: top of the slab (empty for the last, unbounded slab)
/// - rate: marginal rate as a fraction (e.g. 0.05)
///
/// Rows for each regime must be in ascending order.
#[derive(Parser, Debug)]
#[command(name = "salary-config")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing slab rows
    #[arg(short, long)]
    slabs: PathBuf,

    /// Income at or below which the old regime owes no tax
    #[arg(long)]
    old_rebate_limit: Decimal,

    /// Income at or below which the new regime owes no tax
    #[arg(long)]
    new_rebate_limit: Decimal,

    /// Cess applied on top of tax, as a fraction
    #[arg(long, default_value = "0.04")]
    cess_rate: Decimal,

    /// Annual standard deduction for employees without an override
    #[arg(long, default_value = "50000")]
    standard_deduction: Decimal,

    /// Write the configuration here instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let file = File::open(&args.slabs)
        .with_context(|| format!("Failed to open: {}", args.slabs.display()))?;

    let records = SlabTableLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.slabs.display()))?;
    info!("Parsed {} slab rows", records.len());

    let config = SlabTableLoader::build(&records)
        .context("Invalid slab tables")?
        .into_config(
            args.old_rebate_limit,
            args.new_rebate_limit,
            args.cess_rate,
            args.standard_deduction,
        )
        .context("Invalid tax configuration")?;

    let toml = to_toml_string(&config).context("Failed to serialise configuration")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, toml)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            info!("Wrote tax configuration to {}", path.display());
        }
        None => print!("{toml}"),
    }

    Ok(())
}
