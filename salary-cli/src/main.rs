use anyhow::Context;
use clap::Parser;
use tracing::debug;

use salary_cli::{Cli, app, logging};
use salary_db_csv::CsvRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_file.as_deref())?;

    let config = app::load_config(cli.config.as_deref())?;

    let location = cli.data.display().to_string();
    debug!(%location, "opening record store");
    let repo = CsvRepository::open_location(&location)
        .await
        .with_context(|| format!("cannot open record store '{location}'"))?;

    let output = app::run(cli.command, &repo, &config).await?;
    println!("{output}");

    Ok(())
}
