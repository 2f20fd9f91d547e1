use std::path::PathBuf;

use clap::Parser;
use log::info;

use coursevec::config::Config;
use coursevec::ops;

/// embed course records from a CSV file and upsert them into the vector index
#[derive(Parser)]
#[command(name = "ingest")]
struct Args {
    /// path to the course catalog CSV
    csv_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = Config::from_env()?;

    let summary = ops::run_ingest(&config, &args.csv_path).await?;
    info!(
        "ingest complete: {} records, {} batches, {} upserted (index host: {})",
        summary.records, summary.batches, summary.upserted, summary.index_host
    );
    Ok(())
}
