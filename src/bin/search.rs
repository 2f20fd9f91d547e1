use clap::Parser;

use coursevec::config::Config;
use coursevec::search;

/// semantic search over the course catalog index
#[derive(Parser)]
#[command(name = "search")]
struct Args {
    /// free-text query
    query: String,
    /// number of nearest neighbors to request
    #[arg(long, default_value_t = 5)]
    top_k: usize,
    /// drop matches scoring below this threshold
    #[arg(long, default_value_t = 0.3)]
    min_score: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = Config::from_env()?;

    let matches = search::run_search(&config, &args.query, args.top_k, args.min_score).await?;
    print!("{}", search::render_matches(&matches));
    Ok(())
}
