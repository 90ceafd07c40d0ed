use anyhow::Result;
use clap::Parser;
use log::info;

use ticker_data::{
    cli::{self, Cli, Commands},
    config::Config,
    io::cache::SnapshotCache,
    loader::TickerLoader,
    models::ticker::Ticker,
    providers::yahoo::YahooProvider,
};

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    }
    .with_env_overrides();

    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!("Using cache directory {}", config.data_dir.display());
    let cache = SnapshotCache::new(&config.data_dir);

    match cli.command {
        Commands::Fetch { ticker } => {
            let ticker = Ticker::new(&ticker)?;
            let loader = TickerLoader::new(cache, YahooProvider::new(&config)?);
            let snapshot = loader.load(ticker.as_str(), true).await?;
            let path = loader.cache().path(&ticker);
            println!("{ticker}: {} -> {}", cli::summary(&snapshot), path.display());
        }

        Commands::Show { ticker, section } => {
            let loader = TickerLoader::<YahooProvider>::offline(cache);
            let snapshot = loader.load(&ticker, false).await?;
            print_json(&section.select(&snapshot)?)?;
        }

        Commands::Financials { ticker, refresh } => {
            let loader = if refresh {
                TickerLoader::new(cache, YahooProvider::new(&config)?)
            } else {
                TickerLoader::offline(cache)
            };
            let snapshot = loader.load(&ticker, refresh).await?;
            print_json(&serde_json::to_value(snapshot.financial_info()?)?)?;
        }

        Commands::List => {
            for ticker in cache.list()? {
                println!("{ticker}");
            }
        }
    }

    Ok(())
}
