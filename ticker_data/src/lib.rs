//! Fetch, cache and read financial-market data for stock tickers.
//!
//! A [`loader::TickerLoader`] either refreshes a ticker from a
//! [`providers::TickerDataProvider`] and stores the result as
//! `<data_dir>/<TICKER>.json`, or reads that file back. The result is a
//! [`models::snapshot::Snapshot`]: company info, news, two windows of daily
//! prices and balance-sheet rows.
//!
//! ```rust,no_run
//! use ticker_data::{config::Config, io::cache::SnapshotCache, loader::TickerLoader};
//! use ticker_data::providers::yahoo::YahooProvider;
//!
//! # async fn run() -> Result<(), ticker_data::errors::Error> {
//! let config = Config::default().with_env_overrides();
//! let loader = TickerLoader::new(
//!     SnapshotCache::new(&config.data_dir),
//!     YahooProvider::new(&config)?,
//! );
//!
//! let snapshot = loader.load("aapl", true).await?;
//! for item in snapshot.financial_info()? {
//!     println!("{}: {}", item.title, item.value);
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod io;
pub mod loader;
pub mod models;
pub mod providers;
