//! Cache-backed ticker loading.

use log::info;

use crate::{
    errors::Error,
    io::cache::SnapshotCache,
    models::{snapshot::Snapshot, ticker::Ticker},
    providers::TickerDataProvider,
};

/// Loads ticker snapshots from the cache, refreshing them from a provider on
/// request.
pub struct TickerLoader<P> {
    cache: SnapshotCache,
    provider: Option<P>,
}

impl<P> TickerLoader<P>
where
    P: TickerDataProvider + Send + Sync,
{
    pub fn new(cache: SnapshotCache, provider: P) -> Self {
        Self {
            cache,
            provider: Some(provider),
        }
    }

    /// A loader that can only read the cache; refresh requests fail with
    /// [`Error::Config`].
    pub fn offline(cache: SnapshotCache) -> Self {
        Self {
            cache,
            provider: None,
        }
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Loads the snapshot for `ticker` (case-insensitive).
    ///
    /// With `refresh`, both provider calls run first and their combined
    /// result replaces the cache file, whether or not one existed. The
    /// snapshot is then always read back from the cache file, so a refresh
    /// and a plain load return the same thing for the same file.
    ///
    /// Errors are returned as-is: a provider failure leaves any existing cache
    /// file untouched, and a plain load with no cache file is
    /// [`Error::CacheMiss`].
    pub async fn load(&self, ticker: &str, refresh: bool) -> Result<Snapshot, Error> {
        let ticker = Ticker::new(ticker)?;
        if refresh {
            self.refresh(&ticker).await?;
        }
        self.cache.read(&ticker)
    }

    async fn refresh(&self, ticker: &Ticker) -> Result<(), Error> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            Error::Config(format!("cannot refresh {ticker}: no data provider configured"))
        })?;

        info!("Refreshing {ticker}");
        let balance_sheet = provider.fetch_balance_sheet(ticker).await?;
        let market = provider.fetch_info_news_and_prices(ticker).await?;

        let snapshot = Snapshot::from_parts(market, balance_sheet);
        self.cache.write(ticker, &snapshot)?;
        Ok(())
    }
}
