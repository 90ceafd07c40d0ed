//! Provider abstraction for ticker data sources.
//!
//! This module defines the [`TickerDataProvider`] trait, the single capability
//! the loader needs from the outside world: balance-sheet rows, and company
//! info plus news plus two windows of daily prices.
//!
//! Concrete sources (such as [`yahoo::YahooProvider`]) implement the trait
//! and hide their own endpoint shapes. The trait is designed for async usage
//! and supports dynamic dispatch (`dyn TickerDataProvider`), so tests can hand
//! the loader a fake.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use ticker_data::models::{balance_sheet::BalanceSheetRow, ticker::Ticker};
//! use ticker_data::providers::{MarketData, ProviderError, TickerDataProvider};
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl TickerDataProvider for Offline {
//!     async fn fetch_balance_sheet(&self, _: &Ticker) -> Result<Vec<BalanceSheetRow>, ProviderError> {
//!         Ok(vec![])
//!     }
//!
//!     async fn fetch_info_news_and_prices(&self, _: &Ticker) -> Result<MarketData, ProviderError> {
//!         Ok(MarketData::default())
//!     }
//! }
//! ```

pub mod errors;
pub mod yahoo;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

use crate::models::{
    balance_sheet::BalanceSheetRow, news::NewsItem, price::PriceHistory, ticker::Ticker,
};

pub use errors::ProviderError;

/// Company info, news and price history for one ticker, as returned by
/// [`TickerDataProvider::fetch_info_news_and_prices`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketData {
    pub info: IndexMap<String, Value>,
    pub news: Vec<NewsItem>,
    pub price_sixm: PriceHistory,
    pub price_threey: PriceHistory,
}

/// Everything the loader fetches on refresh.
#[async_trait]
pub trait TickerDataProvider {
    /// Fetches dated balance-sheet rows, oldest first.
    async fn fetch_balance_sheet(&self, ticker: &Ticker)
    -> Result<Vec<BalanceSheetRow>, ProviderError>;

    /// Fetches the flat info map, recent news, and the 6-month and 3-year
    /// daily price histories.
    async fn fetch_info_news_and_prices(&self, ticker: &Ticker)
    -> Result<MarketData, ProviderError>;
}

#[async_trait]
impl<P> TickerDataProvider for Box<P>
where
    P: TickerDataProvider + Send + Sync + ?Sized,
{
    async fn fetch_balance_sheet(
        &self,
        ticker: &Ticker,
    ) -> Result<Vec<BalanceSheetRow>, ProviderError> {
        (**self).fetch_balance_sheet(ticker).await
    }

    async fn fetch_info_news_and_prices(
        &self,
        ticker: &Ticker,
    ) -> Result<MarketData, ProviderError> {
        (**self).fetch_info_news_and_prices(ticker).await
    }
}
