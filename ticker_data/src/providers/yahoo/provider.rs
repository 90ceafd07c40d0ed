use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use crate::{
    config::Config,
    models::{
        balance_sheet::BalanceSheetRow,
        price::{HistoryRange, PriceHistory},
        ticker::Ticker,
    },
    providers::{
        MarketData, ProviderError, TickerDataProvider,
        yahoo::{
            params::{
                COOKIE_URL, chart_query, chart_url, crumb_url, quote_summary_query,
                quote_summary_url, search_query, search_url, timeseries_query, timeseries_url,
            },
            response::{ChartResponse, QuoteSummaryResponse, SearchResponse, TimeseriesResponse},
        },
    },
};

/// Yahoo Finance over its public JSON endpoints.
///
/// One provider keeps one cookie session; the crumb needed by quote-summary
/// requests is fetched on first use and reused afterwards.
pub struct YahooProvider {
    client: Client,
    news_count: u32,
    crumb: OnceCell<String>,
}

impl YahooProvider {
    /// Creates a new Yahoo provider using the user agent and news count from `config`.
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            news_count: config.news_count,
            crumb: OnceCell::new(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        debug!("GET {url}");
        let response = self.client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ProviderError::Api(format!("{status} from {url}: {error_msg}")));
        }

        Ok(response.json::<T>().await?)
    }

    async fn crumb(&self) -> Result<&str, ProviderError> {
        let crumb = self.crumb.get_or_try_init(|| self.fetch_crumb()).await?;
        Ok(crumb.as_str())
    }

    async fn fetch_crumb(&self) -> Result<String, ProviderError> {
        // Only the cookies matter; this host answers 404.
        let _cookies = self.client.get(COOKIE_URL).send().await?;

        let response = self.client.get(crumb_url()).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::Api(format!(
                "crumb request returned {}",
                response.status()
            )));
        }
        let crumb = response.text().await?.trim().to_string();
        if crumb.is_empty() || crumb.contains(char::is_whitespace) || crumb.contains('<') {
            return Err(ProviderError::Api(format!("unusable crumb: {crumb:?}")));
        }
        debug!("Obtained Yahoo crumb");
        Ok(crumb)
    }

    async fn fetch_info(&self, ticker: &Ticker) -> Result<MarketData, ProviderError> {
        let crumb = self.crumb().await?;
        let summary: QuoteSummaryResponse = self
            .get_json(&quote_summary_url(ticker.as_str()), &quote_summary_query(crumb))
            .await?;

        Ok(MarketData {
            info: summary.into_info()?,
            ..Default::default()
        })
    }

    async fn fetch_history(
        &self,
        ticker: &Ticker,
        range: HistoryRange,
    ) -> Result<PriceHistory, ProviderError> {
        let chart: ChartResponse = self
            .get_json(&chart_url(ticker.as_str()), &chart_query(range))
            .await?;
        let history = chart.into_history()?;
        debug!("{ticker}: {} daily bars for {range}", history.len());
        Ok(history)
    }
}

#[async_trait]
impl TickerDataProvider for YahooProvider {
    async fn fetch_balance_sheet(
        &self,
        ticker: &Ticker,
    ) -> Result<Vec<BalanceSheetRow>, ProviderError> {
        info!("Fetching balance sheet for {ticker}");
        let series: TimeseriesResponse = self
            .get_json(
                &timeseries_url(ticker.as_str()),
                &timeseries_query(ticker.as_str(), Utc::now().timestamp()),
            )
            .await?;
        series.into_rows()
    }

    async fn fetch_info_news_and_prices(
        &self,
        ticker: &Ticker,
    ) -> Result<MarketData, ProviderError> {
        info!("Fetching info, news and price history for {ticker}");
        let mut data = self.fetch_info(ticker).await?;

        let search: SearchResponse = self
            .get_json(&search_url(), &search_query(ticker.as_str(), self.news_count))
            .await?;
        data.news = search.into_news();

        data.price_sixm = self.fetch_history(ticker, HistoryRange::SixMonths).await?;
        data.price_threey = self.fetch_history(ticker, HistoryRange::ThreeYears).await?;
        Ok(data)
    }
}
