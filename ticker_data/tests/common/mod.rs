#![allow(dead_code)]

use std::{
    fs,
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::DateTime;
use indexmap::IndexMap;
use serde_json::json;
use ticker_data::{
    models::{
        balance_sheet::BalanceSheetRow,
        news::NewsItem,
        price::{Bar, PriceHistory},
        ticker::Ticker,
    },
    providers::{MarketData, ProviderError, TickerDataProvider},
};

/// The cache document from the README scenario.
pub const AAPL_DOC: &str = r#"{"info": {"marketCap": 100, "forwardPE": 2, "totalRevenue": 50, "grossProfits": 10, "debtToEquity": 1.2, "profitMargins": 0.2}, "news": [], "price_sixm": {}, "price_threey": {}, "balance_sheet": []}"#;

pub fn write_doc(dir: &Path, file_name: &str, doc: &str) {
    fs::write(dir.join(file_name), doc).expect("write cache doc");
}

/// In-memory provider that logs every call as `<method>:<ticker>`.
pub struct FakeProvider {
    pub market: MarketData,
    pub balance_sheet: Vec<BalanceSheetRow>,
    pub fail_market: bool,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        let mut info = IndexMap::new();
        for (key, value) in [
            ("marketCap", json!(3_000_000_000_000i64)),
            ("forwardPE", json!(29.5)),
            ("totalRevenue", json!(383_285_000_000i64)),
            ("grossProfits", json!(169_148_000_000i64)),
            ("debtToEquity", json!(181.3)),
            ("profitMargins", json!(0.253)),
            ("longName", json!("Apple Inc.")),
        ] {
            info.insert(key.to_string(), value);
        }

        let news = vec![NewsItem {
            title: "Apple unveils something".into(),
            publisher: "Reuters".into(),
            provider_publish_time: 1_700_000_000,
            link: "https://example.com/apple".into(),
            extra: IndexMap::new(),
        }];

        let bar = |secs: i64, close: f64| Bar {
            timestamp: DateTime::from_timestamp(secs, 0).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000.0,
            dividends: 0.0,
            stock_splits: 0.0,
        };
        let price_sixm: PriceHistory = [bar(1_700_000_000, 190.0), bar(1_700_086_400, 191.5)]
            .into_iter()
            .collect();
        let price_threey: PriceHistory = [bar(1_600_000_000, 110.0), bar(1_700_086_400, 191.5)]
            .into_iter()
            .collect();

        let mut row = BalanceSheetRow::new("2023-09-30", "12M");
        row.currency_code = Some("USD".into());
        row.items.insert("TotalAssets".into(), Some(352_583_000_000.0));

        Self {
            market: MarketData {
                info,
                news,
                price_sixm,
                price_threey,
            },
            balance_sheet: vec![row],
            fail_market: false,
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_market: true,
            ..Self::new()
        }
    }

    fn record(&self, call: &str, ticker: &Ticker) {
        self.calls.lock().unwrap().push(format!("{call}:{ticker}"));
    }
}

#[async_trait]
impl TickerDataProvider for FakeProvider {
    async fn fetch_balance_sheet(
        &self,
        ticker: &Ticker,
    ) -> Result<Vec<BalanceSheetRow>, ProviderError> {
        self.record("balance_sheet", ticker);
        Ok(self.balance_sheet.clone())
    }

    async fn fetch_info_news_and_prices(
        &self,
        ticker: &Ticker,
    ) -> Result<MarketData, ProviderError> {
        self.record("market", ticker);
        if self.fail_market {
            return Err(ProviderError::Api("503 Service Unavailable".into()));
        }
        Ok(self.market.clone())
    }
}
