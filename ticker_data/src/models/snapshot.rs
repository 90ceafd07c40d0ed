//! The cached data bundle for one ticker.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::Error,
    models::{balance_sheet::BalanceSheetRow, news::NewsItem, price::PriceHistory},
    providers::MarketData,
};

/// Display title and `info` key of each entry returned by
/// [`Snapshot::financial_info`], in output order.
pub const FINANCIAL_FIELDS: [(&str, &str); 6] = [
    ("Market cap", "marketCap"),
    ("PE Ratio", "forwardPE"),
    ("Total revenue", "totalRevenue"),
    ("Gross profit", "grossProfits"),
    ("Debt to equity", "debtToEquity"),
    ("Profit margin", "profitMargins"),
];

/// Everything known about one ticker, exactly as stored in `<TICKER>.json`.
///
/// A snapshot is built whole (from a refresh or from the cache file) and is
/// not modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    info: IndexMap<String, Value>,
    news: Vec<NewsItem>,
    price_sixm: PriceHistory,
    price_threey: PriceHistory,
    balance_sheet: Vec<BalanceSheetRow>,
}

/// One `{title, value}` pair for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialItem {
    pub title: String,
    pub value: Value,
}

impl Snapshot {
    /// Assembles a snapshot from the two provider results.
    pub fn from_parts(market: MarketData, balance_sheet: Vec<BalanceSheetRow>) -> Self {
        Self {
            info: market.info,
            news: market.news,
            price_sixm: market.price_sixm,
            price_threey: market.price_threey,
            balance_sheet,
        }
    }

    pub fn info(&self) -> &IndexMap<String, Value> {
        &self.info
    }

    pub fn news(&self) -> &[NewsItem] {
        &self.news
    }

    /// Daily prices over the last six months.
    pub fn price_sixm(&self) -> &PriceHistory {
        &self.price_sixm
    }

    /// Daily prices over the last three years.
    pub fn price_threey(&self) -> &PriceHistory {
        &self.price_threey
    }

    pub fn balance_sheet(&self) -> &[BalanceSheetRow] {
        &self.balance_sheet
    }

    /// Projects the headline figures out of `info`.
    ///
    /// Returns [`Error::MissingField`] naming the first absent key. A key that
    /// is present with a `null` value is passed through as `null`.
    pub fn financial_info(&self) -> Result<Vec<FinancialItem>, Error> {
        FINANCIAL_FIELDS
            .iter()
            .map(|&(title, key)| {
                let value = self
                    .info
                    .get(key)
                    .ok_or_else(|| Error::MissingField(key.to_string()))?;
                Ok(FinancialItem {
                    title: title.to_string(),
                    value: value.clone(),
                })
            })
            .collect()
    }
}
