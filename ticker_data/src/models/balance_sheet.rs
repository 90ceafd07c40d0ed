//! Dated balance-sheet rows.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One reporting period of balance-sheet line items.
///
/// Line items are keyed by the provider's item name without the period
/// prefix, e.g. `TotalAssets`, `CashAndCashEquivalents`. An item the provider
/// reported without a value is `None` (`null` in the cache).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetRow {
    /// Period end date, `YYYY-MM-DD`.
    #[serde(rename = "asOfDate")]
    pub as_of_date: String,
    /// Reporting period length, e.g. `12M` or `3M`.
    #[serde(rename = "periodType")]
    pub period_type: String,
    #[serde(rename = "currencyCode", default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(flatten)]
    pub items: IndexMap<String, Option<f64>>,
}

impl BalanceSheetRow {
    pub fn new(as_of_date: impl Into<String>, period_type: impl Into<String>) -> Self {
        Self {
            as_of_date: as_of_date.into(),
            period_type: period_type.into(),
            currency_code: None,
            items: IndexMap::new(),
        }
    }

    /// The value of `item`, or `None` when it is absent or `null`.
    pub fn get(&self, item: &str) -> Option<f64> {
        self.items.get(item).copied().flatten()
    }
}
