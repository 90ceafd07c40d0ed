//! Yahoo Finance response shapes and their conversion into our models.

use std::collections::{BTreeMap, HashMap};

use chrono::DateTime;
use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    models::{
        balance_sheet::BalanceSheetRow,
        news::NewsItem,
        price::{Bar, PriceHistory},
    },
    providers::{
        ProviderError,
        yahoo::params::{ANNUAL_PREFIX, BALANCE_SHEET_ITEMS, INFO_MODULES},
    },
};

/// The `error` object Yahoo embeds next to `result`.
#[derive(Deserialize, Debug)]
pub struct YahooError {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl From<YahooError> for ProviderError {
    fn from(err: YahooError) -> Self {
        ProviderError::Api(format!(
            "{}: {}",
            err.code.as_deref().unwrap_or("error"),
            err.description.as_deref().unwrap_or("no description")
        ))
    }
}

/// Picks the first entry of a `{result, error}` envelope.
fn first_result<T>(result: Option<Vec<T>>, error: Option<YahooError>) -> Result<T, ProviderError> {
    if let Some(err) = error {
        return Err(err.into());
    }
    result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| ProviderError::Internal("empty result list".into()))
}

// --- quote summary ---

#[derive(Deserialize, Debug)]
pub struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummary,
}

#[derive(Deserialize, Debug)]
pub struct QuoteSummary {
    pub result: Option<Vec<IndexMap<String, Value>>>,
    pub error: Option<YahooError>,
}

impl QuoteSummaryResponse {
    /// Merges all modules into one flat map.
    ///
    /// Modules are merged in [`INFO_MODULES`] order whatever order the
    /// response lists them in, followed by any modules not named there. A key
    /// repeated in a later module keeps its first value. `maxAge` bookkeeping
    /// is dropped and `{raw, fmt}` wrappers collapse to `raw`.
    pub fn into_info(self) -> Result<IndexMap<String, Value>, ProviderError> {
        let mut modules = first_result(self.quote_summary.result, self.quote_summary.error)?;

        let mut ordered: Vec<Value> = INFO_MODULES
            .iter()
            .filter_map(|name| modules.shift_remove(*name))
            .collect();
        ordered.extend(modules.into_values());

        let mut info = IndexMap::new();
        for body in ordered {
            let Value::Object(fields) = body else {
                continue;
            };
            for (key, value) in fields {
                if key == "maxAge" {
                    continue;
                }
                info.entry(key).or_insert_with(|| unwrap_raw(value));
            }
        }
        Ok(info)
    }
}

fn unwrap_raw(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("raw") => map.remove("raw").unwrap_or(Value::Null),
        Value::Object(map) if map.is_empty() => Value::Null,
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, unwrap_raw(v))).collect()),
        Value::Array(items) => Value::Array(items.into_iter().map(unwrap_raw).collect()),
        other => other,
    }
}

// --- search (news) ---

#[derive(Deserialize, Debug)]
pub struct SearchResponse {
    #[serde(default)]
    pub news: Vec<Value>,
}

impl SearchResponse {
    /// Keeps the items that carry every field [`NewsItem`] needs.
    pub fn into_news(self) -> Vec<NewsItem> {
        self.news
            .into_iter()
            .filter_map(|raw| match serde_json::from_value::<NewsItem>(raw) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!("Skipping malformed news item: {e}");
                    None
                }
            })
            .collect()
    }
}

// --- chart (price history) ---

#[derive(Deserialize, Debug)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Deserialize, Debug)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<YahooError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    /// Bar timestamps in seconds. Absent when the range has no trading days.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
    #[serde(default)]
    pub events: Events,
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    pub quote: Vec<QuoteColumns>,
}

#[derive(Deserialize, Debug, Default)]
pub struct QuoteColumns {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Events {
    #[serde(default)]
    pub dividends: HashMap<String, DividendEvent>,
    #[serde(default)]
    pub splits: HashMap<String, SplitEvent>,
}

#[derive(Deserialize, Debug)]
pub struct DividendEvent {
    pub amount: f64,
    pub date: i64,
}

#[derive(Deserialize, Debug)]
pub struct SplitEvent {
    pub date: i64,
    pub numerator: f64,
    pub denominator: f64,
}

impl ChartResponse {
    pub fn into_history(self) -> Result<PriceHistory, ProviderError> {
        let result = first_result(self.chart.result, self.chart.error)?;
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        let dividends: HashMap<i64, f64> = result
            .events
            .dividends
            .into_values()
            .map(|d| (d.date, d.amount))
            .collect();
        let splits: HashMap<i64, f64> = result
            .events
            .splits
            .into_values()
            .filter(|s| s.denominator != 0.0)
            .map(|s| (s.date, s.numerator / s.denominator))
            .collect();

        let at = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten();

        let mut history = PriceHistory::default();
        let mut skipped = 0usize;
        for (i, &ts) in result.timestamp.iter().enumerate() {
            let (Some(open), Some(high), Some(low), Some(close), Some(timestamp)) = (
                at(&quote.open, i),
                at(&quote.high, i),
                at(&quote.low, i),
                at(&quote.close, i),
                DateTime::from_timestamp(ts, 0),
            ) else {
                skipped += 1;
                continue;
            };
            history.push(Bar {
                timestamp,
                open,
                high,
                low,
                close,
                volume: at(&quote.volume, i).unwrap_or(0.0),
                dividends: dividends.get(&ts).copied().unwrap_or(0.0),
                stock_splits: splits.get(&ts).copied().unwrap_or(0.0),
            });
        }

        if skipped > 0 {
            warn!("Skipped {skipped} price rows with missing OHLC values");
        }
        Ok(history)
    }
}

// --- fundamentals timeseries (balance sheet) ---

#[derive(Deserialize, Debug)]
pub struct TimeseriesResponse {
    pub timeseries: Timeseries,
}

#[derive(Deserialize, Debug)]
pub struct Timeseries {
    pub result: Option<Vec<TimeseriesEntry>>,
    pub error: Option<YahooError>,
}

/// One requested series. The data lives under a key equal to `meta.type[0]`.
#[derive(Deserialize, Debug)]
pub struct TimeseriesEntry {
    pub meta: TimeseriesMeta,
    #[serde(flatten)]
    pub series: HashMap<String, Value>,
}

#[derive(Deserialize, Debug)]
pub struct TimeseriesMeta {
    #[serde(rename = "type")]
    pub kind: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct TimeseriesPoint {
    #[serde(rename = "asOfDate")]
    pub as_of_date: String,
    #[serde(rename = "periodType")]
    pub period_type: String,
    #[serde(rename = "currencyCode")]
    pub currency_code: Option<String>,
    #[serde(rename = "reportedValue")]
    pub reported_value: ReportedValue,
}

#[derive(Deserialize, Debug)]
pub struct ReportedValue {
    pub raw: f64,
}

impl TimeseriesResponse {
    /// Pivots the per-item series into one row per `asOfDate`, oldest first.
    /// Items within a row follow [`BALANCE_SHEET_ITEMS`] order.
    pub fn into_rows(self) -> Result<Vec<BalanceSheetRow>, ProviderError> {
        if let Some(err) = self.timeseries.error {
            return Err(err.into());
        }

        let mut by_item: HashMap<String, Vec<TimeseriesPoint>> = HashMap::new();
        for mut entry in self.timeseries.result.unwrap_or_default() {
            let Some(kind) = entry.meta.kind.into_iter().next() else {
                continue;
            };
            let Some(raw) = entry.series.remove(&kind) else {
                continue;
            };
            let points: Vec<Option<TimeseriesPoint>> = serde_json::from_value(raw)
                .map_err(|e| ProviderError::Internal(format!("bad {kind} series: {e}")))?;
            let item = kind.strip_prefix(ANNUAL_PREFIX).unwrap_or(&kind).to_string();
            by_item.insert(item, points.into_iter().flatten().collect());
        }

        let mut rows: BTreeMap<String, BalanceSheetRow> = BTreeMap::new();
        for item in BALANCE_SHEET_ITEMS {
            let Some(points) = by_item.remove(item) else {
                continue;
            };
            for point in points {
                let row = rows.entry(point.as_of_date.clone()).or_insert_with(|| {
                    BalanceSheetRow::new(point.as_of_date.clone(), point.period_type.clone())
                });
                if row.currency_code.is_none() {
                    row.currency_code = point.currency_code;
                }
                row.items.insert(item.to_string(), Some(point.reported_value.raw));
            }
        }
        Ok(rows.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quote_summary_modules_are_flattened() {
        let response: QuoteSummaryResponse = serde_json::from_value(json!({
            "quoteSummary": {
                "result": [{
                    "financialData": {
                        "maxAge": 86400,
                        "totalRevenue": {"raw": 383285000000i64, "fmt": "383.29B"},
                        "grossProfits": 169148000000i64,
                        "debtToEquity": 181.3,
                        "profitMargins": 0.2531,
                        "targetHighPrice": {},
                    },
                    "summaryDetail": {
                        "maxAge": 1,
                        "marketCap": 2950000000000i64,
                        "forwardPE": 28.4,
                    },
                    "price": {
                        "marketCap": {"raw": 1, "fmt": "1"},
                        "currency": "USD",
                    },
                    "assetProfile": {
                        "companyOfficers": [{"name": "Tim", "totalPay": {"raw": 16425933, "fmt": "16.43M"}}],
                    },
                }],
                "error": null,
            }
        }))
        .unwrap();

        let info = response.into_info().unwrap();
        assert!(!info.contains_key("maxAge"));
        assert_eq!(info["totalRevenue"], json!(383285000000i64));
        assert_eq!(info["targetHighPrice"], Value::Null);
        // First module wins.
        assert_eq!(info["marketCap"], json!(2950000000000i64));
        assert_eq!(info["currency"], "USD");
        assert_eq!(info["companyOfficers"][0]["totalPay"], json!(16425933));
        assert_eq!(info.get_index(0).unwrap().0, "totalRevenue");
    }

    #[test]
    fn quote_summary_merges_in_module_rank_order() {
        let response: QuoteSummaryResponse = serde_json::from_value(json!({
            "quoteSummary": {
                "result": [{
                    "extraModule": {"forwardPE": 33, "beta": 1.1},
                    "summaryDetail": {"forwardPE": 11, "dividendYield": 0.005},
                    "defaultKeyStatistics": {"forwardPE": {"raw": 22, "fmt": "22.00"}},
                }],
                "error": null,
            }
        }))
        .unwrap();

        let info = response.into_info().unwrap();
        assert_eq!(info["forwardPE"], json!(22));
        assert_eq!(info["beta"], json!(1.1));
        let keys: Vec<&str> = info.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["forwardPE", "dividendYield", "beta"]);
    }

    #[test]
    fn quote_summary_error_is_surfaced() {
        let response: QuoteSummaryResponse = serde_json::from_value(json!({
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZ"},
            }
        }))
        .unwrap();
        let err = response.into_info().unwrap_err();
        assert!(matches!(err, ProviderError::Api(ref m) if m.contains("ZZZZ")));
    }

    #[test]
    fn news_items_without_required_fields_are_dropped() {
        let response: SearchResponse = serde_json::from_value(json!({
            "news": [
                {"title": "A", "publisher": "P", "link": "https://a", "providerPublishTime": 1, "uuid": "1"},
                {"title": "no publisher", "link": "https://b", "providerPublishTime": 2},
            ]
        }))
        .unwrap();
        let news = response.into_news();
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].title, "A");
    }

    #[test]
    fn chart_rows_with_events() {
        let response: ChartResponse = serde_json::from_value(json!({
            "chart": {
                "result": [{
                    "meta": {"symbol": "AAPL"},
                    "timestamp": [1_700_000_000, 1_700_086_400, 1_700_172_800],
                    "events": {
                        "dividends": {"1700086400": {"amount": 0.24, "date": 1_700_086_400}},
                        "splits": {"1700172800": {"date": 1_700_172_800, "numerator": 4.0, "denominator": 1.0, "splitRatio": "4:1"}},
                    },
                    "indicators": {
                        "quote": [{
                            "open": [1.0, null, 3.0],
                            "high": [1.5, 2.5, 3.5],
                            "low": [0.5, 1.5, 2.5],
                            "close": [1.2, 2.2, 3.2],
                            "volume": [100, 200, null],
                        }],
                        "adjclose": [{"adjclose": [1.2, 2.2, 3.2]}],
                    },
                }],
                "error": null,
            }
        }))
        .unwrap();

        let history = response.into_history().unwrap();
        // Middle row has no open price.
        assert_eq!(history.len(), 2);
        assert_eq!(history.volume[&1_700_172_800_000], Some(0.0));
        assert_eq!(history.stock_splits[&1_700_172_800_000], Some(4.0));
        assert_eq!(history.dividends[&1_700_000_000_000], Some(0.0));
        assert!(!history.dividends.contains_key(&1_700_086_400_000));
    }

    #[test]
    fn chart_without_timestamps_is_empty() {
        let response: ChartResponse = serde_json::from_value(json!({
            "chart": {
                "result": [{"meta": {}, "indicators": {"quote": [{}]}}],
                "error": null,
            }
        }))
        .unwrap();
        assert!(response.into_history().unwrap().is_empty());
    }

    #[test]
    fn timeseries_pivots_to_dated_rows() {
        let point = |date: &str, raw: f64| {
            json!({
                "asOfDate": date,
                "periodType": "12M",
                "currencyCode": "USD",
                "reportedValue": {"raw": raw, "fmt": "x"},
            })
        };
        let response: TimeseriesResponse = serde_json::from_value(json!({
            "timeseries": {
                "result": [
                    {
                        "meta": {"symbol": ["AAPL"], "type": ["annualTotalDebt"]},
                        "timestamp": [1],
                        "annualTotalDebt": [point("2023-09-30", 111.0), null],
                    },
                    {
                        "meta": {"symbol": ["AAPL"], "type": ["annualTotalAssets"]},
                        "timestamp": [1, 2],
                        "annualTotalAssets": [point("2023-09-30", 352.0), point("2022-09-30", 351.0)],
                    },
                    {
                        "meta": {"symbol": ["AAPL"], "type": ["annualCashFinancial"]},
                    },
                ],
                "error": null,
            }
        }))
        .unwrap();

        let rows = response.into_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].as_of_date, "2022-09-30");
        assert_eq!(rows[0].get("TotalDebt"), None);
        assert_eq!(rows[1].get("TotalDebt"), Some(111.0));
        assert_eq!(rows[1].currency_code.as_deref(), Some("USD"));
        let keys: Vec<&str> = rows[1].items.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["TotalAssets", "TotalDebt"]);
    }
}
