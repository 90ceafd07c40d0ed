//! Daily OHLCV price history.
//!
//! The cache stores price history column-first, keyed by millisecond
//! timestamp, e.g. `{"Open": {"1700000000000": 189.3, ...}, "Close": {...}}`.
//! [`PriceHistory`] mirrors that layout directly; [`Bar`] is the row view used
//! when building or walking a series. Cells may be `null`, and columns other
//! than the OHLCV ones (e.g. `Capital Gains`, `Adj Close`) are carried along
//! untouched.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One column of a price history: millisecond timestamp -> value, `None` for
/// a `null` cell.
pub type Column = BTreeMap<i64, Option<f64>>;

/// The cache layout: column name -> column.
pub type ColumnMap = IndexMap<String, Column>;

const OPEN: &str = "Open";
const HIGH: &str = "High";
const LOW: &str = "Low";
const CLOSE: &str = "Close";
const VOLUME: &str = "Volume";
const DIVIDENDS: &str = "Dividends";
const STOCK_SPLITS: &str = "Stock Splits";

/// The fixed look-back windows fetched on refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRange {
    SixMonths,
    ThreeYears,
}

impl HistoryRange {
    /// The range parameter understood by the chart endpoint.
    pub fn as_param(&self) -> &'static str {
        match self {
            HistoryRange::SixMonths => "6mo",
            HistoryRange::ThreeYears => "3y",
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// A single daily bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Bar time as reported by the provider, in UTC.
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Cash dividend paid on this day, 0 when none.
    pub dividends: f64,
    /// Split ratio effective on this day, 0 when none.
    pub stock_splits: f64,
}

/// Column-oriented OHLCV history. Every column may be absent in the cache
/// document, so `{}` decodes to an empty history. Empty OHLCV columns are
/// left out when encoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColumnMap", into = "ColumnMap")]
pub struct PriceHistory {
    pub open: Column,
    pub high: Column,
    pub low: Column,
    pub close: Column,
    pub volume: Column,
    pub dividends: Column,
    pub stock_splits: Column,
    /// Any other columns, in document order.
    pub extra: ColumnMap,
}

impl From<ColumnMap> for PriceHistory {
    fn from(mut columns: ColumnMap) -> Self {
        let mut take = |name: &str| columns.shift_remove(name).unwrap_or_default();
        Self {
            open: take(OPEN),
            high: take(HIGH),
            low: take(LOW),
            close: take(CLOSE),
            volume: take(VOLUME),
            dividends: take(DIVIDENDS),
            stock_splits: take(STOCK_SPLITS),
            extra: columns,
        }
    }
}

impl From<PriceHistory> for ColumnMap {
    fn from(history: PriceHistory) -> Self {
        let named = [
            (OPEN, history.open),
            (HIGH, history.high),
            (LOW, history.low),
            (CLOSE, history.close),
            (VOLUME, history.volume),
            (DIVIDENDS, history.dividends),
            (STOCK_SPLITS, history.stock_splits),
        ];
        let mut columns: ColumnMap = named
            .into_iter()
            .filter(|(_, column)| !column.is_empty())
            .map(|(name, column)| (name.to_string(), column))
            .collect();
        columns.extend(history.extra);
        columns
    }
}

impl PriceHistory {
    /// Number of rows, counted on the close column.
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Inserts (or replaces) the row at `bar.timestamp`.
    pub fn push(&mut self, bar: Bar) {
        let ts = bar.timestamp.timestamp_millis();
        self.open.insert(ts, Some(bar.open));
        self.high.insert(ts, Some(bar.high));
        self.low.insert(ts, Some(bar.low));
        self.close.insert(ts, Some(bar.close));
        self.volume.insert(ts, Some(bar.volume));
        self.dividends.insert(ts, Some(bar.dividends));
        self.stock_splits.insert(ts, Some(bar.stock_splits));
    }

    /// Rows in timestamp order. Rows missing any of open/high/low/close, or
    /// holding `null` there, are skipped; missing volume, dividend or split
    /// values read as 0.
    pub fn bars(&self) -> impl Iterator<Item = Bar> + '_ {
        let cell = |column: &Column, ts: i64| column.get(&ts).copied().flatten();
        self.close.iter().filter_map(move |(&ts, &close)| {
            Some(Bar {
                timestamp: DateTime::from_timestamp_millis(ts)?,
                open: cell(&self.open, ts)?,
                high: cell(&self.high, ts)?,
                low: cell(&self.low, ts)?,
                close: close?,
                volume: cell(&self.volume, ts).unwrap_or(0.0),
                dividends: cell(&self.dividends, ts).unwrap_or(0.0),
                stock_splits: cell(&self.stock_splits, ts).unwrap_or(0.0),
            })
        })
    }

    /// The most recent non-null close, if any.
    pub fn last_close(&self) -> Option<f64> {
        self.close.values().rev().find_map(|close| *close)
    }
}

impl FromIterator<Bar> for PriceHistory {
    fn from_iter<I: IntoIterator<Item = Bar>>(iter: I) -> Self {
        let mut history = PriceHistory::default();
        for bar in iter {
            history.push(bar);
        }
        history
    }
}
