//! News headlines attached to a ticker.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single news headline as returned by the provider.
///
/// Only the fields the presentation layer reads are typed; anything else the
/// provider sent (uuid, thumbnails, related tickers, ...) is kept in `extra`
/// so the cache file round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub publisher: String,
    /// Publish time in seconds since the Unix epoch.
    #[serde(rename = "providerPublishTime")]
    pub provider_publish_time: i64,
    pub link: String,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl NewsItem {
    /// The publish time as a UTC datetime, if the timestamp is in range.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.provider_publish_time, 0)
    }
}
