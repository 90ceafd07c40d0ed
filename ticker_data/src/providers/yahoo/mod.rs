//! Yahoo Finance provider.
//!
//! Balance sheets come from the fundamentals timeseries endpoint; info, news
//! and daily price history come from the quote-summary, search and chart
//! endpoints. No API key is needed, but quote-summary calls require a
//! session cookie and crumb, which [`YahooProvider`] manages itself.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::YahooProvider;
