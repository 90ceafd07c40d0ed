pub mod commands;

use serde_json::{Value, json};

use crate::{errors::Error, models::snapshot::Snapshot};

pub use commands::{Cli, Commands, Section};

impl Section {
    /// The part of `snapshot` this section prints.
    pub fn select(self, snapshot: &Snapshot) -> Result<Value, Error> {
        let value = match self {
            Section::All => serde_json::to_value(snapshot)?,
            Section::Info => serde_json::to_value(snapshot.info())?,
            Section::News => serde_json::to_value(snapshot.news())?,
            Section::Financials => serde_json::to_value(snapshot.financial_info()?)?,
            Section::Prices => json!({
                "price_sixm": snapshot.price_sixm(),
                "price_threey": snapshot.price_threey(),
            }),
            Section::BalanceSheet => serde_json::to_value(snapshot.balance_sheet())?,
        };
        Ok(value)
    }
}

/// One-line description of a snapshot for terminal output.
pub fn summary(snapshot: &Snapshot) -> String {
    format!(
        "{} info fields, {} news items, {}/{} daily bars (6mo/3y), {} balance sheet rows",
        snapshot.info().len(),
        snapshot.news().len(),
        snapshot.price_sixm().len(),
        snapshot.price_threey().len(),
        snapshot.balance_sheet().len(),
    )
}
