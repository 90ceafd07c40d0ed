//! Endpoints and fixed query parameters for the Yahoo Finance JSON API.

use crate::models::price::HistoryRange;

pub const QUERY1_URL: &str = "https://query1.finance.yahoo.com";
pub const QUERY2_URL: &str = "https://query2.finance.yahoo.com";
/// Visiting this host hands out the session cookies the crumb is tied to.
pub const COOKIE_URL: &str = "https://fc.yahoo.com";

/// Quote-summary modules merged into the flat `info` map, in merge order.
pub const INFO_MODULES: [&str; 7] = [
    "financialData",
    "quoteType",
    "defaultKeyStatistics",
    "assetProfile",
    "summaryDetail",
    "summaryProfile",
    "price",
];

/// Earliest `period1` Yahoo accepts for fundamentals (1985-08-22).
pub const FUNDAMENTALS_START: i64 = 493_590_046;

/// Balance-sheet items requested from the fundamentals timeseries, in row order.
pub const BALANCE_SHEET_ITEMS: [&str; 66] = [
    "TotalAssets",
    "CurrentAssets",
    "CashCashEquivalentsAndShortTermInvestments",
    "CashAndCashEquivalents",
    "CashFinancial",
    "CashEquivalents",
    "OtherShortTermInvestments",
    "AvailableForSaleSecurities",
    "Receivables",
    "AccountsReceivable",
    "GrossAccountsReceivable",
    "AllowanceForDoubtfulAccountsReceivable",
    "OtherReceivables",
    "Inventory",
    "OtherCurrentAssets",
    "TotalNonCurrentAssets",
    "NetPPE",
    "GrossPPE",
    "LandAndImprovements",
    "BuildingsAndImprovements",
    "MachineryFurnitureEquipment",
    "ConstructionInProgress",
    "Leases",
    "AccumulatedDepreciation",
    "GoodwillAndOtherIntangibleAssets",
    "Goodwill",
    "OtherIntangibleAssets",
    "InvestmentsAndAdvances",
    "OtherNonCurrentAssets",
    "TotalLiabilitiesNetMinorityInterest",
    "CurrentLiabilities",
    "PayablesAndAccruedExpenses",
    "Payables",
    "AccountsPayable",
    "TotalTaxPayable",
    "CurrentAccruedExpenses",
    "CurrentDebtAndCapitalLeaseObligation",
    "CurrentDebt",
    "CommercialPaper",
    "OtherCurrentBorrowings",
    "CurrentCapitalLeaseObligation",
    "CurrentDeferredLiabilities",
    "CurrentDeferredRevenue",
    "OtherCurrentLiabilities",
    "TotalNonCurrentLiabilitiesNetMinorityInterest",
    "LongTermDebtAndCapitalLeaseObligation",
    "LongTermDebt",
    "LongTermCapitalLeaseObligation",
    "TradeandOtherPayablesNonCurrent",
    "OtherNonCurrentLiabilities",
    "TotalEquityGrossMinorityInterest",
    "StockholdersEquity",
    "CapitalStock",
    "CommonStock",
    "AdditionalPaidInCapital",
    "RetainedEarnings",
    "TreasuryStock",
    "CommonStockEquity",
    "TotalCapitalization",
    "InvestedCapital",
    "TangibleBookValue",
    "NetTangibleAssets",
    "WorkingCapital",
    "TotalDebt",
    "NetDebt",
    "ShareIssued",
];

/// Prefix Yahoo puts on annual fundamentals series names.
pub const ANNUAL_PREFIX: &str = "annual";

pub fn quote_summary_url(symbol: &str) -> String {
    format!("{QUERY2_URL}/v10/finance/quoteSummary/{symbol}")
}

pub fn quote_summary_query(crumb: &str) -> Vec<(&'static str, String)> {
    vec![
        ("modules", INFO_MODULES.join(",")),
        ("formatted", "false".to_string()),
        ("corsDomain", "finance.yahoo.com".to_string()),
        ("crumb", crumb.to_string()),
    ]
}

pub fn crumb_url() -> String {
    format!("{QUERY1_URL}/v1/test/getcrumb")
}

pub fn search_url() -> String {
    format!("{QUERY2_URL}/v1/finance/search")
}

pub fn search_query(symbol: &str, news_count: u32) -> Vec<(&'static str, String)> {
    vec![
        ("q", symbol.to_string()),
        ("quotesCount", "0".to_string()),
        ("newsCount", news_count.to_string()),
        ("enableFuzzyQuery", "false".to_string()),
    ]
}

pub fn chart_url(symbol: &str) -> String {
    format!("{QUERY2_URL}/v8/finance/chart/{symbol}")
}

pub fn chart_query(range: HistoryRange) -> Vec<(&'static str, String)> {
    vec![
        ("range", range.as_param().to_string()),
        ("interval", "1d".to_string()),
        ("events", "div,splits".to_string()),
        ("includePrePost", "false".to_string()),
    ]
}

pub fn timeseries_url(symbol: &str) -> String {
    format!("{QUERY2_URL}/ws/fundamentals-timeseries/v1/finance/timeseries/{symbol}")
}

/// `period2` is the current Unix time in seconds.
pub fn timeseries_query(symbol: &str, period2: i64) -> Vec<(&'static str, String)> {
    let types = BALANCE_SHEET_ITEMS
        .iter()
        .map(|item| format!("{ANNUAL_PREFIX}{item}"))
        .collect::<Vec<_>>()
        .join(",");
    vec![
        ("symbol", symbol.to_string()),
        ("type", types),
        ("period1", FUNDAMENTALS_START.to_string()),
        ("period2", period2.to_string()),
    ]
}
