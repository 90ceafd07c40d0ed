use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(author, version, about = "Fetch, cache and inspect stock ticker data")]
pub struct Cli {
    /// Path to the config file (ticker_data.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Cache directory; overrides the config file and TICKER_DATA_DIR
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch fresh data for a ticker and overwrite its cache file
    Fetch {
        /// Ticker symbol (case-insensitive, e.g. "aapl")
        ticker: String,
    },

    /// Print cached data for a ticker as JSON
    Show {
        ticker: String,

        /// Which part of the snapshot to print
        #[arg(long, value_enum, default_value_t = Section::All)]
        section: Section,
    },

    /// Print the headline financial figures as JSON
    Financials {
        ticker: String,

        /// Refresh the cache before reading
        #[arg(long)]
        refresh: bool,
    },

    /// List tickers that have a cache file
    List,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Section {
    All,
    Info,
    News,
    Financials,
    Prices,
    BalanceSheet,
}
