//! Command-line interface definitions.
//!
//! Defines the CLI structure for the kimchi application using `clap`:
//! running the alert monitor, on-demand premium and exchange reports,
//! exchange market browsing, and configuration checks.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::{CandleInterval, Currency};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Korean crypto market monitor: kimchi premium reports and alerts
#[derive(Parser, Debug)]
#[command(name = "kimchi")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the kimchi CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the premium alert monitor until Ctrl-C
    Run(RunArgs),

    /// Show the kimchi premium of a coin
    Premium(SymbolArgs),

    /// Compare a coin's price on Upbit and Bithumb
    Compare(SymbolArgs),

    /// Show Upbit tickers with 24h statistics
    Price(PriceArgs),

    /// List Upbit markets for a quote currency
    Markets(MarketsArgs),

    /// Show the Upbit order book of a coin
    Orderbook(OrderbookArgs),

    /// Show recent Upbit candles of a coin
    Candles(CandlesArgs),

    /// Show the KRW markets with the largest 24h change
    Movers(MoversArgs),

    /// Validate configuration and show effective alert settings
    Check(ConfigPathArg),
}

/// Shared argument for commands that read the configuration file.
///
/// Without `--config`, `config.toml` in the working directory is used when
/// present and built-in defaults otherwise.
#[derive(Parser, Debug, Default)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Log alerts instead of sending them to Telegram
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `premium` and `compare` subcommands.
#[derive(Parser, Debug)]
pub struct SymbolArgs {
    /// Coin symbol, e.g. BTC (case-insensitive)
    pub symbol: String,

    #[command(flatten)]
    pub config: ConfigPathArg,
}

/// Arguments for the `price` subcommand.
#[derive(Parser, Debug)]
pub struct PriceArgs {
    /// Coin symbols, e.g. BTC ETH
    #[arg(required = true)]
    pub symbols: Vec<String>,

    #[command(flatten)]
    pub config: ConfigPathArg,
}

/// Quote currency of an Upbit market.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuoteArg {
    #[default]
    Krw,
    Btc,
    Usdt,
}

impl From<QuoteArg> for Currency {
    fn from(quote: QuoteArg) -> Self {
        match quote {
            QuoteArg::Krw => Self::Krw,
            QuoteArg::Btc => Self::Btc,
            QuoteArg::Usdt => Self::Usdt,
        }
    }
}

/// Arguments for the `markets` subcommand.
#[derive(Parser, Debug)]
pub struct MarketsArgs {
    /// Quote currency to list
    #[arg(long, value_enum, default_value_t = QuoteArg::Krw)]
    pub quote: QuoteArg,

    #[command(flatten)]
    pub config: ConfigPathArg,
}

/// Arguments for the `orderbook` subcommand.
#[derive(Parser, Debug)]
pub struct OrderbookArgs {
    /// Coin symbol, e.g. BTC
    pub symbol: String,

    /// Levels to show on each side
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..=15))]
    pub depth: u16,

    #[command(flatten)]
    pub config: ConfigPathArg,
}

/// Arguments for the `candles` subcommand.
#[derive(Parser, Debug)]
pub struct CandlesArgs {
    /// Coin symbol, e.g. BTC
    pub symbol: String,

    /// Candle width: minutes/N (N in 1,3,5,10,15,30,60,240), days, weeks or months
    #[arg(short, long, default_value = "days")]
    pub interval: CandleInterval,

    /// Number of candles, newest first
    #[arg(short = 'n', long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=200))]
    pub count: u16,

    #[command(flatten)]
    pub config: ConfigPathArg,
}

/// Arguments for the `movers` subcommand.
#[derive(Parser, Debug)]
pub struct MoversArgs {
    /// Rank the largest falls instead of the largest rises
    #[arg(long)]
    pub down: bool,

    /// Number of markets to show
    #[arg(short = 'n', long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=100))]
    pub limit: u16,

    #[command(flatten)]
    pub config: ConfigPathArg,
}
