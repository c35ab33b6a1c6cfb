// =============================================================================
// Straits Screener — Main Entry Point
// =============================================================================
//
// Thin shell around the library modules: parse the command line, initialise
// logging, load configuration, build the market snapshot, run the requested
// screen, print the report. Diagnostics go to tracing on stderr; the report
// itself goes to stdout.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod config;
mod error;
mod fetch;
mod indicators;
mod market_data;
mod screen;
mod types;
mod universe;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ScreenerConfig;
use crate::fetch::alpha_vantage::{AlphaVantageClient, OutputSize};
use crate::fetch::pacing::RequestPacer;
use crate::market_data::{MarketSnapshot, SeriesStore};
use crate::screen::crossover::{self, CrossoverReport};
use crate::screen::levels::{self, LevelReport};
use crate::screen::movers::{self, MoversReport};
use crate::screen::settings::{RsiSettings, StochRsiSettings};
use crate::screen::{RankedEntry, Skipped};
use crate::types::{Classification, MacdSignal};

#[derive(Parser)]
#[command(
    name = "straits-screener",
    version,
    about = "Technical-analysis screens over the Straits Times Index basket"
)]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long, default_value = "screener.json", global = true)]
    config: PathBuf,

    /// Override the archive directory from the configuration.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh the local CSV archive from Alpha Vantage.
    Update {
        /// Fetch full history instead of the latest ~100 sessions.
        #[arg(long)]
        full: bool,
    },

    /// Screen the basket by Relative Strength Index.
    Rsi {
        /// Lookback window in sessions (2-99).
        #[arg(long, default_value_t = 14)]
        timeframe: usize,

        /// Overbought at or above this value (70-100).
        #[arg(long, default_value_t = 70)]
        overbought: u32,

        /// Oversold at or below this value (0-30).
        #[arg(long, default_value_t = 30)]
        oversold: u32,
    },

    /// Screen the basket by Stochastic RSI.
    StochRsi {
        /// Lookback window in sessions (2-97).
        #[arg(long, default_value_t = 14)]
        timeframe: usize,

        /// Overbought at or above this value (0.7-1.0).
        #[arg(long, default_value_t = 0.8)]
        overbought: f64,

        /// Oversold at or below this value (0.0-0.3).
        #[arg(long, default_value_t = 0.2)]
        oversold: f64,
    },

    /// Screen the basket for MACD signal-line crossovers.
    Macd,

    /// Rank the basket by percentage change in price and volume.
    Movers {
        /// Instruments listed per ranking.
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ScreenerConfig::load(&cli.config).unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        ScreenerConfig::default()
    });
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    info!(
        data_dir = %config.data_dir.display(),
        basket = config.universe.len(),
        "straits screener starting"
    );

    let store = SeriesStore::new(&config.data_dir);

    // ── 2. Dispatch ──────────────────────────────────────────────────────
    match cli.command {
        Command::Update { full } => run_update(&config, &store, full).await?,
        Command::Rsi {
            timeframe,
            overbought,
            oversold,
        } => {
            let settings = RsiSettings::new(timeframe, overbought, oversold)?;
            let snapshot = load_snapshot(&config, &store);
            let report = levels::run_rsi(&snapshot, &settings);
            print_level_report(
                "RSI",
                settings.timeframe,
                settings.overbought,
                settings.oversold,
                &report,
            );
        }
        Command::StochRsi {
            timeframe,
            overbought,
            oversold,
        } => {
            let settings = StochRsiSettings::new(timeframe, overbought, oversold)?;
            let snapshot = load_snapshot(&config, &store);
            let report = levels::run_stoch_rsi(&snapshot, &settings);
            print_level_report(
                "STOCHASTIC RSI",
                settings.timeframe,
                settings.overbought,
                settings.oversold,
                &report,
            );
        }
        Command::Macd => {
            let snapshot = load_snapshot(&config, &store);
            let report = crossover::run_macd(&snapshot);
            print_crossover_report(&report);
        }
        Command::Movers { count } => {
            let snapshot = load_snapshot(&config, &store);
            let report = movers::run_movers(&snapshot, count);
            print_movers_report(&report);
        }
    }

    Ok(())
}

fn load_snapshot(config: &ScreenerConfig, store: &SeriesStore) -> MarketSnapshot {
    MarketSnapshot::load(store, &config.universe, &universe::sgx_holidays())
}

async fn run_update(
    config: &ScreenerConfig,
    store: &SeriesStore,
    full: bool,
) -> anyhow::Result<()> {
    let api_key = std::env::var("ALPHAVANTAGE_API_KEY")
        .context("ALPHAVANTAGE_API_KEY is not set (put it in the environment or a .env file)")?;

    let client = AlphaVantageClient::new(api_key);
    let mut pacer = RequestPacer::new(Duration::from_secs(config.request_gap_secs));
    let size = if full {
        OutputSize::Full
    } else {
        OutputSize::Compact
    };

    let refreshed =
        fetch::refresh_archive(&client, store, &config.universe, &mut pacer, size).await;
    if refreshed == 0 {
        anyhow::bail!("archive refresh failed for every instrument");
    }
    Ok(())
}

// =============================================================================
// Report rendering
// =============================================================================

fn print_level_report(
    title: &str,
    timeframe: usize,
    overbought: f64,
    oversold: f64,
    report: &LevelReport,
) {
    println!("===== {title} SCREEN =====");
    println!("timeframe {timeframe}, overbought >= {overbought}, oversold <= {oversold}");
    println!();

    for (bucket, entries) in [
        (Classification::Overbought, &report.overbought),
        (Classification::Neutral, &report.neutral),
        (Classification::Oversold, &report.oversold),
    ] {
        print_ranked(&bucket.to_string().to_uppercase(), entries);
    }
    print_skipped(&report.skipped);
}

fn print_ranked(header: &str, entries: &[RankedEntry]) {
    println!("{header}");
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in entries {
        println!("  {:<26} {:>8.2}", entry.instrument.to_string(), entry.value);
    }
    println!();
}

fn print_crossover_report(report: &CrossoverReport) {
    println!("===== MACD SCREEN =====");
    println!("spans 12/26/9, signal-line crossover over the last two sessions");
    println!();

    for (state, bucket) in [
        (MacdSignal::BullishCross, &report.bullish),
        (MacdSignal::BearishCross, &report.bearish),
        (MacdSignal::NoCross, &report.no_cross),
    ] {
        println!("{}", state.to_string().to_uppercase());
        if bucket.is_empty() {
            println!("  (none)");
        }
        for instrument in bucket {
            println!("  {instrument}");
        }
        println!();
    }

    print_skipped(&report.skipped);
}

fn print_movers_report(report: &MoversReport) {
    println!("===== TOP MOVERS =====");
    println!("top {} by percentage change in price and volume", report.count);
    println!();

    for horizon in &report.horizons {
        let label = horizon.horizon.to_string().to_uppercase();
        let sessions = horizon.horizon.sessions();
        println!("--- {label} ({sessions} session lookback) ---");
        print_percent("PRICE GAINERS", &horizon.price_gainers);
        print_percent("PRICE DECLINERS", &horizon.price_decliners);
        print_percent("VOLUME GAINERS", &horizon.volume_gainers);
        print_percent("VOLUME DECLINERS", &horizon.volume_decliners);
    }

    print_skipped(&report.skipped);
}

fn print_percent(header: &str, entries: &[RankedEntry]) {
    println!("{header}");
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in entries {
        println!(
            "  {:<26} {:>+9.2}%",
            entry.instrument.to_string(),
            entry.value
        );
    }
    println!();
}

fn print_skipped(skipped: &[Skipped]) {
    if skipped.is_empty() {
        return;
    }
    println!("SKIPPED");
    for skip in skipped {
        println!("  {:<26} {}", skip.instrument.to_string(), skip.error);
    }
    println!();
}
