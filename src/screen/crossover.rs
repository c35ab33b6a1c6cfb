// =============================================================================
// MACD Crossover Screen
// =============================================================================
//
// Partitions the basket by the signal-line crossover state of the two most
// recent sessions. There are no thresholds to configure and no scalar to
// rank on, so every bucket keeps universe order.

use tracing::info;

use crate::error::ScreenError;
use crate::indicators::macd::{calculate_macd, latest_crossover, MIN_SESSIONS};
use crate::market_data::snapshot::MarketSnapshot;
use crate::screen::{sweep, Skipped};
use crate::types::{Instrument, MacdSignal};

/// Outcome of a MACD screen run, buckets in universe order.
#[derive(Debug, Clone, Default)]
pub struct CrossoverReport {
    pub bullish: Vec<Instrument>,
    pub bearish: Vec<Instrument>,
    pub no_cross: Vec<Instrument>,
    pub skipped: Vec<Skipped>,
}

impl CrossoverReport {
    /// Number of instruments that landed in a bucket.
    pub fn classified(&self) -> usize {
        self.bullish.len() + self.bearish.len() + self.no_cross.len()
    }
}

/// Run the MACD crossover screen across the whole snapshot.
pub fn run_macd(snapshot: &MarketSnapshot) -> CrossoverReport {
    let (outcomes, skipped) = sweep(snapshot, |_, series| {
        if series.len() < MIN_SESSIONS {
            return Err(ScreenError::DataInsufficient {
                needed: MIN_SESSIONS,
                available: series.len(),
            });
        }
        latest_crossover(&calculate_macd(&series.closes())).ok_or(
            ScreenError::DataInsufficient {
                needed: MIN_SESSIONS,
                available: series.len(),
            },
        )
    });

    let mut report = CrossoverReport {
        skipped,
        ..CrossoverReport::default()
    };
    for (instrument, state) in outcomes {
        match state {
            MacdSignal::BullishCross => report.bullish.push(instrument),
            MacdSignal::BearishCross => report.bearish.push(instrument),
            MacdSignal::NoCross => report.no_cross.push(instrument),
        }
    }

    info!(
        bullish = report.bullish.len(),
        bearish = report.bearish.len(),
        no_cross = report.no_cross.len(),
        skipped = report.skipped.len(),
        "MACD screen complete"
    );
    report
}
