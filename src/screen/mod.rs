// =============================================================================
// Screens Module
// =============================================================================
//
// Each screen is a free function over an immutable `MarketSnapshot`:
// validated settings in, bucketed report out. `sweep` owns the one loop over
// the basket so every screen shares the same recovery behaviour: a failing
// instrument is logged, recorded against its name, and never aborts its
// peers.

pub mod crossover;
pub mod levels;
pub mod movers;
pub mod settings;

use tracing::warn;

use crate::error::ScreenError;
use crate::market_data::series::PriceSeries;
use crate::market_data::snapshot::MarketSnapshot;
use crate::types::Instrument;

/// An instrument excluded from a screen, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub instrument: Instrument,
    pub error: ScreenError,
}

/// A bucketed instrument together with the value that ranked it.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub instrument: Instrument,
    pub value: f64,
}

/// Evaluate `eval` once per snapshot instrument, in universe order.
///
/// Snapshot-level failures (missing archive, malformed rows, too little
/// history to normalize) and evaluation failures both land in the skipped
/// list; successes keep universe order.
fn sweep<T>(
    snapshot: &MarketSnapshot,
    mut eval: impl FnMut(&Instrument, &PriceSeries) -> Result<T, ScreenError>,
) -> (Vec<(Instrument, T)>, Vec<Skipped>) {
    let mut outcomes = Vec::new();
    let mut skipped = Vec::new();

    for entry in snapshot.entries() {
        match &entry.series {
            Ok(series) => match eval(&entry.instrument, series) {
                Ok(value) => outcomes.push((entry.instrument.clone(), value)),
                Err(error) => {
                    warn!(instrument = %entry.instrument, error = %error, "instrument skipped");
                    skipped.push(Skipped {
                        instrument: entry.instrument.clone(),
                        error,
                    });
                }
            },
            Err(error) => {
                warn!(instrument = %entry.instrument, error = %error, "instrument unavailable");
                skipped.push(Skipped {
                    instrument: entry.instrument.clone(),
                    error: error.clone(),
                });
            }
        }
    }

    (outcomes, skipped)
}
