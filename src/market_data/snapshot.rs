// =============================================================================
// Market Snapshot
// =============================================================================
//
// Immutable screening input built once per run: every basket instrument's
// archive, loaded and calendar-normalized, in universe order. Load and
// normalize failures are carried as per-instrument values so screens can
// surface them without re-touching the filesystem, and a bad archive never
// blocks the rest of the basket. Nothing mutates after construction, so any
// number of screens can share one snapshot by reference.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::ScreenError;
use crate::market_data::calendar;
use crate::market_data::series::PriceSeries;
use crate::market_data::store::SeriesStore;
use crate::types::Instrument;

/// One instrument's slot in the snapshot: its normalized series, or the
/// reason it is unavailable.
#[derive(Debug, Clone)]
pub struct SnapshotEntry {
    pub instrument: Instrument,
    pub series: Result<PriceSeries, ScreenError>,
}

/// All basket series for one screening run, in universe order.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    entries: Vec<SnapshotEntry>,
}

impl MarketSnapshot {
    /// Build directly from prepared entries. Screens only read, so callers
    /// are free to assemble snapshots from any source.
    pub fn new(entries: Vec<SnapshotEntry>) -> Self {
        Self { entries }
    }

    /// Load and normalize every universe instrument from the store.
    pub fn load(store: &SeriesStore, universe: &[Instrument], holidays: &[NaiveDate]) -> Self {
        let mut entries = Vec::with_capacity(universe.len());

        for instrument in universe {
            let series = store
                .load(instrument)
                .and_then(|s| calendar::normalize(&s, holidays));
            match &series {
                Ok(s) => debug!(instrument = %instrument, sessions = s.len(), "series ready"),
                Err(e) => warn!(instrument = %instrument, error = %e, "series unavailable"),
            }
            entries.push(SnapshotEntry {
                instrument: instrument.clone(),
                series,
            });
        }

        let ready = entries.iter().filter(|e| e.series.is_ok()).count();
        info!(ready, total = entries.len(), "market snapshot loaded");

        Self { entries }
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
