// =============================================================================
// Top Movers Screen — percentage change in price and volume
// =============================================================================
//
// For each horizon, rank the basket by percentage change of the latest close
// against the close that many sessions earlier, and the same for volume.
// Gainer lists rank largest change first, decliner lists smallest (most
// negative) first; each list is capped at the requested count.
//
// An instrument short of one horizon's lookback drops out of that horizon
// only. A base volume of zero leaves that volume change undefined, so the
// instrument sits out the volume ranking for that horizon.

use tracing::{debug, info};

use crate::error::ScreenError;
use crate::market_data::series::PriceSeries;
use crate::market_data::snapshot::MarketSnapshot;
use crate::screen::{sweep, RankedEntry, Skipped};
use crate::types::Instrument;

/// Lookback horizons the movers screen reports, in sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    Daily,
    Weekly,
    Monthly,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Daily, Horizon::Weekly, Horizon::Monthly];

    /// Sessions between the latest close and the comparison close.
    pub fn sessions(self) -> usize {
        match self {
            Horizon::Daily => 1,
            Horizon::Weekly => 5,
            Horizon::Monthly => 20,
        }
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Horizon::Daily => write!(f, "daily"),
            Horizon::Weekly => write!(f, "weekly"),
            Horizon::Monthly => write!(f, "monthly"),
        }
    }
}

/// Ranked change lists for one horizon.
#[derive(Debug, Clone)]
pub struct HorizonMovers {
    pub horizon: Horizon,
    pub price_gainers: Vec<RankedEntry>,
    pub price_decliners: Vec<RankedEntry>,
    pub volume_gainers: Vec<RankedEntry>,
    pub volume_decliners: Vec<RankedEntry>,
}

/// Outcome of a movers screen run: one entry per horizon, in
/// [`Horizon::ALL`] order.
#[derive(Debug, Clone)]
pub struct MoversReport {
    pub count: usize,
    pub horizons: Vec<HorizonMovers>,
    pub skipped: Vec<Skipped>,
}

/// Percentage changes one instrument contributes, per horizon.
struct ChangeSet {
    price: Vec<(Horizon, f64)>,
    volume: Vec<(Horizon, f64)>,
}

fn changes(instrument: &Instrument, series: &PriceSeries) -> ChangeSet {
    let bars = series.bars();
    let n = bars.len();
    let latest = bars[n - 1];

    let mut set = ChangeSet {
        price: Vec::new(),
        volume: Vec::new(),
    };

    for horizon in Horizon::ALL {
        let lookback = horizon.sessions();
        if n <= lookback {
            debug!(instrument = %instrument, %horizon, sessions = n, "not enough sessions for horizon");
            continue;
        }
        let base = bars[n - 1 - lookback];

        let price_pct = (latest.adjusted_close - base.adjusted_close) / base.adjusted_close * 100.0;
        set.price.push((horizon, price_pct));

        if base.volume > 0 {
            let volume_pct =
                (latest.volume as f64 - base.volume as f64) / base.volume as f64 * 100.0;
            set.volume.push((horizon, volume_pct));
        } else {
            debug!(instrument = %instrument, %horizon, "zero base volume, change undefined");
        }
    }

    set
}

/// Top `count` entries by descending change, then by ascending change.
fn rank(mut entries: Vec<RankedEntry>, count: usize) -> (Vec<RankedEntry>, Vec<RankedEntry>) {
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    let gainers = entries.iter().take(count).cloned().collect();
    entries.sort_by(|a, b| a.value.total_cmp(&b.value));
    let decliners = entries.into_iter().take(count).collect();
    (gainers, decliners)
}

/// Run the movers screen across the whole snapshot.
pub fn run_movers(snapshot: &MarketSnapshot, count: usize) -> MoversReport {
    let (outcomes, skipped) = sweep(snapshot, |instrument, series| {
        // Even the shortest horizon needs a prior session to compare against.
        if series.len() < 2 {
            return Err(ScreenError::DataInsufficient {
                needed: 2,
                available: series.len(),
            });
        }
        Ok(changes(instrument, series))
    });

    let mut horizons = Vec::with_capacity(Horizon::ALL.len());
    for horizon in Horizon::ALL {
        let collect = |pick: fn(&ChangeSet) -> &[(Horizon, f64)]| -> Vec<RankedEntry> {
            outcomes
                .iter()
                .filter_map(|(instrument, set)| {
                    pick(set)
                        .iter()
                        .find(|(h, _)| *h == horizon)
                        .map(|&(_, value)| RankedEntry {
                            instrument: instrument.clone(),
                            value,
                        })
                })
                .collect()
        };

        let (price_gainers, price_decliners) = rank(collect(|set| &set.price), count);
        let (volume_gainers, volume_decliners) = rank(collect(|set| &set.volume), count);

        horizons.push(HorizonMovers {
            horizon,
            price_gainers,
            price_decliners,
            volume_gainers,
            volume_decliners,
        });
    }

    info!(
        count,
        ranked = outcomes.len(),
        skipped = skipped.len(),
        "movers screen complete"
    );

    MoversReport {
        count,
        horizons,
        skipped,
    }
}
