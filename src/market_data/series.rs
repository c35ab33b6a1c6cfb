// =============================================================================
// Daily Price Series
// =============================================================================
//
// `PriceSeries` is the read-only input to every screen: daily bars sorted
// ascending by date with no duplicates and strictly positive, finite closes.
// The constructor is the single enforcement point for those invariants, so
// indicator code can index and window freely without re-checking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenError};

/// One session: a trading day, or an exchange holiday filled by the
/// calendar normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub adjusted_close: f64,
    pub volume: u64,
}

/// Date-ascending, duplicate-free sequence of daily bars.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<DailyBar>,
}

impl PriceSeries {
    /// Build a series from bars in any order.
    ///
    /// Sorts ascending by date and rejects duplicate dates and closes that
    /// are not finite and positive. An empty input is a valid empty series;
    /// consumers that need history reject it with their own warm-up checks.
    pub fn from_bars(mut bars: Vec<DailyBar>) -> Result<Self> {
        for bar in &bars {
            if !bar.adjusted_close.is_finite() || bar.adjusted_close <= 0.0 {
                return Err(ScreenError::MalformedSeries(format!(
                    "close {} on {} is not a positive price",
                    bar.adjusted_close, bar.date
                )));
            }
        }

        bars.sort_by_key(|b| b.date);

        if let Some(pair) = bars.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(ScreenError::MalformedSeries(format!(
                "duplicate session date {}",
                pair[0].date
            )));
        }

        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in date order, the shape the indicator engine eats.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.adjusted_close).collect()
    }

    pub fn first(&self) -> Option<&DailyBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&DailyBar> {
        self.bars.last()
    }
}
