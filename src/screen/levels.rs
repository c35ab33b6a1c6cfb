// =============================================================================
// Oscillator Level Screens — RSI and Stochastic RSI
// =============================================================================
//
// Both screens share one shape: take the latest oscillator value per
// instrument, classify it against the configured bounds, and rank the three
// buckets. Overbought and neutral rank strongest-first, oversold ranks
// weakest-first (the most stretched names lead their list either way), and
// equal values keep universe order because the sorts are stable.

use tracing::info;

use crate::error::ScreenError;
use crate::indicators::rsi::latest_rsi;
use crate::indicators::stoch_rsi::latest_stoch_rsi;
use crate::market_data::snapshot::MarketSnapshot;
use crate::screen::settings::{RsiSettings, StochRsiSettings};
use crate::screen::{sweep, RankedEntry, Skipped};
use crate::types::{Classification, Instrument};

/// Ranked outcome of an RSI or Stochastic RSI screen run.
#[derive(Debug, Clone, Default)]
pub struct LevelReport {
    pub overbought: Vec<RankedEntry>,
    pub neutral: Vec<RankedEntry>,
    pub oversold: Vec<RankedEntry>,
    pub skipped: Vec<Skipped>,
}

impl LevelReport {
    /// Number of instruments that landed in a bucket.
    pub fn classified(&self) -> usize {
        self.overbought.len() + self.neutral.len() + self.oversold.len()
    }
}

/// Classify one latest value against the configured bounds. Both bounds are
/// inclusive on their own side.
fn classify(value: f64, overbought: f64, oversold: f64) -> Classification {
    if value >= overbought {
        Classification::Overbought
    } else if value <= oversold {
        Classification::Oversold
    } else {
        Classification::Neutral
    }
}

/// Partition classified values into ranked buckets.
fn bucket_and_rank(
    outcomes: Vec<(Instrument, f64)>,
    skipped: Vec<Skipped>,
    overbought: f64,
    oversold: f64,
) -> LevelReport {
    let mut report = LevelReport {
        skipped,
        ..LevelReport::default()
    };

    for (instrument, value) in outcomes {
        let entry = RankedEntry { instrument, value };
        match classify(value, overbought, oversold) {
            Classification::Overbought => report.overbought.push(entry),
            Classification::Neutral => report.neutral.push(entry),
            Classification::Oversold => report.oversold.push(entry),
        }
    }

    // Stable sorts: ties stay in universe order.
    report.overbought.sort_by(|a, b| b.value.total_cmp(&a.value));
    report.neutral.sort_by(|a, b| b.value.total_cmp(&a.value));
    report.oversold.sort_by(|a, b| a.value.total_cmp(&b.value));

    report
}

/// Run the RSI screen across the whole snapshot.
pub fn run_rsi(snapshot: &MarketSnapshot, settings: &RsiSettings) -> LevelReport {
    let needed = settings.required_history();
    let timeframe = settings.timeframe;

    let (outcomes, skipped) = sweep(snapshot, |_, series| {
        if series.len() < needed {
            return Err(ScreenError::DataInsufficient {
                needed,
                available: series.len(),
            });
        }
        latest_rsi(&series.closes(), timeframe).ok_or(ScreenError::DataInsufficient {
            needed,
            available: series.len(),
        })
    });

    let report = bucket_and_rank(outcomes, skipped, settings.overbought, settings.oversold);
    info!(
        timeframe,
        overbought = report.overbought.len(),
        neutral = report.neutral.len(),
        oversold = report.oversold.len(),
        skipped = report.skipped.len(),
        "RSI screen complete"
    );
    report
}

/// Run the Stochastic RSI screen across the whole snapshot.
pub fn run_stoch_rsi(snapshot: &MarketSnapshot, settings: &StochRsiSettings) -> LevelReport {
    let needed = settings.required_history();
    let timeframe = settings.timeframe;

    let (outcomes, skipped) = sweep(snapshot, |_, series| {
        if series.len() < needed {
            return Err(ScreenError::DataInsufficient {
                needed,
                available: series.len(),
            });
        }
        // Enough history but still undefined means the final RSI window was
        // flat, so the min-max ratio has no value to take.
        latest_stoch_rsi(&series.closes(), timeframe).ok_or_else(|| {
            ScreenError::DegenerateComputation(format!(
                "RSI flat across the last {timeframe} sessions, stochastic range is zero"
            ))
        })
    });

    let report = bucket_and_rank(outcomes, skipped, settings.overbought, settings.oversold);
    info!(
        timeframe,
        overbought = report.overbought.len(),
        neutral = report.neutral.len(),
        oversold = report.oversold.len(),
        skipped = report.skipped.len(),
        "Stochastic RSI screen complete"
    );
    report
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::series::{DailyBar, PriceSeries};
    use crate::market_data::snapshot::SnapshotEntry;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| DailyBar {
                date: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap() + chrono::Days::new(i as u64),
                adjusted_close: close,
                volume: 1_000,
            })
            .collect();
        PriceSeries::from_bars(bars).unwrap()
    }

    fn entry(name: &str, ticker: &str, closes: &[f64]) -> SnapshotEntry {
        SnapshotEntry {
            instrument: Instrument::new(name, ticker),
            series: Ok(series(closes)),
        }
    }

    fn ascending(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    fn descending(n: usize) -> Vec<f64> {
        (1..=n).rev().map(|i| i as f64).collect()
    }

    /// Alternating equal up and down moves hold the RSI near 50.
    fn zigzag(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect()
    }

    // ---- bucket_and_rank ---------------------------------------------------

    fn named(value: f64, name: &str) -> (Instrument, f64) {
        (Instrument::new(name, "T00.SI"), value)
    }

    #[test]
    fn buckets_sort_by_convention() {
        let outcomes = vec![
            named(75.0, "a"),
            named(92.0, "b"),
            named(50.0, "c"),
            named(65.0, "d"),
            named(12.0, "e"),
            named(3.0, "f"),
        ];
        let report = bucket_and_rank(outcomes, Vec::new(), 70.0, 30.0);

        let values = |bucket: &[RankedEntry]| bucket.iter().map(|e| e.value).collect::<Vec<_>>();
        assert_eq!(values(&report.overbought), vec![92.0, 75.0]);
        assert_eq!(values(&report.neutral), vec![65.0, 50.0]);
        assert_eq!(values(&report.oversold), vec![3.0, 12.0]);
    }

    #[test]
    fn equal_values_keep_universe_order() {
        let outcomes = vec![
            named(80.0, "first"),
            named(80.0, "second"),
            named(80.0, "third"),
        ];
        let report = bucket_and_rank(outcomes, Vec::new(), 70.0, 30.0);
        let names: Vec<&str> = report
            .overbought
            .iter()
            .map(|e| e.instrument.name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn bounds_are_inclusive() {
        let outcomes = vec![named(70.0, "on-upper"), named(30.0, "on-lower")];
        let report = bucket_and_rank(outcomes, Vec::new(), 70.0, 30.0);
        assert_eq!(report.overbought.len(), 1);
        assert_eq!(report.oversold.len(), 1);
        assert!(report.neutral.is_empty());
    }

    // ---- run_rsi -----------------------------------------------------------

    #[test]
    fn rsi_screen_buckets_every_instrument_once() {
        let snapshot = MarketSnapshot::new(vec![
            entry("Riser", "R01.SI", &ascending(30)),
            entry("Faller", "F01.SI", &descending(30)),
            entry("Sideways", "S01.SI", &zigzag(30)),
            entry("Newcomer", "N01.SI", &ascending(10)),
        ]);
        let settings = RsiSettings::new(14, 70, 30).unwrap();

        let report = run_rsi(&snapshot, &settings);

        assert_eq!(report.classified() + report.skipped.len(), 4);
        assert_eq!(report.overbought[0].instrument.name, "Riser");
        assert_eq!(report.oversold[0].instrument.name, "Faller");
        assert_eq!(report.neutral[0].instrument.name, "Sideways");
        assert_eq!(report.skipped[0].instrument.name, "Newcomer");
        assert_eq!(
            report.skipped[0].error,
            ScreenError::DataInsufficient {
                needed: 15,
                available: 10
            }
        );
    }

    #[test]
    fn rsi_screen_passes_through_snapshot_failures() {
        let snapshot = MarketSnapshot::new(vec![SnapshotEntry {
            instrument: Instrument::new("Ghost", "G00.SI"),
            series: Err(ScreenError::Storage("no archive".into())),
        }]);
        let settings = RsiSettings::new(14, 70, 30).unwrap();

        let report = run_rsi(&snapshot, &settings);
        assert_eq!(report.classified(), 0);
        assert!(matches!(report.skipped[0].error, ScreenError::Storage(_)));
    }

    // ---- run_stoch_rsi -----------------------------------------------------

    #[test]
    fn stoch_rsi_screen_flags_flat_windows_as_degenerate() {
        // Plenty of history, but a one-way climb pins the RSI at 100 and
        // leaves the stochastic with a zero range.
        let snapshot = MarketSnapshot::new(vec![entry("Riser", "R01.SI", &ascending(40))]);
        let settings = StochRsiSettings::new(14, 0.8, 0.2).unwrap();

        let report = run_stoch_rsi(&snapshot, &settings);
        assert_eq!(report.classified(), 0);
        assert!(matches!(
            report.skipped[0].error,
            ScreenError::DegenerateComputation(_)
        ));
    }

    #[test]
    fn stoch_rsi_screen_classifies_moving_series() {
        // Falling for a while, then a hard rally: the final RSI is its own
        // window maximum, so the stochastic reads 1.0 and screens overbought.
        let mut closes = descending(20);
        let floor = *closes.last().unwrap();
        closes.extend((1..=10).map(|i| floor + (i as f64) * 2.0));

        let snapshot = MarketSnapshot::new(vec![entry("Turnaround", "T01.SI", &closes)]);
        let settings = StochRsiSettings::new(14, 0.8, 0.2).unwrap();

        let report = run_stoch_rsi(&snapshot, &settings);
        assert_eq!(report.overbought.len(), 1);
        let value = report.overbought[0].value;
        assert!((value - 1.0).abs() < 1e-10, "expected 1.0, got {value}");
    }
}
