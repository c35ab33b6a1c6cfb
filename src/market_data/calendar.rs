// =============================================================================
// Calendar Normalizer
// =============================================================================
//
// Exchange feeds index by trading day, so configured public holidays are
// simply absent from a stored series. Downstream window arithmetic wants one
// row per expected session, so every configured holiday strictly inside the
// series date range is inserted and filled with the most recent prior
// session's close and volume (no trading happened, the last print stands).
//
// Holidays on or outside the boundary dates are left alone: there is no
// prior session inside the series to carry from.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{Result, ScreenError};
use crate::market_data::series::{DailyBar, PriceSeries};

/// Insert configured holidays and carry the previous session's bar onto them.
///
/// Normalizing an already normalized series returns it unchanged, so the
/// operation is safe to repeat.
///
/// # Errors
/// `DataInsufficient` when the input has fewer than two rows. A single bar
/// spans no range, and no screen can use it anyway.
pub fn normalize(series: &PriceSeries, holidays: &[NaiveDate]) -> Result<PriceSeries> {
    if series.len() < 2 {
        return Err(ScreenError::DataInsufficient {
            needed: 2,
            available: series.len(),
        });
    }

    let start = series.bars()[0].date;
    let end = series.bars()[series.len() - 1].date;

    let missing: Vec<NaiveDate> = holidays
        .iter()
        .copied()
        .filter(|d| start < *d && *d < end)
        .filter(|d| series.bars().binary_search_by_key(d, |b| b.date).is_err())
        .collect();

    if missing.is_empty() {
        return Ok(series.clone());
    }

    debug!(inserted = missing.len(), "filling exchange holidays");

    // Splice the holidays in as placeholder rows, then carry the most recent
    // prior session onto each one in a single ascending pass. NAN marks a
    // placeholder; every one is overwritten before the series is rebuilt.
    let mut bars = series.bars().to_vec();
    for date in missing {
        bars.push(DailyBar {
            date,
            adjusted_close: f64::NAN,
            volume: 0,
        });
    }
    bars.sort_by_key(|b| b.date);

    // The first row is always a genuine session: insertions are strictly
    // after `start`.
    let mut carry = bars[0];
    for bar in bars.iter_mut().skip(1) {
        if bar.adjusted_close.is_nan() {
            bar.adjusted_close = carry.adjusted_close;
            bar.volume = carry.volume;
        }
        carry = *bar;
    }

    PriceSeries::from_bars(bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bar(d: NaiveDate, close: f64, volume: u64) -> DailyBar {
        DailyBar {
            date: d,
            adjusted_close: close,
            volume,
        }
    }

    /// Trading week around Good Friday 2018: the 30th is missing.
    fn easter_week() -> PriceSeries {
        PriceSeries::from_bars(vec![
            bar(date(2018, 3, 28), 10.0, 1_000),
            bar(date(2018, 3, 29), 11.0, 1_500),
            bar(date(2018, 4, 2), 12.0, 2_000),
            bar(date(2018, 4, 3), 13.0, 2_500),
        ])
        .unwrap()
    }

    #[test]
    fn fills_holiday_with_previous_session() {
        let normalized = normalize(&easter_week(), &[date(2018, 3, 30)]).unwrap();

        assert_eq!(normalized.len(), 5);
        let filled = normalized.bars()[2];
        assert_eq!(filled.date, date(2018, 3, 30));
        assert_eq!(filled.adjusted_close, 11.0);
        assert_eq!(filled.volume, 1_500);
    }

    #[test]
    fn boundary_holidays_are_not_inserted() {
        // On the first session, on the last session, before and after the range.
        let holidays = [
            date(2018, 3, 28),
            date(2018, 4, 3),
            date(2018, 3, 1),
            date(2018, 4, 30),
        ];
        let normalized = normalize(&easter_week(), &holidays).unwrap();
        assert_eq!(normalized, easter_week());
    }

    #[test]
    fn normalization_is_idempotent() {
        let holidays = [date(2018, 3, 30)];
        let once = normalize(&easter_week(), &holidays).unwrap();
        let twice = normalize(&once, &holidays).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn consecutive_holidays_carry_the_same_session() {
        let series = PriceSeries::from_bars(vec![
            bar(date(2018, 6, 14), 5.0, 100),
            bar(date(2018, 6, 18), 6.0, 200),
        ])
        .unwrap();
        let holidays = [date(2018, 6, 15), date(2018, 6, 16)];

        let normalized = normalize(&series, &holidays).unwrap();

        assert_eq!(normalized.len(), 4);
        for filled in &normalized.bars()[1..3] {
            assert_eq!(filled.adjusted_close, 5.0);
            assert_eq!(filled.volume, 100);
        }
    }

    #[test]
    fn output_stays_ascending() {
        let normalized = normalize(&easter_week(), &[date(2018, 3, 30)]).unwrap();
        assert!(normalized.bars().windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn too_short_series_is_rejected() {
        let one = PriceSeries::from_bars(vec![bar(date(2018, 1, 2), 1.0, 10)]).unwrap();
        let err = normalize(&one, &[date(2018, 1, 1)]).unwrap_err();
        assert_eq!(
            err,
            ScreenError::DataInsufficient {
                needed: 2,
                available: 1
            }
        );
    }
}
