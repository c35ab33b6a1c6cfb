// =============================================================================
// Fetch Module — basket archive refresh
// =============================================================================
//
// Pulls the daily series for every universe instrument in order, paced for
// the free API tier, and persists each one to the CSV store. One instrument
// failing (unknown symbol, a throttle note slipping through, malformed
// body) is logged and skipped; the loop always finishes the basket.

pub mod alpha_vantage;
pub mod pacing;

use tracing::{info, warn};

use crate::fetch::alpha_vantage::{AlphaVantageClient, OutputSize};
use crate::fetch::pacing::RequestPacer;
use crate::market_data::series::PriceSeries;
use crate::market_data::store::SeriesStore;
use crate::types::Instrument;

/// Refresh the archive for every instrument. Returns how many were
/// refreshed successfully.
pub async fn refresh_archive(
    client: &AlphaVantageClient,
    store: &SeriesStore,
    universe: &[Instrument],
    pacer: &mut RequestPacer,
    size: OutputSize,
) -> usize {
    let mut refreshed = 0;

    for instrument in universe {
        pacer.wait().await;
        info!(instrument = %instrument, "fetching daily series");

        match fetch_and_store(client, store, instrument, size).await {
            Ok(sessions) => {
                info!(instrument = %instrument, sessions, "series refreshed");
                refreshed += 1;
            }
            Err(error) => {
                warn!(instrument = %instrument, error = %error, "refresh failed, continuing");
            }
        }
    }

    info!(refreshed, total = universe.len(), "archive refresh complete");
    refreshed
}

async fn fetch_and_store(
    client: &AlphaVantageClient,
    store: &SeriesStore,
    instrument: &Instrument,
    size: OutputSize,
) -> anyhow::Result<usize> {
    let bars = client.daily_adjusted(&instrument.ticker, size).await?;
    let series = PriceSeries::from_bars(bars)?;
    store.save(instrument, &series)?;
    Ok(series.len())
}
