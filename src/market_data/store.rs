// =============================================================================
// Series Store
// =============================================================================
//
// Per-instrument CSV archive: `<root>/daily/<Display_Name>.csv` with header
// `date,adjusted_close,volume`, rows ascending by date. This is the only
// module that touches the filesystem for market data; screens always read
// through a loaded snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use tracing::debug;

use crate::error::{Result, ScreenError};
use crate::market_data::series::{DailyBar, PriceSeries};
use crate::types::Instrument;

const DAILY_DIR: &str = "daily";
const HEADER: [&str; 3] = ["date", "adjusted_close", "volume"];

/// Handle to the on-disk archive rooted at one data directory.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    root: PathBuf,
}

impl SeriesStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Archive file for one instrument's daily series.
    pub fn path_for(&self, instrument: &Instrument) -> PathBuf {
        self.root
            .join(DAILY_DIR)
            .join(format!("{}.csv", instrument.file_stem()))
    }

    /// Write the full series, creating the directory tree on first use.
    pub fn save(&self, instrument: &Instrument, series: &PriceSeries) -> anyhow::Result<()> {
        let path = self.path_for(instrument);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create archive dir {}", dir.display()))?;
        }

        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("failed to open {} for writing", path.display()))?;
        writer.write_record(HEADER)?;
        for b in series.bars() {
            writer.write_record(&[
                b.date.to_string(),
                b.adjusted_close.to_string(),
                b.volume.to_string(),
            ])?;
        }
        writer
            .flush()
            .with_context(|| format!("failed to flush {}", path.display()))?;

        debug!(path = %path.display(), sessions = series.len(), "series saved");
        Ok(())
    }

    /// Load one instrument's archive, enforcing the series invariants.
    pub fn load(&self, instrument: &Instrument) -> Result<PriceSeries> {
        let path = self.path_for(instrument);
        let mut reader = csv::Reader::from_path(&path)
            .map_err(|e| ScreenError::Storage(format!("{}: {e}", path.display())))?;

        let mut bars = Vec::new();
        for record in reader.records() {
            let record = record
                .map_err(|e| ScreenError::MalformedSeries(format!("{}: {e}", path.display())))?;
            bars.push(parse_row(&record)?);
        }

        let series = PriceSeries::from_bars(bars)?;
        debug!(path = %path.display(), sessions = series.len(), "series loaded");
        Ok(series)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn parse_row(record: &csv::StringRecord) -> Result<DailyBar> {
    let date_field = record.get(0).unwrap_or_default();
    let date: NaiveDate = date_field
        .parse()
        .map_err(|_| ScreenError::MalformedSeries(format!("bad date '{date_field}'")))?;

    let close_field = record.get(1).unwrap_or_default();
    let adjusted_close: f64 = close_field.parse().map_err(|_| {
        ScreenError::MalformedSeries(format!("bad close '{close_field}' on {date}"))
    })?;

    let volume_field = record.get(2).unwrap_or_default();
    let volume: u64 = volume_field.parse().map_err(|_| {
        ScreenError::MalformedSeries(format!("bad volume '{volume_field}' on {date}"))
    })?;

    Ok(DailyBar {
        date,
        adjusted_close,
        volume,
    })
}
