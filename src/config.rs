// =============================================================================
// Screener Configuration
// =============================================================================
//
// Optional JSON file (default `screener.json`) for the slow-moving knobs:
// where the archive lives, how hard to lean on the API, and which basket to
// track. Per-run screen parameters (timeframes, thresholds) stay on the
// command line.
//
// Every field carries a serde default so a partial, or entirely absent, file
// still produces a working configuration.
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::Instrument;
use crate::universe;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_data_dir() -> PathBuf {
    PathBuf::from("sti_stock_data")
}

fn default_request_gap_secs() -> u64 {
    12
}

fn default_universe() -> Vec<Instrument> {
    universe::sti_basket()
}

// =============================================================================
// ScreenerConfig
// =============================================================================

/// Top-level configuration for the screener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Root directory of the per-instrument CSV archive.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Minimum seconds between API calls. The free tier allows five calls
    /// per minute; twelve seconds keeps a full basket refresh inside it.
    #[serde(default = "default_request_gap_secs")]
    pub request_gap_secs: u64,

    /// Tracked basket, in screening order.
    #[serde(default = "default_universe")]
    pub universe: Vec<Instrument>,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            request_gap_secs: default_request_gap_secs(),
            universe: default_universe(),
        }
    }
}

impl ScreenerConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            data_dir = %config.data_dir.display(),
            basket = config.universe.len(),
            "config loaded"
        );

        Ok(config)
    }
}
