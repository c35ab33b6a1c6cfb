// =============================================================================
// Shared types used across the Straits screener
// =============================================================================

use serde::{Deserialize, Serialize};

/// One tracked basket constituent: display name plus exchange ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub name: String,
    pub ticker: String,
}

impl Instrument {
    pub fn new(name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
        }
    }

    /// Filesystem-friendly form of the display name,
    /// e.g. "Keppel Corp" becomes "Keppel_Corp".
    pub fn file_stem(&self) -> String {
        self.name.replace(' ', "_")
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.ticker)
    }
}

/// Where the latest oscillator value sits relative to the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Overbought,
    Neutral,
    Oversold,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "Overbought"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Oversold => write!(f, "Oversold"),
        }
    }
}

/// Signal-line crossover state read from the two most recent sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdSignal {
    BullishCross,
    BearishCross,
    NoCross,
}

impl std::fmt::Display for MacdSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BullishCross => write!(f, "Bullish crossover"),
            Self::BearishCross => write!(f, "Bearish crossover"),
            Self::NoCross => write!(f, "No crossover"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_replaces_every_space() {
        let inst = Instrument::new("YZJ Shipbldg SGD", "BS6.SI");
        assert_eq!(inst.file_stem(), "YZJ_Shipbldg_SGD");
    }

    #[test]
    fn display_shows_name_and_ticker() {
        let inst = Instrument::new("DBS", "D05.SI");
        assert_eq!(inst.to_string(), "DBS (D05.SI)");
    }
}
