pub mod calendar;
pub mod series;
pub mod snapshot;
pub mod store;

// Re-export the core data types for convenient access (e.g. `use crate::market_data::PriceSeries`).
pub use series::{DailyBar, PriceSeries};
pub use snapshot::{MarketSnapshot, SnapshotEntry};
pub use store::SeriesStore;
