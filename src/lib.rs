//! trendlab - Naver DataLab search trend collector
//!
//! Collects search-trend time series across demographic filter
//! combinations (device, gender, age bucket), merges the per-combination
//! results into uniform tables, stitches overlapping long-term collection
//! windows, and exports CSV files.
//!
//! # Architecture
//!
//! - [`config`] - Configuration management and keyword group definitions
//! - [`query`] - Expansion of the demographic filter combination sweep
//! - [`collector`] - Sequential fetching with rate limiting, plus response
//!   normalization
//! - [`table`] - Merged trend tables and long-term window stitching
//! - [`models`] - Core data structures and types
//! - [`storage`] - CSV export
//!
//! # Example
//!
//! ```no_run
//! use trendlab::collector::{DataLabFetcher, TrendCollector};
//! use trendlab::config::Config;
//! use trendlab::models::{DateRange, KeywordGroup};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let fetcher = DataLabFetcher::new(config.api.credentials()?)?;
//!     let collector = TrendCollector::new(fetcher, config.collector.requests_per_second);
//!
//!     let range = DateRange::new(
//!         "2025-01-01".parse()?,
//!         "2025-12-31".parse()?,
//!     )?;
//!     let groups = vec![KeywordGroup::new(
//!         "museum",
//!         vec!["국립중앙박물관".to_string()],
//!     )];
//!
//!     if let Some(table) = collector.collect_demographics(&range, &groups, "museum").await {
//!         trendlab::storage::write_table("museum_trends.csv".as_ref(), &table)?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod collector;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod storage;
pub mod table;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::collector::{Credentials, DataLabFetcher, TrendCollector};
    pub use crate::config::Config;
    pub use crate::error::{Error, FetchError, Result};
    pub use crate::models::{
        AgeBucket, AgeFilter, DateRange, Device, FilterCombination, Gender, KeywordGroup, TrendRow,
    };
    pub use crate::table::{stitch, TrendTable};
}

// Direct re-exports for convenience
pub use models::{DateRange, FilterCombination, KeywordGroup, TrendRow};
pub use table::TrendTable;
