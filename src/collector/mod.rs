//! Sequential trend collection across demographic filter combinations
//!
//! The collector owns request scheduling: fetches run strictly one at a
//! time, paced through a rate limiter to respect the service's limits.
//! A failed fetch is logged with its combination and date range and then
//! treated as "this combination yielded nothing"; the sweep always runs
//! to the end of the combination sequence.

pub mod fetcher;
pub mod normalize;

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;

use crate::models::{DateRange, FilterCombination, KeywordGroup};
use crate::query;
use crate::table::{merge_columns, TrendTable};

pub use fetcher::{Credentials, DataLabFetcher};

/// Sequential collector over a filter combination sweep
pub struct TrendCollector {
    fetcher: DataLabFetcher,

    /// Paces consecutive fetches; the fetcher itself never waits
    pacer: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl TrendCollector {
    /// Create a collector pacing at `requests_per_second`
    pub fn new(fetcher: DataLabFetcher, requests_per_second: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::new(1).unwrap());
        // Burst of one keeps a fixed gap between consecutive requests
        let quota = Quota::per_second(rate).allow_burst(NonZeroU32::new(1).unwrap());
        let pacer = RateLimiter::direct(quota);

        Self { fetcher, pacer }
    }

    /// Run the full demographic sweep for one collection window
    ///
    /// Queries the baseline, each gender, and each age bucket in order and
    /// merges every non-empty result into one table sorted by
    /// `(date, gender, age_group)`. Returns `None` when every combination
    /// yielded nothing, so callers can tell "nothing collected" apart from
    /// an intentionally empty table.
    pub async fn collect_demographics(
        &self,
        range: &DateRange,
        groups: &[KeywordGroup],
        label: &str,
    ) -> Option<TrendTable> {
        self.sweep(&query::demographic_combinations(groups), range, groups, label)
            .await
    }

    /// Run the gender-only sweep used for long-term windows
    pub async fn collect_genders(
        &self,
        range: &DateRange,
        groups: &[KeywordGroup],
        label: &str,
    ) -> Option<TrendTable> {
        self.sweep(&query::gender_combinations(groups), range, groups, label)
            .await
    }

    async fn sweep(
        &self,
        combinations: &[FilterCombination],
        range: &DateRange,
        groups: &[KeywordGroup],
        label: &str,
    ) -> Option<TrendTable> {
        let mut columns: Vec<String> = Vec::new();
        let mut rows = Vec::new();

        for combination in combinations {
            self.pacer.until_ready().await;

            tracing::info!(
                dataset = %label,
                combination = %combination,
                range = %range,
                "collecting combination"
            );

            match self.fetcher.fetch(range, groups, combination).await {
                Ok(Some(normalized)) => {
                    merge_columns(&mut columns, &normalized.columns);
                    rows.extend(normalized.rows);
                }
                Ok(None) => {
                    tracing::debug!(
                        dataset = %label,
                        combination = %combination,
                        "combination returned no data"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        dataset = %label,
                        combination = %combination,
                        range = %range,
                        error = %e,
                        "fetch failed, skipping combination"
                    );
                }
            }
        }

        if rows.is_empty() {
            tracing::warn!(dataset = %label, range = %range, "no data collected");
            return None;
        }

        Some(TrendTable::new(columns, rows))
    }
}
