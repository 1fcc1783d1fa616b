use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;

use trendlab::collector::{DataLabFetcher, TrendCollector};
use trendlab::config::{self, Config};
use trendlab::models::DateRange;
use trendlab::storage;

/// One demographic sweep over a single collection window, exported as CSV
pub async fn collect(
    config: Config,
    groups_path: PathBuf,
    start: NaiveDate,
    end: NaiveDate,
    label: String,
    out: PathBuf,
) -> Result<()> {
    let groups = config::load_keyword_groups(&groups_path)?;
    let range = DateRange::new(start, end)?;

    println!("Collecting demographic trends");
    println!("  Range: {range}");
    println!("  Keyword groups: {}", groups.len());

    let fetcher = DataLabFetcher::with_config(config.api.credentials()?, config.request_timeout())?
        .with_base_url(&config.api.endpoint);
    let collector = TrendCollector::new(fetcher, config.collector.requests_per_second);

    match collector.collect_demographics(&range, &groups, &label).await {
        Some(table) => {
            let path = config.output.resolve(&out);
            storage::write_table(&path, &table)?;
            println!("Wrote {} rows to {}", table.len(), path.display());
        }
        None => {
            println!("No data collected; nothing written");
        }
    }

    Ok(())
}
