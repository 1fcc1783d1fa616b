use anyhow::{bail, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use trendlab::collector::{DataLabFetcher, TrendCollector};
use trendlab::config::{self, Config};
use trendlab::models::DateRange;
use trendlab::storage;
use trendlab::table;

/// Gender-only sweeps over two collection windows, stitched at a cutover
///
/// DataLab normalizes ratios within each requested window, so a long span
/// is collected as two windows and joined: rows before the cutover come
/// from the first window, everything from the cutover on comes from the
/// second.
#[allow(clippy::too_many_arguments)]
pub async fn longterm(
    config: Config,
    groups_path: PathBuf,
    first_start: NaiveDate,
    first_end: NaiveDate,
    second_start: NaiveDate,
    second_end: NaiveDate,
    cutover: Option<NaiveDate>,
    out: PathBuf,
) -> Result<()> {
    let groups = config::load_keyword_groups(&groups_path)?;
    let first_range = DateRange::new(first_start, first_end)?;
    let second_range = DateRange::new(second_start, second_end)?;
    let cutover = cutover.unwrap_or(second_range.start);
    if cutover > second_range.start {
        // A later cutover would keep first-window rows for dates the
        // second window also covers, duplicating those dates.
        bail!("cutover must not be after the second window's start");
    }

    println!("Collecting long-term trends");
    println!("  First window: {first_range}");
    println!("  Second window: {second_range}");
    println!("  Cutover: {cutover}");

    let fetcher = DataLabFetcher::with_config(config.api.credentials()?, config.request_timeout())?
        .with_base_url(&config.api.endpoint);
    let collector = TrendCollector::new(fetcher, config.collector.requests_per_second);

    let first = collector
        .collect_genders(&first_range, &groups, "longterm-early")
        .await;
    let second = collector
        .collect_genders(&second_range, &groups, "longterm-recent")
        .await;

    match (first, second) {
        (Some(first), Some(second)) => {
            let stitched = table::stitch(first, second, cutover);
            let path = config.output.resolve(&out);
            storage::write_table(&path, &stitched)?;
            println!("Wrote {} rows to {}", stitched.len(), path.display());
        }
        _ => {
            println!("No data collected for one or both windows; nothing written");
        }
    }

    Ok(())
}
