//! Response normalization: sparse per-group series into uniform rows
//!
//! The service returns one sparse (date, value) series per keyword group.
//! Normalization outer-merges the non-empty series on date, zero-fills the
//! gaps, and stamps every row with the filter combination that produced it.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::collector::fetcher::GroupSeries;
use crate::models::{FilterCombination, TrendRow};

/// One fetch's normalized output
///
/// `columns` lists the keyword groups that actually carried data, in
/// response order; `rows` are date-ascending.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub columns: Vec<String>,
    pub rows: Vec<TrendRow>,
}

/// Normalize one response into rows stamped with `combination`
///
/// Groups whose series is empty are skipped entirely; no zero-filled rows
/// are synthesized for a group with no data at all. A date present in any
/// surviving group's series becomes one row, with `0.0` filled in for
/// groups that lack that date. Returns `None` when every group was empty.
pub fn normalize(results: &[GroupSeries], combination: &FilterCombination) -> Option<Normalized> {
    let included: Vec<&GroupSeries> = results.iter().filter(|g| !g.data.is_empty()).collect();
    if included.is_empty() {
        return None;
    }

    let columns: Vec<String> = included.iter().map(|g| g.title.clone()).collect();

    // Outer merge keyed on date
    let mut by_date: BTreeMap<NaiveDate, BTreeMap<String, f64>> = BTreeMap::new();
    for group in &included {
        for point in &group.data {
            by_date
                .entry(point.period)
                .or_default()
                .insert(group.title.clone(), point.ratio);
        }
    }

    let rows = by_date
        .into_iter()
        .map(|(date, mut values)| {
            for name in &columns {
                values.entry(name.clone()).or_insert(0.0);
            }
            TrendRow {
                date,
                values,
                device: combination.device.label().to_string(),
                gender: combination.gender.label().to_string(),
                age_group: combination.age.label().to_string(),
            }
        })
        .collect();

    Some(Normalized { columns, rows })
}
