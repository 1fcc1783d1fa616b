//! Merged trend tables and long-term window stitching
//!
//! A [`TrendTable`] is the finalized form of one logical dataset: every
//! row collected across the filter combinations of one sweep, sorted by
//! `(date, gender, age_group)`. Tables are rebuilt rather than patched;
//! nothing mutates a table after assembly.

use chrono::NaiveDate;

use crate::models::TrendRow;

/// One finalized dataset: ordered group columns plus sorted rows
///
/// `columns` carries the keyword-group column names in first-seen order,
/// which is also the export order. Invariant: no two rows share a
/// `(date, device, gender, age_group)` key.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendTable {
    pub columns: Vec<String>,
    pub rows: Vec<TrendRow>,
}

impl TrendTable {
    /// Assemble a table from accumulated rows, sorting them into final order
    pub fn new(columns: Vec<String>, mut rows: Vec<TrendRow>) -> Self {
        sort_rows(&mut rows);
        debug_assert!(unique_keys(&rows), "duplicate row key in finalized table");
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Extend `columns` with any names from `extra` it does not already hold,
/// preserving first-seen order
pub fn merge_columns(columns: &mut Vec<String>, extra: &[String]) {
    for name in extra {
        if !columns.iter().any(|c| c == name) {
            columns.push(name.clone());
        }
    }
}

/// Stitch two overlapping collection windows at a cutover date
///
/// Rows from `first` strictly before `cutover` are kept; everything else
/// comes from `second`. First-window rows at or after the cutover are
/// discarded, superseded by the second window's coverage of that period.
/// This prefers the later-collected window for the overlap outright; it is
/// a policy choice, not a per-row quality judgment, and implementers
/// wanting reconciliation or averaging should replace this function.
pub fn stitch(first: TrendTable, second: TrendTable, cutover: NaiveDate) -> TrendTable {
    let mut columns = first.columns;
    merge_columns(&mut columns, &second.columns);

    let mut rows: Vec<TrendRow> = first
        .rows
        .into_iter()
        .filter(|row| row.date < cutover)
        .collect();
    rows.extend(second.rows);

    TrendTable::new(columns, rows)
}

fn sort_rows(rows: &mut [TrendRow]) {
    rows.sort_by(|a, b| {
        (a.date, &a.gender, &a.age_group, &a.device).cmp(&(
            b.date,
            &b.gender,
            &b.age_group,
            &b.device,
        ))
    });
}

fn unique_keys(rows: &[TrendRow]) -> bool {
    rows.windows(2).all(|pair| pair[0].key() != pair[1].key())
}
