// Core data structures for the trendlab collector

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// A named cluster of search terms reported by DataLab as one series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordGroup {
    pub name: String,
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    pub fn new(name: impl Into<String>, keywords: Vec<String>) -> Self {
        Self {
            name: name.into(),
            keywords,
        }
    }
}

/// Device filter axis
///
/// `Any` means unfiltered. The wire encoding is the empty string; result
/// rows are stamped with the literal `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Device {
    #[default]
    Any,
    Desktop,
    Mobile,
}

impl Device {
    /// Wire parameter sent to the API
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Desktop => "pc",
            Self::Mobile => "mo",
        }
    }

    /// Label stamped onto result rows
    pub fn label(&self) -> &'static str {
        match self {
            Self::Any => "all",
            Self::Desktop => "pc",
            Self::Mobile => "mo",
        }
    }
}

/// Gender filter axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    #[default]
    Any,
    Male,
    Female,
}

impl Gender {
    /// Wire parameter sent to the API
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Male => "m",
            Self::Female => "f",
        }
    }

    /// Label stamped onto result rows
    pub fn label(&self) -> &'static str {
        match self {
            Self::Any => "all",
            Self::Male => "m",
            Self::Female => "f",
        }
    }
}

/// A human-readable age label mapped to the API's underlying age codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBucket {
    pub label: String,
    pub codes: Vec<String>,
}

impl AgeBucket {
    pub fn new(label: impl Into<String>, codes: &[&str]) -> Self {
        Self {
            label: label.into(),
            codes: codes.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

/// Age filter axis
///
/// The tagged type replaces the API's implicit "empty list means
/// unfiltered" convention, so "no filter" and "filter by empty set" cannot
/// be confused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AgeFilter {
    #[default]
    Any,
    Bucket(AgeBucket),
}

impl AgeFilter {
    /// Age codes sent to the API; empty means unfiltered
    pub fn codes(&self) -> &[String] {
        match self {
            Self::Any => &[],
            Self::Bucket(bucket) => &bucket.codes,
        }
    }

    /// Label stamped onto result rows
    pub fn label(&self) -> &str {
        match self {
            Self::Any => "all",
            Self::Bucket(bucket) => &bucket.label,
        }
    }
}

/// One (device, gender, age) filter combination to query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCombination {
    pub device: Device,
    pub gender: Gender,
    pub age: AgeFilter,
}

impl FilterCombination {
    /// The unfiltered baseline combination
    pub fn baseline() -> Self {
        Self::default()
    }

    pub fn for_gender(gender: Gender) -> Self {
        Self {
            gender,
            ..Self::default()
        }
    }

    pub fn for_age_bucket(bucket: AgeBucket) -> Self {
        Self {
            age: AgeFilter::Bucket(bucket),
            ..Self::default()
        }
    }
}

impl std::fmt::Display for FilterCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "device={}/gender={}/age={}",
            self.device.label(),
            self.gender.label(),
            self.age.label()
        )
    }
}

/// Inclusive calendar date range for one collection window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One normalized result row
///
/// `values` holds one entry per keyword group present in the producing
/// response. The `(date, device, gender, age_group)` tuple is the row key;
/// no two rows in a finalized table share it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    pub date: NaiveDate,
    pub values: BTreeMap<String, f64>,
    pub device: String,
    pub gender: String,
    pub age_group: String,
}

impl TrendRow {
    /// Row identity within a finalized table
    pub fn key(&self) -> (NaiveDate, &str, &str, &str) {
        (self.date, &self.device, &self.gender, &self.age_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_params_and_labels() {
        assert_eq!(Device::Any.as_param(), "");
        assert_eq!(Device::Any.label(), "all");
        assert_eq!(Device::Desktop.as_param(), "pc");
        assert_eq!(Device::Mobile.as_param(), "mo");
    }

    #[test]
    fn test_gender_params_and_labels() {
        assert_eq!(Gender::Any.as_param(), "");
        assert_eq!(Gender::Any.label(), "all");
        assert_eq!(Gender::Male.as_param(), "m");
        assert_eq!(Gender::Female.label(), "f");
    }

    #[test]
    fn test_age_filter_any_is_unfiltered() {
        assert!(AgeFilter::Any.codes().is_empty());
        assert_eq!(AgeFilter::Any.label(), "all");

        let bucket = AgeFilter::Bucket(AgeBucket::new("10s", &["1", "2"]));
        assert_eq!(bucket.codes(), &["1".to_string(), "2".to_string()]);
        assert_eq!(bucket.label(), "10s");
    }

    #[test]
    fn test_baseline_combination_is_all_any() {
        let combo = FilterCombination::baseline();
        assert_eq!(combo.device, Device::Any);
        assert_eq!(combo.gender, Gender::Any);
        assert_eq!(combo.age, AgeFilter::Any);
        assert_eq!(combo.to_string(), "device=all/gender=all/age=all");
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        let start = NaiveDate::from_ymd_opt(2021, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert!(DateRange::new(start, end).is_err());
        assert!(DateRange::new(end, start).is_ok());
        assert!(DateRange::new(start, start).is_ok());
    }
}
