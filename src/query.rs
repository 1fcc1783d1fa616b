//! Query expansion over the demographic filter space
//!
//! The collector does not enumerate every point of the (device, gender,
//! age) cube. It queries a fixed, ordered slice of it: one unfiltered
//! baseline, one combination per gender, and one per named age bucket.
//! Order is fixed so repeated runs produce identical request sequences
//! and reproducible logs.

use crate::models::{AgeBucket, FilterCombination, Gender, KeywordGroup};

/// The fixed age partition scheme
///
/// Each bucket maps a human-readable label to the DataLab age codes it
/// covers. Codes 7 through 11 (40s and up) are collapsed into one bucket
/// since their individual volumes are too thin to chart separately.
pub fn default_age_buckets() -> Vec<AgeBucket> {
    vec![
        AgeBucket::new("10s", &["1", "2"]),
        AgeBucket::new("20s", &["3", "4"]),
        AgeBucket::new("30s", &["5", "6"]),
        AgeBucket::new("40s_plus", &["7", "8", "9", "10", "11"]),
    ]
}

/// The full demographic sweep: baseline, each gender, each age bucket
///
/// Deterministic: identical inputs always yield the same ordered sequence.
/// No input is rejected; with no keyword groups there is nothing to
/// segment, so only the baseline is queried and comes back empty.
pub fn demographic_combinations(groups: &[KeywordGroup]) -> Vec<FilterCombination> {
    if groups.is_empty() {
        return vec![FilterCombination::baseline()];
    }

    let mut combinations = vec![
        FilterCombination::baseline(),
        FilterCombination::for_gender(Gender::Male),
        FilterCombination::for_gender(Gender::Female),
    ];
    combinations.extend(
        default_age_buckets()
            .into_iter()
            .map(FilterCombination::for_age_bucket),
    );
    combinations
}

/// The gender-only sweep used for long-term collection windows
pub fn gender_combinations(groups: &[KeywordGroup]) -> Vec<FilterCombination> {
    if groups.is_empty() {
        return vec![FilterCombination::baseline()];
    }

    vec![
        FilterCombination::baseline(),
        FilterCombination::for_gender(Gender::Male),
        FilterCombination::for_gender(Gender::Female),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeFilter, Device};

    fn groups() -> Vec<KeywordGroup> {
        vec![KeywordGroup::new("A", vec!["x".to_string()])]
    }

    #[test]
    fn test_demographic_order() {
        let combos = demographic_combinations(&groups());
        assert_eq!(combos.len(), 7);

        assert_eq!(combos[0], FilterCombination::baseline());
        assert_eq!(combos[1].gender, Gender::Male);
        assert_eq!(combos[2].gender, Gender::Female);

        let age_labels: Vec<&str> = combos[3..].iter().map(|c| c.age.label()).collect();
        assert_eq!(age_labels, ["10s", "20s", "30s", "40s_plus"]);
    }

    #[test]
    fn test_age_sweep_leaves_other_axes_unfiltered() {
        for combo in &demographic_combinations(&groups())[3..] {
            assert_eq!(combo.device, Device::Any);
            assert_eq!(combo.gender, Gender::Any);
            assert!(matches!(combo.age, AgeFilter::Bucket(_)));
        }
    }

    #[test]
    fn test_expansion_is_deterministic() {
        assert_eq!(
            demographic_combinations(&groups()),
            demographic_combinations(&groups())
        );
        assert_eq!(gender_combinations(&groups()), gender_combinations(&groups()));
    }

    #[test]
    fn test_empty_groups_yield_baseline_only() {
        assert_eq!(
            demographic_combinations(&[]),
            [FilterCombination::baseline()]
        );
        assert_eq!(gender_combinations(&[]), [FilterCombination::baseline()]);
    }

    #[test]
    fn test_age_partition_codes() {
        let buckets = default_age_buckets();
        assert_eq!(buckets[0].codes, ["1", "2"]);
        assert_eq!(buckets[3].codes, ["7", "8", "9", "10", "11"]);

        // Codes 1..=11 are each covered exactly once
        let all_codes: Vec<&str> = buckets
            .iter()
            .flat_map(|b| b.codes.iter().map(String::as_str))
            .collect();
        assert_eq!(all_codes.len(), 11);
        for code in 1..=11 {
            assert!(all_codes.contains(&code.to_string().as_str()));
        }
    }

    #[test]
    fn test_gender_sweep() {
        let combos = gender_combinations(&groups());
        assert_eq!(combos.len(), 3);
        assert!(combos.iter().all(|c| c.age == AgeFilter::Any));
    }
}
