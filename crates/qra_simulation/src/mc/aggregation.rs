//! Per-year aggregation of the flat impact array.

/// Sums `impact` into one total per year.
///
/// Year `i` owns the `occurrences[i]` values following those of the years
/// before it. Returns `None` unless the counts add up to `impact.len()`
/// exactly.
///
/// # Examples
///
/// ```
/// use qra_simulation::mc::partition_totals;
///
/// let impact = [1.0, 2.0, 3.0, 4.0];
/// let totals = partition_totals(&impact, &[2, 0, 1, 1]).unwrap();
/// assert_eq!(totals, vec![3.0, 0.0, 3.0, 4.0]);
/// assert!(partition_totals(&impact, &[1, 1]).is_none());
/// ```
pub fn partition_totals(impact: &[f64], occurrences: &[u64]) -> Option<Vec<f64>> {
    let mut rest = impact;
    let totals = occurrences
        .iter()
        .map(|&count| {
            let count = usize::try_from(count).ok()?;
            if count > rest.len() {
                return None;
            }
            let (year, tail) = rest.split_at(count);
            rest = tail;
            Some(year.iter().sum())
        })
        .collect::<Option<Vec<f64>>>()?;
    rest.is_empty().then_some(totals)
}

/// Total number of occurrences, or `None` if it does not fit in `usize`.
pub fn occurrence_sum(occurrences: &[u64]) -> Option<usize> {
    occurrences.iter().try_fold(0usize, |acc, &count| {
        usize::try_from(count).ok().and_then(|c| acc.checked_add(c))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_offsets_advance_per_year() {
        let impact = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0];
        let totals = partition_totals(&impact, &[1, 2, 3]).unwrap();
        assert_eq!(totals, vec![10.0, 50.0, 150.0]);
    }

    #[test]
    fn test_all_zero_occurrences() {
        assert_eq!(partition_totals(&[], &[0, 0, 0]).unwrap(), vec![0.0; 3]);
    }

    #[test]
    fn test_too_many_impacts() {
        assert!(partition_totals(&[1.0, 2.0], &[1]).is_none());
    }

    #[test]
    fn test_occurrence_sum() {
        assert_eq!(occurrence_sum(&[1, 2, 3]), Some(6));
        assert_eq!(occurrence_sum(&[]), Some(0));
        assert_eq!(occurrence_sum(&[u64::MAX, 1]), None);
    }

    proptest! {
        #[test]
        fn prop_totals_preserve_mass(counts in proptest::collection::vec(0u64..6, 1..50)) {
            let k: usize = counts.iter().map(|&c| c as usize).sum();
            let impact: Vec<f64> = (0..k).map(|i| i as f64).collect();
            let totals = partition_totals(&impact, &counts).unwrap();
            prop_assert_eq!(totals.len(), counts.len());
            let lhs: f64 = totals.iter().sum();
            let rhs: f64 = impact.iter().sum();
            prop_assert!((lhs - rhs).abs() < 1e-9 * rhs.max(1.0));
        }
    }
}
