//! Descriptive statistics over simulated samples.
//!
//! Percentiles use linear interpolation between the two closest order
//! statistics, so `percentile(x, 0.0)` is the minimum and
//! `percentile(x, 100.0)` the maximum.

/// Arithmetic mean. Returns `0.0` for an empty slice.
#[inline]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Returns a sorted copy of `values` (total order, NaN last).
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Percentile `pct` (in `[0, 100]`) of `values`.
///
/// Returns `None` for an empty slice or a `pct` outside `[0, 100]`.
///
/// # Examples
///
/// ```
/// use qra_core::math::statistics::percentile;
///
/// let x = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile(&x, 50.0), Some(2.5));
/// assert_eq!(percentile(&[], 50.0), None);
/// ```
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    percentile_sorted(&sorted(values), pct)
}

/// Percentile of an already sorted slice.
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&pct) {
        return None;
    }
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// `n == 1` yields `[start]`; `n == 0` yields an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Fraction of `values` greater than or equal to `threshold`.
pub fn exceedance_probability(values: &[f64], threshold: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().filter(|&&v| v >= threshold).count() as f64 / values.len() as f64
}

/// Minimum and maximum, or `None` for an empty slice.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        let x = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(percentile(&x, 0.0), Some(10.0));
        assert_eq!(percentile(&x, 100.0), Some(50.0));
        assert_eq!(percentile(&x, 50.0), Some(30.0));
        assert_relative_eq!(percentile(&x, 95.0).unwrap(), 48.0, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_unsorted_input() {
        let x = [5.0, 1.0, 3.0];
        assert_eq!(percentile(&x, 50.0), Some(3.0));
    }

    #[test]
    fn test_percentile_out_of_range() {
        assert_eq!(percentile(&[1.0], 101.0), None);
        assert_eq!(percentile(&[1.0], -1.0), None);
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_exceedance_probability() {
        let x = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(exceedance_probability(&x, 0.0), 1.0);
        assert_eq!(exceedance_probability(&x, 2.0), 0.5);
        assert_eq!(exceedance_probability(&x, 3.5), 0.0);
        assert_eq!(exceedance_probability(&[], 1.0), 0.0);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max(&[3.0, -1.0, 7.0]), Some((-1.0, 7.0)));
        assert_eq!(min_max(&[]), None);
    }

    proptest! {
        #[test]
        fn prop_percentile_within_bounds(
            values in proptest::collection::vec(-1e6..1e6f64, 1..200),
            pct in 0.0..=100.0f64,
        ) {
            let p = percentile(&values, pct).unwrap();
            let (lo, hi) = min_max(&values).unwrap();
            prop_assert!(p >= lo && p <= hi);
        }
    }
}
