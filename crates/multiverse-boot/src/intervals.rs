//! Empirical percentile bounds over the results matrix
//!
//! Each matrix row holds one rank position's bootstrap distribution across
//! iterations. The bounds are plain empirical percentiles with linear
//! interpolation between order statistics, so results line up with the
//! common `quantile` conventions of the surrounding tooling.

use multiverse_core::{Error, Result};
use nalgebra::DMatrix;

/// Percentile of an ascending-sorted slice, interpolating linearly
///
/// # Panics
/// Panics if the slice is empty or `q` is outside `[0, 1]`.
pub fn percentile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    assert!(!sorted.is_empty(), "percentile of an empty slice");
    assert!((0.0..=1.0).contains(&q), "Quantile must be in [0, 1]");

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let h = (n - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

/// Lower/upper percentile bound per matrix row
///
/// Returns `(boot_lb, boot_ub)`, one entry per row, at the `alpha/2` and
/// `1 - alpha/2` empirical percentiles across that row's iterations. With a
/// single iteration both bounds degenerate to that column's value. At least
/// one iteration is required.
pub fn row_percentile_bounds(
    matrix: &DMatrix<f64>,
    confidence_level: f64,
) -> Result<(Vec<f64>, Vec<f64>)> {
    assert!(
        confidence_level > 0.0 && confidence_level < 1.0,
        "Confidence level must be in (0, 1)"
    );
    if matrix.ncols() == 0 {
        return Err(Error::InvalidConfiguration(
            "at least one bootstrap iteration is required".to_string(),
        ));
    }

    let tail = (1.0 - confidence_level) / 2.0;
    let mut boot_lb = Vec::with_capacity(matrix.nrows());
    let mut boot_ub = Vec::with_capacity(matrix.nrows());

    for row in 0..matrix.nrows() {
        let mut samples: Vec<f64> = matrix.row(row).iter().copied().collect();
        samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        boot_lb.push(percentile_of_sorted(&samples, tail));
        boot_ub.push(percentile_of_sorted(&samples, 1.0 - tail));
    }

    Ok((boot_lb, boot_ub))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_percentile_interpolation() {
        let sorted: Vec<f64> = (1..=10).map(|i| i as f64).collect();

        // h = 9 * q; reference values from the linear-interpolation
        // convention
        assert_abs_diff_eq!(percentile_of_sorted(&sorted, 0.025), 1.225, epsilon = 1e-12);
        assert_abs_diff_eq!(percentile_of_sorted(&sorted, 0.5), 5.5, epsilon = 1e-12);
        assert_abs_diff_eq!(percentile_of_sorted(&sorted, 0.975), 9.775, epsilon = 1e-12);
        assert_eq!(percentile_of_sorted(&sorted, 0.0), 1.0);
        assert_eq!(percentile_of_sorted(&sorted, 1.0), 10.0);
    }

    #[test]
    fn test_percentile_exact_order_statistic() {
        // q hitting an integer h returns the order statistic itself
        let sorted = [2.0, 4.0, 6.0, 8.0, 10.0];
        assert_eq!(percentile_of_sorted(&sorted, 0.25), 4.0);
        assert_eq!(percentile_of_sorted(&sorted, 0.75), 8.0);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile_of_sorted(&[3.5], 0.025), 3.5);
        assert_eq!(percentile_of_sorted(&[3.5], 0.975), 3.5);
    }

    #[test]
    #[should_panic]
    fn test_percentile_empty_slice() {
        percentile_of_sorted(&[], 0.5);
    }

    #[test]
    #[should_panic]
    fn test_percentile_invalid_q() {
        percentile_of_sorted(&[1.0], 1.5);
    }

    #[test]
    fn test_row_bounds() {
        // Two rows, ten iterations each
        let first: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        let second: Vec<f64> = (1..=10).map(|i| 10.0 * i as f64).collect();
        let data: Vec<f64> = first.iter().chain(second.iter()).copied().collect();
        let matrix = DMatrix::from_row_slice(2, 10, &data);

        let (lb, ub) = row_percentile_bounds(&matrix, 0.95).unwrap();
        assert_eq!(lb.len(), 2);
        assert_eq!(ub.len(), 2);
        assert_abs_diff_eq!(lb[0], 1.225, epsilon = 1e-12);
        assert_abs_diff_eq!(ub[0], 9.775, epsilon = 1e-12);
        assert_abs_diff_eq!(lb[1], 12.25, epsilon = 1e-12);
        assert_abs_diff_eq!(ub[1], 97.75, epsilon = 1e-12);
    }

    #[test]
    fn test_row_bounds_unsorted_rows() {
        // Rows are not sorted across iterations; bounds must not depend on
        // column order
        let matrix = DMatrix::from_row_slice(1, 4, &[4.0, 1.0, 3.0, 2.0]);
        let (lb, ub) = row_percentile_bounds(&matrix, 0.5).unwrap();
        assert_abs_diff_eq!(lb[0], 1.75, epsilon = 1e-12);
        assert_abs_diff_eq!(ub[0], 3.25, epsilon = 1e-12);
    }

    #[test]
    fn test_single_iteration_degenerates() {
        let matrix = DMatrix::from_row_slice(3, 1, &[0.1, 0.2, 0.3]);
        let (lb, ub) = row_percentile_bounds(&matrix, 0.95).unwrap();
        assert_eq!(lb, vec![0.1, 0.2, 0.3]);
        assert_eq!(ub, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_lower_bound_never_exceeds_upper() {
        let data: Vec<f64> = (0..60).map(|i| ((i * 37) % 60) as f64).collect();
        let matrix = DMatrix::from_row_slice(6, 10, &data);
        let (lb, ub) = row_percentile_bounds(&matrix, 0.95).unwrap();
        for (l, u) in lb.iter().zip(&ub) {
            assert!(l <= u);
        }
    }

    #[test]
    fn test_zero_columns_rejected() {
        let matrix = DMatrix::<f64>::zeros(3, 0);
        assert!(matches!(
            row_percentile_bounds(&matrix, 0.95),
            Err(Error::InvalidConfiguration(_))
        ));
    }
}
