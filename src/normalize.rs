//! Guarded normalization of the count cube into probability tables
//!
//! Both normalizers share the same zero-row contract: a row whose count sum
//! is zero stays identically zero in the output. The guard is applied
//! before the division, so no NaN or Inf ever enters the tables. Outputs
//! are `f32`, which is plenty for probability mass; the `u64` counts remain
//! the authoritative record of sample sizes.

use ndarray::{s, Array2, Array3, Axis};

/// Normalize each `(azimuth, rate)` row over the range axis to P(r | theta, omega)
///
/// Output shape matches the input; every row sums to 1.0 if the count row
/// had any observations, and is all zeros otherwise.
pub fn conditional_range_probs(counts: &Array3<u64>) -> Array3<f32> {
    let (n_az, n_rate, n_range) = counts.dim();
    let mut probs = Array3::<f32>::zeros((n_az, n_rate, n_range));

    for i in 0..n_az {
        for j in 0..n_rate {
            let row = counts.slice(s![i, j, ..]);
            let sum: u64 = row.sum();
            if sum == 0 {
                continue; // explicit "no data" row, not NaN
            }
            let denom = sum as f64;
            let mut out = probs.slice_mut(s![i, j, ..]);
            for (p, &c) in out.iter_mut().zip(row.iter()) {
                *p = (c as f64 / denom) as f32;
            }
        }
    }

    probs
}

/// Sum the cube over the range axis to a `(n_az, n_rate)` count matrix
pub fn rate_count_matrix(counts: &Array3<u64>) -> Array2<u64> {
    counts.sum_axis(Axis(2))
}

/// Normalize each azimuth row of the range-marginalized counts to P(omega | theta)
///
/// Output shape is `(n_az, n_rate)`; rows with no observations at that
/// azimuth (across all rates) are all zeros.
pub fn marginal_rate_probs(counts: &Array3<u64>) -> Array2<f32> {
    let rate_counts = rate_count_matrix(counts);
    let (n_az, n_rate) = rate_counts.dim();
    let mut probs = Array2::<f32>::zeros((n_az, n_rate));

    for i in 0..n_az {
        let row = rate_counts.row(i);
        let sum: u64 = row.sum();
        if sum == 0 {
            continue;
        }
        let denom = sum as f64;
        let mut out = probs.row_mut(i);
        for (p, &c) in out.iter_mut().zip(row.iter()) {
            *p = (c as f64 / denom) as f32;
        }
    }

    probs
}
