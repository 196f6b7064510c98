//! Stateless per-observation queries against a loaded model
//!
//! Both queries are an O(log n_rate) edge search followed by O(1) row
//! slicing; nothing iterates the full cube. "No data" is a normal return
//! value (`None`), distinct from a valid distribution that happens to put
//! zero mass somewhere: it means the scheme does not cover the observation,
//! or no historical sample backs the resolved cell.

use ndarray::{s, Axis};

use crate::model::LookupModel;

/// A discrete range distribution for one (bearing, bearing-rate) pair
#[derive(Debug, Clone)]
pub struct RangeDistribution {
    /// Range bin centers in meters, in bin order
    pub range_centers: Vec<f64>,
    /// P(r | theta, omega); sums to 1
    pub pdf: Vec<f32>,
    /// Raw sample counts backing each bin
    pub counts: Vec<u64>,
}

/// A discrete bearing-rate distribution for one bearing
#[derive(Debug, Clone)]
pub struct RateDistribution {
    /// `[low, high)` edges of each rate bin in deg/s, in bin order
    pub intervals: Vec<(f64, f64)>,
    /// P(omega | theta); sums to 1
    pub pdf: Vec<f32>,
    /// Raw sample counts per rate bin (summed over the range axis)
    pub counts: Vec<u64>,
}

/// Look up P(r | theta, omega)
///
/// # Returns
/// `None` when the rate has no bin under the model's scheme, or when the
/// resolved (azimuth, rate) cell has zero backing observations. Otherwise
/// the three vectors all have length `n_range` and the pdf sums to 1.
pub fn range_distribution(
    theta_deg: f64,
    omega_deg_s: f64,
    model: &LookupModel,
) -> Option<RangeDistribution> {
    let scheme = model.scheme();
    let i = scheme.azimuth_to_bin(theta_deg);
    let j = scheme.rate_to_bin(omega_deg_s)?;

    let counts_row = model.counts_cube().slice(s![i, j, ..]);
    if counts_row.sum() == 0 {
        return None;
    }

    let pdf_row = model.prob_cube().slice(s![i, j, ..]);
    // stored at f32; renormalize so the returned mass is exactly 1
    let mass: f32 = pdf_row.sum();
    let pdf = pdf_row.iter().map(|&p| p / mass).collect();

    Some(RangeDistribution {
        range_centers: scheme.range_centers(),
        pdf,
        counts: counts_row.to_vec(),
    })
}

/// Look up the marginal P(omega | theta)
///
/// Ignores rate and range entirely; uses the marginal cube plus the count
/// cube summed over the range axis for the raw sample sizes.
///
/// # Returns
/// `None` when the bearing's azimuth row has zero total observations.
pub fn rate_distribution(theta_deg: f64, model: &LookupModel) -> Option<RateDistribution> {
    let scheme = model.scheme();
    let i = scheme.azimuth_to_bin(theta_deg);

    let counts = model.counts_cube().slice(s![i, .., ..]).sum_axis(Axis(1));
    if counts.sum() == 0 {
        return None;
    }

    let pdf_row = model.prob_rate_cube().row(i);
    let mass: f32 = pdf_row.sum();
    let pdf = pdf_row.iter().map(|&p| p / mass).collect();

    Some(RateDistribution {
        intervals: scheme.rate_intervals(),
        pdf,
        counts: counts.to_vec(),
    })
}
