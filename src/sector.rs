//! Coarse bearing x range occupancy statistics
//!
//! A 2-D companion to the full cube: where was the traffic, per azimuth
//! sector? Uses its own (typically coarser) bin widths and row-normalizes
//! to P(range | bearing) with the same guarded zero-row contract as the
//! cube normalizers. Unlike the lookup cube, samples at or beyond the
//! range maximum are discarded here rather than clamped, matching plain
//! 2-D histogram semantics.

use ndarray::Array2;

use crate::builder::ObservationTable;
use crate::errors::ConfigError;

/// Row-normalized bearing x range occupancy histogram
#[derive(Debug, Clone)]
pub struct SectorHistogram {
    /// Azimuth bin centers in degrees
    pub az_centers: Vec<f64>,
    /// Range bin centers in meters
    pub range_centers: Vec<f64>,
    /// Raw counts, shape `(n_az, n_range)`
    pub counts: Array2<u64>,
    /// P(range | bearing); each row sums to 1 or is all zeros
    pub occupancy: Array2<f64>,
    /// Samples discarded for falling outside `[0, range_max_m)`
    pub rows_discarded: usize,
}

/// Build a sector occupancy histogram from an observation table
///
/// # Arguments
/// * `table` - Observation records (only bearing and range are used)
/// * `az_bin_deg` - Sector width in degrees; must divide 360 evenly
/// * `range_bin_m` - Range ring width in meters
/// * `range_max_m` - Upper range limit in meters (exclusive)
pub fn sector_histogram(
    table: &ObservationTable,
    az_bin_deg: f64,
    range_bin_m: f64,
    range_max_m: f64,
) -> Result<SectorHistogram, ConfigError> {
    if !(az_bin_deg > 0.0) {
        return Err(ConfigError::NonPositiveBinWidth {
            axis: "azimuth",
            value: az_bin_deg,
        });
    }
    if (360.0 % az_bin_deg).abs() > 1e-9 && (az_bin_deg - 360.0 % az_bin_deg).abs() > 1e-9 {
        return Err(ConfigError::AzimuthNotDivisible { az_bin_deg });
    }
    if !(range_bin_m > 0.0) {
        return Err(ConfigError::NonPositiveBinWidth {
            axis: "range",
            value: range_bin_m,
        });
    }
    if !(range_max_m > 0.0) {
        return Err(ConfigError::NonPositiveBinWidth {
            axis: "range maximum",
            value: range_max_m,
        });
    }

    let n_az = (360.0 / az_bin_deg).round() as usize;
    let n_range = (range_max_m / range_bin_m).ceil() as usize;
    let mut counts = Array2::<u64>::zeros((n_az, n_range));
    let mut rows_discarded = 0usize;

    for obs in table.iter() {
        if !(obs.range_m >= 0.0) || obs.range_m >= range_max_m {
            rows_discarded += 1;
            continue;
        }
        let i = ((obs.bearing_deg.rem_euclid(360.0) / az_bin_deg) as usize).min(n_az - 1);
        let k = ((obs.range_m / range_bin_m) as usize).min(n_range - 1);
        counts[[i, k]] += 1;
    }

    let mut occupancy = Array2::<f64>::zeros((n_az, n_range));
    for i in 0..n_az {
        let row = counts.row(i);
        let sum: u64 = row.sum();
        if sum == 0 {
            continue;
        }
        let denom = sum as f64;
        let mut out = occupancy.row_mut(i);
        for (p, &c) in out.iter_mut().zip(row.iter()) {
            *p = c as f64 / denom;
        }
    }

    let az_centers = (0..n_az)
        .map(|i| i as f64 * az_bin_deg + az_bin_deg / 2.0)
        .collect();
    let range_centers = (0..n_range)
        .map(|k| k as f64 * range_bin_m + range_bin_m / 2.0)
        .collect();

    Ok(SectorHistogram {
        az_centers,
        range_centers,
        counts,
        occupancy,
        rows_discarded,
    })
}
