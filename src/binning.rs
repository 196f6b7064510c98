//! Axis discretization for the bearing / bearing-rate / range cube
//!
//! A [`BinningScheme`] is the immutable value object that maps continuous
//! observables onto cube indices and back. Each axis has its own edge-case
//! policy:
//!
//! - **bearing** is cyclic and always wrapped into [0, 360);
//! - **bearing rate** is an open domain: values outside the configured edges
//!   get *no* bin (clamping would silently misattribute mass from
//!   implausibly fast maneuvers);
//! - **range** is clamped, so overflow past `range_max_m` lands in the last
//!   bin instead of being discarded.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Whether bearing-rate binning preserves turn direction
///
/// `Signed` is the canonical mode: edges mirror a log-spaced positive
/// sequence about zero, so left and right turns occupy distinct bins.
/// `Absolute` folds the rate through `|omega|` before the edge search and
/// collapses turn direction; it requires non-negative edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateMode {
    /// Signed rates, edges symmetric about zero
    Signed,
    /// Absolute rates, non-negative edges only
    Absolute,
}

/// Immutable discretization of the three observation axes
///
/// Fully determines the cube shapes: `n_az = 360 / az_bin_deg`,
/// `n_rate = rate_edges.len() - 1`, `n_range = ceil(range_max_m / range_bin_m)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinningScheme {
    az_bin_deg: f64,
    rate_edges: Vec<f64>,
    rate_mode: RateMode,
    range_bin_m: f64,
    range_max_m: f64,
    n_az: usize,
    n_range: usize,
}

/// Divisibility tolerance for `360 % az_bin_deg`
const AZ_DIVISIBILITY_EPS: f64 = 1e-9;

impl BinningScheme {
    /// Create a scheme from explicit parameters, validating every axis
    ///
    /// # Arguments
    /// * `az_bin_deg` - Azimuth bin width in degrees; must divide 360 evenly
    /// * `rate_edges` - Strictly increasing bearing-rate bin edges in deg/s
    /// * `rate_mode` - Signed or absolute rate binning
    /// * `range_bin_m` - Range bin width in meters
    /// * `range_max_m` - Upper range limit in meters
    ///
    /// # Errors
    /// [`ConfigError`] if any width is non-positive, 360 is not divisible by
    /// `az_bin_deg`, the edges are too few or not strictly increasing, or an
    /// absolute-mode edge is negative.
    pub fn new(
        az_bin_deg: f64,
        rate_edges: Vec<f64>,
        rate_mode: RateMode,
        range_bin_m: f64,
        range_max_m: f64,
    ) -> Result<Self, ConfigError> {
        if !(az_bin_deg > 0.0) {
            return Err(ConfigError::NonPositiveBinWidth {
                axis: "azimuth",
                value: az_bin_deg,
            });
        }
        if (360.0 % az_bin_deg).abs() > AZ_DIVISIBILITY_EPS
            && (az_bin_deg - 360.0 % az_bin_deg).abs() > AZ_DIVISIBILITY_EPS
        {
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
        if rate_edges.len() < 2 {
            return Err(ConfigError::TooFewRateEdges {
                count: rate_edges.len(),
            });
        }
        for i in 1..rate_edges.len() {
            if !(rate_edges[i] > rate_edges[i - 1]) {
                return Err(ConfigError::UnsortedRateEdges { index: i });
            }
        }
        if rate_mode == RateMode::Absolute && rate_edges[0] < 0.0 {
            return Err(ConfigError::NegativeAbsoluteEdge {
                value: rate_edges[0],
            });
        }

        let n_az = (360.0 / az_bin_deg).round() as usize;
        let n_range = (range_max_m / range_bin_m).ceil() as usize;

        Ok(Self {
            az_bin_deg,
            rate_edges,
            rate_mode,
            range_bin_m,
            range_max_m,
            n_az,
            n_range,
        })
    }

    /// Create the canonical scheme with mirrored log-spaced signed rate edges
    ///
    /// Positive edge magnitudes are spaced geometrically from
    /// `10^min_exp` to `10^max_exp` over `steps_per_side` points, then
    /// mirrored to negative values and concatenated. There is no zero edge,
    /// so the two innermost edges bracket zero exactly once.
    ///
    /// # Arguments
    /// * `az_bin_deg` - Azimuth bin width in degrees
    /// * `min_exp` - Exponent of the smallest positive edge magnitude
    /// * `max_exp` - Exponent of the largest positive edge magnitude
    /// * `steps_per_side` - Number of positive edges (>= 2)
    /// * `range_bin_m` - Range bin width in meters
    /// * `range_max_m` - Upper range limit in meters
    pub fn with_log_rate_edges(
        az_bin_deg: f64,
        min_exp: f64,
        max_exp: f64,
        steps_per_side: usize,
        range_bin_m: f64,
        range_max_m: f64,
    ) -> Result<Self, ConfigError> {
        if steps_per_side < 2 {
            return Err(ConfigError::TooFewRateEdges {
                count: steps_per_side,
            });
        }
        let step = (max_exp - min_exp) / (steps_per_side - 1) as f64;
        let pos: Vec<f64> = (0..steps_per_side)
            .map(|i| 10f64.powf(min_exp + step * i as f64))
            .collect();
        let mut edges: Vec<f64> = pos.iter().rev().map(|e| -e).collect();
        edges.extend_from_slice(&pos);
        Self::new(az_bin_deg, edges, RateMode::Signed, range_bin_m, range_max_m)
    }

    // ------------------------------------------------------------------
    // Forward maps: continuous value -> bin index
    // ------------------------------------------------------------------

    /// Map a bearing in degrees to its azimuth bin
    ///
    /// Accepts any real bearing (negative, >= 360) and wraps it into
    /// [0, 360) before the integer division.
    pub fn azimuth_to_bin(&self, theta_deg: f64) -> usize {
        let wrapped = theta_deg.rem_euclid(360.0);
        // rem_euclid of a tiny negative can round up to exactly 360.0
        ((wrapped / self.az_bin_deg) as usize).min(self.n_az - 1)
    }

    /// Map a bearing rate in deg/s to its rate bin, or `None` outside the edges
    ///
    /// Uses the right-inclusive convention: a value equal to an edge falls
    /// into the bin *starting* at that edge, i.e. bin `j` covers
    /// `[edges[j], edges[j+1])`.
    pub fn rate_to_bin(&self, omega_deg_s: f64) -> Option<usize> {
        let value = match self.rate_mode {
            RateMode::Signed => omega_deg_s,
            RateMode::Absolute => omega_deg_s.abs(),
        };
        let last = *self.rate_edges.last().unwrap_or(&f64::NAN);
        if value < self.rate_edges[0] || value >= last || value.is_nan() {
            return None;
        }
        Some(self.rate_edges.partition_point(|e| *e <= value) - 1)
    }

    /// Map a range in meters to its range bin, clamping overflow into the last bin
    pub fn range_to_bin(&self, range_m: f64) -> usize {
        let clamped = range_m.max(0.0);
        ((clamped / self.range_bin_m) as usize).min(self.n_range - 1)
    }

    // ------------------------------------------------------------------
    // Inverse maps: bin index -> representative value
    // ------------------------------------------------------------------

    /// Center of range bin `k` in meters
    pub fn range_bin_center(&self, k: usize) -> f64 {
        k as f64 * self.range_bin_m + self.range_bin_m / 2.0
    }

    /// Centers of all range bins, in bin order
    pub fn range_centers(&self) -> Vec<f64> {
        (0..self.n_range).map(|k| self.range_bin_center(k)).collect()
    }

    /// The `[low, high)` edge pair of rate bin `j` in deg/s
    pub fn rate_bin_bounds(&self, j: usize) -> (f64, f64) {
        (self.rate_edges[j], self.rate_edges[j + 1])
    }

    /// Edge pairs of all rate bins, in bin order
    pub fn rate_intervals(&self) -> Vec<(f64, f64)> {
        (0..self.n_rate()).map(|j| self.rate_bin_bounds(j)).collect()
    }

    // ------------------------------------------------------------------
    // Shape and parameter accessors
    // ------------------------------------------------------------------

    /// Number of azimuth bins
    #[inline]
    pub fn n_az(&self) -> usize {
        self.n_az
    }

    /// Number of rate bins
    #[inline]
    pub fn n_rate(&self) -> usize {
        self.rate_edges.len() - 1
    }

    /// Number of range bins
    #[inline]
    pub fn n_range(&self) -> usize {
        self.n_range
    }

    /// Azimuth bin width in degrees
    #[inline]
    pub fn az_bin_deg(&self) -> f64 {
        self.az_bin_deg
    }

    /// The rate bin edges in deg/s
    #[inline]
    pub fn rate_edges(&self) -> &[f64] {
        &self.rate_edges
    }

    /// Signed or absolute rate binning
    #[inline]
    pub fn rate_mode(&self) -> RateMode {
        self.rate_mode
    }

    /// Range bin width in meters
    #[inline]
    pub fn range_bin_m(&self) -> f64 {
        self.range_bin_m
    }

    /// Upper range limit in meters
    #[inline]
    pub fn range_max_m(&self) -> f64 {
        self.range_max_m
    }
}
