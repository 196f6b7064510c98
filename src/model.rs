//! The persisted lookup model: binning scheme plus count and probability cubes
//!
//! A [`LookupModel`] is immutable once built or loaded. Updating a deployed
//! model means building a fresh one and atomically swapping the handle
//! (e.g. behind an `Arc`); the cubes themselves are never mutated in place,
//! which is what makes concurrent read-side queries safe without locking.

use std::fs;
use std::path::Path;

use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};

use crate::binning::{BinningScheme, RateMode};
use crate::builder::{build_counts, ObservationTable};
use crate::errors::ModelError;
use crate::normalize::{conditional_range_probs, marginal_rate_probs};

/// Row-drop accounting from a build pass
#[derive(Debug, Clone, Copy)]
pub struct BuildSummary {
    /// Rows seen in the input table
    pub rows_total: usize,
    /// Rows dropped because their rate had no bin
    pub rows_dropped: usize,
}

/// Binning parameters as persisted alongside the cubes
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelParams {
    az_bin_deg: f64,
    rate_edges: Vec<f64>,
    rate_mode: RateMode,
    /// Range bin centers, in bin order
    range_vec: Vec<f64>,
}

/// On-disk layout: one JSON record holding params and all three cubes
#[derive(Deserialize)]
struct ModelRecord {
    params: ModelParams,
    counts_cube: Array3<u64>,
    prob_cube: Array3<f32>,
    prob_rate_cube: Array2<f32>,
}

/// Borrowing twin of [`ModelRecord`] so saving never clones the cubes
#[derive(Serialize)]
struct ModelRecordRef<'a> {
    params: ModelParams,
    counts_cube: &'a Array3<u64>,
    prob_cube: &'a Array3<f32>,
    prob_rate_cube: &'a Array2<f32>,
}

/// The queryable unit: scheme, raw counts, and both probability cubes
#[derive(Debug, Clone)]
pub struct LookupModel {
    scheme: BinningScheme,
    counts_cube: Array3<u64>,
    prob_cube: Array3<f32>,
    prob_rate_cube: Array2<f32>,
}

impl LookupModel {
    /// Build a model from an observation table in one pass
    ///
    /// # Returns
    /// The model plus a [`BuildSummary`] reporting how many rows were
    /// dropped for having an unbinnable rate.
    pub fn build(table: &ObservationTable, scheme: BinningScheme) -> (Self, BuildSummary) {
        let out = build_counts(table, &scheme);
        let prob_cube = conditional_range_probs(&out.counts);
        let prob_rate_cube = marginal_rate_probs(&out.counts);

        let model = Self {
            scheme,
            counts_cube: out.counts,
            prob_cube,
            prob_rate_cube,
        };
        let summary = BuildSummary {
            rows_total: out.rows_total,
            rows_dropped: out.rows_dropped,
        };
        (model, summary)
    }

    /// Serialize the model to a single JSON record at `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let record = ModelRecordRef {
            params: ModelParams {
                az_bin_deg: self.scheme.az_bin_deg(),
                rate_edges: self.scheme.rate_edges().to_vec(),
                rate_mode: self.scheme.rate_mode(),
                range_vec: self.scheme.range_centers(),
            },
            counts_cube: &self.counts_cube,
            prob_cube: &self.prob_cube,
            prob_rate_cube: &self.prob_rate_cube,
        };
        let json = serde_json::to_string(&record)?;
        fs::write(path.as_ref(), json)?;
        log::info!("lookup model saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Load a model from a JSON record, re-validating scheme and cube shapes
    ///
    /// # Errors
    /// [`ModelError::InvalidParams`] if the persisted binning parameters do
    /// not form a valid scheme, or [`ModelError::ShapeMismatch`] if any cube
    /// disagrees with the shapes those parameters imply. A truncated or
    /// hand-edited blob cannot masquerade as a model.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let json = fs::read_to_string(path.as_ref())?;
        let record: ModelRecord = serde_json::from_str(&json)?;
        let model = Self::from_record(record)?;
        log::info!(
            "lookup model loaded from {} ({}x{}x{})",
            path.as_ref().display(),
            model.scheme.n_az(),
            model.scheme.n_rate(),
            model.scheme.n_range()
        );
        Ok(model)
    }

    fn from_record(record: ModelRecord) -> Result<Self, ModelError> {
        let params = record.params;
        // The bin width is implied by the first center: center_0 = width / 2.
        let range_bin_m = params.range_vec.first().copied().unwrap_or(0.0) * 2.0;
        let range_max_m = range_bin_m * params.range_vec.len() as f64;
        let scheme = BinningScheme::new(
            params.az_bin_deg,
            params.rate_edges,
            params.rate_mode,
            range_bin_m,
            range_max_m,
        )?;

        let expected = [scheme.n_az(), scheme.n_rate(), scheme.n_range()];
        if record.counts_cube.dim() != (expected[0], expected[1], expected[2]) {
            return Err(ModelError::ShapeMismatch {
                cube: "counts_cube",
                expected: expected.to_vec(),
                actual: record.counts_cube.shape().to_vec(),
            });
        }
        if record.prob_cube.dim() != (expected[0], expected[1], expected[2]) {
            return Err(ModelError::ShapeMismatch {
                cube: "prob_cube",
                expected: expected.to_vec(),
                actual: record.prob_cube.shape().to_vec(),
            });
        }
        if record.prob_rate_cube.dim() != (expected[0], expected[1]) {
            return Err(ModelError::ShapeMismatch {
                cube: "prob_rate_cube",
                expected: expected[..2].to_vec(),
                actual: record.prob_rate_cube.shape().to_vec(),
            });
        }

        Ok(Self {
            scheme,
            counts_cube: record.counts_cube,
            prob_cube: record.prob_cube,
            prob_rate_cube: record.prob_rate_cube,
        })
    }

    /// The binning scheme the cubes were built under
    #[inline]
    pub fn scheme(&self) -> &BinningScheme {
        &self.scheme
    }

    /// Raw counts, shape `(n_az, n_rate, n_range)`
    #[inline]
    pub fn counts_cube(&self) -> &Array3<u64> {
        &self.counts_cube
    }

    /// P(r | theta, omega), shape `(n_az, n_rate, n_range)`
    #[inline]
    pub fn prob_cube(&self) -> &Array3<f32> {
        &self.prob_cube
    }

    /// P(omega | theta), shape `(n_az, n_rate)`
    #[inline]
    pub fn prob_rate_cube(&self) -> &Array2<f32> {
        &self.prob_rate_cube
    }
}
