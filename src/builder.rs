//! Single-pass accumulation of observation records into the count cube
//!
//! The builder is a pure reduction: one scan over the table, one `u64`
//! increment per record, no state beyond the cube being filled. Records
//! whose bearing rate falls outside the scheme's edges are dropped and
//! counted, never approximated into a neighboring bin.

use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::binning::BinningScheme;
use crate::errors::BuildError;

/// One interpolated trajectory sample as produced by the upstream
/// AIS-preparation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Bearing from the sensor in degrees, clockwise from north
    pub bearing_deg: f64,
    /// Signed bearing rate in degrees per second
    pub rate_deg_s: f64,
    /// Ground-truth range in meters
    pub range_m: f64,
}

/// An owned table of observation records
///
/// Rows deserialize from a JSON array of records; a record missing any of
/// the three columns fails deserialization outright rather than producing a
/// partial row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    /// Wrap a vector of records
    pub fn from_records(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    /// Assemble a table from three parallel columns
    ///
    /// # Errors
    /// [`BuildError::ColumnLengthMismatch`] if the columns are ragged.
    pub fn from_columns(
        bearing_deg: &[f64],
        rate_deg_s: &[f64],
        range_m: &[f64],
    ) -> Result<Self, BuildError> {
        if bearing_deg.len() != rate_deg_s.len() || bearing_deg.len() != range_m.len() {
            return Err(BuildError::ColumnLengthMismatch {
                bearing: bearing_deg.len(),
                rate: rate_deg_s.len(),
                range: range_m.len(),
            });
        }
        let rows = bearing_deg
            .iter()
            .zip(rate_deg_s)
            .zip(range_m)
            .map(|((&b, &w), &r)| Observation {
                bearing_deg: b,
                rate_deg_s: w,
                range_m: r,
            })
            .collect();
        Ok(Self { rows })
    }

    /// Parse a table from a JSON array of row records
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.rows.iter()
    }
}

/// Result of one accumulation pass
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// Raw counts, shape `(n_az, n_rate, n_range)`
    pub counts: Array3<u64>,
    /// Rows seen in the input table
    pub rows_total: usize,
    /// Rows dropped because their rate had no bin
    pub rows_dropped: usize,
}

/// Accumulate an observation table into a count cube
///
/// Bearings wrap, ranges clamp into the last bin, and rates outside the
/// scheme's edges drop the whole row. Duplicate records are simply
/// additional counts.
pub fn build_counts(table: &ObservationTable, scheme: &BinningScheme) -> BuildOutput {
    let mut counts = Array3::<u64>::zeros((scheme.n_az(), scheme.n_rate(), scheme.n_range()));
    let mut rows_dropped = 0usize;

    for obs in table.iter() {
        let Some(j) = scheme.rate_to_bin(obs.rate_deg_s) else {
            rows_dropped += 1;
            continue;
        };
        let i = scheme.azimuth_to_bin(obs.bearing_deg);
        let k = scheme.range_to_bin(obs.range_m);
        counts[[i, j, k]] += 1;
    }

    log::info!(
        "count cube built: {} rows, {} dropped (rate outside edges), shape {}x{}x{}",
        table.len(),
        rows_dropped,
        scheme.n_az(),
        scheme.n_rate(),
        scheme.n_range()
    );

    BuildOutput {
        counts,
        rows_total: table.len(),
        rows_dropped,
    }
}
