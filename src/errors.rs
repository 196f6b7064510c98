//! Error types for model construction, persistence, and statistics
//!
//! "No data" at query time is deliberately *not* represented here: queries
//! against uncovered or empty cells return `Option::None` so callers can
//! distinguish "the model has nothing to say" from an actual failure.

use std::fmt;
use std::io;

/// Errors raised while validating a [`crate::BinningScheme`]
///
/// All of these are fatal at build time: a malformed scheme must never
/// produce a usable-looking model.
#[derive(Debug)]
pub enum ConfigError {
    /// A bin width that must be positive was zero or negative
    NonPositiveBinWidth {
        /// Which axis the width belongs to ("azimuth", "range", ...)
        axis: &'static str,
        /// The offending value
        value: f64,
    },

    /// 360 degrees is not evenly divisible by the azimuth bin width
    AzimuthNotDivisible {
        /// The rejected azimuth bin width in degrees
        az_bin_deg: f64,
    },

    /// Fewer than two rate edges (at least one bin is required)
    TooFewRateEdges {
        /// Number of edges supplied
        count: usize,
    },

    /// Rate edges are not strictly increasing
    UnsortedRateEdges {
        /// Index of the first edge that is <= its predecessor
        index: usize,
    },

    /// Absolute rate binning was requested with a negative edge
    NegativeAbsoluteEdge {
        /// The offending edge value
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveBinWidth { axis, value } => {
                write!(f, "{} bin width must be positive, got {}", axis, value)
            }
            ConfigError::AzimuthNotDivisible { az_bin_deg } => {
                write!(f, "360 degrees is not divisible by azimuth bin width {}", az_bin_deg)
            }
            ConfigError::TooFewRateEdges { count } => {
                write!(f, "need at least 2 rate edges, got {}", count)
            }
            ConfigError::UnsortedRateEdges { index } => {
                write!(f, "rate edges must be strictly increasing (violation at index {})", index)
            }
            ConfigError::NegativeAbsoluteEdge { value } => {
                write!(f, "absolute rate binning requires non-negative edges, got {}", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised while assembling an observation table
#[derive(Debug)]
pub enum BuildError {
    /// Input columns have different lengths (ragged or missing data)
    ColumnLengthMismatch {
        /// Length of the bearing column
        bearing: usize,
        /// Length of the bearing-rate column
        rate: usize,
        /// Length of the range column
        range: usize,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::ColumnLengthMismatch { bearing, rate, range } => {
                write!(
                    f,
                    "observation columns have mismatched lengths: bearing={}, rate={}, range={}",
                    bearing, rate, range
                )
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Errors raised while persisting or loading a [`crate::LookupModel`]
#[derive(Debug)]
pub enum ModelError {
    /// Underlying file I/O failed
    Io(io::Error),

    /// The persisted record could not be (de)serialized
    Serde(serde_json::Error),

    /// A cube's shape disagrees with the persisted binning parameters
    ShapeMismatch {
        /// Which cube failed validation
        cube: &'static str,
        /// Shape implied by the params record
        expected: Vec<usize>,
        /// Shape actually found in the blob
        actual: Vec<usize>,
    },

    /// The persisted binning parameters are themselves invalid
    InvalidParams(ConfigError),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Io(e) => write!(f, "model I/O failed: {}", e),
            ModelError::Serde(e) => write!(f, "model (de)serialization failed: {}", e),
            ModelError::ShapeMismatch { cube, expected, actual } => {
                write!(
                    f,
                    "{} shape {:?} does not match binning parameters (expected {:?})",
                    cube, actual, expected
                )
            }
            ModelError::InvalidParams(e) => write!(f, "persisted binning parameters invalid: {}", e),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Io(e) => Some(e),
            ModelError::Serde(e) => Some(e),
            ModelError::InvalidParams(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ModelError {
    fn from(e: io::Error) -> Self {
        ModelError::Io(e)
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::Serde(e)
    }
}

impl From<ConfigError> for ModelError {
    fn from(e: ConfigError) -> Self {
        ModelError::InvalidParams(e)
    }
}

/// Errors raised by the summary-statistics reducers
///
/// A pdf with zero total mass has no expectation, quantiles, or modes;
/// returning zero would silently fabricate an estimate.
#[derive(Debug)]
pub enum StatsError {
    /// The pdf sums to zero (or the inputs are empty)
    ZeroMassPdf,

    /// Support and pdf vectors have different lengths
    LengthMismatch {
        /// Length of the support vector
        support: usize,
        /// Length of the pdf vector
        pdf: usize,
    },

    /// Requested quantile outside [0, 1]
    InvalidQuantile {
        /// The rejected quantile
        q: f64,
    },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::ZeroMassPdf => write!(f, "pdf has zero total mass"),
            StatsError::LengthMismatch { support, pdf } => {
                write!(f, "support length {} does not match pdf length {}", support, pdf)
            }
            StatsError::InvalidQuantile { q } => {
                write!(f, "quantile must lie in [0, 1], got {}", q)
            }
        }
    }
}

impl std::error::Error for StatsError {}

/// Errors raised by the validation harness
#[derive(Debug)]
pub enum ScoreError {
    /// The segment contained no observations at all
    EmptySegment,

    /// Every observation in the segment was unscorable
    NoScorableObservations {
        /// How many observations were skipped (rate outside edges, or an
        /// azimuth row with no model mass)
        n_skipped: usize,
    },
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::EmptySegment => write!(f, "segment contains no observations"),
            ScoreError::NoScorableObservations { n_skipped } => {
                write!(f, "no scorable observations in segment ({} skipped)", n_skipped)
            }
        }
    }
}

impl std::error::Error for ScoreError {}
