/*!
# bearing-range-lut - Empirical range estimation for passive bearing sensors

A passive bearing sensor measures where a vessel is (bearing) and how fast
that direction changes (bearing rate), but not how far away it is. This
crate builds a non-parametric lookup model from historical trajectories
where ground-truth range is known, and answers run-time queries with
discrete probability distributions:

- `P(range | bearing, bearing_rate)` from the conditional cube
- `P(bearing_rate | bearing)` from the marginal cube

## Modules

- [`binning`] - Axis discretization ([`BinningScheme`], signed/absolute rate modes)
- [`builder`] - Observation table and single-pass count-cube accumulation
- [`normalize`] - Guarded count-to-probability normalization
- [`model`] - The persisted [`LookupModel`] (JSON save/load with shape validation)
- [`query`] - Per-observation distribution lookups
- [`stats`] - Expectation, quantiles, top-k modes over a returned distribution
- [`validate`] - Per-segment scoring against held-out ground truth
- [`sector`] - Coarse bearing x range occupancy statistics

## Example

```rust
use bearing_range_lut::{
    expectation, range_distribution, BinningScheme, LookupModel, Observation, ObservationTable,
};

// 5-degree sectors, mirrored log-spaced rate edges, 500 m range rings to 20 km
let scheme = BinningScheme::with_log_rate_edges(5.0, -5.0, 1.0, 21, 500.0, 20_000.0).unwrap();

let table = ObservationTable::from_records(vec![
    Observation { bearing_deg: 88.0, rate_deg_s: -0.042, range_m: 9_260.0 },
    Observation { bearing_deg: 88.0, rate_deg_s: -0.042, range_m: 9_310.0 },
    Observation { bearing_deg: 91.0, rate_deg_s: 0.8, range_m: 4_100.0 },
]);

let (model, summary) = LookupModel::build(&table, scheme);
assert_eq!(summary.rows_dropped, 0);

let dist = range_distribution(88.0, -0.042, &model).expect("covered cell");
let expected_range = expectation(&dist.range_centers, &dist.pdf).unwrap();
assert!((expected_range - 9_250.0).abs() < 500.0);
```

Queries into uncovered (bearing, rate) combinations return `None` rather
than an error or a fabricated distribution, so callers can tell "the model
has nothing to say here" apart from a genuine zero-probability bin.
*/

// ============================================================================
// Core modules
// ============================================================================

/// Axis discretization for bearing, bearing rate, and range
pub mod binning;

/// Observation table and count-cube accumulation
pub mod builder;

/// Error types
pub mod errors;

/// The persisted lookup model
pub mod model;

/// Count-to-probability normalization
pub mod normalize;

/// Per-observation distribution queries
pub mod query;

/// Bearing x range occupancy statistics
pub mod sector;

/// Summary statistics over (support, pdf) pairs
pub mod stats;

/// Held-out segment scoring
pub mod validate;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// Core types
pub use binning::{BinningScheme, RateMode};
pub use builder::{build_counts, BuildOutput, Observation, ObservationTable};
pub use model::{BuildSummary, LookupModel};

// Errors
pub use errors::{BuildError, ConfigError, ModelError, ScoreError, StatsError};

// Normalization
pub use normalize::{conditional_range_probs, marginal_rate_probs, rate_count_matrix};

// Queries and summaries
pub use query::{range_distribution, rate_distribution, RangeDistribution, RateDistribution};
pub use stats::{expectation, quantile, top_k};

// Validation
pub use validate::{
    js_distance, score_segment, score_segments, SegmentObservation, SegmentReport, SegmentScore,
    TrackSegment,
};

// Sector statistics
pub use sector::{sector_histogram, SectorHistogram};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
