//! Shared fixtures for the lookup-model integration tests.

use bearing_range_lut::{BinningScheme, LookupModel, Observation, ObservationTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The canonical scheme: 5-degree sectors, mirrored log-spaced rate edges
/// from 1e-5 to 10 deg/s, 500 m range rings up to 20 km.
pub fn canonical_scheme() -> BinningScheme {
    BinningScheme::with_log_rate_edges(5.0, -5.0, 1.0, 21, 500.0, 20_000.0).unwrap()
}

/// A broad random dataset covering many cells, deterministic per seed.
pub fn random_table(seed: u64, n: usize) -> ObservationTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..n)
        .map(|_| Observation {
            bearing_deg: rng.gen_range(0.0..360.0),
            // wide enough that some rows fall outside the edges and drop
            rate_deg_s: rng.gen_range(-15.0..15.0),
            // wide enough that some rows clamp into the last range bin
            range_m: rng.gen_range(0.0..25_000.0),
        })
        .collect();
    ObservationTable::from_records(rows)
}

/// A model built from the broad random dataset.
pub fn random_model(seed: u64, n: usize) -> LookupModel {
    LookupModel::build(&random_table(seed, n), canonical_scheme()).0
}
