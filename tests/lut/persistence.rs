//! Save/load round trips over a large randomly built model.

use bearing_range_lut::{range_distribution, rate_distribution, LookupModel};

use crate::utils::random_model;

#[test]
fn round_trip_preserves_cubes_and_answers() {
    let model = random_model(101, 10_000);
    let path = std::env::temp_dir().join("bearing_range_lut_it_roundtrip.json");
    model.save(&path).unwrap();
    let loaded = LookupModel::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.scheme(), model.scheme());
    assert_eq!(loaded.counts_cube(), model.counts_cube());
    assert_eq!(loaded.prob_cube(), model.prob_cube());
    assert_eq!(loaded.prob_rate_cube(), model.prob_rate_cube());

    // answers are bit-identical through the round trip
    for (theta, omega) in [(88.0, -0.042), (10.0, 0.5), (271.0, -3.0), (359.9, 0.001)] {
        let before = range_distribution(theta, omega, &model);
        let after = range_distribution(theta, omega, &loaded);
        match (before, after) {
            (Some(a), Some(b)) => {
                assert_eq!(a.pdf, b.pdf);
                assert_eq!(a.counts, b.counts);
                assert_eq!(a.range_centers, b.range_centers);
            }
            (None, None) => {}
            _ => panic!("round trip changed the no-data outcome at ({}, {})", theta, omega),
        }

        let before = rate_distribution(theta, &model);
        let after = rate_distribution(theta, &loaded);
        match (before, after) {
            (Some(a), Some(b)) => {
                assert_eq!(a.pdf, b.pdf);
                assert_eq!(a.counts, b.counts);
            }
            (None, None) => {}
            _ => panic!("round trip changed the no-data outcome at theta {}", theta),
        }
    }
}

#[test]
fn truncated_blob_is_rejected() {
    let model = random_model(103, 500);
    let path = std::env::temp_dir().join("bearing_range_lut_it_truncated.json");
    model.save(&path).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, &json[..json.len() / 2]).unwrap();
    let err = LookupModel::load(&path);
    std::fs::remove_file(&path).ok();
    assert!(err.is_err());
}
