//! Probability-mass and binning invariants over randomly built models.

use bearing_range_lut::{
    range_distribution, rate_distribution, BinningScheme, LookupModel, Observation,
    ObservationTable, RateMode,
};
use ndarray::{s, Axis};

use crate::utils::{canonical_scheme, random_model};

#[test]
fn prob_cube_rows_sum_to_zero_or_one() {
    let model = random_model(7, 5_000);
    let cube = model.prob_cube();
    let (n_az, n_rate, _) = cube.dim();

    for i in 0..n_az {
        for j in 0..n_rate {
            let row = cube.slice(s![i, j, ..]);
            assert!(row.iter().all(|p| p.is_finite() && (0.0..=1.0).contains(p)));
            let sum: f64 = row.iter().map(|&p| p as f64).sum();
            assert!(
                sum.abs() < 1e-5 || (sum - 1.0).abs() < 1e-5,
                "row ({}, {}) sums to {}",
                i,
                j,
                sum
            );
        }
    }
}

#[test]
fn prob_rate_cube_rows_sum_to_zero_or_one() {
    let model = random_model(11, 5_000);
    let cube = model.prob_rate_cube();

    for (i, row) in cube.axis_iter(Axis(0)).enumerate() {
        assert!(row.iter().all(|p| p.is_finite() && (0.0..=1.0).contains(p)));
        let sum: f64 = row.iter().map(|&p| p as f64).sum();
        assert!(
            sum.abs() < 1e-5 || (sum - 1.0).abs() < 1e-5,
            "azimuth row {} sums to {}",
            i,
            sum
        );
    }
}

#[test]
fn azimuth_wraps_a_full_turn() {
    let scheme = canonical_scheme();
    for k in 0..720 {
        let theta = k as f64 * 0.5;
        assert_eq!(scheme.azimuth_to_bin(theta), scheme.azimuth_to_bin(theta + 360.0));
        assert_eq!(scheme.azimuth_to_bin(theta), scheme.azimuth_to_bin(theta - 360.0));
    }
}

#[test]
fn queries_are_idempotent_within_a_bin() {
    let model = random_model(13, 20_000);
    let scheme = model.scheme();

    // -0.042 and -0.05 share the rate bin [-0.0794, -0.0398); 88 and 89.9
    // share the azimuth bin [85, 90)
    assert_eq!(scheme.rate_to_bin(-0.042), scheme.rate_to_bin(-0.05));
    assert_eq!(scheme.azimuth_to_bin(88.0), scheme.azimuth_to_bin(89.9));

    let a = range_distribution(88.0, -0.042, &model);
    let b = range_distribution(89.9, -0.05, &model);
    match (a, b) {
        (Some(a), Some(b)) => {
            assert_eq!(a.pdf, b.pdf);
            assert_eq!(a.counts, b.counts);
        }
        (None, None) => {}
        _ => panic!("within-bin perturbation changed the no-data outcome"),
    }
}

#[test]
fn single_cell_dataset_round_trips_to_unit_mass() {
    let scheme = BinningScheme::new(
        5.0,
        vec![-10.0, -1.0, -0.1, 0.1, 1.0, 10.0],
        RateMode::Signed,
        500.0,
        20_000.0,
    )
    .unwrap();
    let theta0 = 123.0;
    let omega0 = -0.5; // bin 1
    let table = ObservationTable::from_records(vec![
        Observation {
            bearing_deg: theta0,
            rate_deg_s: omega0,
            range_m: 7_300.0, // bin 14
        };
        250
    ]);
    let (model, summary) = LookupModel::build(&table, scheme);
    assert_eq!(summary.rows_dropped, 0);

    let i = model.scheme().azimuth_to_bin(theta0);
    let j = model.scheme().rate_to_bin(omega0).unwrap();
    let row = model.prob_cube().slice(s![i, j, ..]);
    assert_eq!(model.prob_cube()[[i, j, 14]], 1.0);
    let off_mass: f64 = row
        .iter()
        .enumerate()
        .filter(|(k, _)| *k != 14)
        .map(|(_, &p)| p as f64)
        .sum();
    assert_eq!(off_mass, 0.0);
}

#[test]
fn uncovered_cells_return_the_no_data_sentinel() {
    let scheme = canonical_scheme();
    let table = ObservationTable::from_records(vec![Observation {
        bearing_deg: 10.0,
        rate_deg_s: 0.001,
        range_m: 3_000.0,
    }]);
    let (model, _) = LookupModel::build(&table, scheme);

    // empty cell: covered bins, zero observations
    assert!(range_distribution(180.0, 0.001, &model).is_none());
    // rate outside the covered edges
    assert!(range_distribution(10.0, 50.0, &model).is_none());
    // azimuth row with no observations at all
    assert!(rate_distribution(180.0, &model).is_none());

    // the populated cell still answers
    assert!(range_distribution(10.0, 0.001, &model).is_some());
    assert!(rate_distribution(10.0, &model).is_some());
}
