//! Validation-harness behavior on segments with known score outcomes.

use bearing_range_lut::{
    score_segment, score_segments, BinningScheme, LookupModel, Observation, ObservationTable,
    RateMode, SegmentObservation, TrackSegment,
};

/// Model whose marginal at bearing 88 is exactly [0, 0, 0.75, 0, 0.25].
fn split_model() -> LookupModel {
    let scheme = BinningScheme::new(
        5.0,
        vec![-10.0, -1.0, -0.1, 0.1, 1.0, 10.0],
        RateMode::Signed,
        500.0,
        20_000.0,
    )
    .unwrap();
    let mut rows = vec![
        Observation {
            bearing_deg: 88.0,
            rate_deg_s: 0.0, // rate bin 2
            range_m: 5_000.0,
        };
        3
    ];
    rows.push(Observation {
        bearing_deg: 88.0,
        rate_deg_s: 2.0, // rate bin 4
        range_m: 5_000.0,
    });
    LookupModel::build(&ObservationTable::from_records(rows), scheme).0
}

#[test]
fn identical_empirical_and_predicted_gives_zero_js() {
    let model = split_model();
    // empirical occupancy 3:1 over bins (2, 4) matches the model's marginal
    let mut obs = vec![
        SegmentObservation {
            bearing_deg: 88.0,
            rate_deg_s: 0.0,
        };
        3
    ];
    obs.push(SegmentObservation {
        bearing_deg: 88.0,
        rate_deg_s: 2.0,
    });

    let score = score_segment(&obs, &model).unwrap();
    assert_eq!(score.n_scored, 4);
    assert!(score.js_distance.abs() < 1e-9, "js = {}", score.js_distance);

    // per-observation Brier is the squared-residual sum against one-hot:
    // bin 2 true: (0.75-1)^2 + 0.25^2          = 0.125
    // bin 4 true: 0.75^2     + (0.25-1)^2      = 1.125
    let expected_brier = (3.0 * 0.125 + 1.125) / 4.0;
    assert!((score.avg_brier - expected_brier).abs() < 1e-9);
}

#[test]
fn mismatched_occupancy_gives_positive_js() {
    let model = split_model();
    // all observations in the minority bin
    let obs = vec![
        SegmentObservation {
            bearing_deg: 88.0,
            rate_deg_s: 2.0,
        };
        4
    ];
    let score = score_segment(&obs, &model).unwrap();
    assert!(score.js_distance > 0.1);
    assert!((score.avg_loglik - (0.25f64 + 1e-12).ln()).abs() < 1e-9);
}

#[test]
fn batch_scoring_keeps_segment_identity() {
    let model = split_model();
    let segments = vec![
        TrackSegment {
            vessel_id: 219_014_000,
            segment_id: 0,
            observations: vec![SegmentObservation {
                bearing_deg: 88.0,
                rate_deg_s: 0.0,
            }],
        },
        TrackSegment {
            vessel_id: 265_512_345,
            segment_id: 3,
            observations: vec![SegmentObservation {
                bearing_deg: 88.0,
                rate_deg_s: 2.0,
            }],
        },
        TrackSegment {
            vessel_id: 265_512_345,
            segment_id: 4,
            // entirely outside the model's coverage: dropped with a warning
            observations: vec![SegmentObservation {
                bearing_deg: 200.0,
                rate_deg_s: 0.0,
            }],
        },
    ];

    let reports = score_segments(&segments, &model);
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].vessel_id, 219_014_000);
    assert_eq!((reports[1].vessel_id, reports[1].segment_id), (265_512_345, 3));
}
