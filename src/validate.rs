//! Scoring of marginal rate predictions against held-out track segments
//!
//! For every observation in a segment the model's P(omega | theta) row is
//! scored against the true rate bin: log-likelihood (floored against
//! log(0)), Brier score against a one-hot encoding, and an accumulated
//! empirical-vs-predicted distribution pair summarized by the
//! Jensen-Shannon distance. One score record per (vessel, segment) pair;
//! aggregation across segments is an external reporting concern.

use crate::errors::ScoreError;
use crate::model::LookupModel;

/// Additive floor inside the log-likelihood, guards log(0)
const LOGLIK_FLOOR: f64 = 1e-12;

/// One held-out observation: the (theta, omega) pair the sensor would see
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentObservation {
    /// Bearing in degrees
    pub bearing_deg: f64,
    /// Signed bearing rate in deg/s (ground truth for the rate bin)
    pub rate_deg_s: f64,
}

/// Per-segment score summary
#[derive(Debug, Clone)]
pub struct SegmentScore {
    /// Observations in the segment
    pub n: usize,
    /// Observations that contributed to the scores
    pub n_scored: usize,
    /// Observations skipped (rate outside the edges, or an azimuth row
    /// with no model mass)
    pub n_skipped: usize,
    /// Mean log-likelihood of the true rate bin under the model
    pub avg_loglik: f64,
    /// Mean Brier score against the one-hot true bin
    pub avg_brier: f64,
    /// Jensen-Shannon distance between empirical bin occupancy and the
    /// averaged predicted distribution
    pub js_distance: f64,
}

/// A held-out trajectory segment tagged with its origin
#[derive(Debug, Clone)]
pub struct TrackSegment {
    /// Vessel identifier (MMSI)
    pub vessel_id: u64,
    /// Segment index within the vessel's track
    pub segment_id: u32,
    /// Observations in time order
    pub observations: Vec<SegmentObservation>,
}

/// Score for one (vessel, segment) pair
#[derive(Debug, Clone)]
pub struct SegmentReport {
    /// Vessel identifier (MMSI)
    pub vessel_id: u64,
    /// Segment index within the vessel's track
    pub segment_id: u32,
    /// The segment's score summary
    pub score: SegmentScore,
}

/// Score one segment's observations against the model's marginal rate cube
///
/// # Errors
/// [`crate::ScoreError::EmptySegment`] for an empty slice,
/// [`crate::ScoreError::NoScorableObservations`] when every observation had
/// to be skipped.
pub fn score_segment(
    observations: &[SegmentObservation],
    model: &LookupModel,
) -> Result<SegmentScore, ScoreError> {
    if observations.is_empty() {
        return Err(ScoreError::EmptySegment);
    }

    let scheme = model.scheme();
    let n_rate = scheme.n_rate();
    let mut counts_true = vec![0.0f64; n_rate];
    let mut sum_pred = vec![0.0f64; n_rate];
    let mut loglik_sum = 0.0f64;
    let mut brier_sum = 0.0f64;
    let mut n_scored = 0usize;
    let mut n_skipped = 0usize;

    for obs in observations {
        let az_i = scheme.azimuth_to_bin(obs.bearing_deg);
        let Some(rate_i) = scheme.rate_to_bin(obs.rate_deg_s) else {
            n_skipped += 1;
            continue;
        };

        let row = model.prob_rate_cube().row(az_i);
        let mass: f64 = row.iter().map(|&p| p as f64).sum();
        if !(mass > 0.0) {
            // the model has never seen this azimuth
            n_skipped += 1;
            continue;
        }
        // renormalize the stored f32 row before scoring
        let p_vec: Vec<f64> = row.iter().map(|&p| p as f64 / mass).collect();

        counts_true[rate_i] += 1.0;
        for (s, p) in sum_pred.iter_mut().zip(&p_vec) {
            *s += p;
        }

        loglik_sum += (p_vec[rate_i] + LOGLIK_FLOOR).ln();
        brier_sum += p_vec
            .iter()
            .enumerate()
            .map(|(j, &p)| {
                let truth = if j == rate_i { 1.0 } else { 0.0 };
                (p - truth) * (p - truth)
            })
            .sum::<f64>();
        n_scored += 1;
    }

    if n_scored == 0 {
        return Err(ScoreError::NoScorableObservations { n_skipped });
    }

    let total_true: f64 = counts_true.iter().sum();
    let total_pred: f64 = sum_pred.iter().sum();
    let q_true: Vec<f64> = counts_true.iter().map(|c| c / total_true).collect();
    let p_pred: Vec<f64> = sum_pred.iter().map(|s| s / total_pred).collect();

    Ok(SegmentScore {
        n: observations.len(),
        n_scored,
        n_skipped,
        avg_loglik: loglik_sum / n_scored as f64,
        avg_brier: brier_sum / n_scored as f64,
        js_distance: js_distance(&q_true, &p_pred),
    })
}

/// Score a batch of segments, one report per (vessel, segment) pair
///
/// Segments that cannot be scored (empty, or nothing scorable) are skipped
/// with a warning rather than failing the whole batch.
pub fn score_segments(segments: &[TrackSegment], model: &LookupModel) -> Vec<SegmentReport> {
    let mut reports = Vec::with_capacity(segments.len());
    for seg in segments {
        match score_segment(&seg.observations, model) {
            Ok(score) => reports.push(SegmentReport {
                vessel_id: seg.vessel_id,
                segment_id: seg.segment_id,
                score,
            }),
            Err(e) => {
                log::warn!(
                    "skipping segment (vessel={}, segment={}): {}",
                    seg.vessel_id,
                    seg.segment_id,
                    e
                );
            }
        }
    }
    reports
}

/// Jensen-Shannon distance between two discrete distributions
///
/// Square root of the JS divergence with natural-log KL terms against the
/// midpoint mixture. Zero-mass bins contribute nothing; identical inputs
/// give exactly 0, disjoint supports give sqrt(ln 2).
pub fn js_distance(p: &[f64], q: &[f64]) -> f64 {
    debug_assert_eq!(p.len(), q.len());

    let kl_to_mid = |a: &[f64], b: &[f64]| -> f64 {
        a.iter()
            .zip(b)
            .filter(|(&ai, _)| ai > 0.0)
            .map(|(&ai, &bi)| {
                let mid = 0.5 * (ai + bi);
                ai * (ai / mid).ln()
            })
            .sum()
    };

    let div = 0.5 * kl_to_mid(p, q) + 0.5 * kl_to_mid(q, p);
    // floating noise can push an identical-input divergence a hair negative
    div.max(0.0).sqrt()
}
