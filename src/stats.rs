//! Scalar and interval summaries of a (support, pdf) pair
//!
//! All reducers refuse zero-mass pdfs: returning zero for an empty
//! distribution would be indistinguishable from a genuine estimate.
//! The pdf must be evaluated in the same order as the support (monotonic
//! bin centers for range queries).

use crate::errors::StatsError;

fn check_inputs(support: &[f64], pdf: &[f32]) -> Result<f64, StatsError> {
    if support.len() != pdf.len() {
        return Err(StatsError::LengthMismatch {
            support: support.len(),
            pdf: pdf.len(),
        });
    }
    let mass: f64 = pdf.iter().map(|&p| p as f64).sum();
    if support.is_empty() || !(mass > 0.0) {
        return Err(StatsError::ZeroMassPdf);
    }
    Ok(mass)
}

/// Expectation of the support under the pdf
pub fn expectation(support: &[f64], pdf: &[f32]) -> Result<f64, StatsError> {
    check_inputs(support, pdf)?;
    Ok(support
        .iter()
        .zip(pdf)
        .map(|(&s, &p)| s * p as f64)
        .sum())
}

/// Inverse-CDF quantile with linear interpolation
///
/// Interpolates the support value at which the cumulative pdf first reaches
/// `q`, consistent with `interp(q, cumsum(pdf), support)`: below the first
/// cumulative point the result saturates at the first support value, above
/// the last point at the last.
pub fn quantile(q: f64, support: &[f64], pdf: &[f32]) -> Result<f64, StatsError> {
    if !(0.0..=1.0).contains(&q) {
        return Err(StatsError::InvalidQuantile { q });
    }
    check_inputs(support, pdf)?;

    let mut prev_cum = 0.0f64;
    let mut prev_support = support[0];
    for (&s, &p) in support.iter().zip(pdf) {
        let cum = prev_cum + p as f64;
        if cum >= q {
            // first cumulative point already covering q, or a flat segment
            if s == prev_support || cum == prev_cum {
                return Ok(s);
            }
            let t = (q - prev_cum) / (cum - prev_cum);
            return Ok(prev_support + t * (s - prev_support));
        }
        prev_cum = cum;
        prev_support = s;
    }
    // cumulative mass never reached q (f32 mass slightly below 1)
    Ok(*support.last().ok_or(StatsError::ZeroMassPdf)?)
}

/// The `k` support values carrying the most probability mass
///
/// Ties are broken by support order (earlier bins win). Asking for more
/// modes than bins returns them all.
pub fn top_k(k: usize, support: &[f64], pdf: &[f32]) -> Result<Vec<(f64, f64)>, StatsError> {
    check_inputs(support, pdf)?;

    let mut ranked: Vec<(usize, f64, f64)> = support
        .iter()
        .zip(pdf)
        .enumerate()
        .map(|(idx, (&s, &p))| (idx, s, p as f64))
        .collect();
    ranked.sort_by(|a, b| {
        b.2.partial_cmp(&a.2)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    Ok(ranked
        .into_iter()
        .take(k)
        .map(|(_, s, p)| (s, p))
        .collect())
}
