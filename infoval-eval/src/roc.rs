//! ROC trajectory and area under it.
//!
//! The curve is traced by sweeping a fixed grid of thresholds from the top
//! of the score range down past its bottom. At each threshold the false
//! positive rate (`1 - specificity`) and true positive rate (`sensitivity`)
//! are recomputed from scratch, giving `O(thresholds * n)` work. Any two
//! scores closer together than one grid step are indistinguishable to the
//! curve.
//!
//! The area is the trapezoid sum over consecutive curve points. By default
//! it is then divided by `max(fpr) * max(tpr)`, the extent the curve
//! actually reaches, rather than by the unit square. That is not the
//! textbook AUC when the curve stops short of `(1, 1)`; use
//! [`AreaNormalization::UnitSquare`] for the unnormalized area.

use infoval_core::{ensure_same_length, InfovalError, Observations, Result};

use crate::classification::{sensitivity, specificity};

/// Default distance between consecutive thresholds.
pub const DEFAULT_STEP: f64 = 0.02;

/// What the accumulated area is divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AreaNormalization {
    /// Divide by `max(fpr) * max(tpr)` over the trajectory.
    #[default]
    ObservedExtent,
    /// Divide by 1.
    UnitSquare,
}

/// Configuration for [`roc_curve`] and [`auroc_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RocConfig {
    /// Distance between consecutive thresholds in the sweep.
    pub step: f64,
    /// Normalization applied to the integrated area.
    pub normalization: AreaNormalization,
}

impl Default for RocConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            normalization: AreaNormalization::default(),
        }
    }
}

impl RocConfig {
    fn validate(&self) -> Result<()> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(InfovalError::InvalidInput(format!(
                "threshold step must be finite and positive, got {}",
                self.step
            )));
        }
        Ok(())
    }
}

/// A single point on the ROC curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RocPoint {
    /// Score threshold at which this point is computed.
    pub threshold: f64,
    /// False positive rate: `1 - specificity`.
    pub fpr: f64,
    /// True positive rate (sensitivity).
    pub tpr: f64,
}

/// ROC trajectory with its normalized area.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RocCurve {
    /// Points in strictly decreasing threshold order.
    pub points: Vec<RocPoint>,
    /// Trapezoid area before normalization.
    pub raw_area: f64,
    /// Area after [`RocConfig::normalization`].
    pub auc: f64,
}

/// Compute the curve point for one threshold.
pub fn roc_point(obs: &Observations, threshold: f64) -> RocPoint {
    RocPoint {
        threshold,
        fpr: 1.0 - specificity(obs, threshold),
        tpr: sensitivity(obs, threshold),
    }
}

/// Largest number of steps a threshold grid may take.
pub const MAX_THRESHOLDS: usize = 1_000_000;

// Score bounds, rejecting infinite scores; no grid can bracket them.
pub(crate) fn finite_score_bounds(obs: &Observations) -> Result<Option<(f64, f64)>> {
    match obs.score_bounds() {
        Some((lo, hi)) if !lo.is_finite() || !hi.is_finite() => {
            Err(InfovalError::InvalidInput(format!(
                "scores must be finite, found range [{lo}, {hi}]"
            )))
        }
        bounds => Ok(bounds),
    }
}

// Steps needed to walk from `start` down to `end`, capped at MAX_THRESHOLDS.
// Under the cap, `step` is far above the float spacing at either bound, so
// consecutive grid values stay distinct.
pub(crate) fn grid_steps(start: f64, end: f64, step: f64) -> Result<usize> {
    let steps = ((start - end) / step).ceil();
    if !steps.is_finite() || steps > MAX_THRESHOLDS as f64 {
        return Err(InfovalError::InvalidInput(format!(
            "threshold grid from {start} to {end} by {step} needs {steps} steps, \
             more than {MAX_THRESHOLDS}"
        )));
    }
    Ok(steps.max(0.0) as usize)
}

/// Generate the strictly decreasing threshold grid.
///
/// Starts at `max(scores ∪ {1})` and walks down by `step` until the first
/// threshold at or below `min(scores ∪ {0}) - step`. Missing scores do not
/// affect the bounds. Each threshold is `start - k * step`, so rounding does
/// not accumulate along the sweep.
///
/// # Errors
///
/// Returns an error if `step` is not finite and positive, if any score is
/// infinite, or if the grid would need more than [`MAX_THRESHOLDS`] steps.
pub fn threshold_sweep(obs: &Observations, step: f64) -> Result<Vec<f64>> {
    RocConfig {
        step,
        ..RocConfig::default()
    }
    .validate()?;

    let (lo, hi) = finite_score_bounds(obs)?.unwrap_or((0.0, 1.0));
    let start = hi.max(1.0);
    let end = lo.min(0.0) - step;
    let steps = grid_steps(start, end, step)?;

    // One spare step absorbs rounding in `start - steps * step`.
    let mut thresholds = Vec::with_capacity(steps + 2);
    for k in 0..=steps + 1 {
        let t = start - k as f64 * step;
        thresholds.push(t);
        if t <= end {
            break;
        }
    }
    Ok(thresholds)
}

#[cfg(feature = "parallel")]
fn trace(obs: &Observations, thresholds: &[f64]) -> Vec<RocPoint> {
    use rayon::prelude::*;
    // Indexed collect keeps sweep order.
    thresholds
        .par_iter()
        .map(|&t| roc_point(obs, t))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn trace(obs: &Observations, thresholds: &[f64]) -> Vec<RocPoint> {
    thresholds.iter().map(|&t| roc_point(obs, t)).collect()
}

/// Trapezoid area under consecutive `(fpr, tpr)` points, in the given order.
///
/// Each segment contributes `(x2 - x1) * (y1 + y2) / 2`, the rectangle under
/// the first point plus the triangle up to the second. NaN coordinates make
/// the result NaN.
pub fn trapezoidal_area(points: &[RocPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| {
            let (a, b) = (&w[0], &w[1]);
            let segment = (b.fpr - a.fpr) * (a.tpr + b.tpr) / 2.0;
            log::trace!(
                "segment t={:.4}..{:.4} area={:.6}",
                a.threshold,
                b.threshold,
                segment
            );
            segment
        })
        .sum()
}

// f64::max drops NaN; the extent has to keep it.
fn nan_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.max(v)
        }
    })
}

/// Compute the ROC trajectory and its area.
///
/// A sample with only one class is not an error: the missing rate becomes
/// NaN at every threshold and so does the area.
///
/// # Errors
///
/// Returns an error if the configured step is not finite and positive, or
/// under the conditions listed on [`threshold_sweep`].
pub fn roc_curve(obs: &Observations, config: &RocConfig) -> Result<RocCurve> {
    config.validate()?;

    let thresholds = threshold_sweep(obs, config.step)?;
    let points = trace(obs, &thresholds);
    let raw_area = trapezoidal_area(&points);

    let auc = match config.normalization {
        AreaNormalization::ObservedExtent => {
            let extent =
                nan_max(points.iter().map(|p| p.fpr)) * nan_max(points.iter().map(|p| p.tpr));
            raw_area / extent
        }
        AreaNormalization::UnitSquare => raw_area,
    };

    log::debug!(
        "roc: {} observations, {} thresholds (step {}), raw area {:.6}, auc {:.6}",
        obs.len(),
        points.len(),
        config.step,
        raw_area,
        auc
    );

    Ok(RocCurve {
        points,
        raw_area,
        auc,
    })
}

/// Area under the ROC curve with a custom configuration.
///
/// Shorthand for `roc_curve(obs, config)?.auc`.
pub fn auroc_with(obs: &Observations, config: &RocConfig) -> Result<f64> {
    Ok(roc_curve(obs, config)?.auc)
}

/// Area under the ROC curve with the default step and normalization.
pub fn auroc(obs: &Observations) -> Result<f64> {
    auroc_with(obs, &RocConfig::default())
}

/// Area under the ROC curve for raw, possibly missing, aligned slices.
///
/// # Errors
///
/// Returns an error if the slices differ in length.
pub fn auroc_from_slices(actuals: &[Option<u8>], scores: &[Option<f64>]) -> Result<f64> {
    ensure_same_length(actuals.len(), scores.len())?;
    let obs = Observations::new(actuals.to_vec(), scores.to_vec())?;
    auroc(&obs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn sample(max_len: usize) -> impl Strategy<Value = (Vec<u8>, Vec<f64>)> {
        (2..=max_len).prop_flat_map(|len| {
            let actuals = proptest::collection::vec(0u8..=1, len);
            let scores = proptest::collection::vec(-0.5f64..1.5, len);
            (actuals, scores)
        })
    }

    proptest! {
        #[test]
        fn sweep_is_strictly_decreasing_and_brackets((actuals, scores) in sample(60)) {
            let obs = Observations::complete(&actuals, &scores).unwrap();
            let t = threshold_sweep(&obs, DEFAULT_STEP).unwrap();
            let (lo, hi) = obs.score_bounds().unwrap();
            prop_assert!(t.windows(2).all(|w| w[0] > w[1]));
            prop_assert!(t[0] >= hi.max(1.0));
            prop_assert!(*t.last().unwrap() <= lo.min(0.0) - DEFAULT_STEP);
        }

        #[test]
        fn two_class_auc_within_unit_interval((actuals, scores) in sample(60)) {
            prop_assume!(actuals.contains(&0) && actuals.contains(&1));
            let obs = Observations::complete(&actuals, &scores).unwrap();
            let auc = auroc(&obs).unwrap();
            prop_assert!((-1e-9..=1.0 + 1e-9).contains(&auc), "auc {}", auc);
        }

        #[test]
        fn rates_are_monotone_along_sweep((actuals, scores) in sample(60)) {
            prop_assume!(actuals.contains(&0) && actuals.contains(&1));
            let obs = Observations::complete(&actuals, &scores).unwrap();
            let curve = roc_curve(&obs, &RocConfig::default()).unwrap();
            for w in curve.points.windows(2) {
                prop_assert!(w[1].fpr >= w[0].fpr);
                prop_assert!(w[1].tpr >= w[0].tpr);
            }
        }
    }
}
