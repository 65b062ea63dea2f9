//! Optimal probability cutoff search.
//!
//! Sweeps thresholds from the largest score down to the smallest and keeps
//! a diagnostics row per threshold. The cutoff picked depends on
//! [`OptimiseFor`].

use infoval_core::{InfovalError, Observations, Result};

use crate::classification::{misclassification_error, sensitivity, specificity};
use crate::roc::{finite_score_bounds, grid_steps};

/// Default distance between consecutive candidate cutoffs.
pub const DEFAULT_CUTOFF_STEP: f64 = 0.01;

/// What the cutoff search optimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptimiseFor {
    /// Highest cutoff that reaches the maximum sensitivity.
    Ones,
    /// Lowest cutoff that keeps the maximum specificity.
    Zeros,
    /// Cutoff maximizing Youden's index.
    Both,
    /// Cutoff minimizing the misclassification error.
    #[default]
    MisclassError,
}

/// Configuration for [`optimal_cutoff`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CutoffConfig {
    /// Distance between candidate cutoffs.
    pub step: f64,
    /// Objective.
    pub optimise_for: OptimiseFor,
}

impl Default for CutoffConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_CUTOFF_STEP,
            optimise_for: OptimiseFor::default(),
        }
    }
}

/// Diagnostics at one candidate cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CutoffRow {
    /// Candidate cutoff.
    pub threshold: f64,
    /// False positive rate: `1 - specificity`.
    pub fpr: f64,
    /// True positive rate (sensitivity).
    pub tpr: f64,
    /// `sensitivity + specificity - 1`.
    pub youdens_index: f64,
    /// True negative rate.
    pub specificity: f64,
    /// Fraction of complete rows predicted wrongly.
    pub misclassification_error: f64,
}

/// Result of a cutoff search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CutoffSearch {
    /// The selected cutoff.
    pub cutoff: f64,
    /// Objective used for the selection.
    pub optimise_for: OptimiseFor,
    /// One row per candidate, in decreasing threshold order.
    pub rows: Vec<CutoffRow>,
}

impl CutoffSearch {
    /// Diagnostics row of the selected cutoff.
    pub fn selected(&self) -> Option<&CutoffRow> {
        self.rows.iter().find(|r| r.threshold == self.cutoff)
    }
}

fn candidates(lo: f64, hi: f64, step: f64) -> Result<Vec<f64>> {
    let steps = grid_steps(hi, lo, step)?;
    let mut out = Vec::with_capacity(steps + 1);
    for k in 0..=steps {
        let t = hi - k as f64 * step;
        if t <= lo {
            break;
        }
        out.push(t);
    }
    // The smallest score is always a candidate.
    out.push(lo);
    Ok(out)
}

fn diagnostics(obs: &Observations, threshold: f64) -> CutoffRow {
    let tpr = sensitivity(obs, threshold);
    let spec = specificity(obs, threshold);
    CutoffRow {
        threshold,
        fpr: 1.0 - spec,
        tpr,
        youdens_index: tpr + spec - 1.0,
        specificity: spec,
        misclassification_error: misclassification_error(obs, threshold),
    }
}

// Index of the first row with the largest finite key.
fn first_max(rows: &[CutoffRow], key: impl Fn(&CutoffRow) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, row) in rows.iter().enumerate() {
        let v = key(row);
        if v.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

// Index of the last row with the largest finite key.
fn last_max(rows: &[CutoffRow], key: impl Fn(&CutoffRow) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, row) in rows.iter().enumerate() {
        let v = key(row);
        if v.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, b)| v >= b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Search for the cutoff that best satisfies `config.optimise_for`.
///
/// # Errors
///
/// Returns an error if the step is not finite and positive, if no score is
/// present, if a score is infinite, if the score range needs more than
/// [`MAX_THRESHOLDS`](crate::roc::MAX_THRESHOLDS) steps, or if the objective
/// is NaN at every candidate (for example optimizing sensitivity on a sample
/// without events).
pub fn optimal_cutoff(obs: &Observations, config: &CutoffConfig) -> Result<CutoffSearch> {
    if !config.step.is_finite() || config.step <= 0.0 {
        return Err(InfovalError::InvalidInput(format!(
            "cutoff step must be finite and positive, got {}",
            config.step
        )));
    }
    let (lo, hi) = finite_score_bounds(obs)?
        .ok_or_else(|| InfovalError::InvalidInput("no scores present".into()))?;

    let rows: Vec<CutoffRow> = candidates(lo, hi, config.step)?
        .into_iter()
        .map(|t| diagnostics(obs, t))
        .collect();

    let picked = match config.optimise_for {
        OptimiseFor::Ones => first_max(&rows, |r| r.tpr),
        OptimiseFor::Zeros => last_max(&rows, |r| r.specificity),
        OptimiseFor::Both => first_max(&rows, |r| r.youdens_index),
        OptimiseFor::MisclassError => first_max(&rows, |r| -r.misclassification_error),
    };
    let idx = picked.ok_or_else(|| {
        InfovalError::InvalidInput(format!(
            "{:?} is undefined at every candidate cutoff",
            config.optimise_for
        ))
    })?;
    let cutoff = rows[idx].threshold;

    log::debug!(
        "cutoff search: {} candidates, {:?} picked {:.4}",
        rows.len(),
        config.optimise_for,
        cutoff
    );

    Ok(CutoffSearch {
        cutoff,
        optimise_for: config.optimise_for,
        rows,
    })
}
