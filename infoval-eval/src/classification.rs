//! Threshold-based classification statistics.
//!
//! Every function here turns scores into hard predictions with a single
//! threshold (`score >= threshold` is a predicted event) and reduces the
//! result to one number. Rows are dropped pairwise: a denominator that only
//! needs the actual value counts every row whose actual is present, while
//! a numerator that compares the score also needs the score. This mirrors
//! how the statistics behave when each sum skips its own missing values.
//!
//! Zero denominators are not errors. They yield NaN, which callers must
//! check for.

use std::fmt;

use infoval_core::{Observations, EVENT};

/// Threshold used when callers have no better cutoff.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

#[inline]
fn is_event(actual: u8) -> bool {
    actual == EVENT
}

#[inline]
fn ratio(numer: usize, denom: usize) -> f64 {
    // 0 / 0 yields NaN.
    numer as f64 / denom as f64
}

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

/// True positive rate: events scored at or above `threshold`, over all events.
///
/// NaN when there are no events.
pub fn sensitivity(obs: &Observations, threshold: f64) -> f64 {
    let hits = obs
        .complete_pairs()
        .filter(|&(a, s)| is_event(a) && s >= threshold)
        .count();
    ratio(hits, obs.events())
}

/// True negative rate: non-events scored below `threshold`, over all
/// non-events.
///
/// NaN when there are no non-events.
pub fn specificity(obs: &Observations, threshold: f64) -> f64 {
    let hits = obs
        .complete_pairs()
        .filter(|&(a, s)| !is_event(a) && s < threshold)
        .count();
    ratio(hits, obs.non_events())
}

/// Positive predictive value: events among rows predicted as events.
///
/// NaN when no row is predicted as an event.
pub fn precision(obs: &Observations, threshold: f64) -> f64 {
    let predicted = obs
        .scores()
        .iter()
        .flatten()
        .filter(|&&s| s >= threshold)
        .count();
    let hits = obs
        .complete_pairs()
        .filter(|&(a, s)| is_event(a) && s >= threshold)
        .count();
    ratio(hits, predicted)
}

/// Negative predictive value: non-events among rows predicted as
/// non-events.
///
/// NaN when no row is predicted as a non-event.
pub fn npv(obs: &Observations, threshold: f64) -> f64 {
    let predicted = obs
        .scores()
        .iter()
        .flatten()
        .filter(|&&s| s < threshold)
        .count();
    let hits = obs
        .complete_pairs()
        .filter(|&(a, s)| !is_event(a) && s < threshold)
        .count();
    ratio(hits, predicted)
}

/// Youden's J statistic: `sensitivity + specificity - 1`.
pub fn youdens_index(obs: &Observations, threshold: f64) -> f64 {
    sensitivity(obs, threshold) + specificity(obs, threshold) - 1.0
}

/// Fraction of complete rows whose predicted class differs from the actual
/// class.
///
/// NaN when no row has both values present.
pub fn misclassification_error(obs: &Observations, threshold: f64) -> f64 {
    let (wrong, total) = obs
        .complete_pairs()
        .fold((0usize, 0usize), |(wrong, total), (a, s)| {
            let predicted_event = s >= threshold;
            let miss = usize::from(predicted_event != is_event(a));
            (wrong + miss, total + 1)
        });
    ratio(wrong, total)
}

/// Cohen's kappa between predicted and actual classes:
/// `(p_o - p_e) / (1 - p_e)`.
///
/// NaN when chance agreement is already perfect or no row is complete.
pub fn kappa_cohen(obs: &Observations, threshold: f64) -> f64 {
    BinaryConfusionMatrix::at_threshold(obs, threshold).kappa()
}

// ---------------------------------------------------------------------------
// Confusion matrix
// ---------------------------------------------------------------------------

/// Two-by-two confusion matrix at a single threshold.
///
/// Only rows with both an actual and a score are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryConfusionMatrix {
    /// Events predicted as events.
    pub tp: usize,
    /// Non-events predicted as events.
    pub fp: usize,
    /// Non-events predicted as non-events.
    pub tn: usize,
    /// Events predicted as non-events.
    pub fn_: usize,
}

impl BinaryConfusionMatrix {
    /// Count predictions made with `score >= threshold` against actuals.
    pub fn at_threshold(obs: &Observations, threshold: f64) -> Self {
        let mut cm = Self::default();
        for (a, s) in obs.complete_pairs() {
            match (is_event(a), s >= threshold) {
                (true, true) => cm.tp += 1,
                (false, true) => cm.fp += 1,
                (false, false) => cm.tn += 1,
                (true, false) => cm.fn_ += 1,
            }
        }
        cm
    }

    /// Total number of counted rows.
    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }

    /// Overall accuracy: `(TP + TN) / total`. NaN when empty.
    pub fn accuracy(&self) -> f64 {
        ratio(self.tp + self.tn, self.total())
    }

    /// Cohen's kappa from the four cells.
    pub fn kappa(&self) -> f64 {
        let n = self.total() as f64;
        let observed = (self.tp + self.tn) as f64 / n;
        let predicted_event = (self.tp + self.fp) as f64;
        let predicted_non_event = (self.tn + self.fn_) as f64;
        let actual_event = (self.tp + self.fn_) as f64;
        let actual_non_event = (self.tn + self.fp) as f64;
        let expected =
            (predicted_event * actual_event + predicted_non_event * actual_non_event) / (n * n);
        (observed - expected) / (1.0 - expected)
    }
}

impl fmt::Display for BinaryConfusionMatrix {
    /// Rows are predicted classes, columns are actual classes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>12} {:>8} {:>8}", "pred\\actual", "0", "1")?;
        writeln!(f, "{:>12} {:>8} {:>8}", "0", self.tn, self.fn_)?;
        write!(f, "{:>12} {:>8} {:>8}", "1", self.fp, self.tp)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
