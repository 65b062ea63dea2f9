//! Paired `(actual, score)` observations.
//!
//! An [`Observations`] value holds two aligned sequences: the observed
//! outcome of each row and the score a model assigned to it. Either side of
//! a row may be missing. Nothing is filtered up front; each reduction
//! decides for itself which rows it can use, so two statistics over the same
//! data may see different subsets of rows.

use crate::error::{ensure_same_length, Result};

/// The actual value that marks an event (the positive class).
///
/// Every other present actual value counts as a non-event.
pub const EVENT: u8 = 1;

/// Aligned actuals and predicted scores.
///
/// Index `i` ties `actuals()[i]` to `scores()[i]`. NaN scores are stored as
/// missing. Infinite scores are kept; the threshold sweeps reject them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Observations {
    actuals: Vec<Option<u8>>,
    scores: Vec<Option<f64>>,
}

impl Observations {
    /// Pair actuals with scores, keeping missing values in place.
    ///
    /// # Errors
    ///
    /// Returns [`InfovalError::LengthMismatch`](crate::InfovalError::LengthMismatch)
    /// if the sequences differ in length.
    pub fn new(actuals: Vec<Option<u8>>, scores: Vec<Option<f64>>) -> Result<Self> {
        ensure_same_length(actuals.len(), scores.len())?;
        let scores = scores
            .into_iter()
            .map(|s| s.filter(|v| !v.is_nan()))
            .collect();
        Ok(Self { actuals, scores })
    }

    /// Pair fully observed actuals with scores.
    ///
    /// NaN scores are still treated as missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices differ in length.
    pub fn complete(actuals: &[u8], scores: &[f64]) -> Result<Self> {
        Self::new(
            actuals.iter().copied().map(Some).collect(),
            scores.iter().copied().map(Some).collect(),
        )
    }

    /// Number of rows, including rows with missing values.
    pub fn len(&self) -> usize {
        self.actuals.len()
    }

    /// Whether there are no rows at all.
    pub fn is_empty(&self) -> bool {
        self.actuals.is_empty()
    }

    /// The actual outcomes.
    pub fn actuals(&self) -> &[Option<u8>] {
        &self.actuals
    }

    /// The predicted scores.
    pub fn scores(&self) -> &[Option<f64>] {
        &self.scores
    }

    /// Iterate over `(actual, score)` rows in order.
    pub fn iter(&self) -> impl Iterator<Item = (Option<u8>, Option<f64>)> + '_ {
        self.actuals.iter().copied().zip(self.scores.iter().copied())
    }

    /// Iterate over rows where both values are present.
    pub fn complete_pairs(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.iter().filter_map(|(a, s)| Some((a?, s?)))
    }

    /// Number of rows whose actual is an event, regardless of score.
    pub fn events(&self) -> usize {
        self.actuals.iter().filter(|a| **a == Some(EVENT)).count()
    }

    /// Number of rows whose actual is present and not an event, regardless
    /// of score.
    pub fn non_events(&self) -> usize {
        self.actuals
            .iter()
            .filter(|a| matches!(a, Some(v) if *v != EVENT))
            .count()
    }

    /// `(min, max)` over present scores, or `None` when every score is missing.
    pub fn score_bounds(&self) -> Option<(f64, f64)> {
        self.scores.iter().flatten().fold(None, |acc, &s| match acc {
            None => Some((s, s)),
            Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InfovalError;

    #[test]
    fn length_mismatch_rejected() {
        let err = Observations::new(vec![Some(1), Some(0)], vec![Some(0.5)]).unwrap_err();
        assert_eq!(
            err,
            InfovalError::LengthMismatch {
                actuals: 2,
                scores: 1
            }
        );
    }

    #[test]
    fn complete_mismatch_rejected() {
        assert!(Observations::complete(&[1, 0, 1], &[0.1, 0.2]).is_err());
    }

    #[test]
    fn nan_score_is_missing() {
        let obs = Observations::complete(&[1, 0], &[f64::NAN, 0.3]).unwrap();
        assert_eq!(obs.scores(), &[None, Some(0.3)]);
    }

    #[test]
    fn class_counts_ignore_missing_actuals() {
        let obs = Observations::new(
            vec![Some(1), Some(0), None, Some(1), Some(2)],
            vec![Some(0.9), None, Some(0.4), Some(0.1), Some(0.3)],
        )
        .unwrap();
        assert_eq!(obs.events(), 2);
        // 0 and 2 are both non-events
        assert_eq!(obs.non_events(), 2);
        assert_eq!(obs.len(), 5);
    }

    #[test]
    fn complete_pairs_skip_missing() {
        let obs = Observations::new(
            vec![Some(1), None, Some(0)],
            vec![None, Some(0.4), Some(0.2)],
        )
        .unwrap();
        let pairs: Vec<_> = obs.complete_pairs().collect();
        assert_eq!(pairs, vec![(0, 0.2)]);
    }

    #[test]
    fn score_bounds_known() {
        let obs = Observations::new(
            vec![Some(1), Some(0), Some(0)],
            vec![Some(0.7), None, Some(-0.2)],
        )
        .unwrap();
        assert_eq!(obs.score_bounds(), Some((-0.2, 0.7)));
    }

    #[test]
    fn score_bounds_all_missing() {
        let obs = Observations::new(vec![Some(1)], vec![None]).unwrap();
        assert_eq!(obs.score_bounds(), None);
    }

    #[test]
    fn empty_is_valid() {
        let obs = Observations::complete(&[], &[]).unwrap();
        assert!(obs.is_empty());
        assert_eq!(obs.score_bounds(), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn class_counts_partition_present_actuals(
            actuals in proptest::collection::vec(proptest::option::of(0u8..3), 0..100)
        ) {
            let scores = vec![Some(0.5); actuals.len()];
            let obs = Observations::new(actuals.clone(), scores).unwrap();
            let present = actuals.iter().filter(|a| a.is_some()).count();
            prop_assert_eq!(obs.events() + obs.non_events(), present);
        }

        #[test]
        fn bounds_contain_every_score(
            scores in proptest::collection::vec(-10.0f64..10.0, 1..100)
        ) {
            let actuals = vec![1u8; scores.len()];
            let obs = Observations::complete(&actuals, &scores).unwrap();
            let (lo, hi) = obs.score_bounds().unwrap();
            for s in &scores {
                prop_assert!(lo <= *s && *s <= hi);
            }
        }
    }
}
