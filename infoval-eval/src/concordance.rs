//! Concordance and Somers' D over (event, non-event) score pairs.
//!
//! Every event row is paired with every non-event row. A pair is
//! concordant when the event scored higher, discordant when it scored
//! lower, and tied otherwise. Counting is done by sorting the non-event
//! scores once and locating each event score in them, so the cost is
//! `O(n log n)` rather than one comparison per pair.

use infoval_core::{Observations, EVENT};

/// Pair counts expressed as fractions of all pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Concordance {
    /// Fraction of pairs where the event scored higher.
    pub concordance: f64,
    /// Fraction of pairs where the event scored lower.
    pub discordance: f64,
    /// Fraction of pairs with equal scores.
    pub tied: f64,
    /// Number of (event, non-event) pairs.
    pub pairs: u64,
}

impl Concordance {
    /// Somers' D: `concordance - discordance`.
    pub fn somers_d(&self) -> f64 {
        self.concordance - self.discordance
    }
}

/// Compute concordance over every (event, non-event) pair of complete rows.
///
/// With no pairs, the fractions are NaN and `pairs` is zero.
pub fn concordance(obs: &Observations) -> Concordance {
    let mut ones = Vec::new();
    let mut zeros = Vec::new();
    for (a, s) in obs.complete_pairs() {
        if a == EVENT {
            ones.push(s);
        } else {
            zeros.push(s);
        }
    }
    zeros.sort_by(f64::total_cmp);

    let mut concordant = 0u64;
    let mut tied = 0u64;
    for &s in &ones {
        let below = zeros.partition_point(|&z| z < s);
        let at_or_below = zeros.partition_point(|&z| z <= s);
        concordant += below as u64;
        tied += (at_or_below - below) as u64;
    }

    let pairs = ones.len() as u64 * zeros.len() as u64;
    let discordant = pairs - concordant - tied;
    let total = pairs as f64;

    log::debug!(
        "concordance: {} events x {} non-events = {} pairs",
        ones.len(),
        zeros.len(),
        pairs
    );

    Concordance {
        concordance: concordant as f64 / total,
        discordance: discordant as f64 / total,
        tied: tied as f64 / total,
        pairs,
    }
}

/// Somers' D of the scores against the actuals.
///
/// Shorthand for `concordance(obs).somers_d()`.
pub fn somers_d(obs: &Observations) -> f64 {
    concordance(obs).somers_d()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn brute_force(actuals: &[u8], scores: &[f64]) -> (u64, u64, u64) {
        let (mut c, mut d, mut t) = (0, 0, 0);
        for (i, &ai) in actuals.iter().enumerate() {
            if ai != 1 {
                continue;
            }
            for (j, &aj) in actuals.iter().enumerate() {
                if aj == 1 {
                    continue;
                }
                if scores[i] > scores[j] {
                    c += 1;
                } else if scores[i] < scores[j] {
                    d += 1;
                } else {
                    t += 1;
                }
            }
        }
        (c, d, t)
    }

    proptest! {
        #[test]
        fn matches_pairwise_count(
            rows in proptest::collection::vec((0u8..=1, 0u8..10), 2..60)
        ) {
            let actuals: Vec<u8> = rows.iter().map(|r| r.0).collect();
            // Coarse scores so ties actually happen.
            let scores: Vec<f64> = rows.iter().map(|r| f64::from(r.1) / 10.0).collect();
            let obs = Observations::complete(&actuals, &scores).unwrap();
            let got = concordance(&obs);
            let (c, d, t) = brute_force(&actuals, &scores);
            prop_assert_eq!(got.pairs, c + d + t);
            if got.pairs > 0 {
                let n = got.pairs as f64;
                prop_assert!((got.concordance - c as f64 / n).abs() < 1e-12);
                prop_assert!((got.discordance - d as f64 / n).abs() < 1e-12);
                prop_assert!((got.tied - t as f64 / n).abs() < 1e-12);
            }
        }
    }
}
